// THEORY:
// The visualizer is a thin HTTP front end over the live pipeline. Frames are
// posted in by a capture client, classified by the single producer task, and any
// number of request handlers read the latest result or stream label changes.
//
// Key architectural principles:
// 1.  **Library Owns the Model**: Handlers never classify. They offer frames to a
//     `FrameSender` and read from a `ResultReader`; the concurrency contract lives
//     in `mudra_vision::pipeline`.
// 2.  **Config From Environment**: `ServerConfig::from_env` layers `MV_*`
//     variables over the defaults so the standalone binary and embedders share
//     one source of truth.
// 3.  **Feature-Gated Web Stack**: The axum surface is compiled only with the
//     `web` feature.

use std::path::PathBuf;
use std::sync::Arc;

use mudra_vision::GestureCatalog;
use mudra_vision::pipeline::{FrameSender, LivePipeline, PipelineConfig, Published, ResultReader};
use tokio::sync::broadcast;
use tracing::warn;

#[cfg(feature = "web")]
pub mod routes;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_IMAGE_DIR: &str = "images";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Directory served under `/images/`.
    pub image_dir: PathBuf,
    pub pipeline: PipelineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `MV_BIND`, `MV_IMAGE_DIR` and `MV_FRAME_CAPACITY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(bind) = lookup("MV_BIND").filter(|v| !v.is_empty()) {
            cfg.bind_addr = bind;
        }
        if let Some(dir) = lookup("MV_IMAGE_DIR").filter(|v| !v.is_empty()) {
            cfg.image_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("MV_FRAME_CAPACITY") {
            match raw.parse::<usize>() {
                Ok(capacity) if capacity > 0 => cfg.pipeline.frame_capacity = capacity,
                _ => warn!(value = %raw, "Ignoring invalid MV_FRAME_CAPACITY"),
            }
        }
        cfg
    }
}

/// Everything a request handler may touch.
#[derive(Clone)]
pub struct AppState {
    pub frames: FrameSender,
    pub results: ResultReader,
    pub changes: broadcast::Sender<Published>,
    pub labels: Arc<[String]>,
    pub image_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(pipeline: &LivePipeline, catalog: &GestureCatalog, image_dir: PathBuf) -> Self {
        Self {
            frames: pipeline.sender(),
            results: pipeline.reader(),
            changes: pipeline.changes(),
            labels: catalog.labels().map(str::to_owned).collect(),
            image_dir: Arc::new(image_dir),
        }
    }
}

#[cfg(feature = "web")]
pub async fn start_server(
    cfg: ServerConfig,
    classifier: mudra_vision::Classifier,
) -> anyhow::Result<tokio::task::JoinHandle<()>> {
    use anyhow::Context;
    use tracing::{error, info};

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("binding {}", cfg.bind_addr))?;

    let pipeline = LivePipeline::spawn(cfg.pipeline.clone(), classifier.clone());
    let state = AppState::new(&pipeline, classifier.catalog(), cfg.image_dir.clone());
    let app = routes::router(state);

    info!(
        addr = %cfg.bind_addr,
        image_dir = %cfg.image_dir.display(),
        rules = classifier.catalog().len(),
        "Visualizer server listening"
    );

    let server = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            error!(%err, "Server stopped");
        }
        pipeline.shutdown().await;
    });

    Ok(server)
}

#[cfg(not(feature = "web"))]
pub async fn start_server(
    _cfg: ServerConfig,
    _classifier: mudra_vision::Classifier,
) -> anyhow::Result<tokio::task::JoinHandle<()>> {
    Err(anyhow::anyhow!("web feature not enabled for mudra_vision_visualizer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.image_dir, PathBuf::from(DEFAULT_IMAGE_DIR));
        assert_eq!(cfg.pipeline.frame_capacity, PipelineConfig::default().frame_capacity);
    }

    #[test]
    fn environment_overrides() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("MV_BIND", "0.0.0.0:8080"),
            ("MV_IMAGE_DIR", "/srv/mudras"),
            ("MV_FRAME_CAPACITY", "2"),
        ]));
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.image_dir, PathBuf::from("/srv/mudras"));
        assert_eq!(cfg.pipeline.frame_capacity, 2);
    }

    #[test]
    fn invalid_capacity_is_ignored() {
        for raw in ["0", "lots", "-3"] {
            let cfg = ServerConfig::from_lookup(lookup(&[("MV_FRAME_CAPACITY", raw)]));
            assert_eq!(cfg.pipeline.frame_capacity, PipelineConfig::default().frame_capacity);
        }
    }
}
