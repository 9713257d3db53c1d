use clap::Parser;
use mudra_vision::Classifier;
use mudra_vision_visualizer::{ServerConfig, start_server};
use tracing_subscriber::EnvFilter;

/// Serve live mudra classification over HTTP.
#[derive(Debug, Parser)]
#[command(name = "mudra-visualizer", version)]
struct Args {
    /// Bind address; overrides MV_BIND.
    #[arg(long)]
    bind: Option<String>,
    /// Directory of gesture illustrations; overrides MV_IMAGE_DIR.
    #[arg(long)]
    image_dir: Option<std::path::PathBuf>,
    /// Frames that may queue for the classifier; overrides MV_FRAME_CAPACITY.
    #[arg(long)]
    frame_capacity: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mudra_vision_visualizer=info,mudra_vision=info")),
        )
        .init();

    let args = Args::parse();
    let mut cfg = ServerConfig::from_env();
    if let Some(bind) = args.bind {
        cfg.bind_addr = bind;
    }
    if let Some(dir) = args.image_dir {
        cfg.image_dir = dir;
    }
    if let Some(capacity) = args.frame_capacity {
        cfg.pipeline.frame_capacity = capacity.max(1);
    }

    let handle = start_server(cfg, Classifier::default()).await?;
    // Park forever
    handle.await?;
    Ok(())
}
