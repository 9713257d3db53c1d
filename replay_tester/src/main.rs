// THEORY:
// The replay tester runs recorded tracker output through the same classifier the
// live server uses, one frame at a time and fully offline. It is the tuning
// loop for rule thresholds: record a session once, replay it after every change.
//
// Key architectural principles:
// 1.  **Same Engine, No Server**: Frames are classified by `Classifier` directly.
//     No pipeline task is involved, so results are in file order and repeatable.
// 2.  **Bad Lines Are Reported, Not Fatal**: A line that fails to parse or a hand
//     that fails validation is logged with its line number and counted.

mod render;

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use mudra_vision::pipeline::LandmarkFrame;
use mudra_vision::{Classification, Classifier, LandmarkSet, Verdict, describe};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay recorded landmark frames through the mudra classifier")]
struct Args {
    /// JSON Lines file, one `{"landmarks": [...]}` object per frame
    input: PathBuf,

    /// Print every rule's verdict for each frame
    #[arg(long)]
    explain: bool,

    /// Write a skeleton PNG per frame into this directory
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Snapshot edge length in pixels
    #[arg(long, default_value_t = 480)]
    snapshot_size: u32,
}

/// Per-label counts over a whole replay.
#[derive(Debug, Default)]
struct Summary {
    frames: usize,
    malformed: usize,
    labels: BTreeMap<String, usize>,
}

impl Summary {
    fn record(&mut self, classification: &Classification) {
        self.frames += 1;
        *self.labels.entry(classification.to_string()).or_default() += 1;
    }
}

/// Blank lines are skipped.
fn parse_line(line: &str) -> Result<Option<LandmarkFrame>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let frame = serde_json::from_str(trimmed).context("not a landmark frame")?;
    Ok(Some(frame))
}

/// A frame without a hand has no landmark set.
fn landmark_set(frame: &LandmarkFrame) -> Result<Option<LandmarkSet>> {
    match &frame.landmarks {
        None => Ok(None),
        Some(points) => Ok(Some(LandmarkSet::from_slice(points)?)),
    }
}

fn print_explain(classifier: &Classifier, set: &LandmarkSet) {
    for verdict in classifier.explain(set) {
        let mark = match &verdict.verdict {
            Verdict::Matched => "match".to_string(),
            Verdict::Rejected => "-".to_string(),
            Verdict::Faulted(fault) => format!("fault: {fault}"),
        };
        println!("    {:<28} {mark}", verdict.label);
    }
}

fn save_snapshot(dir: &Path, index: usize, frame: &LandmarkFrame, size: u32) -> Result<()> {
    let points = frame.landmarks.as_deref().unwrap_or_default();
    let path = dir.join(format!("frame_{index:05}.png"));
    render::render_skeleton(points, size)
        .save(&path)
        .with_context(|| format!("writing snapshot {}", path.display()))
}

fn main() -> Result<()> {
    // --- 1. Argument Parsing & Setup ---
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("replay_tester=info")))
        .init();

    let input = File::open(&args.input).with_context(|| format!("opening {}", args.input.display()))?;
    if let Some(dir) = &args.snapshot_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let classifier = Classifier::default();
    for dead in classifier.catalog().dead_aliases() {
        warn!(label = %dead.label, shadowed_by = %dead.shadowed_by, "Rule can never be reported");
    }
    info!(input = %args.input.display(), rules = classifier.catalog().len(), "Starting replay");

    // --- 2. Frame Processing Loop ---
    let mut summary = Summary::default();
    for (line_no, line) in BufReader::new(input).lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.with_context(|| format!("reading line {line_no}"))?;

        let frame = match parse_line(&line) {
            Ok(Some(frame)) => frame,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = line_no, error = %format!("{err:#}"), "Skipping malformed line");
                summary.malformed += 1;
                continue;
            }
        };

        let set = match landmark_set(&frame) {
            Ok(set) => set,
            Err(err) => {
                warn!(line = line_no, %err, "Invalid hand; reporting no gesture");
                None
            }
        };
        let classification = set.as_ref().map(|s| classifier.classify(s)).unwrap_or_default();

        println!("frame {:>5} (line {line_no}): {classification}", summary.frames);
        if args.explain {
            if let Some(set) = &set {
                print_explain(&classifier, set);
            }
        }
        if let Some(dir) = &args.snapshot_dir {
            save_snapshot(dir, summary.frames, &frame, args.snapshot_size)?;
        }
        summary.record(&classification);
    }

    // --- 3. Summary ---
    println!("\nProcessing complete: {} frames, {} malformed lines", summary.frames, summary.malformed);
    for (label, count) in &summary.labels {
        let meaning = describe(label).meaning;
        println!("  {count:>5}  {label}  ({meaning})");
    }
    Ok(())
}
