// THEORY:
// The `pipeline` module embeds the classifier in a live system: frames arrive
// from a capture loop at camera rate, any number of readers want the most recent
// answer, and none of them may slow the others down.
//
// Key architectural principles:
// 1.  **Single Writer, Many Readers**: One producer task owns the only
//     `ResultPublisher`. Readers hold cheap `ResultReader` clones. Both sides meet
//     at one mutex-guarded slot, so a reader sees the latest result or a stale
//     one, never a torn one.
// 2.  **Drop, Don't Queue**: Frames enter through a small bounded channel.
//     `FrameSender::offer` never waits: when the producer is behind, the frame is
//     discarded and counted. Every frame is classified on its own, so a gap costs
//     nothing but freshness.
// 3.  **Change Feed**: Streaming consumers do not poll. Every time the published
//     label changes, the new result is broadcast; a consumer that falls behind
//     skips ahead rather than stalling the producer.
// 4.  **Implicit Stop**: When every `FrameSender` is gone the channel closes and
//     the producer task ends. Classification never suspends, so there is nothing
//     in flight to cancel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use futures::Stream;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::core_modules::classifier::{Classification, Classifier};
use crate::core_modules::landmark::{Landmark, LandmarkSet};

/// Tunables for the live pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Frames that may wait for the producer before new ones are dropped.
    pub frame_capacity: usize,
    /// Label changes retained for slow streaming subscribers.
    pub change_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame_capacity: 4,
            change_capacity: 16,
        }
    }
}

/// One tracker sample. `None` means the tracker saw no hand in this frame.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LandmarkFrame {
    #[cfg_attr(feature = "serde", serde(default))]
    pub landmarks: Option<Vec<Landmark>>,
}

impl LandmarkFrame {
    pub fn hand(points: impl Into<Vec<Landmark>>) -> Self {
        Self {
            landmarks: Some(points.into()),
        }
    }

    pub fn empty() -> Self {
        Self { landmarks: None }
    }
}

/// The value held in the shared slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub classification: Classification,
    /// Number of frames classified so far. Zero before the first frame.
    pub sequence: u64,
    pub timestamp_millis: u64,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

/// The shared slot holding the most recent result.
#[derive(Debug)]
pub struct LatestResult {
    slot: Mutex<Published>,
}

impl LatestResult {
    /// Creates an empty slot and the only publisher for it.
    pub fn channel() -> (ResultPublisher, ResultReader) {
        let shared = Arc::new(LatestResult {
            slot: Mutex::new(Published {
                classification: Classification::NoGesture,
                sequence: 0,
                timestamp_millis: now_millis(),
            }),
        });
        (
            ResultPublisher {
                shared: Arc::clone(&shared),
            },
            ResultReader { shared },
        )
    }

    // Poisoning is ignored: every write replaces the whole value.
    fn lock(&self) -> MutexGuard<'_, Published> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Write side of the slot. There is exactly one per slot.
#[derive(Debug)]
pub struct ResultPublisher {
    shared: Arc<LatestResult>,
}

impl ResultPublisher {
    pub fn publish(&mut self, classification: Classification) -> Published {
        let mut slot = self.shared.lock();
        *slot = Published {
            classification,
            sequence: slot.sequence + 1,
            timestamp_millis: now_millis(),
        };
        slot.clone()
    }
}

/// Read side of the slot.
#[derive(Debug, Clone)]
pub struct ResultReader {
    shared: Arc<LatestResult>,
}

impl ResultReader {
    pub fn latest(&self) -> Published {
        self.shared.lock().clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferOutcome {
    Accepted,
    /// The producer is behind; this frame was discarded.
    Dropped,
    /// The producer has stopped.
    Closed,
}

/// Capture-side handle. Cloning it keeps the producer alive.
#[derive(Debug, Clone)]
pub struct FrameSender {
    frames: mpsc::Sender<LandmarkFrame>,
    dropped: Arc<AtomicU64>,
}

impl FrameSender {
    /// Hands a frame to the producer without waiting.
    pub fn offer(&self, frame: LandmarkFrame) -> OfferOutcome {
        match self.frames.try_send(frame) {
            Ok(()) => OfferOutcome::Accepted,
            Err(mpsc::error::TrySendError::Full(_)) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                trace!(total, "Producer busy; frame dropped");
                OfferOutcome::Dropped
            }
            Err(mpsc::error::TrySendError::Closed(_)) => OfferOutcome::Closed,
        }
    }

    /// Frames discarded so far by every clone of this sender.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// A running producer task plus the handles needed to feed and observe it.
#[derive(Debug)]
pub struct LivePipeline {
    sender: FrameSender,
    reader: ResultReader,
    changes: broadcast::Sender<Published>,
    task: JoinHandle<()>,
}

impl LivePipeline {
    /// Starts the producer task. Must be called from within a tokio runtime.
    pub fn spawn(config: PipelineConfig, classifier: Classifier) -> Self {
        let (frames_tx, frames_rx) = mpsc::channel(config.frame_capacity.max(1));
        let (changes, _) = broadcast::channel(config.change_capacity.max(1));
        let (publisher, reader) = LatestResult::channel();

        let task = tokio::spawn(run_producer(frames_rx, classifier, publisher, changes.clone()));
        info!(frame_capacity = config.frame_capacity, "Live pipeline started");

        Self {
            sender: FrameSender {
                frames: frames_tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            reader,
            changes,
            task,
        }
    }

    pub fn sender(&self) -> FrameSender {
        self.sender.clone()
    }

    pub fn reader(&self) -> ResultReader {
        self.reader.clone()
    }

    /// Stream of published results, one item per label change.
    pub fn subscribe(&self) -> impl Stream<Item = Published> + Send + 'static {
        change_stream(self.changes.subscribe())
    }

    /// Raw broadcast handle, for owners that need to subscribe later.
    pub fn changes(&self) -> broadcast::Sender<Published> {
        self.changes.clone()
    }

    /// Drops this handle's sender and waits for the producer to finish. Returns
    /// once every other `FrameSender` clone is gone as well.
    pub async fn shutdown(self) {
        let Self { sender, task, .. } = self;
        drop(sender);
        if let Err(err) = task.await {
            warn!(%err, "Producer task ended abnormally");
        }
    }
}

/// Adapts a broadcast receiver into a stream that skips over lagged items.
pub fn change_stream(receiver: broadcast::Receiver<Published>) -> impl Stream<Item = Published> + Send + 'static {
    futures::stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(published) => return Some((published, receiver)),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Change subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
}

fn classify_frame(classifier: &Classifier, frame: &LandmarkFrame) -> Classification {
    let Some(points) = frame.landmarks.as_deref() else {
        return Classification::NoGesture;
    };
    match LandmarkSet::from_slice(points) {
        Ok(set) => classifier.classify(&set),
        Err(err) => {
            warn!(%err, "Malformed landmark frame");
            Classification::NoGesture
        }
    }
}

async fn run_producer(
    mut frames: mpsc::Receiver<LandmarkFrame>,
    classifier: Classifier,
    mut publisher: ResultPublisher,
    changes: broadcast::Sender<Published>,
) {
    let mut last: Option<Classification> = None;

    while let Some(frame) = frames.recv().await {
        let published = publisher.publish(classify_frame(&classifier, &frame));

        if last.as_ref() != Some(&published.classification) {
            debug!(label = %published.classification, sequence = published.sequence, "Label changed");
            last = Some(published.classification.clone());
            // No subscribers is not an error.
            let _ = changes.send(published);
        }
    }

    info!("Frame channel closed; producer stopped");
}
