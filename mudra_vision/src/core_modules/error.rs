// THEORY:
// The `error` module holds the two failure types the classification engine can
// produce.
//
// 1.  **InvalidLandmarks**: raised at the input boundary only, when a tracker hands
//     us something that is not a 21-point hand. Short input is rejected, never
//     padded.
// 2.  **PredicateFault**: the per-rule failure value. A rule that cannot produce a
//     verdict reports a fault; the classifier logs it and moves on to the next
//     rule. It never escapes a `classify` call.
//
// Degenerate geometry is not an error at all. It is resolved locally to a
// non-match by the metric that encountered it.

use thiserror::Error;

/// The landmark input could not be turned into a `LandmarkSet`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidLandmarks {
    #[error("expected 21 landmarks, got {actual}")]
    WrongCount { actual: usize },
    #[error("landmark {index} has a non-finite coordinate ({x}, {y})")]
    NonFinite { index: usize, x: f64, y: f64 },
}

/// A single rule failed to produce a verdict for this frame.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("rule `{label}` faulted: {reason}")]
pub struct PredicateFault {
    pub label: String,
    pub reason: String,
}

impl PredicateFault {
    pub fn new(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            reason: reason.into(),
        }
    }
}
