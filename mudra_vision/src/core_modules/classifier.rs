// THEORY:
// The `classifier` is the per-frame entry point of the engine. It owns a
// catalog and turns a `LandmarkSet` into exactly one answer: a label, or the
// "no gesture" sentinel.
//
// Key architectural principles:
// 1.  **First Match Wins**: Rules are evaluated in catalog order and evaluation
//     stops at the first match. Later rules are never run for that frame.
// 2.  **Fail Soft**: A rule that faults, or panics, is logged and counted as a
//     non-match. One broken rule never costs the frame its classification.
// 3.  **Stateless**: Nothing survives a call. Two calls on the same landmarks
//     always agree. The classifier is cheap to clone and safe to share.
// 4.  **Explainable**: `explain` runs every rule without short-circuiting and
//     reports each verdict, for diagnostics and tuning tools.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::core_modules::catalog::{GestureCatalog, GestureRule};
use crate::core_modules::distance_table::DistanceTables;
use crate::core_modules::error::{InvalidLandmarks, PredicateFault};
use crate::core_modules::gestures::RuleOutcome;
use crate::core_modules::landmark::{Landmark, LandmarkSet};

/// Displayed when no rule matches.
pub const NO_GESTURE_LABEL: &str = "No Mudra Detected";

/// The single answer produced for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Classification {
    Gesture(String),
    #[default]
    NoGesture,
}

impl Classification {
    pub fn label(&self) -> Option<&str> {
        match self {
            Classification::Gesture(label) => Some(label),
            Classification::NoGesture => None,
        }
    }

    pub fn is_gesture(&self) -> bool {
        matches!(self, Classification::Gesture(_))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or(NO_GESTURE_LABEL))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Matched,
    Rejected,
    Faulted(PredicateFault),
}

/// One rule's result in an `explain` report.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleVerdict {
    pub label: String,
    pub verdict: Verdict,
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Runs one rule, turning a panic inside it into a fault.
fn evaluate_contained(rule: &GestureRule, landmarks: &LandmarkSet, tables: &DistanceTables) -> RuleOutcome {
    catch_unwind(AssertUnwindSafe(|| rule.evaluate(landmarks, tables))).unwrap_or_else(|payload| {
        Err(PredicateFault::new(
            rule.label(),
            format!("panicked: {}", panic_message(payload.as_ref())),
        ))
    })
}

#[derive(Debug, Clone)]
pub struct Classifier {
    catalog: Arc<GestureCatalog>,
}

impl Classifier {
    pub fn new(catalog: GestureCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &GestureCatalog {
        &self.catalog
    }

    pub fn classify(&self, landmarks: &LandmarkSet) -> Classification {
        let tables = DistanceTables::build(landmarks);

        for rule in self.catalog.rules() {
            match evaluate_contained(rule, landmarks, &tables) {
                Ok(true) => {
                    trace!(label = rule.label(), "Rule matched");
                    return Classification::Gesture(rule.label().to_owned());
                }
                Ok(false) => {}
                Err(fault) => debug!(label = rule.label(), %fault, "Rule faulted; treating as no match"),
            }
        }
        Classification::NoGesture
    }

    /// Validates untrusted points and classifies them.
    pub fn classify_points(&self, points: &[Landmark]) -> Result<Classification, InvalidLandmarks> {
        Ok(self.classify(&LandmarkSet::from_slice(points)?))
    }

    /// Evaluates every rule, in catalog order, without stopping at a match.
    pub fn explain(&self, landmarks: &LandmarkSet) -> Vec<RuleVerdict> {
        let tables = DistanceTables::build(landmarks);
        self.catalog
            .rules()
            .iter()
            .map(|rule| RuleVerdict {
                label: rule.label().to_owned(),
                verdict: match evaluate_contained(rule, landmarks, &tables) {
                    Ok(true) => Verdict::Matched,
                    Ok(false) => Verdict::Rejected,
                    Err(fault) => Verdict::Faulted(fault),
                },
            })
            .collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(GestureCatalog::standard())
    }
}
