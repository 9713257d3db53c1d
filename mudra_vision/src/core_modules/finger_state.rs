// THEORY:
// The `finger_state` module answers one question about one finger: is it
// extended or curled? It does so with the straightness ratio
//
//     chord / polyline = |MCP→TIP| / (|MCP→PIP| + |PIP→TIP|)
//
// computed from the normalized distance table. A straight finger has its joints
// on a line, so the chord equals the polyline and the ratio approaches 1.0. A
// curled finger folds its tip back toward its base: the polyline stays long, the
// chord collapses, and the ratio falls toward 0.
//
// Thresholds are supplied per call. Gesture rules disambiguate otherwise similar
// poses by demanding different amounts of straightness from the same finger.
//
// A finger whose polyline has zero length is degenerate. Its ratio is undefined,
// and it is reported as neither straight nor bent.

use crate::core_modules::distance_table::DistanceTables;
use crate::core_modules::landmark::Finger;

/// Threshold used when a rule does not tune straightness itself.
pub const DEFAULT_STRAIGHT_THRESHOLD: f64 = 0.9;

/// Chord-to-polyline ratio for an arbitrary `(mcp, pip, tip)` chain.
pub fn straightness_ratio(tables: &DistanceTables, mcp: usize, pip: usize, tip: usize) -> Option<f64> {
    let polyline = tables.normalized(mcp, pip) + tables.normalized(pip, tip);
    if polyline == 0.0 {
        return None;
    }
    Some(tables.normalized(mcp, tip) / polyline)
}

/// `true` when the chain's straightness ratio exceeds `threshold`.
pub fn is_finger_straight(tables: &DistanceTables, mcp: usize, pip: usize, tip: usize, threshold: f64) -> bool {
    straightness_ratio(tables, mcp, pip, tip).is_some_and(|ratio| ratio > threshold)
}

/// Finger-level view over one frame's distance tables.
#[derive(Debug, Clone, Copy)]
pub struct FingerState<'a> {
    tables: &'a DistanceTables,
}

impl<'a> FingerState<'a> {
    pub fn new(tables: &'a DistanceTables) -> Self {
        Self { tables }
    }

    pub fn straightness(&self, finger: Finger) -> Option<f64> {
        let (mcp, pip, tip) = finger.chain();
        straightness_ratio(self.tables, mcp, pip, tip)
    }

    pub fn is_straight(&self, finger: Finger, threshold: f64) -> bool {
        self.straightness(finger).is_some_and(|ratio| ratio > threshold)
    }

    /// The complement of `is_straight` for a well-formed finger. A degenerate
    /// finger is not bent either.
    pub fn is_bent(&self, finger: Finger, threshold: f64) -> bool {
        self.straightness(finger).is_some_and(|ratio| ratio <= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::fixtures;
    use crate::core_modules::landmark::{INDEX_MCP, INDEX_PIP, INDEX_TIP};

    const THRESHOLDS: [f64; 6] = [0.001, 0.5, 0.7, 0.9, 0.97, 0.999];

    #[test]
    fn colinear_finger_is_straight_below_one() {
        let tables = DistanceTables::build(&fixtures::pointing());
        let ratio = straightness_ratio(&tables, INDEX_MCP, INDEX_PIP, INDEX_TIP).unwrap();
        assert!((ratio - 1.0).abs() < 1e-9);
        for t in THRESHOLDS {
            assert!(is_finger_straight(&tables, INDEX_MCP, INDEX_PIP, INDEX_TIP, t), "threshold {t}");
        }
    }

    #[test]
    fn folded_finger_is_never_straight() {
        let tables = DistanceTables::build(&fixtures::index_folded_onto_mcp());
        for t in THRESHOLDS {
            assert!(!is_finger_straight(&tables, INDEX_MCP, INDEX_PIP, INDEX_TIP, t), "threshold {t}");
        }
        assert!(FingerState::new(&tables).is_bent(Finger::Index, 0.001));
    }

    #[test]
    fn curled_fingers_read_as_bent() {
        let tables = DistanceTables::build(&fixtures::pointing());
        let fingers = FingerState::new(&tables);
        assert!(fingers.is_straight(Finger::Index, 0.95));
        for finger in [Finger::Middle, Finger::Ring, Finger::Pinky] {
            assert!(fingers.is_bent(finger, 0.8), "{finger:?}");
            assert!(!fingers.is_straight(finger, 0.8), "{finger:?}");
        }
    }

    #[test]
    fn degenerate_finger_is_neither() {
        let tables = DistanceTables::build(&fixtures::collapsed());
        let fingers = FingerState::new(&tables);
        for finger in Finger::ALL {
            assert_eq!(fingers.straightness(finger), None);
            assert!(!fingers.is_straight(finger, DEFAULT_STRAIGHT_THRESHOLD));
            assert!(!fingers.is_bent(finger, DEFAULT_STRAIGHT_THRESHOLD));
        }
    }
}
