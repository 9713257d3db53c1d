// THEORY:
// The `distance_table` module performs the only per-frame precomputation the
// engine needs. Every rule in the gesture library asks questions of the form
// "how far apart are landmarks i and j, relative to the size of this hand?", so
// all C(21,2) = 210 pairwise distances are computed once, up front, and every rule
// reads from the same immutable tables.
//
// Key architectural principles:
// 1.  **Scale Reference First**: The wrist-to-middle-MCP distance (plus a small
//     epsilon so it is never zero) is the hand's yardstick. Dividing by it removes
//     the dependence on hand size and camera distance.
// 2.  **Canonical Pairs**: Storage is keyed by `(min, max)`, so `(i, j)` and
//     `(j, i)` are the same slot and symmetry holds by construction.
// 3.  **Flat, Fixed Cost**: Two 210-entry arrays. No hashing, no allocation, the
//     same amount of work every frame.
// 4.  **Pure**: `build` reads its input and nothing else. The tables are discarded
//     after the frame is classified.

use crate::core_modules::error::InvalidLandmarks;
use crate::core_modules::geometry::distance;
use crate::core_modules::landmark::{Landmark, LandmarkSet, LANDMARK_COUNT, MIDDLE_MCP, WRIST};

/// Number of unordered landmark pairs.
pub const PAIR_COUNT: usize = LANDMARK_COUNT * (LANDMARK_COUNT - 1) / 2;
/// Added to the scale reference so it is always strictly positive.
pub const SCALE_EPSILON: f64 = 1e-6;

/// Flat slot for the unordered pair `{i, j}`, or `None` when `i == j`.
pub const fn pair_index(i: usize, j: usize) -> Option<usize> {
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    if lo == hi || hi >= LANDMARK_COUNT {
        return None;
    }
    Some(lo * (2 * LANDMARK_COUNT - lo - 1) / 2 + (hi - lo - 1))
}

/// Raw and scale-normalized pairwise distances for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTables {
    raw: [f64; PAIR_COUNT],
    normalized: [f64; PAIR_COUNT],
    scale_ref: f64,
}

impl DistanceTables {
    pub fn build(landmarks: &LandmarkSet) -> Self {
        // --- 1. Scale Reference ---
        let scale_ref = distance(&landmarks[WRIST], &landmarks[MIDDLE_MCP]) + SCALE_EPSILON;

        // --- 2. Pairwise Distances ---
        let mut raw = [0.0; PAIR_COUNT];
        let mut normalized = [0.0; PAIR_COUNT];
        let mut slot = 0;
        for i in 0..LANDMARK_COUNT {
            for j in (i + 1)..LANDMARK_COUNT {
                let d = distance(&landmarks[i], &landmarks[j]);
                raw[slot] = d;
                normalized[slot] = d / scale_ref;
                slot += 1;
            }
        }

        Self {
            raw,
            normalized,
            scale_ref,
        }
    }

    /// Validates an untrusted point list and builds its tables.
    pub fn from_points(points: &[Landmark]) -> Result<Self, InvalidLandmarks> {
        Ok(Self::build(&LandmarkSet::from_slice(points)?))
    }

    /// Raw distance between `i` and `j`, in either order. Zero when `i == j`.
    pub fn raw(&self, i: usize, j: usize) -> f64 {
        pair_index(i, j).map_or(0.0, |slot| self.raw[slot])
    }

    /// Distance between `i` and `j` in units of the scale reference.
    pub fn normalized(&self, i: usize, j: usize) -> f64 {
        pair_index(i, j).map_or(0.0, |slot| self.normalized[slot])
    }

    /// Wrist-to-middle-MCP distance plus `SCALE_EPSILON`.
    pub fn scale_ref(&self) -> f64 {
        self.scale_ref
    }

    pub fn pair_count(&self) -> usize {
        self.raw.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::fixtures;

    #[test]
    fn pair_index_is_dense_and_canonical() {
        let mut seen = vec![false; PAIR_COUNT];
        for i in 0..LANDMARK_COUNT {
            for j in (i + 1)..LANDMARK_COUNT {
                let slot = pair_index(i, j).unwrap();
                assert_eq!(pair_index(j, i), Some(slot));
                assert!(!seen[slot], "slot {slot} assigned twice");
                seen[slot] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(pair_index(4, 4), None);
    }

    #[test]
    fn holds_every_pair() {
        let tables = DistanceTables::build(&fixtures::fist());
        assert_eq!(tables.pair_count(), 210);
    }

    #[test]
    fn lookups_are_symmetric() {
        let tables = DistanceTables::build(&fixtures::pointing());
        for i in 0..LANDMARK_COUNT {
            for j in 0..LANDMARK_COUNT {
                if i == j {
                    continue;
                }
                assert_eq!(tables.raw(i, j), tables.raw(j, i));
                assert_eq!(tables.normalized(i, j), tables.normalized(j, i));
            }
        }
    }

    #[test]
    fn normalizes_by_palm_length() {
        let set = fixtures::pointing();
        let tables = DistanceTables::build(&set);
        let expected_scale = distance(&set[WRIST], &set[MIDDLE_MCP]) + SCALE_EPSILON;
        assert_eq!(tables.scale_ref(), expected_scale);
        assert!((tables.normalized(WRIST, MIDDLE_MCP) - 1.0).abs() < 1e-4);
        let raw = tables.raw(4, 17);
        assert!((tables.normalized(4, 17) - raw / expected_scale).abs() < 1e-12);
    }

    #[test]
    fn collapsed_hand_hits_the_epsilon_floor() {
        let tables = DistanceTables::build(&fixtures::collapsed());
        assert_eq!(tables.scale_ref(), SCALE_EPSILON);
        assert!(tables.scale_ref() > 0.0);
        for i in 0..LANDMARK_COUNT {
            for j in (i + 1)..LANDMARK_COUNT {
                assert_eq!(tables.normalized(i, j), 0.0);
            }
        }
    }

    #[test]
    fn rejects_malformed_input() {
        let points = vec![Landmark::new(0.1, 0.1); 5];
        assert_eq!(
            DistanceTables::from_points(&points),
            Err(InvalidLandmarks::WrongCount { actual: 5 })
        );
    }
}
