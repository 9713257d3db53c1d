// THEORY:
// The `landmark` module is the input vocabulary of the engine. A `Landmark` is a
// "dumb" 2-D point in normalized image coordinates and a `LandmarkSet` is the
// fixed 21-point snapshot of one hand in one frame, as produced by an external
// hand tracker.
//
// Key architectural principles:
// 1.  **Fixed Topology**: Index 0 is the wrist; every finger owns four sequential
//     indices (MCP, PIP, DIP, TIP), except the thumb whose chain starts at the CMC
//     joint (index 1). The constants below name every index so that no rule has to
//     speak in bare numbers.
// 2.  **Validated Once**: A `LandmarkSet` can only exist with exactly 21 finite
//     points. Everything downstream may index it without bounds or NaN checks.
// 3.  **Planar Only**: A depth value may arrive from the tracker and is carried
//     along, but the geometry never reads it.

use crate::core_modules::error::InvalidLandmarks;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// The five fingertips, thumb first.
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Hand skeleton connections for rendering.
pub const HAND_SKELETON: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (INDEX_MCP, MIDDLE_MCP),
];

/// A single tracked keypoint. `x` grows to the right and `y` grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Depth from the tracker, if any. Ignored by every metric.
    #[cfg_attr(feature = "serde", serde(default))]
    pub z: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Landmark {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A finger, named by the `(mcp, pip, tip)` chain the straightness metric reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [Finger::Thumb, Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];
    /// The four non-thumb fingers.
    pub const LONG: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// Base, middle and end joints used for the chord/polyline ratio.
    /// The thumb skips its CMC joint and uses MCP, IP and TIP.
    pub const fn chain(self) -> (usize, usize, usize) {
        match self {
            Finger::Thumb => (THUMB_MCP, THUMB_IP, THUMB_TIP),
            Finger::Index => (INDEX_MCP, INDEX_PIP, INDEX_TIP),
            Finger::Middle => (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP),
            Finger::Ring => (RING_MCP, RING_PIP, RING_TIP),
            Finger::Pinky => (PINKY_MCP, PINKY_PIP, PINKY_TIP),
        }
    }

    pub const fn tip(self) -> usize {
        self.chain().2
    }
}

/// The validated 21-point pose of one hand for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Builds a set from exactly 21 points, rejecting non-finite coordinates.
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Result<Self, InvalidLandmarks> {
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(InvalidLandmarks::NonFinite { index, x: p.x, y: p.y });
        }
        Ok(Self { points })
    }

    pub fn from_slice(points: &[Landmark]) -> Result<Self, InvalidLandmarks> {
        let array: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| InvalidLandmarks::WrongCount { actual: points.len() })?;
        Self::new(array)
    }

    pub fn get(&self, index: usize) -> &Landmark {
        &self.points[index]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    /// Vector from landmark `from` to landmark `to`.
    pub fn vector(&self, from: usize, to: usize) -> (f64, f64) {
        let a = self.get(from);
        let b = self.get(to);
        (b.x - a.x, b.y - a.y)
    }
}

impl std::ops::Index<usize> for LandmarkSet {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl TryFrom<&[Landmark]> for LandmarkSet {
    type Error = InvalidLandmarks;

    fn try_from(points: &[Landmark]) -> Result<Self, Self::Error> {
        Self::from_slice(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_input() {
        let points = vec![Landmark::new(0.5, 0.5); 20];
        let err = LandmarkSet::from_slice(&points).unwrap_err();
        assert_eq!(err, InvalidLandmarks::WrongCount { actual: 20 });
    }

    #[test]
    fn rejects_long_input() {
        let points = vec![Landmark::new(0.5, 0.5); 22];
        assert!(matches!(
            LandmarkSet::from_slice(&points),
            Err(InvalidLandmarks::WrongCount { actual: 22 })
        ));
    }

    #[test]
    fn rejects_nan_coordinates() {
        let mut points = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        points[7].y = f64::NAN;
        let err = LandmarkSet::new(points).unwrap_err();
        assert!(matches!(err, InvalidLandmarks::NonFinite { index: 7, .. }));
    }

    #[test]
    fn accepts_out_of_frame_points() {
        let mut points = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        points[THUMB_TIP] = Landmark::new(-0.02, 1.01);
        assert!(LandmarkSet::new(points).is_ok());
    }

    #[test]
    fn finger_chains_follow_the_topology() {
        assert_eq!(Finger::Thumb.chain(), (2, 3, 4));
        assert_eq!(Finger::Index.chain(), (5, 6, 8));
        assert_eq!(Finger::Middle.chain(), (9, 10, 12));
        assert_eq!(Finger::Ring.chain(), (13, 14, 16));
        assert_eq!(Finger::Pinky.chain(), (17, 18, 20));
        assert_eq!(Finger::LONG.map(Finger::tip), [8, 12, 16, 20]);
    }
}
