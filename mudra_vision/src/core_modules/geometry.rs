// THEORY:
// The `geometry` module is the scalar kernel every higher layer is built on. It
// knows nothing about hands; it measures points and vectors.
//
// One policy governs degenerate input: a zero-length vector has no direction, so
// `angle_between` reports `None` rather than inventing a number. Callers decide
// what an undefined angle means for them. `angle_at_vertex` is the single
// documented exception: it is used where a collapsed joint should read as
// "maximally straight", so it maps `None` to `STRAIGHT_ANGLE_DEG` itself.

use crate::core_modules::landmark::Landmark;

/// Fallback angle for a collapsed vertex.
pub const STRAIGHT_ANGLE_DEG: f64 = 180.0;

/// Planar Euclidean distance between two landmarks. Depth is ignored.
pub fn distance(a: &Landmark, b: &Landmark) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Angle in degrees between two 2-D vectors, or `None` if either has zero length.
///
/// The cosine is clamped to `[-1, 1]` before `acos` so that rounding on nearly
/// parallel vectors cannot produce NaN.
pub fn angle_between(v1: (f64, f64), v2: (f64, f64)) -> Option<f64> {
    let mag1 = v1.0.hypot(v1.1);
    let mag2 = v2.0.hypot(v2.1);
    if mag1 == 0.0 || mag2 == 0.0 {
        return None;
    }
    let cos = ((v1.0 * v2.0 + v1.1 * v2.1) / (mag1 * mag2)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Angle at `b` between the rays `b→a` and `b→c`, in degrees.
pub fn angle_at_vertex(a: &Landmark, b: &Landmark, c: &Landmark) -> f64 {
    let ba = (a.x - b.x, a.y - b.y);
    let bc = (c.x - b.x, c.y - b.y);
    angle_between(ba, bc).unwrap_or(STRAIGHT_ANGLE_DEG)
}

/// Arithmetic mean of a set of landmarks.
pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Landmark>) -> Option<Landmark> {
    let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
    for p in points {
        sx += p.x;
        sy += p.y;
        n += 1;
    }
    (n > 0).then(|| Landmark::new(sx / n as f64, sy / n as f64))
}
