// Skeleton snapshots: the 21 landmarks and their bones drawn onto a square RGBA
// canvas, one PNG per frame.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use mudra_vision::{HAND_SKELETON, Landmark};

const BACKGROUND: Rgba<u8> = Rgba([16, 16, 24, 255]);
const BONE: Rgba<u8> = Rgba([200, 200, 200, 255]);
const JOINT: Rgba<u8> = Rgba([230, 60, 60, 255]);
const JOINT_RADIUS: i32 = 3;
/// Points more than this many canvas widths outside the frame are not drawn.
const MAX_OVERSHOOT: f32 = 1.0;

/// Canvas position of a landmark, or `None` when it lies too far off the frame
/// to draw.
fn to_pixel(point: &Landmark, size: u32) -> Option<(f32, f32)> {
    let extent = size.saturating_sub(1) as f32;
    let limit = -MAX_OVERSHOOT * extent..=(1.0 + MAX_OVERSHOOT) * extent;
    let (x, y) = (point.x as f32 * extent, point.y as f32 * extent);
    (limit.contains(&x) && limit.contains(&y)).then_some((x, y))
}

/// Draws one hand. Points near the frame are clipped at the canvas edge; points
/// far outside it are skipped along with their bones.
pub fn render_skeleton(points: &[Landmark], size: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(size, size, BACKGROUND);
    let pixels: Vec<_> = points.iter().map(|p| to_pixel(p, size)).collect();

    // --- 1. Bones ---
    for (a, b) in HAND_SKELETON {
        if let (Some(Some(pa)), Some(Some(pb))) = (pixels.get(a), pixels.get(b)) {
            draw_line_segment_mut(&mut canvas, *pa, *pb, BONE);
        }
    }

    // --- 2. Joints ---
    for (x, y) in pixels.iter().flatten() {
        draw_filled_circle_mut(&mut canvas, (x.round() as i32, y.round() as i32), JOINT_RADIUS, JOINT);
    }
    canvas
}
