//! Linear cross-fade blending between two equally sized frames.

use image::RgbaImage;

/// Blend two frames with weight `alpha` toward `curr`.
///
/// Each channel (R, G, B and A) is interpolated independently:
/// `out = prev * (1 - alpha) + curr * alpha`, rounded to the nearest
/// 8-bit value. Both frames must share the same dimensions.
pub fn blend(prev: &RgbaImage, curr: &RgbaImage, alpha: f32) -> RgbaImage {
    debug_assert_eq!(prev.dimensions(), curr.dimensions());
    debug_assert!((0.0..=1.0).contains(&alpha));

    let (width, height) = prev.dimensions();
    let mut out = RgbaImage::new(width, height);

    for (target, (a, b)) in out
        .pixels_mut()
        .zip(prev.pixels().zip(curr.pixels()))
    {
        for channel in 0..4 {
            target.0[channel] = lerp_channel(a.0[channel], b.0[channel], alpha);
        }
    }

    out
}

fn lerp_channel(a: u8, b: u8, alpha: f32) -> u8 {
    let blended = f32::from(a) + (f32::from(b) - f32::from(a)) * alpha;
    blended.round() as u8
}
