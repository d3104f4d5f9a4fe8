//! Canvas geometry: shared dimensions, centering, and input downscaling.

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Compute the shared canvas size for a set of images: the element-wise
/// maximum of all widths and all heights.
pub fn canvas_dimensions(images: &[RgbaImage]) -> (u32, u32) {
    images.iter().fold((0, 0), |(width, height), image| {
        (width.max(image.width()), height.max(image.height()))
    })
}

/// Paint an image centered on a transparent canvas of the given size.
///
/// The offset is `((width - w) / 2, (height - h) / 2)` with integer floor
/// division. Compositing is straight alpha-over, so partially transparent
/// source pixels blend onto the transparent background rather than
/// overwriting it.
///
/// The canvas must be at least as large as the image in both dimensions.
pub fn center_onto(image: RgbaImage, width: u32, height: u32) -> RgbaImage {
    debug_assert!(image.width() <= width && image.height() <= height);

    let x = (width - image.width()) / 2;
    let y = (height - image.height()) / 2;

    // RgbaImage::new zero-fills, which is fully transparent black.
    let mut canvas = RgbaImage::new(width, height);
    imageops::overlay(&mut canvas, &image, i64::from(x), i64::from(y));
    canvas
}

/// Downscale an image so its longer side does not exceed `bound`, preserving
/// aspect ratio. Images already within the bound are returned unchanged.
///
/// Uses Lanczos3 resampling. This trades output fidelity for a bounded
/// working set on oversized inputs.
pub fn downscale(image: RgbaImage, bound: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let longer = width.max(height);
    if longer <= bound || bound == 0 {
        return image;
    }

    let scale = f64::from(bound) / f64::from(longer);
    let new_width = ((f64::from(width) * scale).round() as u32).max(1);
    let new_height = ((f64::from(height) * scale).round() as u32).max(1);

    imageops::resize(&image, new_width, new_height, FilterType::Lanczos3)
}
