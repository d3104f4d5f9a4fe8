//! Shared fixtures: tiny encoded images and request bodies.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{DynamicImage, Rgba, RgbaImage};
use std::io::Cursor;

pub mod users {
    pub const ALICE: &str = "user-alice";
    pub const BOB: &str = "user-bob";
}

/// A solid-color PNG, base64-encoded the way the API expects.
pub fn png_image_b64(width: u32, height: u32, pixel: [u8; 4]) -> String {
    let image = RgbaImage::from_pixel(width, height, Rgba(pixel));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("PNG encoding failed");
    BASE64.encode(&bytes)
}

/// Two distinct small images, enough for a minimal valid request.
pub fn two_images() -> Vec<String> {
    vec![
        png_image_b64(16, 16, [255, 0, 0, 255]),
        png_image_b64(16, 16, [0, 0, 255, 255]),
    ]
}

/// Request body with default timings.
pub fn generate_body(images: &[String]) -> String {
    serde_json::json!({ "images": images }).to_string()
}

/// Request body with explicit timings.
pub fn generate_body_with(
    images: &[String],
    duration: u32,
    fade_frames: u32,
    fade_duration: u32,
) -> String {
    serde_json::json!({
        "images": images,
        "duration": duration,
        "fade_frames": fade_frames,
        "fade_duration": fade_duration,
    })
    .to_string()
}

/// Decode a GIF and return each frame's delay in centiseconds.
pub fn gif_frame_delays(bytes: &[u8]) -> Vec<u16> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options
        .read_info(Cursor::new(bytes.to_vec()))
        .expect("not a decodable GIF");

    let mut delays = Vec::new();
    while let Some(frame) = decoder.read_next_frame().expect("GIF frame read failed") {
        delays.push(frame.delay);
    }
    delays
}
