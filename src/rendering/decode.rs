//! Decoding inbound base64 image payloads into raster form.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::RgbaImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unsupported or corrupt image data: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode a base64-encoded image (PNG, JPEG, BMP, GIF, ...) into RGBA.
/// The container format is sniffed from the decoded bytes.
pub fn decode_base64_image(data: &str) -> Result<RgbaImage, DecodeError> {
    let bytes = BASE64.decode(data)?;
    let image = image::load_from_memory(&bytes)?;
    Ok(image.to_rgba8())
}
