use thiserror::Error;

/// Errors from timeline synthesis.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("at least 2 images required, got {0}")]
    TooFewImages(usize),
}

/// Errors from GIF assembly.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("cannot encode an empty timeline")]
    EmptyTimeline,

    #[error(
        "frame {index} is {found_width}x{found_height}, \
         expected {expected_width}x{expected_height}"
    )]
    DimensionMismatch {
        index: usize,
        expected_width: u32,
        expected_height: u32,
        found_width: u32,
        found_height: u32,
    },

    #[error("canvas {width}x{height} exceeds the GIF dimension limit of 65535")]
    CanvasTooLarge { width: u32, height: u32 },

    #[error("GIF encoding failed: {0}")]
    Encoding(#[from] gif::EncodingError),
}
