pub mod decode;

pub use decode::{decode_base64_image, DecodeError};
