pub mod generate;
pub mod headers;

pub use generate::{handle_generate, handle_preflight, GenerateRequest, GenerateResponse};
pub use generate::__path_handle_generate;
