//! crossfade: cross-fade frame synthesis and animated GIF assembly
//!
//! This library turns an ordered set of still images into a single looping
//! animation. Inputs of differing sizes are centered on a shared canvas,
//! consecutive images are bridged by linearly interpolated fade frames, and
//! the resulting timeline is serialized as an animated GIF with per-frame
//! display durations.
//!
//! # Quick Start
//!
//! ```no_run
//! use crossfade::{encode, synthesize, FadeOptions};
//! use image::RgbaImage;
//!
//! let a = image::open("a.png").unwrap().to_rgba8();
//! let b = image::open("b.png").unwrap().to_rgba8();
//!
//! let timeline = synthesize(vec![a, b], &FadeOptions::default()).unwrap();
//! let gif_bytes = encode(timeline).unwrap();
//! std::fs::write("out.gif", gif_bytes).unwrap();
//! ```
//!
//! # Pipeline
//!
//! The pipeline has two pure stages, connected by a [`TimelineFrame`]
//! sequence:
//!
//! 1. **Synthesis** ([`synthesize`]): compute the canvas (element-wise
//!    maximum of input dimensions), center every input on it over a
//!    transparent background, then emit one timeline entry per source image
//!    plus `fade_frames` interpolated entries per transition. Interpolation
//!    weights are `f / (fade_frames + 1)`, strictly between 0 and 1, so the
//!    endpoint images are never duplicated as fades.
//! 2. **Encoding** ([`encode`]): quantize each frame to its own adaptive
//!    256-color palette (no dithering) and write a looping GIF where every
//!    frame carries its own delay and the "restore to background" disposal
//!    mode. Background disposal makes each frame fully replace the previous
//!    one, which is required because frames carry their own transparency.
//!
//! Both stages consume their inputs: source images are dropped as soon as
//! their centered frame exists, and timeline frames are dropped as soon as
//! they are written to the encoder. Peak memory is bounded by the centered
//! frame set plus one in-flight frame.

pub mod blend;
pub mod canvas;
pub mod encode;
pub mod error;
pub mod timeline;


pub use blend::blend;
pub use canvas::{canvas_dimensions, center_onto, downscale};
pub use encode::encode;
pub use error::{EncodeError, SynthesisError};
pub use timeline::{synthesize, FadeOptions, TimelineFrame};
