//! Timeline synthesis: ordered frames with per-frame display durations.

use image::RgbaImage;

use crate::blend::blend;
use crate::canvas::{canvas_dimensions, center_onto, downscale};
use crate::error::SynthesisError;

/// One animation frame and how long it is displayed.
#[derive(Debug, Clone)]
pub struct TimelineFrame {
    pub image: RgbaImage,
    pub duration_ms: u32,
}

/// Timing and sizing parameters for [`synthesize`].
#[derive(Debug, Clone)]
pub struct FadeOptions {
    /// Display duration of each source image, in milliseconds.
    pub base_duration_ms: u32,
    /// Number of interpolated frames inserted between consecutive images.
    pub fade_frames: u32,
    /// Display duration of each interpolated frame, in milliseconds.
    pub fade_duration_ms: u32,
    /// When set, inputs whose longer side exceeds this bound are
    /// Lanczos3-downscaled before centering. `None` keeps inputs as-is.
    pub max_dimension: Option<u32>,
}

impl Default for FadeOptions {
    fn default() -> Self {
        Self {
            base_duration_ms: 100,
            fade_frames: 10,
            fade_duration_ms: 100,
            max_dimension: None,
        }
    }
}

/// Build the full cross-fade timeline for an ordered set of images.
///
/// The canvas is the element-wise maximum of all input dimensions and every
/// emitted frame has exactly that size. The first image opens the timeline
/// at `base_duration_ms`; every consecutive pair `(prev, curr)` then
/// contributes `fade_frames` blended frames at weights `f / (fade_frames + 1)`
/// (strictly inside (0,1), so neither endpoint is duplicated as a fade),
/// each displayed for `fade_duration_ms`, followed by `curr` itself at
/// `base_duration_ms`.
///
/// The resulting length is `1 + (N - 1) * (fade_frames + 1)` for N inputs.
///
/// Source images are consumed; each one is dropped as soon as its centered
/// frame exists.
pub fn synthesize(
    images: Vec<RgbaImage>,
    options: &FadeOptions,
) -> Result<Vec<TimelineFrame>, SynthesisError> {
    if images.len() < 2 {
        return Err(SynthesisError::TooFewImages(images.len()));
    }

    let images: Vec<RgbaImage> = match options.max_dimension {
        Some(bound) => images
            .into_iter()
            .map(|image| downscale(image, bound))
            .collect(),
        None => images,
    };

    let (width, height) = canvas_dimensions(&images);
    let transitions = images.len() - 1;

    let mut centered = images
        .into_iter()
        .map(|image| center_onto(image, width, height));

    let mut timeline =
        Vec::with_capacity(1 + transitions * (options.fade_frames as usize + 1));

    // The length check above guarantees a first element.
    let Some(first) = centered.next() else {
        return Err(SynthesisError::TooFewImages(0));
    };
    let mut prev = first.clone();
    timeline.push(TimelineFrame {
        image: first,
        duration_ms: options.base_duration_ms,
    });

    for curr in centered {
        for f in 1..=options.fade_frames {
            let alpha = f as f32 / (options.fade_frames + 1) as f32;
            timeline.push(TimelineFrame {
                image: blend(&prev, &curr, alpha),
                duration_ms: options.fade_duration_ms,
            });
        }
        timeline.push(TimelineFrame {
            image: curr.clone(),
            duration_ms: options.base_duration_ms,
        });
        prev = curr;
    }

    Ok(timeline)
}
