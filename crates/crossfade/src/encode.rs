//! Animated GIF assembly from a synthesized timeline.

use gif::{DisposalMethod, Encoder, Frame, Repeat};

use crate::error::EncodeError;
use crate::timeline::TimelineFrame;

/// NeuQuant sampling speed for per-frame palette quantization.
/// 1 is highest quality, 30 is fastest; 10 is a reasonable middle ground
/// for photographic frames.
const QUANTIZATION_SPEED: i32 = 10;

/// Serialize a timeline into a single looping animated GIF.
///
/// Every frame is quantized to its own adaptive palette of at most 256
/// colors without dithering, carries its own delay from the timeline entry,
/// and uses the "restore to background" disposal mode so players clear the
/// canvas between frames instead of compositing over residual pixels.
/// The animation loops forever.
///
/// GIF delays have centisecond resolution; millisecond durations are
/// rounded to the nearest centisecond.
///
/// All frames must share the dimensions of the first frame.
pub fn encode(timeline: Vec<TimelineFrame>) -> Result<Vec<u8>, EncodeError> {
    let first = timeline.first().ok_or(EncodeError::EmptyTimeline)?;
    let (width, height) = first.image.dimensions();

    for (index, entry) in timeline.iter().enumerate() {
        let (found_width, found_height) = entry.image.dimensions();
        if (found_width, found_height) != (width, height) {
            return Err(EncodeError::DimensionMismatch {
                index,
                expected_width: width,
                expected_height: height,
                found_width,
                found_height,
            });
        }
    }

    if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(EncodeError::CanvasTooLarge { width, height });
    }
    let (gif_width, gif_height) = (width as u16, height as u16);

    let mut output = Vec::new();
    {
        let mut encoder = Encoder::new(&mut output, gif_width, gif_height, &[])?;
        encoder.set_repeat(Repeat::Infinite)?;

        for entry in timeline {
            let duration_ms = entry.duration_ms;
            let mut pixels = entry.image.into_raw();

            let mut frame =
                Frame::from_rgba_speed(gif_width, gif_height, &mut pixels, QUANTIZATION_SPEED);
            frame.delay = delay_centiseconds(duration_ms);
            frame.dispose = DisposalMethod::Background;
            encoder.write_frame(&frame)?;
        }
    }

    Ok(output)
}

/// Convert a millisecond duration to GIF centisecond units, rounding to
/// nearest and saturating at the field maximum.
fn delay_centiseconds(duration_ms: u32) -> u16 {
    (duration_ms.saturating_add(5) / 10).min(u32::from(u16::MAX)) as u16
}
