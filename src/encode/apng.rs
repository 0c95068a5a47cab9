use crate::{
    config::ExportType,
    encode::{FrameEncoder, check_frames, delay_units},
    error::{AnimError, AnimResult},
    frames::FrameSet,
};

/// Lossless animated PNG, RGBA 8-bit, looping forever.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApngEncoder;

impl FrameEncoder for ApngEncoder {
    fn export_type(&self) -> ExportType {
        ExportType::Apng
    }

    #[tracing::instrument(skip(self, frames), fields(frames = frames.len(), size = frames.size))]
    fn encode(&self, frames: &FrameSet) -> AnimResult<Vec<u8>> {
        check_frames(frames)?;
        let num_frames = u32::try_from(frames.len())
            .map_err(|_| AnimError::validation("too many frames for an APNG"))?;

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, frames.size, frames.size);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_animated(num_frames, 0).map_err(png_err)?;

            let mut writer = encoder.write_header().map_err(png_err)?;
            for frame in &frames.frames {
                let (num, den) = frame_delay(frame.delay_ms);
                writer.set_frame_delay(num, den).map_err(png_err)?;
                writer.write_image_data(&frame.pixels).map_err(png_err)?;
            }
            writer.finish().map_err(png_err)?;
        }
        Ok(out)
    }
}

/// fcTL delay as a fraction of a second: milliseconds, or centiseconds past ~65 s.
fn frame_delay(delay_ms: f64) -> (u16, u16) {
    if delay_ms.round() <= f64::from(u16::MAX) {
        (delay_units(delay_ms, 1.0), 1000)
    } else {
        (delay_units(delay_ms, 10.0), 100)
    }
}

fn png_err(e: png::EncodingError) -> AnimError {
    AnimError::encode(format!("apng: {e}"))
}
