pub mod apng;
pub mod gif;

use crate::{
    config::ExportType,
    error::{AnimError, AnimResult},
    frames::FrameSet,
};

pub use self::apng::ApngEncoder;
pub use self::gif::GifEncoder;

/// Turns resolved frames into one encoded animation.
pub trait FrameEncoder {
    fn export_type(&self) -> ExportType;

    fn encode(&self, frames: &FrameSet) -> AnimResult<Vec<u8>>;
}

pub fn encoder_for(kind: ExportType) -> Box<dyn FrameEncoder> {
    match kind {
        ExportType::Apng => Box::new(ApngEncoder),
        ExportType::Gif => Box::new(GifEncoder::default()),
    }
}

/// Shared input checks: at least one frame, all `size * size * 4` bytes.
pub(crate) fn check_frames(frames: &FrameSet) -> AnimResult<()> {
    if frames.is_empty() {
        return Err(AnimError::NoFrames);
    }
    if frames.size == 0 {
        return Err(AnimError::validation("frame size must be non-zero"));
    }
    let expected = frames.size as usize * frames.size as usize * 4;
    for (index, frame) in frames.frames.iter().enumerate() {
        if frame.pixels.len() != expected {
            return Err(AnimError::CorruptFrameData {
                index,
                len: frame.pixels.len(),
            });
        }
    }
    Ok(())
}

/// Round a delay to a whole number of `unit_ms` units that fits in a `u16`.
pub(crate) fn delay_units(delay_ms: f64, unit_ms: f64) -> u16 {
    let units = (delay_ms / unit_ms).round();
    if units.is_nan() || units <= 0.0 {
        0
    } else {
        units.min(f64::from(u16::MAX)) as u16
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{error::AnimErrorKind, frames::ResolvedFrame};

    #[test]
    fn delay_units_round_and_saturate() {
        assert_eq!(delay_units(200.0, 1.0), 200);
        assert_eq!(delay_units(66.6, 1.0), 67);
        assert_eq!(delay_units(125.0, 10.0), 13);
        assert_eq!(delay_units(-5.0, 1.0), 0);
        assert_eq!(delay_units(1e9, 1.0), u16::MAX);
    }

    #[test]
    fn check_frames_rejects_wrong_length() {
        let set = FrameSet {
            frames: vec![ResolvedFrame {
                pixels: Arc::new(vec![0; 7]),
                delay_ms: 50.0,
                tile_index: 0,
            }],
            size: 2,
        };
        let err = check_frames(&set).unwrap_err();
        assert_eq!(err.kind(), AnimErrorKind::CorruptFrameData);
    }

    #[test]
    fn check_frames_rejects_empty_set() {
        let set = FrameSet {
            frames: Vec::new(),
            size: 2,
        };
        assert_eq!(check_frames(&set).unwrap_err().kind(), AnimErrorKind::NoFrames);
    }

    #[test]
    fn encoder_for_matches_kind() {
        assert_eq!(encoder_for(ExportType::Apng).export_type(), ExportType::Apng);
        assert_eq!(encoder_for(ExportType::Gif).export_type(), ExportType::Gif);
    }
}
