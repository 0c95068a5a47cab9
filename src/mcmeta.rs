//! Animation descriptor model: the `.mcmeta` JSON sidecar and the core's view of it.

/// Top-level `.mcmeta` document. Only the `animation` section is read.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Mcmeta {
    pub animation: McmetaAnimation,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct McmetaAnimation {
    /// Base display time per frame, in ticks.
    pub frametime: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<FrameEntry>>,
}

/// One entry of a custom playback order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FrameEntry {
    /// Bare tile index, always played for the base duration.
    Index(#[serde(deserialize_with = "whole_index")] usize),
    /// Tile index with an optional per-entry duration in ticks.
    Timed {
        #[serde(deserialize_with = "whole_index")]
        index: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<f64>,
    },
}

/// JSON numbers carry no integer type, so `1.0` names tile 1 just like `1`.
fn whole_index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::{Deserialize, de::Error};

    let raw = f64::deserialize(deserializer)?;
    if raw >= 0.0 && raw.fract() == 0.0 && raw <= usize::MAX as f64 {
        Ok(raw as usize)
    } else {
        Err(D::Error::custom(format!(
            "frame index must be a non-negative whole number, got {raw}"
        )))
    }
}

impl FrameEntry {
    pub fn index(&self) -> usize {
        match *self {
            Self::Index(index) | Self::Timed { index, .. } => index,
        }
    }
}

/// Timing rules consumed by the frame extractor.
///
/// Frame indices are a caller contract: each must be below the sheet's tile
/// count. They are not checked up front; assembly reports the first one that
/// misses.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationDescriptor {
    /// Default ticks per tile. `None` defers to the caller's override.
    pub base_duration: Option<f64>,
    /// Custom playback order. `None` plays every tile once, top to bottom.
    pub frame_order: Option<Vec<FrameEntry>>,
}

impl AnimationDescriptor {
    pub fn new(base_duration: f64) -> Self {
        Self {
            base_duration: Some(base_duration),
            frame_order: None,
        }
    }

    pub fn with_frame_order(mut self, order: Vec<FrameEntry>) -> Self {
        self.frame_order = Some(order);
        self
    }
}

impl From<Mcmeta> for AnimationDescriptor {
    fn from(meta: Mcmeta) -> Self {
        Self {
            base_duration: Some(meta.animation.frametime),
            frame_order: meta.animation.frames,
        }
    }
}
