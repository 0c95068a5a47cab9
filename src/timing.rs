//! Frame duration resolution.
//!
//! Durations are kept in ticks until the very end and then scaled to
//! milliseconds by a [`TickScale`]. No rounding happens here; encoders round
//! to whatever unit their container stores.
//!
//! Base duration precedence, first present wins:
//!
//! 1. the descriptor's `frametime`
//! 2. the caller's frame delay override
//!
//! Per entry, a structured `{index, time}` entry uses its own `time` when set,
//! otherwise the base duration, and is clamped to one tick when that is not
//! positive. Bare indices always play for the base duration, unclamped.

use crate::{
    error::{AnimError, AnimResult},
    mcmeta::{AnimationDescriptor, FrameEntry},
};

/// Conversion factor from ticks to milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickScale {
    ms_per_tick: f64,
}

impl TickScale {
    pub fn from_tick_speed(ticks_per_second: f64) -> AnimResult<Self> {
        if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
            return Err(AnimError::validation(format!(
                "tick speed must be finite and > 0, got {ticks_per_second}"
            )));
        }
        Ok(Self {
            ms_per_tick: 1000.0 / ticks_per_second,
        })
    }

    pub fn ms_per_tick(self) -> f64 {
        self.ms_per_tick
    }

    pub fn to_ms(self, ticks: f64) -> f64 {
        ticks * self.ms_per_tick
    }
}

/// Where the base duration came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseDurationSource {
    Descriptor,
    Override,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaseDuration {
    pub ticks: f64,
    pub source: BaseDurationSource,
}

pub fn resolve_base_duration(descriptor_ticks: Option<f64>, override_ticks: f64) -> BaseDuration {
    match descriptor_ticks {
        Some(ticks) => BaseDuration {
            ticks,
            source: BaseDurationSource::Descriptor,
        },
        None => BaseDuration {
            ticks: override_ticks,
            source: BaseDurationSource::Override,
        },
    }
}

/// Ticks a single playback entry is shown for.
pub fn entry_ticks(entry: &FrameEntry, base_ticks: f64) -> f64 {
    match *entry {
        FrameEntry::Index(_) => base_ticks,
        FrameEntry::Timed { time, .. } => {
            let ticks = time.unwrap_or(base_ticks);
            if ticks <= 0.0 { 1.0 } else { ticks }
        }
    }
}

/// A tile reference in playback order with its display time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedTile {
    pub tile: usize,
    pub delay_ms: f64,
}

/// Resolve the effective playback sequence and each entry's delay.
///
/// Without a frame order every one of `tile_count` tiles plays once in sheet
/// order.
pub fn resolve_sequence(
    descriptor: &AnimationDescriptor,
    tile_count: usize,
    override_ticks: f64,
    scale: TickScale,
) -> AnimResult<Vec<TimedTile>> {
    let base = resolve_base_duration(descriptor.base_duration, override_ticks);

    let sequence: Vec<TimedTile> = match &descriptor.frame_order {
        Some(order) => order
            .iter()
            .map(|entry| TimedTile {
                tile: entry.index(),
                delay_ms: scale.to_ms(entry_ticks(entry, base.ticks)),
            })
            .collect(),
        None => (0..tile_count)
            .map(|tile| TimedTile {
                tile,
                delay_ms: scale.to_ms(base.ticks),
            })
            .collect(),
    };

    if sequence.is_empty() {
        return Err(AnimError::NoFrames);
    }

    tracing::debug!(
        frames = sequence.len(),
        base_ticks = base.ticks,
        base_source = ?base.source,
        ms_per_tick = scale.ms_per_tick(),
        "resolved playback sequence"
    );
    Ok(sequence)
}
