use std::{fmt, str::FromStr};

use crate::error::{AnimError, AnimResult};

/// Ticks per second used when the caller does not pick a tick speed.
pub const DEFAULT_TICK_SPEED: f64 = 20.0;

/// Base duration, in ticks, used when the descriptor carries none.
pub const DEFAULT_FRAME_DELAY_OVERRIDE: f64 = 1.0;

/// Output container selected for the final encode step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    /// Lossless animated PNG. Preferred for transparency.
    #[default]
    Apng,
    /// Palette GIF with one global colour table.
    Gif,
}

impl ExportType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Apng => "apng",
            Self::Gif => "gif",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Apng => "image/apng",
            Self::Gif => "image/gif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Apng => "png",
            Self::Gif => "gif",
        }
    }
}

impl fmt::Display for ExportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportType {
    type Err = AnimError;

    fn from_str(s: &str) -> AnimResult<Self> {
        match s {
            "apng" => Ok(Self::Apng),
            "gif" => Ok(Self::Gif),
            other => Err(AnimError::unsupported_format(other)),
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SliceThreading {
    pub parallel: bool,
    pub threads: Option<usize>,
}

impl SliceThreading {
    pub fn validate(&self) -> AnimResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(AnimError::validation(
                "slice threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub export_type: ExportType,
    /// Fallback base duration in ticks; the descriptor's `frametime` wins when present.
    pub frame_delay_override: f64,
    pub minecraft_tick_speed: f64,
    pub threading: SliceThreading,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            export_type: ExportType::default(),
            frame_delay_override: DEFAULT_FRAME_DELAY_OVERRIDE,
            minecraft_tick_speed: DEFAULT_TICK_SPEED,
            threading: SliceThreading::default(),
        }
    }
}

impl ConvertOptions {
    pub fn validate(&self) -> AnimResult<()> {
        if !self.minecraft_tick_speed.is_finite() || self.minecraft_tick_speed <= 0.0 {
            return Err(AnimError::validation(format!(
                "minecraft tick speed must be finite and > 0, got {}",
                self.minecraft_tick_speed
            )));
        }
        if !self.frame_delay_override.is_finite() {
            return Err(AnimError::validation(
                "frame delay override must be a finite number of ticks",
            ));
        }
        self.threading.validate()
    }

    pub fn with_export_type(mut self, export_type: ExportType) -> Self {
        self.export_type = export_type;
        self
    }

    pub fn with_tick_speed(mut self, ticks_per_second: f64) -> Self {
        self.minecraft_tick_speed = ticks_per_second;
        self
    }

    pub fn with_frame_delay_override(mut self, ticks: f64) -> Self {
        self.frame_delay_override = ticks;
        self
    }

    pub fn with_threading(mut self, threading: SliceThreading) -> Self {
        self.threading = threading;
        self
    }
}
