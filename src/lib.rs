//! Turn Minecraft-style sprite sheets into animated PNGs or GIFs.
//!
//! A sprite sheet is a vertical strip of square tiles; its `.mcmeta` sidecar
//! gives a base frame time in ticks and, optionally, a custom playback order
//! with per-entry times.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: PNG signature + `.mcmeta` shape ([`validate_input`])
//! 2. **Slice**: check `height % width == 0`, cut the tiles ([`slice_tiles`])
//! 3. **Time**: resolve the playback sequence and delays ([`resolve_sequence`])
//! 4. **Encode**: hand the [`FrameSet`] to an APNG or GIF [`FrameEncoder`]
//!
//! [`convert`] runs all four steps.
#![forbid(unsafe_code)]

pub mod config;
pub mod convert;
pub mod encode;
pub mod error;
pub mod frames;
pub mod input;
pub mod mcmeta;
pub mod sheet;
pub mod slice;
pub mod timing;

pub use config::{
    ConvertOptions, DEFAULT_FRAME_DELAY_OVERRIDE, DEFAULT_TICK_SPEED, ExportType, SliceThreading,
};
pub use convert::{ConvertOutput, convert, convert_tagged, convert_to_apng, convert_to_gif};
pub use encode::{ApngEncoder, FrameEncoder, GifEncoder, encoder_for};
pub use error::{AnimError, AnimErrorKind, AnimResult};
pub use frames::{FrameSet, ResolvedFrame, assemble, extract_frames, frames_from_sheet};
pub use input::{ValidatedInput, is_png, validate_input};
pub use mcmeta::{AnimationDescriptor, FrameEntry, Mcmeta, McmetaAnimation};
pub use sheet::{SpriteSheet, probe_dimensions, tile_count};
pub use slice::{TilePixels, extract_tile, slice_tiles};
pub use timing::{
    BaseDuration, BaseDurationSource, TickScale, TimedTile, entry_ticks, resolve_base_duration,
    resolve_sequence,
};
