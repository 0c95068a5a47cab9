use crate::{
    config::ConvertOptions,
    error::{AnimError, AnimResult},
    mcmeta::AnimationDescriptor,
    sheet::{self, SpriteSheet},
    slice::{TilePixels, slice_tiles},
    timing::{TickScale, TimedTile, resolve_sequence},
};

/// One frame ready for an encoder.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedFrame {
    /// Straight-alpha RGBA8, `size * size * 4` bytes. Shared when a tile repeats.
    pub pixels: TilePixels,
    /// Display time in milliseconds, unrounded.
    pub delay_ms: f64,
    /// Sheet tile this frame was cut from.
    pub tile_index: usize,
}

/// Ordered frames plus their common square edge length.
#[derive(Clone, Debug)]
pub struct FrameSet {
    pub frames: Vec<ResolvedFrame>,
    pub size: u32,
}

impl FrameSet {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn delays_ms(&self) -> Vec<f64> {
        self.frames.iter().map(|f| f.delay_ms).collect()
    }

    pub fn total_duration_ms(&self) -> f64 {
        self.frames.iter().map(|f| f.delay_ms).sum()
    }
}

/// Decode a sprite sheet and resolve its playback frames.
///
/// Geometry is checked from the PNG header before any pixels are decoded.
/// Only the timing and threading fields of `opts` are read.
#[tracing::instrument(skip(png, descriptor, opts), fields(png_len = png.len()))]
pub fn extract_frames(
    png: &[u8],
    descriptor: &AnimationDescriptor,
    opts: &ConvertOptions,
) -> AnimResult<FrameSet> {
    opts.validate()?;

    let (width, height) = sheet::probe_dimensions(png)?;
    let tile_count = sheet::tile_count(width, height)?;
    tracing::debug!(width, height, tile_count, "sprite sheet geometry");

    let sheet = SpriteSheet::decode(png)?;
    frames_from_sheet(&sheet, descriptor, opts)
}

/// Slice, time, and assemble frames from an already decoded sheet.
pub fn frames_from_sheet(
    sheet: &SpriteSheet,
    descriptor: &AnimationDescriptor,
    opts: &ConvertOptions,
) -> AnimResult<FrameSet> {
    let scale = TickScale::from_tick_speed(opts.minecraft_tick_speed)?;
    let tiles = slice_tiles(sheet, &opts.threading)?;
    let sequence = resolve_sequence(descriptor, tiles.len(), opts.frame_delay_override, scale)?;
    let frames = assemble(&tiles, &sequence)?;
    Ok(FrameSet {
        frames,
        size: sheet.width,
    })
}

/// Pair each playback entry with its tile, preserving playback order.
pub fn assemble(tiles: &[TilePixels], sequence: &[TimedTile]) -> AnimResult<Vec<ResolvedFrame>> {
    sequence
        .iter()
        .map(|timed| {
            let pixels = tiles.get(timed.tile).ok_or_else(|| {
                AnimError::validation(format!(
                    "frame index {} is out of range for a sheet of {} tiles",
                    timed.tile,
                    tiles.len()
                ))
            })?;
            Ok(ResolvedFrame {
                pixels: pixels.clone(),
                delay_ms: timed.delay_ms,
                tile_index: timed.tile,
            })
        })
        .collect()
}
