use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    config::SliceThreading,
    error::{AnimError, AnimResult},
    sheet::SpriteSheet,
};

/// One square tile: `size * size` RGBA8 pixels, row-major.
pub type TilePixels = Arc<Vec<u8>>;

/// Cut the sheet into its stacked square tiles, top to bottom.
///
/// The returned table is indexed by tile number whether or not slicing ran
/// in parallel.
pub fn slice_tiles(sheet: &SpriteSheet, threading: &SliceThreading) -> AnimResult<Vec<TilePixels>> {
    threading.validate()?;
    let count = sheet.tile_count()?;
    let size = sheet.width;

    let tiles = if threading.parallel && count > 1 {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            (0..count)
                .into_par_iter()
                .map(|i| extract_tile(sheet, i * size, size))
                .collect::<Vec<_>>()
        })
    } else {
        (0..count)
            .map(|i| extract_tile(sheet, i * size, size))
            .collect()
    };

    if tiles.is_empty() {
        return Err(AnimError::NoFrames);
    }

    for (index, tile) in tiles.iter().enumerate() {
        if !tile.len().is_multiple_of(4) {
            return Err(AnimError::CorruptFrameData {
                index,
                len: tile.len(),
            });
        }
    }

    tracing::debug!(tiles = tiles.len(), size, "sliced sprite sheet");
    Ok(tiles)
}

/// Copy the `width` x `width` region whose top edge sits at row `top`.
pub fn extract_tile(sheet: &SpriteSheet, top: u32, width: u32) -> TilePixels {
    let view = image::imageops::crop_imm(&sheet.rgba, 0, top, width, width);
    Arc::new(view.to_image().into_raw())
}

fn build_thread_pool(threads: Option<usize>) -> AnimResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AnimError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}
