use std::{borrow::Cow, collections::HashMap};

use color_quant::NeuQuant;

use crate::{
    config::ExportType,
    encode::{FrameEncoder, check_frames, delay_units},
    error::{AnimError, AnimResult},
    frames::FrameSet,
};

const MAX_COLORS: usize = 256;

/// Palette GIF: one global colour table learned from every frame, looping forever.
///
/// The table is exact when the pooled frames hold at most 256 distinct
/// colours and NeuQuant-quantized otherwise. Every frame marks the first
/// fully transparent entry as its transparent index, falling back to 0.
#[derive(Clone, Copy, Debug)]
pub struct GifEncoder {
    /// NeuQuant sampling factor, 1 (best) to 30 (fastest).
    pub sample_factor: i32,
}

impl Default for GifEncoder {
    fn default() -> Self {
        Self { sample_factor: 10 }
    }
}

impl FrameEncoder for GifEncoder {
    fn export_type(&self) -> ExportType {
        ExportType::Gif
    }

    #[tracing::instrument(skip(self, frames), fields(frames = frames.len(), size = frames.size))]
    fn encode(&self, frames: &FrameSet) -> AnimResult<Vec<u8>> {
        check_frames(frames)?;
        let size = u16::try_from(frames.size).map_err(|_| {
            AnimError::validation(format!(
                "gif frames must be at most {} px wide, got {}",
                u16::MAX,
                frames.size
            ))
        })?;

        let pooled: Vec<u8> = frames
            .frames
            .iter()
            .flat_map(|f| f.pixels.chunks_exact(4).map(canonical_pixel))
            .flatten()
            .collect();
        let palette = Palette::build(&pooled, self.sample_factor.clamp(1, 30));
        let transparent = palette.transparent_index();
        tracing::debug!(
            colors = palette.len(),
            exact = palette.is_exact(),
            transparent,
            "built global palette"
        );

        let mut out = Vec::new();
        {
            let mut encoder =
                ::gif::Encoder::new(&mut out, size, size, &palette.rgb()).map_err(gif_err)?;
            encoder.set_repeat(::gif::Repeat::Infinite).map_err(gif_err)?;

            for frame in &frames.frames {
                let indices: Vec<u8> = frame
                    .pixels
                    .chunks_exact(4)
                    .map(|px| palette.index_of(canonical_pixel(px)))
                    .collect();
                let gif_frame = ::gif::Frame {
                    width: size,
                    height: size,
                    buffer: Cow::Owned(indices),
                    delay: delay_units(frame.delay_ms, 10.0),
                    transparent: Some(transparent),
                    dispose: ::gif::DisposalMethod::Background,
                    ..::gif::Frame::default()
                };
                encoder.write_frame(&gif_frame).map_err(gif_err)?;
            }
        }
        Ok(out)
    }
}

/// Fully transparent pixels all collapse to one colour so they share an index.
fn canonical_pixel(px: &[u8]) -> [u8; 4] {
    if px[3] == 0 {
        [0, 0, 0, 0]
    } else {
        [px[0], px[1], px[2], px[3]]
    }
}

enum Palette {
    /// Every distinct colour fits; lookups are exact.
    Exact {
        rgba: Vec<[u8; 4]>,
        lookup: HashMap<[u8; 4], u8>,
    },
    Quantized(NeuQuant),
}

impl Palette {
    fn build(pooled_rgba: &[u8], sample_factor: i32) -> Self {
        let mut rgba = Vec::new();
        let mut lookup = HashMap::new();
        for px in pooled_rgba.chunks_exact(4) {
            let px = [px[0], px[1], px[2], px[3]];
            if lookup.contains_key(&px) {
                continue;
            }
            if rgba.len() == MAX_COLORS {
                return Self::Quantized(NeuQuant::new(sample_factor, MAX_COLORS, pooled_rgba));
            }
            lookup.insert(px, rgba.len() as u8);
            rgba.push(px);
        }
        Self::Exact { rgba, lookup }
    }

    fn is_exact(&self) -> bool {
        matches!(self, Self::Exact { .. })
    }

    fn len(&self) -> usize {
        match self {
            Self::Exact { rgba, .. } => rgba.len(),
            Self::Quantized(_) => MAX_COLORS,
        }
    }

    fn entries(&self) -> Vec<[u8; 4]> {
        match self {
            Self::Exact { rgba, .. } => rgba.clone(),
            Self::Quantized(nq) => nq
                .color_map_rgba()
                .chunks_exact(4)
                .map(|c| [c[0], c[1], c[2], c[3]])
                .collect(),
        }
    }

    /// First fully transparent entry, or 0 when there is none.
    ///
    /// Index 0 is flagged transparent even when its colour is opaque, so a
    /// sheet with no transparent pixels loses whatever maps to entry 0.
    fn transparent_index(&self) -> u8 {
        self.entries()
            .iter()
            .position(|c| c[3] == 0)
            .map_or(0, |i| i as u8)
    }

    fn rgb(&self) -> Vec<u8> {
        self.entries()
            .iter()
            .flat_map(|c| [c[0], c[1], c[2]])
            .collect()
    }

    fn index_of(&self, px: [u8; 4]) -> u8 {
        match self {
            Self::Exact { lookup, .. } => lookup.get(&px).copied().unwrap_or(0),
            Self::Quantized(nq) => nq.index_of(&px) as u8,
        }
    }
}

fn gif_err(e: ::gif::EncodingError) -> AnimError {
    AnimError::encode(format!("gif: {e}"))
}
