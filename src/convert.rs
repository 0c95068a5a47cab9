use crate::{
    config::{ConvertOptions, ExportType},
    encode::{ApngEncoder, FrameEncoder, GifEncoder, encoder_for},
    error::AnimResult,
    frames::extract_frames,
    input::validate_input,
};

/// Encoded animation plus the container it was written as.
#[derive(Clone, Debug)]
pub struct ConvertOutput {
    pub export: Vec<u8>,
    pub export_type: ExportType,
}

/// Convert a sprite sheet PNG and its `.mcmeta` into an animation.
///
/// Pipeline:
/// 1. [`validate_input`]: PNG signature and descriptor shape
/// 2. [`extract_frames`]: geometry, tile slicing, timing
/// 3. the [`FrameEncoder`] selected by `opts.export_type`
///
/// Any failure aborts the whole conversion; no partial output is returned.
#[tracing::instrument(
    skip(png, mcmeta, opts),
    fields(export_type = %opts.export_type, png_len = png.len())
)]
pub fn convert(png: &[u8], mcmeta: &[u8], opts: &ConvertOptions) -> AnimResult<ConvertOutput> {
    let encoder = encoder_for(opts.export_type);
    let export = run(png, mcmeta, opts, encoder.as_ref())?;
    Ok(ConvertOutput {
        export,
        export_type: encoder.export_type(),
    })
}

/// Like [`convert`], with the container named by its tag (`"apng"` or `"gif"`).
pub fn convert_tagged(
    png: &[u8],
    mcmeta: &[u8],
    export_tag: &str,
    opts: &ConvertOptions,
) -> AnimResult<ConvertOutput> {
    let opts = opts.clone().with_export_type(export_tag.parse()?);
    convert(png, mcmeta, &opts)
}

/// Convert straight to APNG, ignoring `opts.export_type`.
pub fn convert_to_apng(png: &[u8], mcmeta: &[u8], opts: &ConvertOptions) -> AnimResult<Vec<u8>> {
    run(png, mcmeta, opts, &ApngEncoder)
}

/// Convert straight to GIF, ignoring `opts.export_type`.
pub fn convert_to_gif(png: &[u8], mcmeta: &[u8], opts: &ConvertOptions) -> AnimResult<Vec<u8>> {
    run(png, mcmeta, opts, &GifEncoder::default())
}

fn run(
    png: &[u8],
    mcmeta: &[u8],
    opts: &ConvertOptions,
    encoder: &dyn FrameEncoder,
) -> AnimResult<Vec<u8>> {
    let input = validate_input(png, mcmeta)?;
    let frames = extract_frames(input.png, &input.descriptor, opts)?;
    tracing::debug!(
        frames = frames.len(),
        size = frames.size,
        total_ms = frames.total_duration_ms(),
        "encoding animation"
    );
    encoder.encode(&frames)
}
