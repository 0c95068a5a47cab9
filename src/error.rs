pub type AnimResult<T> = Result<T, AnimError>;

#[derive(thiserror::Error, Debug)]
pub enum AnimError {
    /// Caller-correctable input: bad PNG signature, malformed descriptor, invalid options.
    #[error("validation error: {0}")]
    Validation(String),

    #[error(
        "geometry error: height ({height}) must be a multiple of width ({width})"
    )]
    Geometry { width: u32, height: u32 },

    #[error("no frames found")]
    NoFrames,

    /// Tile byte length not a multiple of four; points at the raster decoder, not the caller.
    #[error("corrupt frame data: tile {index} has {len} bytes, not a multiple of four")]
    CorruptFrameData { index: usize, len: usize },

    #[error("unsupported export type: {0}")]
    UnsupportedFormat(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Fieldless view of [`AnimError`] for matching on the failure class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimErrorKind {
    Validation,
    Geometry,
    NoFrames,
    CorruptFrameData,
    UnsupportedFormat,
    Decode,
    Encode,
    Other,
}

impl AnimError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unsupported_format(tag: impl Into<String>) -> Self {
        Self::UnsupportedFormat(tag.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn kind(&self) -> AnimErrorKind {
        match self {
            Self::Validation(_) => AnimErrorKind::Validation,
            Self::Geometry { .. } => AnimErrorKind::Geometry,
            Self::NoFrames => AnimErrorKind::NoFrames,
            Self::CorruptFrameData { .. } => AnimErrorKind::CorruptFrameData,
            Self::UnsupportedFormat(_) => AnimErrorKind::UnsupportedFormat,
            Self::Decode(_) => AnimErrorKind::Decode,
            Self::Encode(_) => AnimErrorKind::Encode,
            Self::Other(_) => AnimErrorKind::Other,
        }
    }
}
