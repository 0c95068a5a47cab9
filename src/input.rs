use crate::{
    error::{AnimError, AnimResult},
    mcmeta::{AnimationDescriptor, Mcmeta},
};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

/// Sprite sheet bytes with a known PNG signature, paired with the parsed descriptor.
#[derive(Clone, Debug)]
pub struct ValidatedInput<'a> {
    pub png: &'a [u8],
    pub descriptor: AnimationDescriptor,
}

pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Check the PNG signature and the `.mcmeta` shape.
///
/// Problems with both buffers are reported together in one
/// [`AnimError::Validation`], image first.
pub fn validate_input<'a>(png: &'a [u8], mcmeta: &[u8]) -> AnimResult<ValidatedInput<'a>> {
    let mut issues = Vec::new();

    if !is_png(png) {
        issues.push("png: file is not a valid PNG (incorrect signature)".to_string());
    }

    let descriptor = match parse_mcmeta(mcmeta) {
        Ok(meta) => Some(AnimationDescriptor::from(meta)),
        Err(issue) => {
            issues.push(issue);
            None
        }
    };

    match descriptor {
        Some(descriptor) if issues.is_empty() => Ok(ValidatedInput { png, descriptor }),
        _ => Err(AnimError::validation(issues.join("; "))),
    }
}

fn parse_mcmeta(bytes: &[u8]) -> Result<Mcmeta, String> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| format!("mcmeta: not valid JSON ({e})"))?;
    serde_json::from_value(value)
        .map_err(|e| format!("mcmeta: JSON does not match the expected structure ({e})"))
}
