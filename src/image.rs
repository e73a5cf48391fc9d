//! Conversion of `data:` URLs into image content blocks

use tracing::debug;

use crate::error::{ContextError, Result};
use crate::message::{ContentBlock, ImageSource};

/// Convert image data URLs (`data:<media type>;base64,<payload>`) into image blocks.
///
/// Order is preserved and `None` yields an empty list. The URLs are built by
/// the caller itself, so a malformed one is reported as an error rather than
/// turned into a half-filled block.
pub fn format_images_into_blocks(images: Option<&[String]>) -> Result<Vec<ContentBlock>> {
    let Some(images) = images else {
        return Ok(Vec::new());
    };

    let blocks = images
        .iter()
        .map(|url| parse_data_url(url).map(|source| ContentBlock::Image { source }))
        .collect::<Result<Vec<_>>>()?;

    debug!("Converted {} data URLs into image blocks", blocks.len());
    Ok(blocks)
}

/// Split a data URL into its media type and raw base64 payload
pub fn parse_data_url(url: &str) -> Result<ImageSource> {
    let (header, payload) = url.split_once(',').ok_or_else(|| malformed("','", url))?;

    let params = header
        .strip_prefix("data:")
        .ok_or_else(|| malformed("'data:'", url))?;

    let (media_type, _encoding) = params.split_once(';').ok_or_else(|| malformed("';'", url))?;

    Ok(ImageSource::Base64 {
        media_type: media_type.to_string(),
        data: payload.to_string(),
    })
}

fn malformed(missing: &str, url: &str) -> ContextError {
    ContextError::MalformedDataUrl(format!("missing {} in {}", missing, preview(url)))
}

// Data URLs can be megabytes long; keep error messages readable.
fn preview(url: &str) -> String {
    const MAX: usize = 48;
    match url.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &url[..idx]),
        None => url.to_string(),
    }
}

impl ImageSource {
    pub fn media_type(&self) -> &str {
        match self {
            Self::Base64 { media_type, .. } => media_type,
        }
    }

    pub fn data(&self) -> &str {
        match self {
            Self::Base64 { data, .. } => data,
        }
    }
}
