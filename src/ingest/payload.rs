use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

use crate::foundation::error::{MolduraError, MolduraResult};

/// Binary image payload with the media type declared by its source.
///
/// This is the single normalized form every ingestion modality converges on:
/// a file picked from disk, a dropped file, or a pasted clipboard item all
/// become an `ImagePayload` before the pipeline looks at them. The declared
/// media type is trusted as-is; there is no magic-byte sniffing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    media_type: String,
    bytes: Vec<u8>,
}

impl ImagePayload {
    /// Wrap raw bytes together with their declared media type.
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Declared media type, e.g. `image/png`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Raw encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the declared media type names an image family.
    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }

    /// Encode as a `data:<media-type>;base64,<payload>` URI.
    ///
    /// This is the stored, same-origin form of an accepted base image; export
    /// re-decodes from it rather than from any cached decode.
    pub fn to_data_uri(&self) -> String {
        let b64 = general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.media_type, b64)
    }

    /// Parse a base64 data URI back into a payload.
    pub fn from_data_uri(uri: &str) -> MolduraResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| MolduraError::invalid_input("data URI must start with 'data:'"))?;
        let (media_type, b64) = rest
            .split_once(";base64,")
            .ok_or_else(|| MolduraError::invalid_input("data URI must carry a base64 marker"))?;
        let bytes = general_purpose::STANDARD
            .decode(b64)
            .map_err(|e| MolduraError::invalid_input(format!("base64 decode failed: {e}")))?;
        Ok(Self::new(media_type, bytes))
    }
}

/// Whether a declared media type belongs to the image family.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// Declared media type for a file path, derived from its extension.
///
/// Unknown extensions map to `application/octet-stream`, which ingestion then
/// rejects; this mirrors trusting the declared type instead of sniffing.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return "application/octet-stream";
    };
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/payload.rs"]
mod tests;
