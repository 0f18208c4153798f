use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Server-assigned reference to uploaded binary data.
///
/// The client never looks inside: whatever object the server returns under
/// `blob` from `uploadBlob` is embedded verbatim in the record that uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobRef(serde_json::Map<String, serde_json::Value>);

/// MIME type of an uploaded blob
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MimeType(SmolStr);

impl MimeType {
    /// `image/png`
    pub const PNG: &'static str = "image/png";
    /// `image/jpeg`
    pub const JPEG: &'static str = "image/jpeg";
    /// `image/webp`
    pub const WEBP: &'static str = "image/webp";
    /// Fallback for anything unrecognised
    pub const OCTET_STREAM: &'static str = "application/octet-stream";

    /// Construct from a static string
    pub const fn new_static(mime: &'static str) -> Self {
        Self(SmolStr::new_static(mime))
    }

    /// Pick a MIME type from a file name's suffix.
    ///
    /// Only the text after the last `.` is considered, compared
    /// case-insensitively against png, jpeg/jpg and webp.
    pub fn from_file_name(name: &str) -> Self {
        let suffix = name.rsplit_once('.').map(|(_, s)| s).unwrap_or(name);
        let mime = match suffix.to_ascii_lowercase().as_str() {
            "png" => Self::PNG,
            "jpeg" | "jpg" => Self::JPEG,
            "webp" => Self::WEBP,
            _ => Self::OCTET_STREAM,
        };
        Self::new_static(mime)
    }

    /// String form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for MimeType {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_suffix() {
        assert_eq!(MimeType::from_file_name("cat.png").as_str(), "image/png");
        assert_eq!(MimeType::from_file_name("cat.JPG").as_str(), "image/jpeg");
        assert_eq!(MimeType::from_file_name("a.b.jpeg").as_str(), "image/jpeg");
        assert_eq!(MimeType::from_file_name("cat.WebP").as_str(), "image/webp");
        assert_eq!(
            MimeType::from_file_name("cat.gif").as_str(),
            "application/octet-stream"
        );
        assert_eq!(
            MimeType::from_file_name("noext").as_str(),
            "application/octet-stream"
        );
    }

    #[test]
    fn blob_ref_round_trips_verbatim() {
        let raw = serde_json::json!({
            "$type": "blob",
            "ref": {"$link": "bafkrei"},
            "mimeType": "image/png",
            "size": 42
        });
        let blob: BlobRef = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&blob).unwrap(), raw);
    }
}
