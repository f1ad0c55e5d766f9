//! Fixed extension → MIME lookup used for evidence uploads.

/// Fallback for unrecognized extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extension table for the file kinds the intake form accepts. Lookup is
/// case-insensitive on the extension.
const MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("m4a", "audio/mp4"),
    ("ogg", "audio/ogg"),
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("mkv", "video/x-matroska"),
    ("zip", "application/zip"),
];

/// Derive a MIME type from a file path's extension.
///
/// The extension is lowercased before lookup; paths without an extension and
/// unknown extensions map to `application/octet-stream`.
#[must_use]
pub fn from_path(path: &str) -> &'static str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return OCTET_STREAM;
    };
    if stem.is_empty() {
        return OCTET_STREAM;
    }
    let ext = ext.to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map_or(OCTET_STREAM, |(_, mime)| mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(from_path("scan.pdf"), "application/pdf");
        assert_eq!(from_path("photo.jpg"), "image/jpeg");
        assert_eq!(from_path("recording.mp3"), "audio/mpeg");
    }

    #[test]
    fn test_extension_lookup_is_case_insensitive() {
        assert_eq!(from_path("scan.PDF"), "application/pdf");
        assert_eq!(from_path("photo.JPeG"), "image/jpeg");
    }

    #[test]
    fn test_unknown_extension_defaults_to_octet_stream() {
        assert_eq!(from_path("payload.xyz"), OCTET_STREAM);
    }

    #[test]
    fn test_missing_extension_defaults_to_octet_stream() {
        assert_eq!(from_path("README"), OCTET_STREAM);
        assert_eq!(from_path(".gitignore"), OCTET_STREAM);
    }

    #[test]
    fn test_only_last_path_segment_is_considered() {
        assert_eq!(from_path("uploads/2025.07/scan.pdf"), "application/pdf");
        assert_eq!(from_path("uploads/2025.07/README"), OCTET_STREAM);
    }
}
