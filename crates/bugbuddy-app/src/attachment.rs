//! Image ingestion from file paths
//!
//! Terminals paste dropped files as paths, so every attachment starts as a
//! path string. The file is read once to detect its format and measure it;
//! the bytes are dropped before this module returns.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use bugbuddy_core::prelude::*;
use bugbuddy_core::ImageAttachment;

/// Image file extensions recognized in pasted text
const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// Check if pasted text looks like a single image file path.
pub fn is_image_file_path(text: &str) -> bool {
    let trimmed = normalize_pasted_path(text);
    let lower = trimmed.to_string_lossy().to_lowercase();
    if lower.is_empty() || lower.contains('\n') {
        return false;
    }
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Check if pasted text names an existing image file.
///
/// Dropped files arrive this way. Text that only ends in an image extension,
/// such as an error mentioning an asset, does not qualify.
pub fn is_dropped_image_file(text: &str) -> bool {
    is_image_file_path(text) && normalize_pasted_path(text).is_file()
}

/// Turn pasted or typed text into a path.
///
/// Strips surrounding whitespace and quotes, a `file://` prefix, and the
/// backslash escapes some terminals put before spaces.
pub fn normalize_pasted_path(text: &str) -> PathBuf {
    let mut s = text.trim();
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = &s[1..s.len() - 1];
        }
    }
    let s = s.strip_prefix("file://").unwrap_or(s);
    PathBuf::from(s.replace("\\ ", " "))
}

/// Read an image file and build its attachment reference.
///
/// Fails with [`Error::Io`] when the file cannot be read and with
/// [`Error::UnsupportedFile`] when it is not a decodable image.
pub fn load_image_attachment(path: &Path) -> Result<ImageAttachment> {
    let bytes = std::fs::read(path)?;

    let format = image::guess_format(&bytes).map_err(|e| {
        debug!("Rejecting {}: {}", path.display(), e);
        Error::unsupported_file(path)
    })?;

    let (width, height) = image::ImageReader::with_format(Cursor::new(&bytes), format)
        .into_dimensions()
        .map_err(|e| {
            debug!("Rejecting {} ({:?}): {}", path.display(), format, e);
            Error::unsupported_file(path)
        })?;

    let attachment = ImageAttachment {
        path: path.to_path_buf(),
        format: format!("{:?}", format).to_uppercase(),
        width,
        height,
        byte_size: bytes.len() as u64,
    };

    info!("Attached image {}", attachment.preview_label());
    Ok(attachment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_file_path() {
        assert!(is_image_file_path("/tmp/screenshot.png"));
        assert!(is_image_file_path("  '/tmp/My Shot.JPG'  "));
        assert!(!is_image_file_path("/tmp/notes.txt"));
        assert!(!is_image_file_path("TypeError: foo.png is not defined\nat line 3"));
        assert!(!is_image_file_path(""));
    }

    #[test]
    fn test_is_dropped_image_file_needs_existing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("logo.png");
        std::fs::write(&path, b"png").unwrap();

        assert!(is_dropped_image_file(&format!("'{}'\n", path.display())));
        assert!(!is_dropped_image_file(
            &temp.path().join("missing.png").display().to_string()
        ));
        assert!(!is_dropped_image_file(
            "Module not found: Error: Can't resolve ./assets/logo.png"
        ));
    }

    #[test]
    fn test_normalize_pasted_path() {
        assert_eq!(
            normalize_pasted_path("'/tmp/a b.png'"),
            PathBuf::from("/tmp/a b.png")
        );
        assert_eq!(
            normalize_pasted_path("file:///tmp/a.png"),
            PathBuf::from("/tmp/a.png")
        );
        assert_eq!(
            normalize_pasted_path("/tmp/a\\ b.png\n"),
            PathBuf::from("/tmp/a b.png")
        );
    }

    #[test]
    fn test_load_png_attachment() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("crash.png");
        image::RgbaImage::new(8, 6).save(&path).unwrap();

        let attachment = load_image_attachment(&path).unwrap();

        assert_eq!(attachment.format, "PNG");
        assert_eq!((attachment.width, attachment.height), (8, 6));
        assert_eq!(
            attachment.byte_size,
            std::fs::metadata(&path).unwrap().len()
        );
        assert_eq!(attachment.path, path);
    }

    #[test]
    fn test_non_image_is_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("notes.png");
        std::fs::write(&path, "definitely not an image").unwrap();

        let err = load_image_attachment(&path).unwrap_err();

        assert!(matches!(err, Error::UnsupportedFile { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = tempdir().unwrap();
        let err = load_image_attachment(&temp.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
