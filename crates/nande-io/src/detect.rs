//! Format detection and the drop allow-list.
//!
//! Detects image formats from file extensions and magic bytes.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raster extensions the viewer accepts (lowercase, with dot).
pub const VALID_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".jfif", ".tiff", ".tif", ".gif", ".png", ".ico", ".bmp", ".webp",
];

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JPEG / JFIF.
    Jpeg,
    /// PNG.
    Png,
    /// TIFF.
    Tiff,
    /// GIF (first frame).
    Gif,
    /// Windows icon.
    Ico,
    /// Windows bitmap.
    Bmp,
    /// WebP.
    WebP,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (magic bytes first, then extension).
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let format = Self::from_magic_bytes(path)?;
        if format != Format::Unknown {
            return Ok(format);
        }
        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("jpg") | Some("jpeg") | Some("jfif") => Format::Jpeg,
            Some("png") => Format::Png,
            Some("tif") | Some("tiff") => Format::Tiff,
            Some("gif") => Format::Gif,
            Some("ico") => Format::Ico,
            Some("bmp") => Format::Bmp,
            Some("webp") => Format::WebP,
            _ => Format::Unknown,
        }
    }

    /// Detects format from file magic bytes.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; 12];
        let bytes_read = file.read(&mut header)?;
        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from raw bytes (magic number check).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.len() < 4 {
            return Format::Unknown;
        }
        if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Format::Png;
        }
        if bytes[0..3] == [0xFF, 0xD8, 0xFF] {
            return Format::Jpeg;
        }
        if bytes[0..4] == [0x49, 0x49, 0x2A, 0x00] || bytes[0..4] == [0x4D, 0x4D, 0x00, 0x2A] {
            return Format::Tiff;
        }
        if bytes[0..4] == *b"GIF8" {
            return Format::Gif;
        }
        if bytes[0..4] == [0x00, 0x00, 0x01, 0x00] {
            return Format::Ico;
        }
        if bytes[0..2] == *b"BM" {
            return Format::Bmp;
        }
        if bytes.len() >= 12 && bytes[0..4] == *b"RIFF" && bytes[8..12] == *b"WEBP" {
            return Format::WebP;
        }
        Format::Unknown
    }
}

/// Whether the path carries an extension on [`VALID_EXTENSIONS`].
///
/// ```rust
/// use nande_io::is_supported_path;
///
/// assert!(is_supported_path("shot.JPG"));
/// assert!(!is_supported_path("shot.exr"));
/// ```
pub fn is_supported_path<P: AsRef<Path>>(path: P) -> bool {
    let Some(ext) = path.as_ref().extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let dotted = format!(".{}", ext.to_lowercase());
    VALID_EXTENSIONS.contains(&dotted.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_allow_list() {
        for name in ["a.jpg", "a.jpeg", "a.jfif", "a.tiff", "a.tif", "a.gif", "a.png", "a.ico", "a.bmp", "a.webp"] {
            assert!(is_supported_path(name), "{name}");
        }
        assert!(is_supported_path("UPPER.PNG"));
        assert!(!is_supported_path("a.exr"));
        assert!(!is_supported_path("noext"));
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("x.jfif"), Format::Jpeg);
        assert_eq!(Format::from_extension("x.TIF"), Format::Tiff);
        assert_eq!(Format::from_extension("x.psd"), Format::Unknown);
    }

    #[test]
    fn test_magic_bytes() {
        assert_eq!(Format::from_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]), Format::Png);
        assert_eq!(Format::from_bytes(b"GIF89a"), Format::Gif);
        assert_eq!(Format::from_bytes(b"BM\0\0\0\0"), Format::Bmp);
        assert_eq!(Format::from_bytes(b"RIFF\0\0\0\0WEBP"), Format::WebP);
        assert_eq!(Format::from_bytes(b"ab"), Format::Unknown);
    }
}
