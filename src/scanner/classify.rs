//! File-type classification by extension.
//!
//! Large-file results carry a coarse type label so listings can be filtered
//! by category. Classification looks at the extension only, never file
//! contents, and unknown or missing extensions fall through to
//! [`FileKind::Other`].

use std::fmt;
use std::path::Path;

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "mpg", "mpeg",
];

const INSTALLER_EXTENSIONS: &[&str] = &[
    "exe", "msi", "dmg", "pkg", "deb", "rpm", "appimage", "iso",
];

const ARCHIVE_EXTENSIONS: &[&str] = &[
    "zip", "rar", "7z", "tar", "gz", "bz2", "xz", "zst", "cab",
];

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp", "heic", "psd", "raw",
];

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "md", "odt",
];

/// Coarse file category derived from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Video containers.
    Video,
    /// Installers and disk images.
    Installer,
    /// Compressed archives.
    Archive,
    /// Raster images.
    Image,
    /// Office documents and plain text.
    Document,
    /// Everything else, including extension-less files.
    Other,
}

impl FileKind {
    /// Classify a path by its extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension() else {
            return Self::Other;
        };
        let ext = ext.to_string_lossy().to_lowercase();

        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Self::Video
        } else if INSTALLER_EXTENSIONS.contains(&ext.as_str()) {
            Self::Installer
        } else if ARCHIVE_EXTENSIONS.contains(&ext.as_str()) {
            Self::Archive
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Self::Image
        } else if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
            Self::Document
        } else {
            Self::Other
        }
    }

    /// Lowercase label for display and machine output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Installer => "installer",
            Self::Archive => "archive",
            Self::Image => "image",
            Self::Document => "document",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
