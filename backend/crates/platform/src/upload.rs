//! Upload Content-Type Validation
//!
//! Shared by book-cover and profile-image uploads. The allow-list is
//! exact: {png, jpg, jpeg, webp} by declared content type. Anything else
//! is rejected and the staged asset must be deleted immediately by the
//! caller. Accepted assets are renamed to a canonical extension before
//! being referenced from the owning entity.

use thiserror::Error;

/// Upload validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Declared content type is outside the image allow-list
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
}

/// Accepted image kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Webp,
}

impl ImageKind {
    /// Map a declared content type onto an accepted kind
    ///
    /// `image/jpg` is tolerated as an alias for `image/jpeg`.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "image/png" => Some(ImageKind::Png),
            "image/jpg" | "image/jpeg" => Some(ImageKind::Jpeg),
            "image/webp" => Some(ImageKind::Webp),
            _ => None,
        }
    }

    /// Canonical file extension for this kind
    pub const fn canonical_extension(&self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
            ImageKind::Webp => "webp",
        }
    }

    /// Content type to serve assets of this kind with
    pub const fn content_type(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Webp => "image/webp",
        }
    }
}

/// Validate a declared content type against the allow-list
pub fn validate_content_type(content_type: &str) -> Result<ImageKind, UploadError> {
    ImageKind::from_content_type(content_type)
        .ok_or_else(|| UploadError::UnsupportedFileType(content_type.to_string()))
}

/// Content type for serving a stored asset, derived from its canonical name
pub fn content_type_for_name(name: &str) -> &'static str {
    match name.rsplit('.').next() {
        Some("png") => "image/png",
        Some("jpg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_accepted() {
        assert_eq!(validate_content_type("image/png"), Ok(ImageKind::Png));
        assert_eq!(validate_content_type("image/jpg"), Ok(ImageKind::Jpeg));
        assert_eq!(validate_content_type("image/jpeg"), Ok(ImageKind::Jpeg));
        assert_eq!(validate_content_type("image/webp"), Ok(ImageKind::Webp));
    }

    #[test]
    fn test_everything_else_rejected() {
        for ct in ["image/gif", "image/svg+xml", "application/pdf", "text/html", ""] {
            assert!(matches!(
                validate_content_type(ct),
                Err(UploadError::UnsupportedFileType(_))
            ));
        }
    }

    #[test]
    fn test_canonical_extension() {
        // jpeg normalizes to jpg
        assert_eq!(
            validate_content_type("image/jpeg").unwrap().canonical_extension(),
            "jpg"
        );
        assert_eq!(
            validate_content_type("image/png").unwrap().canonical_extension(),
            "png"
        );
    }

    #[test]
    fn test_content_type_for_name() {
        assert_eq!(content_type_for_name("abc123.png"), "image/png");
        assert_eq!(content_type_for_name("abc123.jpg"), "image/jpeg");
        assert_eq!(content_type_for_name("abc123.webp"), "image/webp");
        assert_eq!(content_type_for_name("abc123"), "application/octet-stream");
    }
}
