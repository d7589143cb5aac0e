//! Profile image uploads.

use std::fmt;

/// Largest accepted upload, in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Image formats accepted for avatars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageContentType {
    Jpeg,
    Png,
    Gif,
}

impl ImageContentType {
    /// Match a MIME type, ignoring case and parameters such as `charset`.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Canonical MIME type.
    #[must_use]
    pub const fn as_mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

/// Reasons an upload is refused before reaching the image host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageValidationError {
    Empty,
    TooLarge { size: usize, max: usize },
    UnsupportedType { mime: String },
}

impl fmt::Display for ImageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no file uploaded"),
            Self::TooLarge { size, max } => {
                write!(f, "image is {size} bytes; the limit is {max} bytes")
            }
            Self::UnsupportedType { mime } => {
                write!(f, "only jpeg, png, or gif images are allowed (got {mime})")
            }
        }
    }
}

impl std::error::Error for ImageValidationError {}

/// Validated image bytes ready for hosting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    content_type: ImageContentType,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Validate raw upload bytes and their declared MIME type.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::{ImageContentType, ImageUpload};
    ///
    /// let upload = ImageUpload::new("image/png", vec![0x89, b'P', b'N', b'G']).unwrap();
    /// assert_eq!(upload.content_type(), ImageContentType::Png);
    /// assert!(ImageUpload::new("text/plain", vec![1]).is_err());
    /// ```
    pub fn new(mime: &str, bytes: Vec<u8>) -> Result<Self, ImageValidationError> {
        if bytes.is_empty() {
            return Err(ImageValidationError::Empty);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageValidationError::TooLarge {
                size: bytes.len(),
                max: MAX_IMAGE_BYTES,
            });
        }
        let content_type =
            ImageContentType::from_mime(mime).ok_or_else(|| ImageValidationError::UnsupportedType {
                mime: mime.to_owned(),
            })?;
        Ok(Self {
            content_type,
            bytes,
        })
    }

    #[must_use]
    pub fn content_type(&self) -> ImageContentType {
        self.content_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the upload, yielding the raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("image/jpeg", Some(ImageContentType::Jpeg))]
    #[case("IMAGE/PNG", Some(ImageContentType::Png))]
    #[case("image/gif; name=a.gif", Some(ImageContentType::Gif))]
    #[case("image/webp", None)]
    #[case("application/octet-stream", None)]
    #[case("", None)]
    fn recognises_supported_mime_types(
        #[case] mime: &str,
        #[case] expected: Option<ImageContentType>,
    ) {
        assert_eq!(ImageContentType::from_mime(mime), expected);
    }

    #[rstest]
    fn rejects_empty_uploads() {
        assert_eq!(
            ImageUpload::new("image/png", Vec::new()),
            Err(ImageValidationError::Empty)
        );
    }

    #[rstest]
    fn accepts_uploads_at_the_limit() {
        let upload = ImageUpload::new("image/gif", vec![0; MAX_IMAGE_BYTES]).expect("at limit");
        assert_eq!(upload.len(), MAX_IMAGE_BYTES);
    }

    #[rstest]
    fn rejects_oversized_uploads() {
        let result = ImageUpload::new("image/gif", vec![0; MAX_IMAGE_BYTES + 1]);
        assert!(matches!(result, Err(ImageValidationError::TooLarge { .. })));
    }

    #[rstest]
    fn rejects_unsupported_types_with_the_declared_mime() {
        let err = ImageUpload::new("text/html", vec![1]).expect_err("not an image");
        assert_eq!(err.to_string(), "only jpeg, png, or gif images are allowed (got text/html)");
    }
}
