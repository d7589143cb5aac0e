//! Port for off-site storage of profile images.

use async_trait::async_trait;

use crate::domain::{ImageUpload, ImageUrl};

use super::define_port_error;

define_port_error! {
    /// Failures reported by image hosting adapters.
    pub enum ImageHostError {
        /// No hosting endpoint is configured.
        Unconfigured => "image hosting is not configured",
        /// The host could not be reached.
        Transport { message: String } => "image host unreachable: {message}",
        /// The host answered with a failure status.
        Rejected { status: u16, message: String } => "image host rejected upload ({status}): {message}",
        /// The host answered with a body we could not interpret.
        Decode { message: String } => "image host response malformed: {message}",
    }
}

/// Stores an image and returns a URL under which it is served.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<ImageUrl, ImageHostError>;
}

/// Stand-in used when no image host is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredImageHost;

#[async_trait]
impl ImageHost for UnconfiguredImageHost {
    async fn upload(&self, _image: ImageUpload) -> Result<ImageUrl, ImageHostError> {
        Err(ImageHostError::unconfigured())
    }
}
