//! Reqwest-backed image host adapter.
//!
//! Uploads the raw image bytes to a single endpoint and reads the public URL
//! from the JSON reply (`secure_url`, falling back to `url`). The adapter owns
//! transport details only; size and type checks happen in the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::domain::ports::{ImageHost, ImageHostError};
use crate::domain::{ImageUpload, ImageUrl};

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Image host reached over HTTP.
pub struct HttpImageHost {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpImageHost {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, token: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            token: token.filter(|value| !value.trim().is_empty()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponseDto {
    secure_url: Option<String>,
    url: Option<String>,
}

#[async_trait]
impl ImageHost for HttpImageHost {
    async fn upload(&self, image: ImageUpload) -> Result<ImageUrl, ImageHostError> {
        let content_type = image.content_type().as_mime();
        let size = image.len();
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::ACCEPT, "application/json")
            .body(image.into_bytes());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), size, content_type, "image host replied");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_upload_response(body.as_ref())
    }
}

fn parse_upload_response(body: &[u8]) -> Result<ImageUrl, ImageHostError> {
    let decoded: UploadResponseDto = serde_json::from_slice(body)
        .map_err(|error| ImageHostError::decode(format!("invalid JSON payload: {error}")))?;
    let url = decoded
        .secure_url
        .or(decoded.url)
        .ok_or_else(|| ImageHostError::decode("reply carries neither secure_url nor url"))?;
    ImageUrl::new(url).map_err(|error| ImageHostError::decode(error.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> ImageHostError {
    if error.is_timeout() {
        ImageHostError::transport(format!("timed out: {error}"))
    } else {
        ImageHostError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ImageHostError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no reason given")
            .to_owned()
    } else {
        preview
    };
    ImageHostError::rejected(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    compact.chars().take(PREVIEW_CHAR_LIMIT).collect()
}
