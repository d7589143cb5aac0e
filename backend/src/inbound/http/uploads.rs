//! Profile image upload.
//!
//! ```text
//! POST /api/upload   (Content-Type: image/png, raw bytes)
//! ```
//!
//! The body is read up to one byte past the size limit so oversized uploads
//! are refused without buffering them entirely.

use actix_web::http::header;
use actix_web::{HttpRequest, Resource, web};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::ports::ImageHostError;
use crate::domain::{Error, ImageUpload, ImageValidationError, MAX_IMAGE_BYTES};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Where an uploaded image is served from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UploadBody {
    #[schema(example = "https://images.example.com/avatars/7f3c.png")]
    pub url: String,
    #[schema(example = "Image uploaded successfully")]
    pub message: String,
}

/// Resource for `/upload`, to be mounted under the `/api` scope.
pub fn upload_service() -> Resource {
    web::resource("/upload").route(web::post().to(upload_image))
}

/// Store an avatar with the image host.
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(
        content = Vec<u8>,
        description = "Raw JPEG, PNG, or GIF bytes, at most 5 MiB",
        content_type = "application/octet-stream"
    ),
    responses(
        (status = 200, description = "Image stored", body = UploadBody),
        (status = 400, description = "Missing, oversized, or unsupported image", body = ErrorSchema),
        (status = 503, description = "Image hosting unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["uploads"],
    operation_id = "uploadImage"
)]
pub async fn upload_image(
    state: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Payload,
) -> ApiResult<web::Json<UploadBody>> {
    let mime = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let bytes = read_capped(payload, MAX_IMAGE_BYTES).await?;
    let image = ImageUpload::new(&mime, bytes).map_err(map_image_validation_error)?;
    let size = image.len();

    let url = state
        .images
        .upload(image)
        .await
        .map_err(map_image_host_error)?;
    info!(size, url = %url, "image uploaded");
    Ok(web::Json(UploadBody {
        url: url.to_string(),
        message: "Image uploaded successfully".to_owned(),
    }))
}

/// Collect the body, stopping as soon as it grows past `limit`.
async fn read_capped(mut payload: web::Payload, limit: usize) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            warn!(error = %err, "failed reading upload body");
            Error::invalid_request("Request body could not be read")
                .with_details(json!({ "field": "file", "code": "unreadable_body" }))
        })?;
        bytes.extend_from_slice(&chunk);
        if bytes.len() > limit {
            break;
        }
    }
    Ok(bytes)
}

fn map_image_validation_error(err: ImageValidationError) -> Error {
    let code = match &err {
        ImageValidationError::Empty => "missing_file",
        ImageValidationError::TooLarge { .. } => "file_too_large",
        ImageValidationError::UnsupportedType { .. } => "unsupported_type",
    };
    let message = match &err {
        ImageValidationError::Empty => "No file uploaded".to_owned(),
        other => other.to_string(),
    };
    Error::invalid_request(message).with_details(json!({ "field": "file", "code": code }))
}

fn map_image_host_error(err: ImageHostError) -> Error {
    match err {
        ImageHostError::Unconfigured => {
            Error::service_unavailable("Image uploads are not configured")
        }
        ImageHostError::Transport { message } => {
            warn!(%message, "image host unreachable");
            Error::service_unavailable("Image host unavailable")
        }
        other => Error::internal(other.to_string()),
    }
}
