//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod follows;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod uploads;
pub mod users;
pub mod users_dto;
pub mod validation;

pub use error::ApiResult;

/// JSON extractor configuration shared by every handler.
///
/// Malformed bodies are reported with the domain error payload instead of
/// Actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}
