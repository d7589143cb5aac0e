//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, UserId};

/// Validation error codes raised before a request reaches the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a positive integer"))
        .with_value(ErrorCode::InvalidId, value)
}

/// Parse a user id taken from the URL path.
pub(crate) fn parse_path_id(raw: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::parse(raw).map_err(|_| invalid_id_error(field, raw))
}

/// Parse a required user id taken from a JSON body.
pub(crate) fn require_body_id(value: Option<i64>, field: FieldName) -> Result<UserId, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    UserId::from_i64(raw).map_err(|_| invalid_id_error(field, &raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    const ID: FieldName = FieldName::new("id");

    #[rstest]
    #[case("7", 7)]
    #[case(" 12 ", 12)]
    fn path_ids_parse_positive_integers(#[case] raw: &str, #[case] expected: i32) {
        let id = parse_path_id(raw, ID).expect("valid id");
        assert_eq!(id.get(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("abc")]
    #[case("1.5")]
    #[case("99999999999")]
    fn path_ids_reject_everything_else(#[case] raw: &str) {
        let error = parse_path_id(raw, ID).expect_err("invalid id");
        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({"field": "id", "value": raw, "code": "invalid_id"}))
        );
    }

    #[rstest]
    fn missing_body_ids_name_the_field() {
        let error =
            require_body_id(None, FieldName::new("followerId")).expect_err("missing field");
        assert_eq!(error.message(), "missing required field: followerId");
        assert_eq!(
            error.details(),
            Some(&json!({"field": "followerId", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::from(i32::MAX) + 1)]
    fn out_of_range_body_ids_are_invalid(#[case] raw: i64) {
        let error =
            require_body_id(Some(raw), FieldName::new("followingId")).expect_err("invalid id");
        assert_eq!(error.code(), DomainCode::InvalidRequest);
    }
}
