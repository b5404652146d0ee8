//! Shared validation helpers for inbound HTTP adapters.

use pagination::{PageRequest, PageRequestError};
use serde_json::json;

use crate::domain::{Error, ProfileId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidInteger,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidInteger => "invalid_integer",
            ErrorCode::OutOfRange => "out_of_range",
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

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

/// Parse a profile identifier taken from the request path.
pub(crate) fn parse_profile_id(value: &str) -> Result<ProfileId, Error> {
    value
        .parse()
        .map_err(|_| invalid_uuid_error(FieldName::new("id"), value))
}

fn parse_page_number(value: Option<&str>, field: FieldName) -> Result<Option<u32>, Error> {
    value
        .map(|raw| {
            raw.trim().parse::<u32>().map_err(|_| {
                let name = field.as_str();
                ValidationError::new(name, format!("{name} must be a positive integer"))
                    .with_value(ErrorCode::InvalidInteger, raw)
            })
        })
        .transpose()
}

/// Validate raw `page` and `limit` query values.
///
/// Absent values fall back to the pagination defaults.
pub(crate) fn parse_page_request(
    page: Option<&str>,
    limit: Option<&str>,
) -> Result<PageRequest, Error> {
    let page = parse_page_number(page, FieldName::new("page"))?;
    let limit = parse_page_number(limit, FieldName::new("limit"))?;
    PageRequest::from_optional(page, limit).map_err(|err| {
        let field = match err {
            PageRequestError::PageOutOfRange => "page",
            PageRequestError::LimitOutOfRange { .. } => "limit",
        };
        ValidationError::new(field, err.to_string()).with_code(ErrorCode::OutOfRange)
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE};
    use rstest::rstest;
    use serde_json::Value;

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a str> {
        error.details().and_then(|d| d.get(key)).and_then(Value::as_str)
    }

    #[rstest]
    fn profile_id_accepts_uuid() {
        let id = parse_profile_id("9b2f4c1e-0d6a-4b8e-9f3a-2c1d5e7f8a90").expect("valid id");
        assert_eq!(id.to_string(), "9b2f4c1e-0d6a-4b8e-9f3a-2c1d5e7f8a90");
    }

    #[rstest]
    fn profile_id_rejects_garbage_with_details() {
        let err = parse_profile_id("42").expect_err("not a uuid");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(err.message(), "id must be a valid UUID");
        assert_eq!(detail(&err, "value"), Some("42"));
        assert_eq!(detail(&err, "code"), Some("invalid_uuid"));
    }

    #[rstest]
    fn missing_pagination_uses_defaults() {
        let request = parse_page_request(None, None).expect("defaults");
        assert_eq!(request.page(), DEFAULT_PAGE);
        assert_eq!(request.limit(), DEFAULT_LIMIT);
    }

    #[rstest]
    #[case(Some("0"), None, "page", "out_of_range")]
    #[case(None, Some("0"), "limit", "out_of_range")]
    #[case(None, Some("101"), "limit", "out_of_range")]
    #[case(Some("-1"), None, "page", "invalid_integer")]
    #[case(None, Some("ten"), "limit", "invalid_integer")]
    fn bad_pagination_is_rejected(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = parse_page_request(page, limit).expect_err("invalid pagination");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(detail(&err, "field"), Some(field));
        assert_eq!(detail(&err, "code"), Some(code));
    }
}
