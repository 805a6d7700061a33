//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors report what is wrong; these helpers turn that into the
//! `invalid_request` envelope with `{field, code}` details.

use serde_json::json;

use crate::domain::{Category, Error, FootprintValidationError, UserId, UserValidationError};

fn field_error(message: String, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

fn indexed_field_error(message: String, field: &str, index: usize, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "index": index,
        "code": code,
    }))
}

pub(crate) fn map_user_validation_error(err: UserValidationError) -> Error {
    field_error(err.to_string(), err.field(), err.code())
}

pub(crate) fn map_footprint_validation_error(err: FootprintValidationError) -> Error {
    field_error(err.to_string(), err.field(), err.code())
}

/// Like [`map_footprint_validation_error`] for entries of a JSON array.
pub(crate) fn map_indexed_footprint_error(
    list: &'static str,
    index: usize,
) -> impl FnOnce(FootprintValidationError) -> Error {
    move |err| {
        indexed_field_error(
            format!("{list}[{index}]: {err}"),
            &format!("{list}.{}", err.field()),
            index,
            err.code(),
        )
    }
}

/// Validate a user identifier taken from a path segment.
pub(crate) fn parse_user_id(raw: i64) -> Result<UserId, Error> {
    UserId::new(raw).map_err(map_user_validation_error)
}

/// Resolve a history category path segment.
pub(crate) fn parse_category(raw: &str) -> Result<Category, Error> {
    Category::parse(raw).ok_or_else(|| {
        Error::invalid_request(format!(
            "unknown category {raw}; expected transportation, electricity or wastage"
        ))
        .with_details(json!({
            "field": "category",
            "value": raw,
            "code": "unknown_category",
        }))
    })
}
