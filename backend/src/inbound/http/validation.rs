//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde_json::json;

use crate::domain::Error;
use crate::domain::course::IdParseError;

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

pub(crate) fn invalid_id_error(field: FieldName, error: &IdParseError) -> Error {
    Error::invalid_reference(format!("{} must be a valid UUID", field.as_str())).with_details(
        json!({
            "field": field.as_str(),
            "value": error.value(),
            "code": "invalid_id",
        }),
    )
}

/// Parse a typed identifier from a path or body string.
///
/// Malformed values surface as `invalid_reference` with the offending field.
pub(crate) fn parse_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = IdParseError>,
{
    value
        .parse::<T>()
        .map_err(|error| invalid_id_error(field, &error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::course::{ContentId, CourseId};
    use rstest::rstest;

    #[rstest]
    fn parses_valid_ids() {
        let id: CourseId = parse_id(
            "00000000-0000-0000-0000-000000000001",
            FieldName::new("courseId"),
        )
        .expect("valid id");
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000001");
    }

    #[rstest]
    fn malformed_ids_are_invalid_references() {
        let error = parse_id::<ContentId>("lesson-1", FieldName::new("contentId"))
            .expect_err("malformed id");
        assert_eq!(error.code(), ErrorCode::InvalidReference);
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "contentId", "value": "lesson-1", "code": "invalid_id" }))
        );
    }
}
