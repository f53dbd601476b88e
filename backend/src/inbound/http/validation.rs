//! Shared validation helpers for inbound HTTP adapters.
//!
//! Handlers use these helpers for request *shape* problems (absent fields).
//! Field *content* rules live in the domain, which collects violations into
//! a list; the helpers here fail fast because a missing field means the
//! client constructed the request wrongly rather than the user mistyping.

use serde_json::json;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Unwrap a required request field or fail with a field-level error.
pub(crate) fn require_field<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    fn missing_field_error_names_the_field() {
        let error = missing_field_error(FieldName::new("ipAddress"));
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().and_then(Value::as_object).expect("details");
        assert_eq!(
            details.get("field").and_then(Value::as_str),
            Some("ipAddress")
        );
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("missing_field")
        );
    }

    #[rstest]
    fn require_field_passes_through_present_values() {
        let value = require_field(Some(7), FieldName::new("count")).expect("present");
        assert_eq!(value, 7);
    }

    #[rstest]
    fn require_field_rejects_absent_values() {
        let error = require_field::<u32>(None, FieldName::new("count")).expect_err("absent");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
