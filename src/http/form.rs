//! Urlencoded input parsing module
//!
//! Decodes `application/x-www-form-urlencoded` bodies and URL query strings
//! into string pairs, with typed required-field validation for form input.

use std::collections::HashMap;
use thiserror::Error;

/// Rejected form input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// A required field was absent or empty. Carries the field name for the
    /// plain-text 400 body.
    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Decode urlencoded `key=value` pairs into a map. Later duplicates win.
///
/// `+` decodes to a space and percent-escapes are resolved, per the form
/// encoding rules.
pub fn parse_pairs(input: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(input).into_owned().collect()
}

/// Fetch a required form field, rejecting absent and empty values.
pub fn required<'a>(
    fields: &'a HashMap<String, String>,
    name: &str,
) -> Result<&'a str, FormError> {
    match fields.get(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(FormError::MissingField(name.to_string())),
    }
}

/// Extract the `id` parameter from an optional query string.
pub fn query_id(query: Option<&str>) -> Option<String> {
    let query = query?;
    parse_pairs(query.as_bytes()).remove("id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_form() {
        let fields = parse_pairs(b"title=Hello&author=Amy&content=World");
        assert_eq!(fields["title"], "Hello");
        assert_eq!(fields["author"], "Amy");
        assert_eq!(fields["content"], "World");
    }

    #[test]
    fn test_parse_decodes_plus_and_percent() {
        let fields = parse_pairs(b"title=Hello+World&content=a%26b%3Dc");
        assert_eq!(fields["title"], "Hello World");
        assert_eq!(fields["content"], "a&b=c");
    }

    #[test]
    fn test_later_duplicate_wins() {
        let fields = parse_pairs(b"title=first&title=second");
        assert_eq!(fields["title"], "second");
    }

    #[test]
    fn test_required_present() {
        let fields = parse_pairs(b"title=Hello");
        assert_eq!(required(&fields, "title"), Ok("Hello"));
    }

    #[test]
    fn test_required_missing_or_empty() {
        let fields = parse_pairs(b"title=");
        assert_eq!(
            required(&fields, "title"),
            Err(FormError::MissingField("title".to_string()))
        );
        assert_eq!(
            required(&fields, "author"),
            Err(FormError::MissingField("author".to_string()))
        );
    }

    #[test]
    fn test_query_id() {
        assert_eq!(query_id(Some("id=123")), Some("123".to_string()));
        assert_eq!(query_id(Some("other=x")), None);
        assert_eq!(query_id(None), None);
    }
}
