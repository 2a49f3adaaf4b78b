//! The Inertia wire contract.
//!
//! # Responsibilities
//! - Name every protocol header in one place
//! - Read header values as strings
//! - Parse the comma-separated prop lists used by partial reloads
//!
//! # Design Decisions
//! - Header names are lowercase; `HeaderMap` lookups are case-insensitive
//!   on the wire so incoming casing does not matter
//! - Comma lists discard empty entries but never trim whitespace
//! - An absent or empty header reads as `None`, so filters built on these
//!   lists simply do not apply

use axum::http::HeaderMap;

/// Marks a request as a protocol data request; echoed as `"true"` on
/// protocol responses.
pub const INERTIA: &str = "x-inertia";

/// The client's known version tag, compared on GET requests.
pub const VERSION: &str = "x-inertia-version";

/// Response header instructing the client to do a full browser navigation.
pub const LOCATION: &str = "x-inertia-location";

/// Comma-separated prop names excluded from `mergeProps` on this response.
pub const RESET: &str = "x-inertia-reset";

/// Comma-separated prop names forming the "only" partial-reload filter.
pub const PARTIAL_ONLY: &str = "x-inertia-partial-data";

/// Comma-separated prop names forming the "except" partial-reload filter.
pub const PARTIAL_EXCEPT: &str = "x-inertia-partial-except";

/// Names the component a partial reload targets.
pub const PARTIAL_COMPONENT: &str = "x-inertia-partial-component";

/// Nests shared validation errors under this key instead of the top level.
pub const ERROR_BAG: &str = "x-inertia-error-bag";

/// Read a header value as a string, if present and valid UTF-8.
pub fn get<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Parse a comma-separated prop-name header.
///
/// Returns `None` when the header is absent or empty, so callers can treat
/// "no filter" and "no header" the same way. Empty entries (`"a,,b"`) are
/// discarded; a header of only separators yields an empty list, which is a
/// present-but-empty filter.
pub fn comma_list(headers: &HeaderMap, name: &str) -> Option<Vec<String>> {
    let raw = get(headers, name)?;
    if raw.is_empty() {
        return None;
    }
    Some(
        raw.split(',')
            .filter(|entry| !entry.is_empty())
            .map(String::from)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: &'static str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_get_is_case_insensitive_on_the_wire() {
        // HeaderMap normalizes names, so a lowercase constant finds any casing.
        let headers = headers_with(INERTIA, "true");
        assert_eq!(get(&headers, INERTIA), Some("true"));
        assert_eq!(get(&headers, VERSION), None);
    }

    #[test]
    fn test_comma_list_absent_and_empty() {
        assert_eq!(comma_list(&HeaderMap::new(), PARTIAL_ONLY), None);

        let headers = headers_with(PARTIAL_ONLY, "");
        assert_eq!(comma_list(&headers, PARTIAL_ONLY), None);
    }

    #[test]
    fn test_comma_list_discards_empty_entries() {
        let headers = headers_with(PARTIAL_ONLY, "a,,b,");
        assert_eq!(
            comma_list(&headers, PARTIAL_ONLY),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_comma_list_separators_only_is_present_but_empty() {
        let headers = headers_with(PARTIAL_ONLY, ",");
        assert_eq!(comma_list(&headers, PARTIAL_ONLY), Some(Vec::new()));
    }

    #[test]
    fn test_comma_list_does_not_trim() {
        let headers = headers_with(PARTIAL_ONLY, " a ,b");
        assert_eq!(
            comma_list(&headers, PARTIAL_ONLY),
            Some(vec![" a ".to_string(), "b".to_string()])
        );
    }
}
