//! Tests for `error` module

use super::error::*;
use super::filter::Comparator;

// -------------------------------------------------------------------------
// Error code tests
// -------------------------------------------------------------------------

#[test]
fn test_error_codes_are_unique() {
    let errors: Vec<SearchError> = vec![
        SearchError::UnknownField("age".into()),
        SearchError::UnknownSortField("age".into()),
        SearchError::BadFilterValue {
            field: "created".into(),
            value: "not-a-date".into(),
        },
        SearchError::BadComparator {
            field: "active".into(),
            comparator: Comparator::Gt,
            kind: "bool",
        },
        SearchError::NoDefaultSort,
    ];

    let codes: Vec<&str> = errors.iter().map(SearchError::code).collect();

    let mut unique_codes = codes.clone();
    unique_codes.sort_unstable();
    unique_codes.dedup();
    assert_eq!(codes.len(), unique_codes.len(), "Error codes must be unique");

    for code in &codes {
        assert!(code.starts_with("GRID-"), "Code {code} should start with GRID-");
    }
}

#[test]
fn test_display_includes_code_and_context() {
    let err = SearchError::UnknownField("ghost".into());
    let message = err.to_string();
    assert!(message.contains("[GRID-001]"));
    assert!(message.contains("ghost"));
}

#[test]
fn test_bad_filter_value_reports_field_and_value() {
    let err = SearchError::BadFilterValue {
        field: "created".into(),
        value: "yesterday".into(),
    };
    assert!(err.to_string().contains("created"));
    assert!(err.to_string().contains("yesterday"));
    assert_eq!(err.field(), Some("created"));
}

#[test]
fn test_bad_comparator_names_the_kind() {
    let err = SearchError::BadComparator {
        field: "id".into(),
        comparator: Comparator::LtEq,
        kind: "guid",
    };
    let message = err.to_string();
    assert!(message.contains("guid"));
    assert!(message.contains("LtEq"));
}

#[test]
fn test_no_default_sort_has_no_field() {
    assert!(SearchError::NoDefaultSort.field().is_none());
}
