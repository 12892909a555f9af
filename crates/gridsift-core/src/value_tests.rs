//! Tests for `value` module

use std::cmp::Ordering;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use super::value::*;

// -------------------------------------------------------------------------
// Primitive parsing
// -------------------------------------------------------------------------

#[test]
fn test_int_parse_accepts_surrounding_whitespace() {
    let parsed = FieldKind::Int.parse("age", " 42 ").unwrap();
    assert_eq!(parsed, Some(FieldValue::Int(42)));
}

#[test]
fn test_int_parse_failure_is_lenient() {
    let parsed = FieldKind::Int.parse("age", "forty-two").unwrap();
    assert_eq!(parsed, None);
}

#[test]
fn test_bool_parse_is_case_insensitive() {
    assert_eq!(
        FieldKind::Bool.parse("active", "TRUE").unwrap(),
        Some(FieldValue::Bool(true))
    );
    assert_eq!(FieldKind::Bool.parse("active", "yes").unwrap(), None);
}

#[test]
fn test_guid_parse_failure_is_lenient() {
    assert_eq!(FieldKind::Guid.parse("id", "not-a-guid").unwrap(), None);

    let id = Uuid::new_v4();
    let parsed = FieldKind::Guid.parse("id", &id.to_string()).unwrap();
    assert_eq!(parsed, Some(FieldValue::Guid(id)));
}

// -------------------------------------------------------------------------
// Date parsing: strict, multiple syntaxes
// -------------------------------------------------------------------------

#[test]
fn test_date_parse_accepts_rfc3339() {
    let parsed = FieldKind::Date
        .parse("created", "2024-03-01T10:30:00Z")
        .unwrap();
    let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
    assert_eq!(parsed, Some(FieldValue::Date(expected)));
}

#[test]
fn test_date_parse_accepts_bare_day() {
    let parsed = FieldKind::Date.parse("created", "2024-03-01").unwrap();
    let expected = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    assert_eq!(parsed, Some(FieldValue::Date(expected)));
}

#[test]
fn test_date_parse_failure_is_a_hard_error() {
    let err = FieldKind::Date.parse("created", "yesterday").unwrap_err();
    assert_eq!(err.code(), "GRID-003");
    assert_eq!(err.field(), Some("created"));
}

#[test]
fn test_date_list_elements_stay_strict() {
    let err = FieldKind::Date
        .parse_list("created", "2024-03-01, soon")
        .unwrap_err();
    assert_eq!(err.code(), "GRID-003");
}

// -------------------------------------------------------------------------
// Membership lists
// -------------------------------------------------------------------------

#[test]
fn test_parse_list_skips_blank_and_unparsable_elements() {
    let values = FieldKind::Int.parse_list("age", "1,, x ,3").unwrap();
    assert_eq!(values, vec![FieldValue::Int(1), FieldValue::Int(3)]);
}

#[test]
fn test_parse_list_can_end_up_empty() {
    let values = FieldKind::Int.parse_list("age", "a, b").unwrap();
    assert!(values.is_empty());
}

// -------------------------------------------------------------------------
// Value semantics
// -------------------------------------------------------------------------

#[test]
fn test_null_never_equals_and_never_orders() {
    let null = FieldValue::Null;
    let five = FieldValue::Int(5);
    assert!(!null.eq_value(&five));
    assert!(!five.eq_value(&null));
    assert_eq!(null.cmp_value(&five), None);
}

#[test]
fn test_sort_cmp_places_null_first() {
    assert_eq!(FieldValue::Null.sort_cmp(&FieldValue::Int(1)), Ordering::Less);
    assert_eq!(
        FieldValue::Int(1).sort_cmp(&FieldValue::Null),
        Ordering::Greater
    );
    assert_eq!(FieldValue::Null.sort_cmp(&FieldValue::Null), Ordering::Equal);
}

#[test]
fn test_like_text_stringifies_every_kind() {
    assert_eq!(FieldValue::Int(42).as_like_text(), "42");
    assert_eq!(FieldValue::Bool(true).as_like_text(), "true");
    assert_eq!(FieldValue::Null.as_like_text(), "");

    let id = Uuid::new_v4();
    assert_eq!(FieldValue::Guid(id).as_like_text(), id.to_string());
}

#[test]
fn test_option_accessor_values_convert_to_null() {
    assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
    assert_eq!(FieldValue::from(Some(7_i64)), FieldValue::Int(7));
    assert_eq!(
        FieldValue::from(Some("x".to_owned())),
        FieldValue::Str("x".into())
    );
}

// -------------------------------------------------------------------------
// Enum tables
// -------------------------------------------------------------------------

#[test]
fn test_enum_table_lookup_is_case_insensitive() {
    let table = EnumTable::new(["Pending", "Active", "Closed"]);
    assert_eq!(table.ordinal_of("active"), Some(1));
    assert_eq!(table.ordinal_of(" CLOSED "), Some(2));
    assert_eq!(table.ordinal_of("Archived"), None);
}

#[test]
fn test_enum_table_substring_scan() {
    let table = EnumTable::new(["Pending", "Active", "Inactive"]);
    assert_eq!(table.matching("active"), vec![1, 2]);
    assert_eq!(table.matching("x"), Vec::<usize>::new());
    // empty fragment matches every member
    assert_eq!(table.matching(""), vec![0, 1, 2]);
}

#[test]
fn test_enum_parse_resolves_member_ordinal() {
    let kind = FieldKind::Enum(EnumTable::new(["Low", "High"]));
    assert_eq!(kind.parse("level", "high").unwrap(), Some(FieldValue::Enum(1)));
    assert_eq!(kind.parse("level", "middle").unwrap(), None);
}
