//! Typed field values and per-kind parsing.
//!
//! Accessors read entity attributes into the [`FieldValue`] tagged union,
//! and every mapping declares a [`FieldKind`] once at registration. Filter
//! values arrive as text and are parsed here against the declared kind:
//! leniently for most kinds (a failed parse drops the filter), strictly for
//! dates. Enumerations carry an [`EnumTable`] of member names in declared
//! ordinal order, resolved at declaration time rather than per request.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::error::{Result, SearchError};

/// A single field value read from an entity or parsed from filter text.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// UTF-8 text.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Double-precision float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Globally unique identifier.
    Guid(Uuid),
    /// UTC timestamp.
    Date(DateTime<Utc>),
    /// Ordinal of an enumeration member, per the mapping's [`EnumTable`].
    Enum(usize),
    /// Absent value; produced when an accessor unwraps an empty optional.
    Null,
}

impl FieldValue {
    /// Returns `true` for [`FieldValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Typed equality against a parsed value of the same kind.
    ///
    /// `Null` never equals anything, so `Eq` on an absent value is false
    /// and `NEq` is true.
    #[must_use]
    pub fn eq_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Guid(a), Self::Guid(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            _ => false,
        }
    }

    /// Typed ordering against a parsed value of the same kind.
    ///
    /// Returns `None` when either side is `Null` or the kinds differ, which
    /// makes every ordering comparator false on absent values.
    #[must_use]
    pub fn cmp_value(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::Enum(a), Self::Enum(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Total ordering used for sorting rows. `Null` sorts before every
    /// present value; mixed kinds (which a well-typed accessor never
    /// produces) compare equal.
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Less,
            (_, Self::Null) => Ordering::Greater,
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Guid(a), Self::Guid(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Enum(a), Self::Enum(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }

    /// Text rendition used by the substring comparators. `Null` becomes the
    /// empty string so `Like` never fails on absent values.
    #[must_use]
    pub fn as_like_text(&self) -> String {
        match self {
            Self::Str(text) => text.clone(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Guid(value) => value.to_string(),
            Self::Date(value) => value.to_rfc3339(),
            Self::Enum(ordinal) => ordinal.to_string(),
            Self::Null => String::new(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        Self::Guid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Member names of one enumeration, in declared ordinal order.
///
/// Built once when the mapping is declared and reused for every compile;
/// lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct EnumTable {
    members: Arc<[String]>,
}

impl EnumTable {
    /// Creates a table from member names in declared order.
    #[must_use]
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` when the table has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member name at the given ordinal.
    #[must_use]
    pub fn name(&self, ordinal: usize) -> Option<&str> {
        self.members.get(ordinal).map(String::as_str)
    }

    /// Case-insensitive exact lookup of a member name.
    #[must_use]
    pub fn ordinal_of(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.members
            .iter()
            .position(|member| member.to_lowercase() == wanted)
    }

    /// Ordinals of every member whose name contains the given substring,
    /// case-insensitively.
    #[must_use]
    pub fn matching(&self, fragment: &str) -> Vec<usize> {
        let needle = fragment.to_lowercase();
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| member.to_lowercase().contains(&needle))
            .map(|(ordinal, _)| ordinal)
            .collect()
    }
}

/// Declared kind of a mapped field, fixed at mapping declaration time.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// UTF-8 text.
    Str,
    /// Signed integer.
    Int,
    /// Double-precision float.
    Float,
    /// Boolean.
    Bool,
    /// Globally unique identifier.
    Guid,
    /// UTC timestamp.
    Date,
    /// Enumeration backed by a declared-order member table.
    Enum(EnumTable),
}

impl FieldKind {
    /// Short kind name used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Guid => "guid",
            Self::Date => "date",
            Self::Enum(_) => "enum",
        }
    }

    /// Parses one filter value against this kind.
    ///
    /// Returns `Ok(None)` when a non-date value does not parse, which makes
    /// the caller drop that filter. A malformed date is a hard
    /// [`SearchError::BadFilterValue`]. Enum text resolves to the member's
    /// ordinal by case-insensitive exact name; the set-building comparators
    /// live in the mapping layer.
    pub fn parse(&self, field: &str, raw: &str) -> Result<Option<FieldValue>> {
        let parsed = match self {
            Self::Str => Some(FieldValue::Str(raw.to_owned())),
            Self::Int => raw.trim().parse::<i64>().ok().map(FieldValue::Int),
            Self::Float => raw.trim().parse::<f64>().ok().map(FieldValue::Float),
            Self::Bool => parse_bool(raw).map(FieldValue::Bool),
            Self::Guid => Uuid::parse_str(raw.trim()).ok().map(FieldValue::Guid),
            Self::Enum(table) => table.ordinal_of(raw).map(FieldValue::Enum),
            Self::Date => match parse_date(raw) {
                Some(date) => Some(FieldValue::Date(date)),
                None => {
                    return Err(SearchError::BadFilterValue {
                        field: field.to_owned(),
                        value: raw.to_owned(),
                    })
                }
            },
        };
        Ok(parsed)
    }

    /// Parses a comma-separated membership list against this kind.
    ///
    /// Blank elements are ignored and non-date elements that fail to parse
    /// are discarded; an empty result drops the whole filter. Date elements
    /// stay strict, as in [`FieldKind::parse`].
    pub fn parse_list(&self, field: &str, raw: &str) -> Result<Vec<FieldValue>> {
        let mut values = Vec::new();
        for element in raw.split(',') {
            let element = element.trim();
            if element.is_empty() {
                continue;
            }
            if let Some(value) = self.parse(field, element)? {
                values.push(value);
            }
        }
        Ok(values)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`, and bare
/// `YYYY-MM-DD` (midnight UTC).
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }
    None
}
