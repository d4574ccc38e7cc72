//! Flat tabular records.
//!
//! A [`Record`] is one row of tabular data: an insertion-ordered mapping from
//! field name to scalar [`Value`]. Records are plain values — the pipeline
//! reads them and produces fresh ones, it never mutates a caller's record.
//!
//! # Value identity
//!
//! [`Value`] implements `Eq` and `Hash` so typed values can route group
//! membership directly. Numbers compare and hash by their IEEE-754 bit
//! pattern, which makes `Num(1.0)` and `Str("1")` distinct keys (and makes
//! `NaN` equal to itself for routing purposes).

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// Value
// =============================================================================

/// A scalar cell value: a number or a string.
///
/// Serde representation is untagged: JSON numbers map to [`Value::Num`],
/// JSON strings to [`Value::Str`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric value.
    Num(f64),
    /// String value.
    Str(String),
}

impl Value {
    /// Return the numeric value, if this is a number.
    #[inline]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Str(_) => None,
        }
    }

    /// Return the string value, if this is a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Num(_) => None,
            Value::Str(s) => Some(s),
        }
    }

    /// Returns true if this is a number.
    #[inline]
    pub fn is_num(&self) -> bool {
        matches!(self, Value::Num(_))
    }

    /// Returns true if this is a string.
    #[inline]
    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Parse a text cell: numeric-looking text becomes [`Value::Num`],
    /// anything else [`Value::Str`].
    pub fn parse(cell: &str) -> Self {
        match cell.parse::<f64>() {
            Ok(n) => Value::Num(n),
            Err(_) => Value::Str(cell.to_string()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Bit equality: total, and consistent with Hash.
            (Value::Num(a), Value::Num(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Num(n) => {
                state.write_u8(0);
                state.write_u64(n.to_bits());
            }
            Value::Str(s) => {
                state.write_u8(1);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Num(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Num(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

// =============================================================================
// Record
// =============================================================================

/// One flat tabular row: field name → [`Value`], in insertion order.
///
/// Field names are unique; [`Record::insert`] replaces an existing field in
/// place. Equality is field-order-sensitive.
///
/// # Example
///
/// ```
/// use groupfit::Record;
///
/// let rec = Record::new()
///     .with_field("branch", "A")
///     .with_field("period", 1.0)
///     .with_field("sales", 2.0);
///
/// assert_eq!(rec.get("branch").and_then(|v| v.as_str()), Some("A"));
/// assert_eq!(rec.get("sales").and_then(|v| v.as_num()), Some(2.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a field, replacing any existing field of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns true if the record has a field of this name.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut rec = Record::new();
        for (name, value) in iter {
            rec.insert(name, value);
        }
        rec
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut rec = Record::new();
                while let Some((name, value)) = access.next_entry::<String, Value>()? {
                    rec.insert(name, value);
                }
                Ok(rec)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
