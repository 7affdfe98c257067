//! Core types: result identifiers, tagged ranked entries and similarity scores.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

use crate::error::RankError;

/// Identity of a single search result.
///
/// Search backends return string or numeric keys. Equality and hashing are
/// by value, so `Text("1")`, `Integer(1)` and `Number(1.0)` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    /// A textual identifier such as a document key or URL.
    Text(String),
    /// An integral identifier that fits in `i64`, such as a row id.
    Integer(i64),
    /// Any other JSON number: unsigned keys above `i64::MAX` or floats.
    Number(Number),
}

impl Identifier {
    /// Interpret a JSON scalar as an identifier.
    ///
    /// `position` is only used for error reporting.
    pub fn from_json(value: &Value, position: usize) -> Result<Self, RankError> {
        match value {
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Number(n) => Ok(n
                .as_i64()
                .map_or_else(|| Self::Number(n.clone()), Self::Integer)),
            other => Err(RankError::InvalidIdentifier {
                position,
                reason: format!("expected string or number, found {}", json_kind(other)),
            }),
        }
    }

    /// Convert back into the JSON scalar it was read from.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Integer(i) => Value::from(*i),
            Self::Number(n) => Value::Number(n.clone()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Shape of a ranked entry, fixed once per list at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryShape {
    /// The entry is the identifier itself.
    Bare,
    /// The entry is a record carrying the identifier under a field.
    Record,
}

impl EntryShape {
    /// Human-readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bare => "bare identifier",
            Self::Record => "record",
        }
    }
}

impl fmt::Display for EntryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single ranked result.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A bare identifier.
    Bare(Identifier),
    /// A structured record. `fields` holds the record exactly as returned,
    /// including the identifier field.
    Record {
        /// Identifier extracted from the record.
        id: Identifier,
        /// The raw record.
        fields: Map<String, Value>,
    },
}

impl Entry {
    /// Tag a raw JSON entry as bare or structured.
    ///
    /// `position` is 1-based and only used for error reporting.
    pub fn from_json(value: &Value, position: usize, id_field: &str) -> Result<Self, RankError> {
        match value {
            Value::Object(fields) => {
                let raw_id = fields
                    .get(id_field)
                    .ok_or_else(|| RankError::MissingIdentifier {
                        position,
                        field: id_field.to_string(),
                    })?;
                let id = Identifier::from_json(raw_id, position)?;
                Ok(Self::Record {
                    id,
                    fields: fields.clone(),
                })
            }
            other => Ok(Self::Bare(Identifier::from_json(other, position)?)),
        }
    }

    /// The identifier of this entry.
    pub fn id(&self) -> &Identifier {
        match self {
            Self::Bare(id) => id,
            Self::Record { id, .. } => id,
        }
    }

    /// Whether this entry is bare or structured.
    pub fn shape(&self) -> EntryShape {
        match self {
            Self::Bare(_) => EntryShape::Bare,
            Self::Record { .. } => EntryShape::Record,
        }
    }

    /// The raw JSON form of this entry.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bare(id) => id.to_json(),
            Self::Record { fields, .. } => Value::Object(fields.clone()),
        }
    }
}

/// Similarity between two ranked lists.
///
/// `base` is the weighted agreement observed up to the evaluated depth;
/// `extrapolated` is the estimated contribution of the unobserved tail.
/// `score` is their sum, clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    /// Combined similarity in `[0, 1]`.
    pub score: f64,
    /// Observed weighted overlap.
    pub base: f64,
    /// Tail estimate beyond the observed depth.
    pub extrapolated: f64,
}

impl SimilarityScore {
    /// Build a score from its observed and extrapolated parts.
    pub fn new(base: f64, extrapolated: f64) -> Self {
        Self {
            score: (base + extrapolated).clamp(0.0, 1.0),
            base,
            extrapolated,
        }
    }

    /// A score with no agreement at all.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// A plain score with no separate extrapolation term, for comparators
    /// that do not model a tail.
    pub fn exact(score: f64) -> Self {
        Self::new(score, 0.0)
    }

    /// Round the combined score to `precision` decimal places.
    pub fn rounded(&self, precision: u32) -> f64 {
        let factor = 10f64.powi(precision as i32);
        (self.score * factor).round() / factor
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
