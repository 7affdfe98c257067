//! 1-indexed ranked result lists.
//!
//! A [`RankedList`] is built once from the raw output of a search and never
//! mutated afterwards. Every entry is tagged as bare or structured at
//! ingestion, and a list must use a single shape throughout.

use serde_json::Value;

use crate::config::ListFormat;
use crate::error::RankError;
use crate::types::{Entry, EntryShape, Identifier};

/// An ordered sequence of ranked entries. Position 1 is the top result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedList {
    entries: Vec<Entry>,
}

impl RankedList {
    /// Build a list from raw search output.
    ///
    /// Accepts either a JSON array of entries or an object holding that
    /// array under `format.results_field`. The wrapper is removed here and
    /// nowhere else.
    ///
    /// # Errors
    ///
    /// - [`RankError::NotASequence`] if no array can be found
    /// - [`RankError::InconsistentEntryShape`] if bare identifiers and records are mixed
    /// - [`RankError::MissingIdentifier`] / [`RankError::InvalidIdentifier`] for bad entries
    pub fn from_value(value: &Value, format: &ListFormat) -> Result<Self, RankError> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(map) => match map.get(&format.results_field) {
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Err(RankError::NotASequence(format!(
                        "`{}` field is not an array",
                        format.results_field
                    )));
                }
                None => {
                    return Err(RankError::NotASequence(format!(
                        "object has no `{}` field",
                        format.results_field
                    )));
                }
            },
            _ => {
                return Err(RankError::NotASequence(
                    "expected an array or a results wrapper".into(),
                ));
            }
        };

        let entries = items
            .iter()
            .enumerate()
            .map(|(i, item)| Entry::from_json(item, i + 1, &format.id_field))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_entries(entries)
    }

    /// Build a list from already-tagged entries, checking that their shapes agree.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, RankError> {
        if let Some(first) = entries.first() {
            let expected = first.shape();
            if let Some((i, entry)) = entries
                .iter()
                .enumerate()
                .find(|(_, e)| e.shape() != expected)
            {
                tracing::trace!(position = i + 1, %expected, "rejecting mixed entry shapes");
                return Err(RankError::InconsistentEntryShape {
                    position: i + 1,
                    expected: expected.name(),
                    found: entry.shape().name(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Build a list of bare identifiers.
    pub fn from_identifiers<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Identifier>,
    {
        Self {
            entries: ids.into_iter().map(|id| Entry::Bare(id.into())).collect(),
        }
    }

    /// Entry at a 1-based position.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::InvalidPosition`] for `position <= 0` and
    /// [`RankError::PositionOutOfRange`] past the end of the list.
    pub fn get(&self, position: i64) -> Result<&Entry, RankError> {
        if position <= 0 {
            return Err(RankError::InvalidPosition(position));
        }
        let out_of_range = || RankError::PositionOutOfRange {
            position,
            len: self.entries.len(),
        };
        let index = usize::try_from(position - 1).map_err(|_| out_of_range())?;
        self.entries.get(index).ok_or_else(out_of_range)
    }

    /// Identifiers in rank order.
    pub fn to_identifiers(&self) -> Vec<Identifier> {
        self.entries.iter().map(|e| e.id().clone()).collect()
    }

    /// The raw, unwrapped entry sequence as originally returned.
    pub fn to_value(&self) -> Value {
        Value::Array(self.entries.iter().map(Entry::to_json).collect())
    }

    /// Shape shared by every entry, or `None` for an empty list.
    pub fn shape(&self) -> Option<EntryShape> {
        self.entries.first().map(Entry::shape)
    }

    /// All entries in rank order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterate entries in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
