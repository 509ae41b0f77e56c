//! Raw tabular rows as delivered by a data source.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One sheet row: column name to cell value.
///
/// Column names are kept exactly as received; `ingest::trim_columns` produces
/// the trimmed copy the normalizer reads from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: BTreeMap<String, Value>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(column, value)` pairs. Later duplicates win.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }

    /// Builds a row from a JSON object. Non-object values yield `None`.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::from_map(map)),
            _ => None,
        }
    }

    fn from_map(map: Map<String, Value>) -> Self {
        Self {
            cells: map.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.cells.insert(column.into(), value);
    }

    /// Returns the cell for `column`; absent columns and JSON nulls both map
    /// to `None`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        match self.cells.get(column) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns a copy with every column name trimmed of surrounding
    /// whitespace. When two columns collide after trimming the later one in
    /// column order wins.
    pub fn with_trimmed_columns(&self) -> Self {
        Self {
            cells: self
                .cells
                .iter()
                .map(|(key, value)| (key.trim().to_string(), value.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RawRow;
    use serde_json::json;

    #[test]
    fn get_treats_null_as_missing() {
        let row = RawRow::from_pairs([("UID", json!(null)), ("월", json!(3))]);
        assert!(row.get("UID").is_none());
        assert_eq!(row.get("월"), Some(&json!(3)));
        assert!(row.get("목표").is_none());
    }

    #[test]
    fn trimmed_copy_strips_column_whitespace() {
        let row = RawRow::from_pairs([(" UID ", json!("A")), ("\t월", json!(1))]);
        let trimmed = row.with_trimmed_columns();
        assert_eq!(trimmed.get("UID"), Some(&json!("A")));
        assert_eq!(trimmed.get("월"), Some(&json!(1)));
        assert_eq!(trimmed.len(), 2);
    }

    #[test]
    fn from_json_rejects_non_objects() {
        assert!(RawRow::from_json(json!([1, 2])).is_none());
        let row = RawRow::from_json(json!({"UID": "A"})).expect("object row");
        assert_eq!(row.get("UID"), Some(&json!("A")));
    }
}
