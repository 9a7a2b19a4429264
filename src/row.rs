use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single value in a row.
///
/// Values deserialize from JSON untagged: strings, integers, arrays of small integers
/// (quality scores) and `null`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Long(i64),
    ByteArray(Vec<i8>),
    Null,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[i8]> {
        match self {
            Value::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// A short name for the kind of value, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Long(_) => "long",
            Value::ByteArray(_) => "array<byte>",
            Value::Null => "null",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<Vec<i8>> for Value {
    fn from(v: Vec<i8>) -> Self {
        Value::ByteArray(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// An ordered mapping from field name to value, as handed over by the row source.
///
/// Field order is preserved, both when building a row in code and when reading one from
/// JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Row(IndexMap<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for constructing rows inline.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_long(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_long)
    }

    pub fn get_bytes(&self, name: &str) -> Option<&[i8]> {
        self.get(name).and_then(Value::as_bytes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The row identifier, if present. Used to label rows in reports and logs.
    pub fn seq_id(&self) -> Option<&str> {
        self.get_str("seq_id")
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row(iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let row = Row::new()
            .with("seq_id", "r1")
            .with("desc", "")
            .with("sequence", "ACGT")
            .with("length", 4i64);

        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["seq_id", "desc", "sequence", "length"]);
    }

    #[test]
    fn typed_getters() {
        let row = Row::new()
            .with("sequence", "ACGT")
            .with("length", 4i64)
            .with("quality_scores", vec![30i8, 30, 20, 10]);

        assert_eq!(row.get_str("sequence"), Some("ACGT"));
        assert_eq!(row.get_long("length"), Some(4));
        assert_eq!(row.get_bytes("quality_scores"), Some(&[30i8, 30, 20, 10][..]));

        // wrong type or missing field
        assert_eq!(row.get_long("sequence"), None);
        assert_eq!(row.get_str("desc"), None);
    }

    #[test]
    fn from_json() {
        let row: Row = serde_json::from_str(
            r#"{"seq_id": "r1", "desc": null, "sequence": "AC", "length": 2, "quality_scores": [40, 12]}"#,
        )
        .unwrap();

        assert_eq!(row.seq_id(), Some("r1"));
        assert!(row.get("desc").unwrap().is_null());
        assert_eq!(row.get_long("length"), Some(2));
        assert_eq!(row.get_bytes("quality_scores"), Some(&[40i8, 12][..]));

        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["seq_id", "desc", "sequence", "length", "quality_scores"]);
    }

    #[test]
    fn quality_out_of_byte_range_is_rejected() {
        let row = serde_json::from_str::<Row>(r#"{"quality_scores": [300]}"#);
        assert!(row.is_err());
    }

    #[test]
    fn lengths_keep_their_full_range() {
        let row = Row::new()
            .with("length", i64::MAX)
            .with("length_2", i64::MIN);
        assert_eq!(row.get_long("length"), Some(i64::MAX));
        assert_eq!(row.get_long("length_2"), Some(i64::MIN));
    }

    #[test]
    fn option_values_map_to_null() {
        let row = Row::new().with("desc", None::<&str>);
        assert_eq!(row.get("desc"), Some(&Value::Null));
    }
}
