//! Field schemas for each sequence kind.
//!
//! A kind's schema is its parent's schema (or the base schema, for root kinds) with the
//! kind's own fields appended. Field order is significant for positional layouts.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kind::SequenceKind;
use crate::row::{Row, Value};

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Long,
    ByteArray,
}

impl FieldType {
    /// Returns true if `value` may be stored in a field of this type. Every field is
    /// nullable.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (FieldType::String, Value::String(_))
                | (FieldType::Long, Value::Long(_))
                | (FieldType::ByteArray, Value::ByteArray(_))
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Long => "long",
            FieldType::ByteArray => "array<byte>",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub nullable: bool,
}

impl Field {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            nullable: true,
        }
    }
}

/// An ordered list of named, typed fields.
///
/// Serializes as `{"type": "struct", "fields": [...]}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(tag = "type", rename = "struct")]
pub struct Schema {
    pub fields: Vec<Field>,
}

#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("field `{0}` is not part of the schema")]
    UnknownField(String),

    #[error("field `{0}` is missing from the row")]
    MissingField(String),

    #[error("field `{name}` should be of type {expected}, but got {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl Schema {
    /// Appends a field, keeping declaration order.
    pub fn add(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields.push(Field::new(name, field_type));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns true if no field name appears twice.
    pub fn has_unique_names(&self) -> bool {
        self.names().all_unique()
    }

    /// Checks that `row` carries exactly the fields of this schema, each holding a value of
    /// the declared type (or null). Row field order is not checked.
    pub fn conforms(&self, row: &Row) -> Result<(), SchemaError> {
        for (name, value) in row.iter() {
            let field = self
                .field(name)
                .ok_or_else(|| SchemaError::UnknownField(name.to_string()))?;

            if !field.field_type.accepts(value) {
                return Err(SchemaError::TypeMismatch {
                    name: name.to_string(),
                    expected: field.field_type.name(),
                    found: value.type_name(),
                });
            }
        }

        match self.names().find(|name| row.get(name).is_none()) {
            Some(missing) => Err(SchemaError::MissingField(missing.to_string())),
            None => Ok(()),
        }
    }
}

/// The fields shared by every kind.
pub fn base_schema() -> Schema {
    Schema::default()
        .add("seq_id", FieldType::String)
        .add("desc", FieldType::String)
        .add("sequence", FieldType::String)
        .add("length", FieldType::Long)
}

/// Builds the ordered field schema of `kind` by extending its parent's schema.
pub fn field_schema(kind: SequenceKind) -> Schema {
    let parent = match kind.parent() {
        Some(parent) => field_schema(parent),
        None => base_schema(),
    };

    let schema = match kind {
        SequenceKind::Nucleotide | SequenceKind::Protein => parent,
        SequenceKind::Read => parent.add("quality_scores", FieldType::ByteArray),
        SequenceKind::PairedRead => parent
            .add("sequence_2", FieldType::String)
            .add("length_2", FieldType::Long)
            .add("quality_scores_2", FieldType::ByteArray),
    };
    debug_assert!(schema.has_unique_names(), "{kind} schema repeats a field");
    schema
}
