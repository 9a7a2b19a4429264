//! Schema and validation descriptors for biological sequence records.
//!
//! Four kinds of record are described: nucleotide sequences, protein sequences,
//! single-end reads and paired-end reads. For each kind this crate provides
//!
//! - the legal letters of its sequence fields ([`allowed_letters`]),
//! - its ordered field schema ([`field_schema`]),
//! - a row validator ([`validate`], with [`check`] reporting the reason),
//!
//! plus [`extract`], which cuts a located (and possibly reverse-complemented)
//! sub-sequence out of a contig.
//!
//! ```
//! use seqdf::{extract, field_schema, validate, Location, Row, SequenceKind};
//!
//! let row = Row::new()
//!     .with("seq_id", "read_1")
//!     .with("desc", "")
//!     .with("sequence", "ACGT")
//!     .with("length", 4i64)
//!     .with("quality_scores", vec![40i8, 40, 38, 12]);
//!
//! assert!(field_schema(SequenceKind::Read).conforms(&row).is_ok());
//! assert!(validate(SequenceKind::Read, &row));
//!
//! assert_eq!(extract("ATGCN", &Location::reverse(1, 5)), "NGCAT");
//! ```

#[macro_use]
extern crate log;

pub mod alphabet;
pub mod extract;
pub mod kind;
pub mod row;
pub mod schema;
pub mod validate;

pub use alphabet::allowed_letters;
pub use extract::{extract, reverse_complement, try_extract, ExtractError, Location, Strand};
pub use kind::{ParseKindError, SequenceKind};
pub use row::{Row, Value};
pub use schema::{field_schema, Field, FieldType, Schema, SchemaError};
pub use validate::{
    check, partition_rows, validate, validate_rows, ValidationSummary, Violation,
};
