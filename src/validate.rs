//! Row validation.
//!
//! Every kind is checked with the same algorithm: the primary sequence must only contain
//! letters from the kind's alphabet, its length must match `length`, and the kind's
//! specific rule must hold. Invalid data is reported as a [`Violation`] (or `false`), never
//! as a panic.

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::alphabet;
use crate::kind::SequenceKind;
use crate::row::Row;

/// The first rule a row broke.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("field `{field}` is missing or is not a {expected}")]
    MissingField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` has illegal character {found:?} at position {pos}")]
    IllegalCharacter {
        field: &'static str,
        found: char,
        pos: usize,
    },

    #[error("field `{field}` has {actual} bases, but `{length_field}` declares {declared}")]
    LengthMismatch {
        field: &'static str,
        length_field: &'static str,
        declared: i64,
        actual: usize,
    },

    #[error("field `{field}` has {actual} quality scores, but `{length_field}` declares {declared}")]
    QualityMismatch {
        field: &'static str,
        length_field: &'static str,
        declared: i64,
        actual: usize,
    },
}

fn require_str<'a>(row: &'a Row, field: &'static str) -> Result<&'a str, Violation> {
    row.get_str(field).ok_or(Violation::MissingField {
        field,
        expected: "string",
    })
}

fn require_long(row: &Row, field: &'static str) -> Result<i64, Violation> {
    row.get_long(field).ok_or(Violation::MissingField {
        field,
        expected: "long",
    })
}

fn require_bytes<'a>(row: &'a Row, field: &'static str) -> Result<&'a [i8], Violation> {
    row.get_bytes(field).ok_or(Violation::MissingField {
        field,
        expected: "array<byte>",
    })
}

fn same_length(declared: i64, actual: usize) -> bool {
    usize::try_from(declared).is_ok_and(|declared| declared == actual)
}

/// Checks one sequence field against an alphabet and its paired length field.
fn check_sequence(
    row: &Row,
    kind: SequenceKind,
    field: &'static str,
    length_field: &'static str,
) -> Result<(), Violation> {
    let sequence = require_str(row, field)?;

    if let Some((pos, found)) = alphabet::first_illegal(kind, sequence) {
        return Err(Violation::IllegalCharacter { field, found, pos });
    }

    // every character is ASCII at this point, so bytes and characters agree
    let declared = require_long(row, length_field)?;
    if !same_length(declared, sequence.len()) {
        return Err(Violation::LengthMismatch {
            field,
            length_field,
            declared,
            actual: sequence.len(),
        });
    }

    Ok(())
}

fn check_quality(
    row: &Row,
    field: &'static str,
    length_field: &'static str,
) -> Result<(), Violation> {
    let scores = require_bytes(row, field)?;
    let declared = require_long(row, length_field)?;

    if !same_length(declared, scores.len()) {
        return Err(Violation::QualityMismatch {
            field,
            length_field,
            declared,
            actual: scores.len(),
        });
    }
    Ok(())
}

/// The checks a kind adds on top of the universal sequence/length checks.
///
/// Derived kinds call their parent's rule explicitly where they build on it.
pub fn check_specific(kind: SequenceKind, row: &Row) -> Result<(), Violation> {
    match kind {
        SequenceKind::Nucleotide | SequenceKind::Protein => Ok(()),
        SequenceKind::Read => check_quality(row, "quality_scores", "length"),
        SequenceKind::PairedRead => {
            check_specific(SequenceKind::Read, row)?;
            check_sequence(row, SequenceKind::Read, "sequence_2", "length_2")?;
            check_quality(row, "quality_scores_2", "length_2")
        }
    }
}

/// Validates `row` as a record of `kind`, returning the first rule it breaks.
pub fn check(kind: SequenceKind, row: &Row) -> Result<(), Violation> {
    check_sequence(row, kind, "sequence", "length")?;
    check_specific(kind, row)
}

/// Returns true if `row` is a valid record of `kind`.
///
/// This is a pure function of its arguments, and is safe to call from many threads at
/// once.
pub fn validate(kind: SequenceKind, row: &Row) -> bool {
    match check(kind, row) {
        Ok(()) => true,
        Err(violation) => {
            trace!(
                "Rejected {kind} row {}: {violation}",
                row.seq_id().unwrap_or("<no seq_id>")
            );
            false
        }
    }
}

/// Validates each row in parallel. The verdicts are in the same order as `rows`.
pub fn validate_rows(kind: SequenceKind, rows: &[Row]) -> Vec<bool> {
    rows.par_iter().map(|row| validate(kind, row)).collect()
}

/// Splits `rows` into the valid rows and the rejected rows, with the reason for each
/// rejection. Relative order is kept on both sides.
pub fn partition_rows(kind: SequenceKind, rows: Vec<Row>) -> (Vec<Row>, Vec<(Row, Violation)>) {
    let checked: Vec<(Row, Result<(), Violation>)> = rows
        .into_par_iter()
        .map(|row| {
            let verdict = check(kind, &row);
            (row, verdict)
        })
        .collect();

    let mut valid = Vec::new();
    let mut rejected = Vec::new();
    for (row, verdict) in checked {
        match verdict {
            Ok(()) => valid.push(row),
            Err(violation) => rejected.push((row, violation)),
        }
    }

    debug!(
        "Partitioned {} {kind} rows: {} valid, {} rejected",
        valid.len() + rejected.len(),
        valid.len(),
        rejected.len()
    );
    (valid, rejected)
}

#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ValidationSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl ValidationSummary {
    pub fn from_verdicts(verdicts: &[bool]) -> Self {
        let valid = verdicts.iter().filter(|v| **v).count();
        Self {
            total: verdicts.len(),
            valid,
            invalid: verdicts.len() - valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SequenceKind::*;

    fn nucl_row(sequence: &str, length: i64) -> Row {
        Row::new()
            .with("seq_id", "contig_1")
            .with("desc", "")
            .with("sequence", sequence)
            .with("length", length)
    }

    fn read_row(sequence: &str, length: i64, quality_len: usize) -> Row {
        nucl_row(sequence, length).with("quality_scores", vec![30i8; quality_len])
    }

    fn paired_row(sequence_2: &str, length_2: i64, quality_len_2: usize) -> Row {
        read_row("ACGTN", 5, 5)
            .with("sequence_2", sequence_2)
            .with("length_2", length_2)
            .with("quality_scores_2", vec![30i8; quality_len_2])
    }

    #[test]
    fn valid_rows_for_every_kind() {
        assert!(validate(Nucleotide, &nucl_row("ACGTNacgtn", 10)));
        assert!(validate(Protein, &nucl_row("MKV*-bzx", 8)));
        assert!(validate(Read, &read_row("ACGT", 4, 4)));
        assert!(validate(PairedRead, &paired_row("ttgca", 5, 5)));
    }

    #[test]
    fn empty_sequence_passes() {
        assert!(validate(Nucleotide, &nucl_row("", 0)));
        assert!(validate(Read, &read_row("", 0, 0)));
    }

    #[test]
    fn illegal_character_is_invalid_for_every_kind() {
        // '1' is in no alphabet
        assert!(!validate(Nucleotide, &nucl_row("AC1T", 4)));
        assert!(!validate(Protein, &nucl_row("MK1V", 4)));
        assert!(!validate(Read, &read_row("AC1T", 4, 4)));

        let mut row = paired_row("ACGT", 4, 4);
        row.insert("sequence", "AC1TN");
        assert!(!validate(PairedRead, &row));
    }

    #[test]
    fn length_mismatch_is_invalid_for_every_kind() {
        assert!(!validate(Nucleotide, &nucl_row("ACGT", 5)));
        assert!(!validate(Protein, &nucl_row("MKV", 2)));
        assert!(!validate(Read, &read_row("ACGT", 3, 3)));

        let mut row = paired_row("ACGT", 4, 4);
        row.insert("length", 4i64);
        assert!(!validate(PairedRead, &row));
    }

    #[test]
    fn negative_length_never_matches() {
        assert!(!validate(Nucleotide, &nucl_row("", -1)));
    }

    #[test]
    fn protein_letters_are_not_nucleotides() {
        let row = nucl_row("MKVL", 4);
        assert!(validate(Protein, &row));
        assert_eq!(
            check(Nucleotide, &row),
            Err(Violation::IllegalCharacter {
                field: "sequence",
                found: 'M',
                pos: 0
            })
        );
    }

    #[test]
    fn read_quality_length() {
        assert_eq!(
            check(Read, &read_row("ACGT", 4, 3)),
            Err(Violation::QualityMismatch {
                field: "quality_scores",
                length_field: "length",
                declared: 4,
                actual: 3
            })
        );
        // a nucleotide check ignores quality scores entirely
        assert!(validate(Nucleotide, &read_row("ACGT", 4, 3)));
    }

    #[test]
    fn paired_read_mate_two_length() {
        let row = paired_row("ACG", 4, 4);
        // mate 1 alone would pass
        assert!(validate(Read, &row));
        assert!(!validate(PairedRead, &row));
        assert_eq!(
            check(PairedRead, &row),
            Err(Violation::LengthMismatch {
                field: "sequence_2",
                length_field: "length_2",
                declared: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn paired_read_mate_two_alphabet_and_quality() {
        assert!(!validate(PairedRead, &paired_row("ACGU", 4, 4)));
        assert_eq!(
            check(PairedRead, &paired_row("ACGT", 4, 2)),
            Err(Violation::QualityMismatch {
                field: "quality_scores_2",
                length_field: "length_2",
                declared: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn paired_read_checks_mate_one_quality() {
        let mut row = paired_row("ACGT", 4, 4);
        row.insert("quality_scores", vec![1i8, 2]);
        assert!(matches!(
            check(PairedRead, &row),
            Err(Violation::QualityMismatch {
                field: "quality_scores",
                ..
            })
        ));
    }

    #[test]
    fn missing_or_mistyped_fields_are_invalid() {
        let row = Row::new().with("sequence", "ACGT");
        assert_eq!(
            check(Nucleotide, &row),
            Err(Violation::MissingField {
                field: "length",
                expected: "long"
            })
        );

        let row = nucl_row("ACGT", 4).with("sequence", None::<&str>);
        assert!(!validate(Nucleotide, &row));

        // a read without quality scores
        assert!(!validate(Read, &nucl_row("ACGT", 4)));
    }

    #[test]
    fn batch_validation_keeps_order() {
        let rows = vec![
            read_row("ACGT", 4, 4),
            read_row("ACGT", 5, 4),
            read_row("AAAA", 4, 4),
            read_row("XXXX", 4, 4),
        ];
        let verdicts = validate_rows(Read, &rows);
        assert_eq!(verdicts, vec![true, false, true, false]);

        let summary = ValidationSummary::from_verdicts(&verdicts);
        assert_eq!(
            summary,
            ValidationSummary {
                total: 4,
                valid: 2,
                invalid: 2
            }
        );

        let (valid, rejected) = partition_rows(Read, rows.clone());
        assert_eq!(valid, vec![rows[0].clone(), rows[2].clone()]);
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].0, rows[1]);
        assert!(matches!(rejected[1].1, Violation::IllegalCharacter { found: 'X', .. }));
    }

    #[test]
    fn violation_messages() {
        let violation = check(Nucleotide, &nucl_row("ACGT", 5)).unwrap_err();
        assert_eq!(
            violation.to_string(),
            "field `sequence` has 4 bases, but `length` declares 5"
        );
    }
}
