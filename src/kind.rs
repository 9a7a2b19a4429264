use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The kinds of sequence record that can be described and validated.
///
/// Kinds form a small hierarchy: `Read` extends `Nucleotide` and `PairedRead` extends
/// `Read`. `Nucleotide` and `Protein` are roots. Every per-kind table in this crate is an
/// exhaustive `match` over this enum, so adding a variant fails to compile until it has
/// an alphabet, a schema and a specific validation rule.
#[derive(
    clap::ValueEnum, Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "kebab-case")]
pub enum SequenceKind {
    /// Nucleotide sequences, such as contigs or chromosomes
    Nucleotide,

    /// Amino acid sequences
    Protein,

    /// Single-end sequencing reads with per-base quality scores
    Read,

    /// Paired-end sequencing reads, with a second mate
    PairedRead,
}

impl SequenceKind {
    pub const ALL: [SequenceKind; 4] = [
        SequenceKind::Nucleotide,
        SequenceKind::Protein,
        SequenceKind::Read,
        SequenceKind::PairedRead,
    ];

    /// The kind this kind extends, or `None` for root kinds.
    pub fn parent(self) -> Option<SequenceKind> {
        match self {
            SequenceKind::Nucleotide | SequenceKind::Protein => None,
            SequenceKind::Read => Some(SequenceKind::Nucleotide),
            SequenceKind::PairedRead => Some(SequenceKind::Read),
        }
    }

    /// The name used on the command line and in serialized form.
    pub fn name(self) -> &'static str {
        match self {
            SequenceKind::Nucleotide => "nucleotide",
            SequenceKind::Protein => "protein",
            SequenceKind::Read => "read",
            SequenceKind::PairedRead => "paired-read",
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown sequence kind `{0}`: expected one of nucleotide, protein, read, paired-read")]
pub struct ParseKindError(pub String);

impl FromStr for SequenceKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SequenceKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}
