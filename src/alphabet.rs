//! Characters that are legal in the sequence fields of each kind.
//!
//! Alphabets are case-sensitive: both cases are listed explicitly rather than folding the
//! input, so that a row is never rewritten while it is being validated.

use bio::alphabets::Alphabet;
use std::sync::OnceLock;

use crate::kind::SequenceKind;

pub const NUCLEOTIDE_LETTERS: &[u8] = b"ATGCNatgcn";
pub const PROTEIN_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWYZX*-abcdefghijklmnopqrstuvwyzx";

static NUCLEOTIDE: OnceLock<Alphabet> = OnceLock::new();
static PROTEIN: OnceLock<Alphabet> = OnceLock::new();

/// The raw letters making up the alphabet of `kind`.
pub fn letters(kind: SequenceKind) -> &'static [u8] {
    match kind {
        SequenceKind::Nucleotide | SequenceKind::Read | SequenceKind::PairedRead => {
            NUCLEOTIDE_LETTERS
        }
        SequenceKind::Protein => PROTEIN_LETTERS,
    }
}

/// Returns the set of characters allowed in the sequence fields of `kind`.
///
/// Reads are nucleotide sequences, so `Read` and `PairedRead` share the nucleotide
/// alphabet. The alphabets are built on first use and shared afterwards.
pub fn allowed_letters(kind: SequenceKind) -> &'static Alphabet {
    let cell = match kind {
        SequenceKind::Nucleotide | SequenceKind::Read | SequenceKind::PairedRead => &NUCLEOTIDE,
        SequenceKind::Protein => &PROTEIN,
    };
    cell.get_or_init(|| Alphabet::new(letters(kind)))
}

/// Position and value of the first character of `text` outside the alphabet of `kind`.
///
/// Non-ASCII characters are never part of an alphabet.
pub fn first_illegal(kind: SequenceKind, text: &str) -> Option<(usize, char)> {
    let alphabet = allowed_letters(kind);
    text.chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii() || !alphabet.symbols.contains(*c as usize))
}
