use anyhow::{Context, Result};
use seqdf::{Row, SchemaError, Violation};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use thiserror::Error;

/// Why a row was rejected by the `validate` command.
#[derive(Error, Debug)]
pub enum Rejection {
    #[error("schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Invalid(#[from] Violation),
}

/// One line of the validation report.
#[derive(Serialize, Debug)]
pub struct ReportRecord<'a> {
    /// 1-based line number of the row in the input file
    pub line: usize,
    pub seq_id: &'a str,
    pub valid: bool,
    pub reason: String,
}

/// Reads rows from a file containing one JSON object per line, along with their 1-based
/// line numbers. Blank lines are skipped.
///
/// # Returns
/// An iterator of Results. When an Error is encountered, the caller should immediately
/// stop; see `until_err`.
///
/// # Errors
///
/// This function will return an error if the file cannot be opened. The iterator yields
/// `Err` if a line cannot be read, or is not a JSON object of row values.
pub fn read_rows(input: &str) -> Result<impl Iterator<Item = Result<(usize, Row)>>> {
    let file = File::open(input).with_context(|| format!("Unable to open file {input}"))?;

    Ok(BufReader::new(file)
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| -> Option<Result<(usize, Row)>> {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            if line.trim().is_empty() {
                return None;
            }
            Some(
                serde_json::from_str::<Row>(&line)
                    .map(|row| (idx + 1, row))
                    .with_context(|| format!("Invalid row on line {}", idx + 1)),
            )
        }))
}

/// Utility function to extract the error from an iterator and stop iteration immediately.
/// Useful for iterators which yield a Result<T>.
///
/// # Returns
///
/// This function returns an `Option<T>`. If the item is `Ok`, it returns `Some(T)`.
/// If the item is `Err`, it updates `err` with the error and returns `None`.
pub fn until_err<T>(err: &mut &mut Result<()>, item: Result<T>) -> Option<T> {
    match item {
        Ok(item) => Some(item),
        Err(e) => {
            **err = Err(e);
            None
        }
    }
}

/// Writes the validation report as a tab-separated file with a header row.
pub fn write_report<'a>(
    writer: impl Write,
    records: impl IntoIterator<Item = ReportRecord<'a>>,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
