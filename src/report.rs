use crate::io::{read_rows, until_err, write_report, Rejection, ReportRecord};
use anyhow::{Context, Result};
use rayon::prelude::*;
use seqdf::{check, field_schema, Row, SequenceKind, ValidationSummary};
use std::io::Write;

/// Checks a single row, optionally requiring it to conform to the kind's schema first.
fn judge(kind: SequenceKind, row: &Row, strict: bool) -> Result<(), Rejection> {
    if strict {
        field_schema(kind).conforms(row)?;
    }
    check(kind, row)?;
    Ok(())
}

/// Validates every row of a JSON-lines file and writes a tab-separated verdict per row.
///
/// # Arguments
///
/// * `kind` - The sequence kind the rows are validated as.
/// * `input` - Path of the input file, one JSON row per line.
/// * `writer` - Destination of the report.
/// * `threads` - The number of threads to validate with.
/// * `strict` - Whether rows must also conform exactly to the kind's schema.
///
/// # Returns
///
/// A summary of how many rows passed. Invalid rows are not an error; unreadable input is.
pub fn report(
    kind: SequenceKind,
    input: &str,
    writer: &mut impl Write,
    threads: usize,
    strict: bool,
) -> Result<ValidationSummary> {
    // Start with a placeholder error object. This will be mutated if there are errors
    // while reading the rows.
    let mut err = Ok(());
    let rows: Vec<(usize, Row)> = read_rows(input)?.scan(&mut err, until_err).collect();
    err?;
    info!("Read {} rows from {input}", rows.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .with_context(|| format!("Unable to set the number of threads to {threads}"))?;

    let verdicts: Vec<Result<(), Rejection>> = pool.install(|| {
        rows.par_iter()
            .map(|(_, row)| judge(kind, row, strict))
            .collect()
    });

    let summary = ValidationSummary::from_verdicts(
        &verdicts.iter().map(Result::is_ok).collect::<Vec<_>>(),
    );

    let records = rows
        .iter()
        .zip(verdicts.iter())
        .map(|((line, row), verdict)| ReportRecord {
            line: *line,
            seq_id: row.seq_id().unwrap_or(""),
            valid: verdict.is_ok(),
            reason: verdict
                .as_ref()
                .err()
                .map(ToString::to_string)
                .unwrap_or_default(),
        });
    write_report(writer, records)?;

    Ok(summary)
}
