extern crate env_logger;
#[macro_use]
extern crate log;
use std::{
    fs::File,
    io::{prelude::*, stdout, BufWriter},
    path::Path,
};

use anyhow::Result;
use clap::Parser;
use seqdf::{field_schema, try_extract, Location, Strand};

mod cli;
mod io;
mod report;

use cli::{Cli, Commands};

/// Creates a `BufWriter` for the given output option. This allows for an output file to be passed
/// or otherwise will default to using standard output.
///
/// If `output` is `Some`, it creates a file at the specified path and returns a `BufWriter` for it.
/// If `output` is `None`, it returns a `BufWriter` for the standard output.
fn get_writer(output: &Option<String>) -> Result<impl Write> {
    // get output as a BufWriter - equal to stdout if None
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(Path::new(x))?;
            Box::new(file) as Box<dyn Write + Send>
        }
        None => Box::new(stdout()) as Box<dyn Write + Send>,
    });
    Ok(writer)
}

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Schema { kind } => {
            let schema = field_schema(*kind);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Commands::Validate {
            kind,
            input,
            output,
            threads,
            strict,
        } => {
            info!("seqdf v{}", cli::VERSION);
            info!("Validating {input} as {kind} rows (strict: {strict})");

            let mut writer = get_writer(output)?;
            let summary = report::report(*kind, input, &mut writer, *threads, *strict)?;
            writer.flush()?;

            info!(
                "Stats: {} rows, {} valid, {} invalid",
                summary.total, summary.valid, summary.invalid
            );
            debug!("{}", serde_json::to_string(&summary)?);
            info!("Completed successfully.")
        }
        Commands::Extract {
            sequence,
            start,
            end,
            strand,
        } => {
            let loc = Location::new(*start, *end, Strand::from(*strand));
            println!("{}", try_extract(sequence, &loc)?);
        }
    };
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
