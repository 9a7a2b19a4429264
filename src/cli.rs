use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};
use seqdf::SequenceKind;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
seqdf version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   schemas and row validation for sequence records";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the field schema of a sequence kind as JSON
    #[command(arg_required_else_help = true)]
    Schema {
        #[arg(value_enum)]
        kind: SequenceKind,
    },

    /// Validate rows of a sequence kind, one JSON object per line
    #[command(arg_required_else_help = true)]
    Validate {
        #[arg(value_enum)]
        kind: SequenceKind,

        /// the input .jsonl file
        #[arg(long)]
        input: String,

        /// the output report (tab-separated). defaults to standard output
        #[arg(short)]
        output: Option<String>,

        /// the number of threads to use
        #[arg(short, long, default_value_t = 4)]
        threads: usize,

        /// also require every row to match the kind's schema exactly:
        /// no unknown fields, no missing fields, and correctly typed values
        #[arg(long, verbatim_doc_comment)]
        strict: bool,
    },

    /// Extract a 1-based, inclusive location from a sequence
    #[command(arg_required_else_help = true, allow_negative_numbers = true)]
    Extract {
        /// the full sequence
        sequence: String,

        /// first base of the location (1-based)
        #[arg(long)]
        start: usize,

        /// last base of the location (inclusive)
        #[arg(long)]
        end: usize,

        /// 1 for the forward strand, -1 for the reverse strand
        #[arg(long, default_value_t = 1)]
        strand: i64,
    },
}
