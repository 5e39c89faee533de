use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Inspect and canonically re-encode CID font glyph metrics in PDF documents.
#[derive(Debug, Parser)]
#[command(name = "cidmetrics", about, version)]
pub struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List CIDFont dictionaries with a summary of their metrics
    Fonts {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = TextFormat::Text)]
        format: TextFormat,

        /// Fail on the first font with malformed metrics
        #[arg(long)]
        strict: bool,
    },

    /// Print the explicit /W widths of one font
    Widths {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Font to inspect: /BaseFont name or object number
        #[arg(long, value_name = "NAME|OBJ")]
        font: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the explicit /W2 vertical metrics of one font
    Vmetrics {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Font to inspect: /BaseFont name or object number
        #[arg(long, value_name = "NAME|OBJ")]
        font: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Rewrite /W, /W2, /DW and /DW2 of every CIDFont in canonical form
    Recode {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Where to write the rewritten PDF
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Fail instead of skipping fonts with malformed metrics
        #[arg(long)]
        strict: bool,

        /// Output format of the summary
        #[arg(long, value_enum, default_value_t = TextFormat::Text)]
        format: TextFormat,
    },
}

/// Output format for tabular subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable columns
    Text,
    /// JSON document
    Json,
    /// Comma-separated values with a header row
    Csv,
}

/// Output format for summary subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TextFormat {
    /// Human-readable text
    Text,
    /// JSON document
    Json,
}
