use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use resumetext::{DEFAULT_COLUMN_GAP, DEFAULT_LINE_TOLERANCE};

/// Recover reading-order text from PDF and DOCX resumes.
#[derive(Debug, Parser)]
#[command(name = "resumetext", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract normalized reading-order text from a resume
    Text {
        /// Path to the PDF or DOCX file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = TextFormat::Text)]
        format: TextFormat,

        /// Minimum horizontal jump between word left edges that starts a new column
        #[arg(long, default_value_t = DEFAULT_COLUMN_GAP)]
        column_gap: f64,

        /// Maximum vertical distance for words to share a line
        #[arg(long, default_value_t = DEFAULT_LINE_TOLERANCE)]
        line_tolerance: f64,

        /// Print assembled text without the clean-up passes
        #[arg(long)]
        raw: bool,
    },

    /// List words of a PDF with their column and coordinates
    Words {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = WordsFormat::Text)]
        format: WordsFormat,

        /// Minimum horizontal jump between word left edges that starts a new column
        #[arg(long, default_value_t = DEFAULT_COLUMN_GAP)]
        column_gap: f64,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TextFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum WordsFormat {
    Text,
    Json,
    Csv,
}
