mod cli;
mod page_range;
mod shared;
mod text_cmd;
mod words_cmd;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // stdout carries the extracted text; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Text {
            ref file,
            ref format,
            column_gap,
            line_tolerance,
            raw,
        } => text_cmd::run(file, format, column_gap, line_tolerance, raw),
        cli::Commands::Words {
            ref file,
            ref pages,
            ref format,
            column_gap,
        } => words_cmd::run(file, pages.as_deref(), format, column_gap),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
