use std::path::Path;

use resumetext::{
    ExtractOptions, Format, LayoutOptions, UNSUPPORTED_FORMAT_MESSAGE, extract_raw_text,
    parse_resume_with_options,
};

use crate::cli::TextFormat;
use crate::shared::{file_name, read_input};

/// Exit code for files that are neither PDF nor DOCX.
const EXIT_UNSUPPORTED: i32 = 2;

pub fn run(
    file: &Path,
    format: &TextFormat,
    column_gap: f64,
    line_tolerance: f64,
    raw: bool,
) -> Result<(), i32> {
    let name = file_name(file);
    let Some(input_format) = Format::from_filename(&name) else {
        println!("{UNSUPPORTED_FORMAT_MESSAGE}");
        return Err(EXIT_UNSUPPORTED);
    };

    let bytes = read_input(file)?;
    let options = ExtractOptions::default().with_layout(
        LayoutOptions::default()
            .with_column_gap(column_gap)
            .with_line_tolerance(line_tolerance),
    );

    let result = if raw {
        extract_raw_text(&bytes, input_format, &options)
    } else {
        parse_resume_with_options(&bytes, &name, &options)
    };
    let text = result.map_err(|e| {
        eprintln!("Error: failed to extract text: {e}");
        1
    })?;

    match format {
        TextFormat::Text => println!("{text}"),
        TextFormat::Json => {
            let obj = serde_json::json!({
                "file": name,
                "raw": raw,
                "text": text,
            });
            println!("{obj}");
        }
    }
    Ok(())
}
