use std::path::Path;

use cidmetrics::{CidFontEntry, MetricsPdf, MetricsWarning, ScanOptions};

/// Open a PDF file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found
/// or cannot be parsed as a valid PDF.
pub fn open_pdf(file: &Path, strict: bool) -> Result<MetricsPdf, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    let options = if strict {
        ScanOptions::strict()
    } else {
        ScanOptions::default()
    };
    MetricsPdf::open_file(file, Some(options)).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

/// Look up one font by `/BaseFont` name or object number.
pub fn select_font(pdf: &MetricsPdf, selector: &str) -> Result<CidFontEntry, i32> {
    pdf.font(selector).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

/// Print collected warnings to stderr.
pub fn report_warnings(warnings: &[MetricsWarning]) {
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}

/// Print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) -> Result<(), i32> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        eprintln!("Error: failed to serialize JSON: {e}");
        1
    })?;
    println!("{text}");
    Ok(())
}

/// `n g R` label of an object id.
pub fn object_label((num, generation): (u32, u16)) -> String {
    format!("{num} {generation} R")
}
