use std::path::Path;

use cidmetrics::RecodeSummary;

use crate::cli::TextFormat;
use crate::shared::{open_pdf, print_json, report_warnings};

pub fn run(file: &Path, output: &Path, strict: bool, format: &TextFormat) -> Result<(), i32> {
    let mut pdf = open_pdf(file, strict)?;
    let result = pdf.recode().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    report_warnings(&result.warnings);

    log::debug!("writing {}", output.display());
    pdf.save_file(output).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", output.display());
        1
    })?;

    let summary = result.value;
    match format {
        TextFormat::Text => println!("{}", summary_line(&summary)),
        TextFormat::Json => print_json(&serde_json::json!({
            "output": output.display().to_string(),
            "fonts_rewritten": summary.fonts_rewritten,
            "fonts_unchanged": summary.fonts_unchanged,
            "elements_before": summary.elements_before,
            "elements_after": summary.elements_after,
            "warnings": result.warnings.len(),
        }))?,
    }
    Ok(())
}

fn summary_line(summary: &RecodeSummary) -> String {
    format!(
        "Rewrote {} font(s), {} already canonical; /W and /W2 elements: {} -> {}",
        summary.fonts_rewritten,
        summary.fonts_unchanged,
        summary.elements_before,
        summary.elements_after
    )
}
