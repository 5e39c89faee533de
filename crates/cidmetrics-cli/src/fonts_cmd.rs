use std::path::Path;

use cidmetrics::{CidFontEntry, DefaultVMetrics};

use crate::cli::TextFormat;
use crate::shared::{object_label, open_pdf, print_json, report_warnings};

pub fn run(file: &Path, format: &TextFormat, strict: bool) -> Result<(), i32> {
    let pdf = open_pdf(file, strict)?;
    let result = pdf.fonts().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    report_warnings(&result.warnings);

    match format {
        TextFormat::Text => {
            if result.value.is_empty() {
                println!("No CIDFonts found");
            }
            for font in &result.value {
                println!("{}", font_line(font));
            }
        }
        TextFormat::Json => {
            let fonts: Vec<serde_json::Value> = result.value.iter().map(font_json).collect();
            print_json(&serde_json::Value::Array(fonts))?;
        }
    }
    Ok(())
}

fn dw2_text(dw2: &DefaultVMetrics) -> String {
    format!("[{} {}]", dw2.offs_y, dw2.delta_y)
}

fn font_line(font: &CidFontEntry) -> String {
    let metrics = &font.metrics;
    format!(
        "{}\t{}\t{}\tDW={}\tW={}\tDW2={}\tW2={}",
        object_label(font.object_id),
        font.name(),
        metrics.font_type.as_str(),
        metrics.default_width,
        metrics.widths.len(),
        dw2_text(&metrics.default_vmetrics),
        metrics.vmetrics.len(),
    )
}

fn font_json(font: &CidFontEntry) -> serde_json::Value {
    let metrics = &font.metrics;
    serde_json::json!({
        "object_id": [font.object_id.0, font.object_id.1],
        "inline": font.inline,
        "base_font": metrics.base_font,
        "subtype": metrics.font_type.as_str(),
        "collection": metrics.system_info.as_ref().map(|info| info.collection_name()),
        "default_width": metrics.default_width,
        "widths": metrics.widths.len(),
        "default_vmetrics": metrics.default_vmetrics,
        "vmetrics": metrics.vmetrics.len(),
    })
}
