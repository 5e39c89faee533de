use std::path::Path;

use cidmetrics::sorted_entries;

use crate::cli::OutputFormat;
use crate::shared::{object_label, open_pdf, print_json, select_font};

pub fn run(file: &Path, selector: &str, format: &OutputFormat) -> Result<(), i32> {
    let pdf = open_pdf(file, false)?;
    let font = select_font(&pdf, selector)?;
    let metrics = &font.metrics;
    let widths = sorted_entries(&metrics.widths, |_| true);

    match format {
        OutputFormat::Text => {
            println!(
                "{} ({}): DW={}, {} explicit widths",
                font.name(),
                object_label(font.object_id),
                metrics.default_width,
                widths.len()
            );
            for (cid, width) in &widths {
                println!("{cid:>5}  {width}");
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = widths
                .iter()
                .map(|(cid, width)| serde_json::json!({ "cid": cid, "width": width }))
                .collect();
            print_json(&serde_json::json!({
                "font": font.name(),
                "object_id": [font.object_id.0, font.object_id.1],
                "default_width": metrics.default_width,
                "widths": entries,
            }))?;
        }
        OutputFormat::Csv => {
            println!("cid,width");
            for (cid, width) in &widths {
                println!("{cid},{width}");
            }
        }
    }
    Ok(())
}
