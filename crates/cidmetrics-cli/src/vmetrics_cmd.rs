use std::path::Path;

use cidmetrics::sorted_entries;

use crate::cli::OutputFormat;
use crate::shared::{object_label, open_pdf, print_json, select_font};

pub fn run(file: &Path, selector: &str, format: &OutputFormat) -> Result<(), i32> {
    let pdf = open_pdf(file, false)?;
    let font = select_font(&pdf, selector)?;
    let metrics = &font.metrics;
    let vmetrics = sorted_entries(&metrics.vmetrics, |_| true);
    let dw2 = metrics.default_vmetrics;

    match format {
        OutputFormat::Text => {
            println!(
                "{} ({}): DW2=[{} {}], {} explicit vertical metrics",
                font.name(),
                object_label(font.object_id),
                dw2.offs_y,
                dw2.delta_y,
                vmetrics.len()
            );
            for (cid, vm) in &vmetrics {
                println!("{cid:>5}  {} {} {}", vm.delta_y, vm.offs_x, vm.offs_y);
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = vmetrics
                .iter()
                .map(|(cid, vm)| {
                    serde_json::json!({
                        "cid": cid,
                        "delta_y": vm.delta_y,
                        "offs_x": vm.offs_x,
                        "offs_y": vm.offs_y,
                    })
                })
                .collect();
            print_json(&serde_json::json!({
                "font": font.name(),
                "object_id": [font.object_id.0, font.object_id.1],
                "default_vmetrics": dw2,
                "vmetrics": entries,
            }))?;
        }
        OutputFormat::Csv => {
            println!("cid,delta_y,offs_x,offs_y");
            for (cid, vm) in &vmetrics {
                println!("{cid},{},{},{}", vm.delta_y, vm.offs_x, vm.offs_y);
            }
        }
    }
    Ok(())
}
