//! End-to-end tests for the document-level API using lopdf-generated PDFs.

use cidmetrics::{
    DefaultVMetrics, MetricsError, MetricsKey, MetricsPdf, MetricsWarningCode, ScanOptions,
    VMetrics,
};
use lopdf::{Dictionary, Document, Object, dictionary};

fn ints(values: &[i64]) -> Vec<Object> {
    values.iter().map(|&v| Object::Integer(v)).collect()
}

/// Build a one-page PDF whose resources hold a Type0 font per CIDFont dictionary.
fn pdf_with_cid_fonts(cid_fonts: Vec<Dictionary>) -> Vec<u8> {
    build_pdf(cid_fonts, false)
}

/// Same as [`pdf_with_cid_fonts`], with each CIDFont written inline in `/DescendantFonts`.
fn pdf_with_inline_cid_fonts(cid_fonts: Vec<Dictionary>) -> Vec<u8> {
    build_pdf(cid_fonts, true)
}

fn build_pdf(cid_fonts: Vec<Dictionary>, inline: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let mut font_resources = Dictionary::new();
    for (i, cid_font) in cid_fonts.into_iter().enumerate() {
        let base_font = cid_font
            .get(b"BaseFont")
            .ok()
            .cloned()
            .unwrap_or_else(|| Object::Name(b"Unnamed".to_vec()));
        let descendant = if inline {
            Object::Dictionary(cid_font)
        } else {
            Object::Reference(doc.add_object(Object::Dictionary(cid_font)))
        };
        let type0_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => base_font,
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![descendant],
        });
        font_resources.set(format!("F{}", i + 1), Object::Reference(type0_id));
    }

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => ints(&[0, 0, 612, 792]),
        "Resources" => dictionary! { "Font" => font_resources },
    });
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => Object::Integer(1),
    });
    if let Ok(page_obj) = doc.get_object_mut(page_id) {
        if let Ok(dict) = page_obj.as_dict_mut() {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn cid_font(name: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => Object::Name(name.as_bytes().to_vec()),
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Japan1"),
            "Supplement" => Object::Integer(6),
        },
    }
}

fn gothic() -> Dictionary {
    let mut font = cid_font("MSGothic");
    font.set("DW", Object::Integer(1000));
    font.set(
        "W",
        vec![
            Object::Integer(1),
            Object::Array(ints(&[500, 500, 500, 500, 500, 500])),
            Object::Integer(20),
            Object::Array(ints(&[600, 1000, 700])),
        ],
    );
    font.set("W2", ints(&[120, 122, -1000, 500, 880]));
    font
}

#[test]
fn fonts_decodes_widths_and_vertical_metrics() {
    let pdf = MetricsPdf::open(&pdf_with_cid_fonts(vec![gothic()]), None).unwrap();
    let result = pdf.fonts().unwrap();
    assert!(result.is_clean());
    assert_eq!(result.value.len(), 1);

    let font = &result.value[0];
    assert_eq!(font.name(), "MSGothic");
    let metrics = &font.metrics;
    assert_eq!(metrics.default_width, 1000.0);
    assert_eq!(metrics.widths.len(), 9);
    assert_eq!(metrics.width(1), 500.0);
    assert_eq!(metrics.width(6), 500.0);
    assert_eq!(metrics.width(21), 1000.0);
    assert_eq!(metrics.width(22), 700.0);
    assert_eq!(metrics.width(7), 1000.0);
    assert_eq!(metrics.vertical_metrics(121), VMetrics::new(-1000.0, 500.0, 880.0));
    assert_eq!(metrics.default_vmetrics, DefaultVMetrics::default());
    assert_eq!(
        metrics.system_info.as_ref().map(|info| info.collection_name()),
        Some("Adobe-Japan1-6".to_string())
    );
}

#[test]
fn recode_compacts_and_preserves_effective_metrics() {
    let bytes = pdf_with_cid_fonts(vec![gothic()]);
    let mut pdf = MetricsPdf::open(&bytes, None).unwrap();
    let before = pdf.fonts().unwrap().value.remove(0).metrics;

    let summary = pdf.recode().unwrap();
    assert!(summary.is_clean());
    assert_eq!(summary.value.fonts_rewritten, 1);
    assert_eq!(summary.value.fonts_unchanged, 0);
    // W: 1 + 6 + 1 + 3, W2: 5
    assert_eq!(summary.value.elements_before, 16);
    // W: 1 6 500 20 [600] 22 [700], W2 unchanged
    assert_eq!(summary.value.elements_after, 3 + 2 + 2 + 5);

    let mut out = Vec::new();
    pdf.save_to(&mut out).unwrap();
    let reopened = MetricsPdf::open(&out, None).unwrap();
    let after = reopened.fonts().unwrap().value.remove(0).metrics;

    for cid in 0..200u16 {
        assert_eq!(before.width(cid), after.width(cid), "width of CID {cid}");
        assert_eq!(
            before.vertical_metrics(cid),
            after.vertical_metrics(cid),
            "vertical metrics of CID {cid}"
        );
    }
    // The explicit entry equal to /DW is dropped.
    assert!(!after.widths.contains_key(&21));
}

#[test]
fn recode_is_idempotent() {
    let mut pdf = MetricsPdf::open(&pdf_with_cid_fonts(vec![gothic()]), None).unwrap();
    pdf.recode().unwrap();

    let second = pdf.recode().unwrap().value;
    assert_eq!(second.fonts_rewritten, 0);
    assert_eq!(second.fonts_unchanged, 1);
    assert_eq!(second.elements_before, second.elements_after);
}

#[test]
fn recode_removes_default_metrics_keys() {
    let mut font = cid_font("AllDefault");
    font.set("DW", Object::Integer(1000));
    font.set("DW2", ints(&[880, -1000]));
    font.set("W", vec![Object::Integer(3), Object::Array(ints(&[1000, 1000]))]);
    let mut pdf = MetricsPdf::open(&pdf_with_cid_fonts(vec![font]), None).unwrap();

    let summary = pdf.recode().unwrap().value;
    assert_eq!(summary.fonts_rewritten, 1);
    assert_eq!(summary.elements_after, 0);

    let dict = pdf
        .document()
        .objects
        .values()
        .find_map(|obj| match obj {
            Object::Dictionary(d) if d.has(b"CIDSystemInfo") => Some(d),
            _ => None,
        })
        .unwrap();
    assert!(!dict.has(b"DW"));
    assert!(!dict.has(b"DW2"));
    assert!(!dict.has(b"W"));
    assert!(!dict.has(b"W2"));
}

#[test]
fn malformed_font_becomes_warning() {
    let mut broken = cid_font("Broken");
    broken.set("W", ints(&[10, 5, 600]));
    let pdf = MetricsPdf::open(&pdf_with_cid_fonts(vec![gothic(), broken]), None).unwrap();

    let result = pdf.fonts().unwrap();
    assert_eq!(result.value.len(), 1);
    assert_eq!(result.value[0].name(), "MSGothic");
    assert_eq!(result.warnings.len(), 1);
    let warning = &result.warnings[0];
    assert_eq!(warning.code, MetricsWarningCode::MalformedMetrics);
    assert_eq!(warning.font_name.as_deref(), Some("Broken"));
    assert!(warning.description.contains("/W"));
}

#[test]
fn malformed_font_is_left_untouched_by_recode() {
    let mut broken = cid_font("Broken");
    broken.set("W2", ints(&[1, 2, -1000, 500]));
    let mut pdf = MetricsPdf::open(&pdf_with_cid_fonts(vec![broken]), None).unwrap();

    let result = pdf.recode().unwrap();
    assert_eq!(result.value.fonts_rewritten, 0);
    assert_eq!(result.value.fonts_unchanged, 0);
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn strict_mode_fails_on_malformed_font() {
    let mut broken = cid_font("Broken");
    broken.set("W", ints(&[70000, 70001, 600]));
    let bytes = pdf_with_cid_fonts(vec![broken]);
    let pdf = MetricsPdf::open(&bytes, Some(ScanOptions::strict())).unwrap();
    let err = pdf.fonts().unwrap_err();
    assert!(matches!(
        err,
        MetricsError::MalformedEntry {
            key: MetricsKey::W,
            ..
        }
    ));
}

#[test]
fn strict_mode_keeps_type_mismatch() {
    let mut broken = cid_font("Broken");
    broken.set("W2", Object::Integer(7));
    let pdf = MetricsPdf::open(&pdf_with_cid_fonts(vec![broken]), Some(ScanOptions::strict()))
        .unwrap();
    assert_eq!(
        pdf.fonts().unwrap_err(),
        MetricsError::TypeMismatch {
            expected: "Array",
            found: "Integer"
        }
    );
}

#[test]
fn inline_descendant_fonts_are_scanned() {
    let bytes = pdf_with_inline_cid_fonts(vec![gothic()]);
    let pdf = MetricsPdf::open(&bytes, None).unwrap();
    let fonts = pdf.fonts().unwrap().value;
    assert_eq!(fonts.len(), 1);
    assert!(fonts[0].inline);
    assert_eq!(fonts[0].name(), "MSGothic");
    assert_eq!(fonts[0].metrics.width(22), 700.0);
    assert_eq!(pdf.font("MSGothic").unwrap(), fonts[0]);
}

#[test]
fn recode_rewrites_inline_descendant_fonts() {
    let bytes = pdf_with_inline_cid_fonts(vec![gothic()]);
    let mut pdf = MetricsPdf::open(&bytes, None).unwrap();
    let before = pdf.fonts().unwrap().value.remove(0).metrics;

    let summary = pdf.recode().unwrap().value;
    assert_eq!(summary.fonts_rewritten, 1);
    assert_eq!(summary.elements_before, 16);
    assert_eq!(summary.elements_after, 12);

    let mut out = Vec::new();
    pdf.save_to(&mut out).unwrap();
    let reopened = MetricsPdf::open(&out, None).unwrap();
    let fonts = reopened.fonts().unwrap().value;
    assert_eq!(fonts.len(), 1);
    assert!(fonts[0].inline);
    let after = &fonts[0].metrics;
    for cid in 0..200u16 {
        assert_eq!(before.width(cid), after.width(cid), "width of CID {cid}");
    }
    assert!(!after.widths.contains_key(&21));
}

#[test]
fn warnings_can_be_suppressed() {
    let mut broken = cid_font("Broken");
    broken.set("W", vec![Object::Integer(1), Object::Name(b"Oops".to_vec())]);
    let options = ScanOptions {
        collect_warnings: false,
        ..ScanOptions::default()
    };
    let pdf = MetricsPdf::open(&pdf_with_cid_fonts(vec![broken]), Some(options)).unwrap();
    let result = pdf.fonts().unwrap();
    assert!(result.value.is_empty());
    assert!(result.is_clean());
}

#[test]
fn font_selects_by_name_or_object_number() {
    let pdf = MetricsPdf::open(&pdf_with_cid_fonts(vec![gothic(), cid_font("MSMincho")]), None)
        .unwrap();

    let mincho = pdf.font("MSMincho").unwrap();
    assert_eq!(mincho.name(), "MSMincho");

    let by_number = pdf.font(&mincho.object_id.0.to_string()).unwrap();
    assert_eq!(by_number, mincho);

    assert!(matches!(pdf.font("Missing"), Err(MetricsError::FontError(_))));
}

#[test]
fn font_reports_malformed_metrics_as_error() {
    let mut broken = cid_font("Broken");
    broken.set("W", ints(&[5, 3, 600]));
    let pdf = MetricsPdf::open(&pdf_with_cid_fonts(vec![broken]), None).unwrap();
    let err = pdf.font("Broken").unwrap_err();
    assert!(matches!(
        err,
        MetricsError::MalformedEntry {
            key: MetricsKey::W,
            ..
        }
    ));
}

#[test]
fn max_fonts_limit() {
    let bytes = pdf_with_cid_fonts(vec![gothic(), cid_font("MSMincho")]);
    let options = ScanOptions {
        max_fonts: Some(1),
        ..ScanOptions::default()
    };
    let pdf = MetricsPdf::open(&bytes, Some(options)).unwrap();
    assert!(matches!(
        pdf.fonts(),
        Err(MetricsError::ResourceLimitExceeded { actual_value: 2, .. })
    ));
}

#[test]
fn max_input_bytes_limit() {
    let bytes = pdf_with_cid_fonts(vec![gothic()]);
    let options = ScanOptions {
        max_input_bytes: Some(16),
        ..ScanOptions::default()
    };
    assert!(matches!(
        MetricsPdf::open(&bytes, Some(options)),
        Err(MetricsError::ResourceLimitExceeded { limit_value: 16, .. })
    ));
}

#[test]
fn open_rejects_garbage() {
    assert!(matches!(
        MetricsPdf::open(b"not a pdf", None),
        Err(MetricsError::ParseError(_))
    ));
}
