//! Fixture PDFs shared by the subcommand tests.

#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use lopdf::{Dictionary, Document, Object, dictionary};

pub fn cmd() -> Command {
    Command::cargo_bin("cidmetrics").unwrap()
}

pub fn ints(values: &[i64]) -> Vec<Object> {
    values.iter().map(|&v| Object::Integer(v)).collect()
}

/// A CIDFontType2 dictionary with the given name and no metrics keys.
pub fn cid_font(name: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => Object::Name(name.as_bytes().to_vec()),
    }
}

/// `MSGothic`: three equal widths, two distinct ones, and one /W2 range.
pub fn gothic() -> Dictionary {
    let mut font = cid_font("MSGothic");
    font.set(
        "W",
        vec![
            Object::Integer(1),
            Object::Array(ints(&[101, 101, 101, 102, 103])),
        ],
    );
    font.set("W2", ints(&[10, 11, -900, 450, 800]));
    font
}

/// A font whose /W range runs backwards.
pub fn broken() -> Dictionary {
    let mut font = cid_font("Broken");
    font.set("W", ints(&[10, 5, 600]));
    font
}

/// Build a one-page PDF with one Type0 font per CIDFont dictionary.
pub fn pdf_with_cid_fonts(cid_fonts: Vec<Dictionary>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let mut font_resources = Dictionary::new();
    for (i, cid_font) in cid_fonts.into_iter().enumerate() {
        let cid_font_id = doc.add_object(Object::Dictionary(cid_font));
        let type0_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(cid_font_id)],
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

pub fn write_temp_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    f.write_all(bytes).unwrap();
    f.flush().unwrap();
    f
}
