//! Document-level access to CIDFont metrics.

use cidmetrics_core::{ExtractResult, MetricsError, MetricsWarning, MetricsWarningCode, ScanOptions};
use cidmetrics_parse::object::resolve;
use cidmetrics_parse::{
    BackendError, CidFontMetrics, extract_cid_font_metrics, get_descendant_font, is_cid_font,
    is_type0_font, write_cid_font_metrics,
};
use lopdf::{Dictionary, Document, Object, ObjectId};

/// A CIDFont dictionary found in a document, with its decoded metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct CidFontEntry {
    /// Object number and generation of the CIDFont dictionary, or of the
    /// Type0 font that holds it inline.
    pub object_id: (u32, u16),
    /// Whether the dictionary is written inline in `/DescendantFonts`.
    pub inline: bool,
    /// Decoded metrics.
    pub metrics: CidFontMetrics,
}

impl CidFontEntry {
    fn new(slot: FontSlot, metrics: CidFontMetrics) -> Self {
        Self {
            object_id: slot.id(),
            inline: matches!(slot, FontSlot::Descendant(_)),
            metrics,
        }
    }

    /// `/BaseFont` of the font, or an empty string when absent.
    pub fn name(&self) -> &str {
        self.metrics.base_font.as_deref().unwrap_or("")
    }
}

/// Where a CIDFont dictionary lives in the object table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontSlot {
    /// An indirect CIDFont object.
    Object(ObjectId),
    /// Written inline as the descendant of this Type0 font.
    Descendant(ObjectId),
}

impl FontSlot {
    fn id(self) -> ObjectId {
        match self {
            FontSlot::Object(id) | FontSlot::Descendant(id) => id,
        }
    }
}

/// Outcome of [`MetricsPdf::recode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecodeSummary {
    /// Fonts whose metrics keys changed.
    pub fonts_rewritten: usize,
    /// Fonts already in canonical form.
    pub fonts_unchanged: usize,
    /// Numbers in the `/W` and `/W2` arrays before re-encoding.
    pub elements_before: usize,
    /// Numbers in the `/W` and `/W2` arrays after re-encoding.
    pub elements_after: usize,
}

/// A PDF document opened for CIDFont metrics inspection.
///
/// # Example
///
/// ```ignore
/// let pdf = MetricsPdf::open_file("cjk.pdf", None)?;
/// for font in pdf.fonts()?.value {
///     println!("{}: {} explicit widths", font.name(), font.metrics.widths.len());
/// }
/// ```
pub struct MetricsPdf {
    doc: Document,
    options: ScanOptions,
}

impl std::fmt::Debug for MetricsPdf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsPdf")
            .field("objects", &self.doc.objects.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl MetricsPdf {
    /// Open a PDF document from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError`] if the file cannot be read or is not a valid PDF.
    #[cfg(feature = "std")]
    pub fn open_file(
        path: impl AsRef<std::path::Path>,
        options: Option<ScanOptions>,
    ) -> Result<Self, MetricsError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::open(&bytes, options)
    }

    /// Open a PDF document from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::ResourceLimitExceeded`] if the input is larger
    /// than `max_input_bytes`, or [`MetricsError::ParseError`] if the bytes
    /// are not a valid PDF document.
    pub fn open(bytes: &[u8], options: Option<ScanOptions>) -> Result<Self, MetricsError> {
        let options = options.unwrap_or_default();
        if let Some(max_bytes) = options.max_input_bytes {
            if bytes.len() > max_bytes {
                return Err(MetricsError::ResourceLimitExceeded {
                    limit_name: "max_input_bytes".to_string(),
                    limit_value: max_bytes,
                    actual_value: bytes.len(),
                });
            }
        }
        let doc = Document::load_mem(bytes).map_err(BackendError::from)?;
        Ok(Self::from_document(doc, Some(options)))
    }

    /// Wrap an already loaded lopdf document.
    pub fn from_document(doc: Document, options: Option<ScanOptions>) -> Self {
        Self {
            doc,
            options: options.unwrap_or_default(),
        }
    }

    /// The underlying lopdf document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The options this document was opened with.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Decode the metrics of every CIDFont dictionary, in object order.
    ///
    /// A font whose metrics cannot be decoded is reported as a warning and
    /// skipped; in strict mode its error is returned instead.
    pub fn fonts(&self) -> Result<ExtractResult<Vec<CidFontEntry>>, MetricsError> {
        let mut fonts = Vec::new();
        let mut warnings = Vec::new();

        for slot in self.font_slots()? {
            let dict = self.slot_dict(slot)?;
            match extract_cid_font_metrics(&self.doc, dict) {
                Ok(metrics) => fonts.push(CidFontEntry::new(slot, metrics)),
                Err(err) => self.skip_font(slot, dict, err, &mut warnings)?,
            }
        }

        Ok(ExtractResult::with_warnings(fonts, warnings))
    }

    /// Find one CIDFont by `/BaseFont` name or by object number.
    ///
    /// Unlike [`MetricsPdf::fonts`], malformed metrics of the selected font
    /// are always an error.
    pub fn font(&self, selector: &str) -> Result<CidFontEntry, MetricsError> {
        let by_number: Option<u32> = selector.parse().ok();
        for slot in self.font_slots()? {
            let dict = self.slot_dict(slot)?;
            let matches =
                by_number == Some(slot.id().0) || base_font(dict).as_deref() == Some(selector);
            if matches {
                let metrics = extract_cid_font_metrics(&self.doc, dict)?;
                return Ok(CidFontEntry::new(slot, metrics));
            }
        }
        Err(MetricsError::FontError(format!(
            "no CIDFont matching '{selector}'"
        )))
    }

    /// Re-encode `/W`, `/W2`, `/DW`, and `/DW2` of every CIDFont canonically.
    ///
    /// Fonts whose metrics cannot be decoded are left untouched and reported
    /// as warnings (or fail the call in strict mode). Indirect `/W` and `/W2`
    /// arrays are replaced by direct ones.
    pub fn recode(&mut self) -> Result<ExtractResult<RecodeSummary>, MetricsError> {
        let mut summary = RecodeSummary::default();
        let mut warnings = Vec::new();

        for slot in self.font_slots()? {
            let dict = self.slot_dict(slot)?;
            let metrics = match extract_cid_font_metrics(&self.doc, dict) {
                Ok(metrics) => metrics,
                Err(err) => {
                    self.skip_font(slot, dict, err, &mut warnings)?;
                    continue;
                }
            };

            let mut rewritten = dict.clone();
            write_cid_font_metrics(&metrics, &mut rewritten);
            summary.elements_before += metrics_element_count(&self.doc, dict);
            summary.elements_after += metrics_element_count(&self.doc, &rewritten);

            if rewritten == *dict {
                summary.fonts_unchanged += 1;
                continue;
            }
            let target = self.slot_dict_mut(slot).ok_or_else(|| {
                MetricsError::FontError(format!("CIDFont in object {} moved", slot.id().0))
            })?;
            *target = rewritten;
            summary.fonts_rewritten += 1;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rewritten = summary.fonts_rewritten,
            unchanged = summary.fonts_unchanged,
            before = summary.elements_before,
            after = summary.elements_after,
            "recoded CIDFont metrics"
        );

        Ok(ExtractResult::with_warnings(summary, warnings))
    }

    /// Write the document to `target`.
    pub fn save_to<W: std::io::Write>(&mut self, target: &mut W) -> Result<(), MetricsError> {
        self.doc
            .save_to(target)
            .map_err(|e| MetricsError::IoError(e.to_string()))
    }

    /// Write the document to a file.
    #[cfg(feature = "std")]
    pub fn save_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), MetricsError> {
        self.doc
            .save(path.as_ref())
            .map(|_| ())
            .map_err(|e| MetricsError::IoError(e.to_string()))
    }

    /// Every CIDFont dictionary in object order, honoring `max_fonts`.
    ///
    /// Indirect CIDFonts are found directly; inline ones through the Type0
    /// font whose `/DescendantFonts` holds them.
    fn font_slots(&self) -> Result<Vec<FontSlot>, MetricsError> {
        let slots: Vec<FontSlot> = self
            .doc
            .objects
            .iter()
            .filter_map(|(id, obj)| match obj {
                Object::Dictionary(dict) if is_cid_font(dict) => Some(FontSlot::Object(*id)),
                Object::Dictionary(dict)
                    if is_type0_font(dict) && has_inline_descendant(&self.doc, dict) =>
                {
                    Some(FontSlot::Descendant(*id))
                }
                _ => None,
            })
            .collect();

        if let Some(max_fonts) = self.options.max_fonts {
            if slots.len() > max_fonts {
                return Err(MetricsError::ResourceLimitExceeded {
                    limit_name: "max_fonts".to_string(),
                    limit_value: max_fonts,
                    actual_value: slots.len(),
                });
            }
        }
        Ok(slots)
    }

    fn slot_dict(&self, slot: FontSlot) -> Result<&Dictionary, MetricsError> {
        match slot {
            FontSlot::Object(id) => Ok(self.doc.get_dictionary(id).map_err(BackendError::from)?),
            FontSlot::Descendant(id) => {
                let type0 = self.doc.get_dictionary(id).map_err(BackendError::from)?;
                get_descendant_font(&self.doc, type0).ok_or_else(|| {
                    MetricsError::FontError(format!("Type0 font {} has no descendant", id.0))
                })
            }
        }
    }

    fn slot_dict_mut(&mut self, slot: FontSlot) -> Option<&mut Dictionary> {
        match slot {
            FontSlot::Object(id) => self.doc.get_object_mut(id).ok()?.as_dict_mut().ok(),
            FontSlot::Descendant(id) => inline_descendant_mut(&mut self.doc, id),
        }
    }

    fn skip_font(
        &self,
        slot: FontSlot,
        dict: &Dictionary,
        err: BackendError,
        warnings: &mut Vec<MetricsWarning>,
    ) -> Result<(), MetricsError> {
        let err = MetricsError::from(err);
        if self.options.strict_mode {
            return Err(err);
        }

        let warning = font_warning(slot.id(), dict, &err);

        #[cfg(feature = "tracing")]
        tracing::warn!(%warning, "skipping CIDFont");

        if self.options.collect_warnings {
            warnings.push(warning);
        }
        Ok(())
    }
}

/// Whether the first `/DescendantFonts` entry of a Type0 font is an inline
/// CIDFont dictionary.
fn has_inline_descendant(doc: &Document, type0: &Dictionary) -> bool {
    let Ok(descendants) = type0.get(b"DescendantFonts") else {
        return false;
    };
    match resolve(doc, descendants) {
        Object::Array(items) => {
            matches!(items.first(), Some(Object::Dictionary(dict)) if is_cid_font(dict))
        }
        _ => false,
    }
}

fn inline_descendant_mut(doc: &mut Document, type0_id: ObjectId) -> Option<&mut Dictionary> {
    let array_id = match doc.get_dictionary(type0_id).ok()?.get(b"DescendantFonts").ok()? {
        Object::Reference(id) => Some(*id),
        _ => None,
    };
    let descendants = match array_id {
        Some(id) => doc.get_object_mut(id).ok()?,
        None => doc
            .get_object_mut(type0_id)
            .ok()?
            .as_dict_mut()
            .ok()?
            .get_mut(b"DescendantFonts")
            .ok()?,
    };
    match descendants.as_array_mut().ok()?.first_mut()? {
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn base_font(dict: &Dictionary) -> Option<String> {
    match dict.get(b"BaseFont") {
        Ok(Object::Name(name)) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

fn font_warning(id: ObjectId, dict: &Dictionary, err: &MetricsError) -> MetricsWarning {
    let code = if err.is_malformed_metrics() {
        MetricsWarningCode::MalformedMetrics
    } else {
        MetricsWarningCode::MalformedFont
    };
    MetricsWarning::for_font(code, err.to_string(), base_font(dict), id)
}

/// Count the numbers (CIDs and values) written in `/W` and `/W2`.
fn metrics_element_count(doc: &Document, dict: &Dictionary) -> usize {
    [b"W".as_slice(), b"W2".as_slice()]
        .into_iter()
        .filter_map(|key| dict.get(key).ok())
        .map(|obj| match resolve(doc, obj) {
            Object::Array(items) => items
                .iter()
                .map(|item| match resolve(doc, item) {
                    Object::Array(inner) => inner.len(),
                    _ => 1,
                })
                .sum(),
            _ => 0,
        })
        .sum()
}
