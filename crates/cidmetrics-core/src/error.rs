//! Error and warning types for cidmetrics.
//!
//! Provides [`MetricsError`] for failures that abort an operation,
//! [`MetricsWarning`] for per-font issues that allow a document scan to
//! continue, [`ExtractResult`] for pairing a value with collected warnings,
//! and [`ScanOptions`] for configuring limits and warning behavior.

use std::fmt;

/// The font dictionary key a metrics error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsKey {
    /// `/W`: per-CID horizontal widths.
    W,
    /// `/W2`: per-CID vertical metrics.
    W2,
}

impl MetricsKey {
    /// The PDF name of this key, without the leading slash.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricsKey::W => "W",
            MetricsKey::W2 => "W2",
        }
    }
}

impl fmt::Display for MetricsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal error types for metrics decoding and document processing.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// A `/W` or `/W2` array does not follow the entry grammar, or names a
    /// CID outside the representable domain.
    MalformedEntry {
        /// Which array was being decoded.
        key: MetricsKey,
        /// What was wrong with it.
        detail: String,
    },
    /// An object could not be resolved to the expected type.
    TypeMismatch {
        /// The expected PDF object type.
        expected: &'static str,
        /// The PDF object type actually found.
        found: &'static str,
    },
    /// Error parsing PDF structure or syntax.
    ParseError(String),
    /// I/O error reading or writing PDF data.
    IoError(String),
    /// Error reading a font dictionary.
    FontError(String),
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        /// Name of the limit that was exceeded (e.g., "max_fonts").
        limit_name: String,
        /// The configured limit value.
        limit_value: usize,
        /// The actual value that exceeded the limit.
        actual_value: usize,
    },
    /// Any other error not covered by specific variants.
    Other(String),
}

impl MetricsError {
    /// Shorthand for a [`MetricsError::MalformedEntry`].
    pub fn malformed(key: MetricsKey, detail: impl Into<String>) -> Self {
        MetricsError::MalformedEntry {
            key,
            detail: detail.into(),
        }
    }

    /// Whether this error describes bad metrics data rather than an
    /// environment or document-level failure.
    pub fn is_malformed_metrics(&self) -> bool {
        matches!(
            self,
            MetricsError::MalformedEntry { .. } | MetricsError::TypeMismatch { .. }
        )
    }
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::MalformedEntry { key, detail } => {
                write!(f, "invalid /{key} entry in CIDFont dictionary: {detail}")
            }
            MetricsError::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            MetricsError::ParseError(msg) => write!(f, "parse error: {msg}"),
            MetricsError::IoError(msg) => write!(f, "I/O error: {msg}"),
            MetricsError::FontError(msg) => write!(f, "font error: {msg}"),
            MetricsError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            MetricsError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for MetricsError {}

impl From<std::io::Error> for MetricsError {
    fn from(err: std::io::Error) -> Self {
        MetricsError::IoError(err.to_string())
    }
}

/// Machine-readable warning code for categorizing scan issues.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum MetricsWarningCode {
    /// A CIDFont's `/W` or `/W2` array could not be decoded.
    MalformedMetrics,
    /// A font dictionary is malformed in some other way.
    MalformedFont,
    /// Any other warning not covered by specific variants.
    Other(String),
}

impl MetricsWarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            MetricsWarningCode::MalformedMetrics => "MALFORMED_METRICS",
            MetricsWarningCode::MalformedFont => "MALFORMED_FONT",
            MetricsWarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for MetricsWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal issue encountered while scanning a document's fonts.
///
/// The font concerned is skipped; other fonts continue processing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsWarning {
    /// Machine-readable warning code.
    pub code: MetricsWarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// `/BaseFont` of the affected font, if known.
    pub font_name: Option<String>,
    /// Object number and generation of the affected font dictionary.
    pub object_id: Option<(u32, u16)>,
}

impl MetricsWarning {
    /// Create a warning with a specific code and description.
    pub fn with_code(code: MetricsWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            font_name: None,
            object_id: None,
        }
    }

    /// Create a warning for the font dictionary `object_id`.
    pub fn for_font(
        code: MetricsWarningCode,
        description: impl Into<String>,
        font_name: Option<String>,
        object_id: (u32, u16),
    ) -> Self {
        Self {
            code,
            description: description.into(),
            font_name,
            object_id: Some(object_id),
        }
    }
}

impl fmt::Display for MetricsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(ref font_name) = self.font_name {
            write!(f, " [font {font_name}]")?;
        }
        if let Some((num, generation)) = self.object_id {
            write!(f, " [object {num} {generation} R]")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
#[derive(Debug, Clone)]
pub struct ExtractResult<T> {
    /// The extracted value.
    pub value: T,
    /// Warnings collected during extraction.
    pub warnings: Vec<MetricsWarning>,
}

impl<T> ExtractResult<T> {
    /// Create a result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<MetricsWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Options controlling document scans and resource limits.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// When true, the first malformed font fails the scan with its error (default: false).
    pub strict_mode: bool,
    /// Whether to collect warnings during scans (default: true).
    pub collect_warnings: bool,
    /// Maximum number of CIDFont dictionaries to process (default: None = no limit).
    pub max_fonts: Option<usize>,
    /// Maximum input PDF size in bytes (default: None = no limit).
    pub max_input_bytes: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            strict_mode: false,
            collect_warnings: true,
            max_fonts: None,
            max_input_bytes: None,
        }
    }
}

impl ScanOptions {
    /// Options that fail on the first malformed font.
    pub fn strict() -> Self {
        Self {
            strict_mode: true,
            ..Self::default()
        }
    }
}
