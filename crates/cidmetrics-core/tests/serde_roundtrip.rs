//! Serde serialization/deserialization round-trip tests.

#![cfg(feature = "serde")]

use cidmetrics_core::*;

/// Helper: serialize to JSON string, deserialize back, assert equality.
fn roundtrip<T>(value: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let json = serde_json::to_string(value).expect("serialize failed");
    let restored: T = serde_json::from_str(&json).expect("deserialize failed");
    assert_eq!(*value, restored, "round-trip mismatch for JSON: {json}");
}

#[test]
fn test_serde_vmetrics() {
    roundtrip(&VMetrics::new(-1000.0, 500.0, 880.0));
    roundtrip(&VMetrics::new(-987.5, 0.0, 12.25));
}

#[test]
fn test_serde_default_vmetrics() {
    roundtrip(&DefaultVMetrics::default());
    roundtrip(&DefaultVMetrics {
        offs_y: 900.0,
        delta_y: -1100.0,
    });
}

#[test]
fn test_serde_warning() {
    roundtrip(&MetricsWarning::for_font(
        MetricsWarningCode::MalformedMetrics,
        "invalid /W2 entry",
        Some("KozMinPro-Regular".to_string()),
        (7, 0),
    ));
    roundtrip(&MetricsWarning::with_code(
        MetricsWarningCode::Other("custom".to_string()),
        "custom issue",
    ));
}

#[test]
fn test_serde_vmetrics_field_names() {
    let json = serde_json::to_value(VMetrics::new(-1000.0, 250.0, 880.0)).unwrap();
    assert_eq!(json["delta_y"], -1000.0);
    assert_eq!(json["offs_x"], 250.0);
    assert_eq!(json["offs_y"], 880.0);
}
