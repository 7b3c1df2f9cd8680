//! Unit tests for the readings wire contract.
//!
//! Run with: cargo test --test wire_unit_test

use chrono::{TimeZone, Utc};
use sensor_dashboard::error::FetchError;
use sensor_dashboard::sensor::wire::{decode, parse_timestamp};
use sensor_dashboard::sensor::{SensorReading, SensorType};

#[test]
fn string_value_is_normalized() {
    let body = br#"[{"timestamp":"2024-01-01T00:00:00Z","value":"21.5"}]"#;
    let series = decode(SensorType::Temperature, body).unwrap();

    assert_eq!(series.sensor_type(), SensorType::Temperature);
    assert_eq!(
        series.readings(),
        &[SensorReading {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            value: 21.5,
        }]
    );
}

#[test]
fn arrival_order_is_kept_and_extra_fields_ignored() {
    let body = br#"[
        {"id": 7, "timestamp": "2024-03-02T10:00:00Z", "value": 40, "unit": "%"},
        {"id": 3, "timestamp": "2024-03-01T10:00:00+02:00", "value": 38.5, "unit": "%"}
    ]"#;
    let series = decode(SensorType::Humidity, body).unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.values().collect::<Vec<_>>(), vec![40.0, 38.5]);
    assert_eq!(
        series.readings()[1].timestamp,
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    );
}

#[test]
fn empty_array_is_empty_series() {
    let series = decode(SensorType::Humidity, b"[]").unwrap();
    assert!(series.is_empty());
}

#[test]
fn wrapper_object_is_rejected() {
    let err = decode(SensorType::Light, br#"{"data": []}"#).unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)));
}

#[test]
fn positional_tuples_are_rejected() {
    let err = decode(SensorType::Light, br#"[[1, 320.0, "2024-01-01 00:00:00"]]"#).unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)));

    // Same order as the object fields, still not an object.
    let err = decode(SensorType::Light, br#"[["2024-01-01T00:00:00Z", 320.0]]"#).unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)));
}

#[test]
fn malformed_json_is_rejected() {
    let err = decode(SensorType::Temperature, b"[{\"timestamp\": ").unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)));
    assert!(!err.is_network());
}

#[test]
fn one_bad_entry_rejects_the_whole_response() {
    let bad_value = br#"[
        {"timestamp": "2024-01-01T00:00:00Z", "value": 1.0},
        {"timestamp": "2024-01-01T00:10:00Z", "value": "warm"}
    ]"#;
    let err = decode(SensorType::Temperature, bad_value).unwrap_err();
    match err {
        FetchError::MalformedResponse(msg) => assert!(msg.contains("entry 1"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }

    let bad_time = br#"[{"timestamp": "yesterday", "value": 1.0}]"#;
    assert!(decode(SensorType::Temperature, bad_time).is_err());

    let null_value = br#"[{"timestamp": "2024-01-01T00:00:00Z", "value": null}]"#;
    assert!(decode(SensorType::Temperature, null_value).is_err());
}

#[test]
fn non_finite_string_values_are_rejected() {
    for value in ["NaN", "inf", "-infinity"] {
        let body = format!(r#"[{{"timestamp": "2024-01-01T00:00:00Z", "value": "{value}"}}]"#);
        assert!(
            decode(SensorType::Light, body.as_bytes()).is_err(),
            "{value} should be rejected"
        );
    }
}

#[test]
fn naive_backend_timestamps_are_utc() {
    let expected = Utc.with_ymd_and_hms(2025, 2, 14, 9, 30, 0).unwrap();
    assert_eq!(parse_timestamp("2025-02-14 09:30:00"), Some(expected));
    assert_eq!(parse_timestamp("2025-02-14T09:30:00"), Some(expected));
    assert_eq!(parse_timestamp(" 2025-02-14T09:30:00Z "), Some(expected));

    let fractional = parse_timestamp("2025-02-14 09:30:00.250").unwrap();
    assert_eq!(fractional.timestamp_subsec_millis(), 250);

    assert_eq!(parse_timestamp("2025-02-14"), None);
    assert_eq!(parse_timestamp(""), None);
}
