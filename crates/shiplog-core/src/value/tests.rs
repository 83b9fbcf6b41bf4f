use super::*;

#[test]
fn untagged_wire_shape_matches_historical_json() {
    let mut root = BTreeMap::new();
    root.insert("date".to_string(), Value::from("2025-03-14"));
    root.insert("ok".to_string(), Value::from(true));

    let mut port = BTreeMap::new();
    port.insert("oilPressure".to_string(), Value::from(350.0));
    root.insert("port".to_string(), Value::Map(port));

    let json = serde_json::to_string(&Value::Map(root)).unwrap();
    assert_eq!(
        json,
        r#"{"date":"2025-03-14","ok":true,"port":{"oilPressure":350.0}}"#
    );

    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(back.as_map().unwrap()["ok"], Value::Bool(true));
    assert!(back.as_map().unwrap()["port"].is_map());
}

#[test]
fn numeric_view_parses_text() {
    assert_eq!(Value::from(350.0).as_number(), Some(350.0));
    assert_eq!(Value::from("350").as_number(), Some(350.0));
    assert_eq!(Value::from(" 3.5 ").as_number(), Some(3.5));
    assert_eq!(Value::from("").as_number(), None);
    assert_eq!(Value::from("n/a").as_number(), None);
    assert_eq!(Value::from(true).as_number(), None);
    assert_eq!(Value::map().as_number(), None);
}

#[test]
fn blankness_matches_untouched_inputs() {
    assert!(Value::from("").is_blank());
    assert!(Value::map().is_blank());
    assert!(!Value::from("x").is_blank());
    assert!(!Value::Bool(false).is_blank());
    assert!(!Value::from(0.0).is_blank());
}
