//! Results are plain data and serialize through serde.
//!
//! Run with: `cargo test --features serde`

#![cfg(feature = "serde")]

use morphos_core::{Attribute, EntityType, Morphos, Path, Registry, SearchConfig, TransformationResult};

#[test]
fn test_transformation_result_survives_json() {
    let m = Morphos::new();
    let t = m.transform("T03", "F09").unwrap();
    let json = serde_json::to_string(&t).unwrap();
    assert!(json.contains("\"primary_target\":\"T04\""));
    let back: TransformationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}

#[test]
fn test_paths_serialize_as_id_lists() {
    let m = Morphos::new();
    let paths = m.find_paths("T01", "T03", 2).unwrap();
    let value = serde_json::to_value(&paths).unwrap();
    assert_eq!(value[0]["entities"], serde_json::json!(["T01", "T02", "T03"]));
    assert_eq!(value[0]["duration"]["days"], 14);
    let back: Vec<Path> = serde_json::from_value(value).unwrap();
    assert_eq!(back, paths);
}

#[test]
fn test_interaction_and_score_serialize() {
    let m = Morphos::new();
    let r = m.interact("L01", "T02").unwrap();
    let value = serde_json::to_value(&r).unwrap();
    assert_eq!(value["classification"], "Stable");
    assert_eq!(value["components"]["synergy"], 0.8);

    let s = m.score_breakdown("T01", "F01", "W01").unwrap();
    assert_eq!(serde_json::to_value(s).unwrap()["total"], 100);
}

#[test]
fn test_search_config_reads_from_json() {
    let config: SearchConfig =
        serde_json::from_str(r#"{"max_results":3,"min_probability":10.0,"beam_width":64}"#).unwrap();
    assert_eq!(config.max_results, 3);
    assert_eq!(config.beam_width, 64);
}

#[test]
fn test_deserialized_attributes_are_clamped() {
    let entity: EntityType = serde_json::from_value(serde_json::json!({
        "id": "X1",
        "name": "Overdriven",
        "category": "Talent",
        "ordinal": 1,
        "attributes": [250, 0, 101, 100, 40, 0]
    }))
    .unwrap();
    assert_eq!(entity.attributes.values(), &[100, 0, 100, 100, 40, 0]);

    let registry = Registry::builder().entity(entity).build().unwrap();
    assert_eq!(registry.entity("X1").unwrap().attributes.get(Attribute::Execution), 100);
}
