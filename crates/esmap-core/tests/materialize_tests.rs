use serde_json::{json, Value};

use esmap_core::materialize::{layer_kind, materialize, NO_RESULTS};
use esmap_core::{GeometryKind, ResultDocument};

fn doc(source: Value) -> ResultDocument {
    ResultDocument::from_source(&source)
}

#[test]
fn empty_batch_warns_about_no_results() {
    let result = materialize(&[]);
    assert!(result.features.is_empty());
    assert!(result.schema.is_empty());
    assert!(result.warnings.iter().any(|w| w.contains("no results")), "warnings: {:?}", result.warnings);
    assert_eq!(result.warnings, vec![NO_RESULTS.to_string()]);
}

#[test]
fn schema_is_union_and_missing_fields_are_empty() {
    let documents = vec![
        doc(json!({"a": "alpha", "b": 2, "geometry": {"type": "Point", "coordinates": [1, 2]}})),
        doc(json!({"b": 3, "c": true})),
    ];
    let result = materialize(&documents);

    assert_eq!(result.schema.fields(), ["a", "b", "c"]);
    assert_eq!(result.features.len(), 1, "document without geometry is skipped");
    assert!(result.warnings.is_empty(), "a missing geometry is not a failure");

    let feature = &result.features[0];
    assert_eq!(feature.geometry_wkt(), "POINT(1 2)");
    assert_eq!(feature.attributes(), ["alpha", "2", ""]);
    assert_eq!(feature.attribute(&result.schema, "c"), Some(""));
}

#[test]
fn geometry_is_not_an_attribute_column() {
    let documents = vec![doc(json!({"name": "x", "geometry": {"type": "Point", "coordinates": [0, 0]}}))];
    let result = materialize(&documents);
    assert_eq!(result.schema.fields(), ["name"]);
    assert_eq!(result.schema.position("geometry"), None);
}

#[test]
fn counts_follow_skipped_and_failed_documents() {
    // N = 6, K = 2 without geometry, M = 2 unencodable
    let documents = vec![
        doc(json!({"id": 1, "geometry": {"type": "Point", "coordinates": [1, 1]}})),
        doc(json!({"id": 2})),
        doc(json!({"id": 3, "geometry": {"type": "Circle", "coordinates": [1, 1]}})),
        doc(json!({"id": 4, "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}})),
        doc(json!({"id": 5, "geometry": {"type": "Polygon", "coordinates": []}})),
        doc(json!({"id": 6})),
    ];
    let result = materialize(&documents);

    assert_eq!(result.features.len(), 6 - 2 - 2);
    assert!(result.warnings.len() >= 2);
    assert!(result.warnings[0].starts_with("could not encode geometry for document 2"), "{}", result.warnings[0]);
    assert!(result.warnings[1].starts_with("could not encode geometry for document 4"), "{}", result.warnings[1]);

    let ids: Vec<&str> = result.features.iter().map(|f| f.attribute(&result.schema, "id").unwrap_or("?")).collect();
    assert_eq!(ids, ["1", "4"], "input order is preserved");
}

#[test]
fn rows_align_with_schema_across_features() {
    let documents = vec![
        doc(json!({"z": "z1", "m": "m1", "geometry": {"type": "Point", "coordinates": [1, 1]}})),
        doc(json!({"a": "a2", "geometry": {"type": "Point", "coordinates": [2, 2]}})),
        doc(json!({"m": "m3", "a": "a3", "z": "z3", "geometry": {"type": "Point", "coordinates": [3, 3]}})),
    ];
    let result = materialize(&documents);
    assert_eq!(result.schema.fields(), ["a", "m", "z"]);
    for feature in &result.features {
        assert_eq!(feature.attributes().len(), result.schema.len());
    }
    assert_eq!(result.features[0].attributes(), ["", "m1", "z1"]);
    assert_eq!(result.features[1].attributes(), ["a2", "", ""]);
    assert_eq!(result.features[2].attributes(), ["a3", "m3", "z3"]);
}

#[test]
fn schema_does_not_depend_on_document_order() {
    let first = doc(json!({"b": 1, "geometry": {"type": "Point", "coordinates": [1, 1]}}));
    let second = doc(json!({"a": 2, "c": 3}));
    let forward = materialize(&[first.clone(), second.clone()]);
    let backward = materialize(&[second, first]);
    assert_eq!(forward.schema, backward.schema);
}

#[test]
fn attribute_values_are_coerced_to_text() {
    let documents = vec![doc(json!({
        "text": "plain",
        "int": 42,
        "float": 1.5,
        "flag": false,
        "nothing": null,
        "list": [1, "two"],
        "nested": {"k": "v"},
        "geometry": {"type": "Point", "coordinates": [0, 0]}
    }))];
    let result = materialize(&documents);
    let feature = &result.features[0];
    let value = |field| feature.attribute(&result.schema, field).unwrap_or("?");
    assert_eq!(value("text"), "plain");
    assert_eq!(value("int"), "42");
    assert_eq!(value("float"), "1.5");
    assert_eq!(value("flag"), "false");
    assert_eq!(value("nothing"), "");
    assert_eq!(value("list"), r#"[1,"two"]"#);
    assert_eq!(value("nested"), r#"{"k":"v"}"#);
}

#[test]
fn layer_kind_comes_from_first_geometry() {
    let documents = vec![
        doc(json!({"name": "no geometry"})),
        doc(json!({"geometry": {"type": "MultiPolygon", "coordinates": [[[[0, 0], [1, 0], [1, 1], [0, 0]]]]}})),
        doc(json!({"geometry": {"type": "Point", "coordinates": [5, 5]}})),
    ];
    let result = materialize(&documents);
    assert_eq!(result.layer_geometry_kind, GeometryKind::MultiPolygon);
    assert_eq!(result.features.len(), 2, "other kinds are still encoded");
    assert_eq!(result.features[1].geometry_wkt(), "POINT(5 5)");
}

#[test]
fn layer_kind_defaults_to_point() {
    assert_eq!(layer_kind(&[doc(json!({"a": 1}))]), GeometryKind::Point);
    assert_eq!(
        layer_kind(&[doc(json!({"geometry": {"type": "Circle"}})), doc(json!({"geometry": {"type": "Polygon"}}))]),
        GeometryKind::Point,
        "only the first geometry is consulted"
    );

    let result = materialize(&[doc(json!({"a": 1}))]);
    assert!(result.features.is_empty());
    assert!(result.warnings.is_empty());
    assert_eq!(result.layer_geometry_kind, GeometryKind::Point);
}

#[test]
fn null_geometry_counts_as_present_but_unencodable() {
    let result = materialize(&[doc(json!({"a": 1, "geometry": null}))]);
    assert!(result.features.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("not a JSON object"));
}
