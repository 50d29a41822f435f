//! Reads features from GeoJSON.

use crate::error::PipelineError;
use lettering_expr::{MapFeature, Value};
use serde::Deserialize;
use serde_json::Map;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    properties: Option<Map<String, serde_json::Value>>,
}

/// Parses a GeoJSON `FeatureCollection`. Each feature's `properties` become its
/// attributes; geometry is ignored. Features without a numeric `id` are
/// numbered by position.
pub fn features_from_geojson(json: &str) -> Result<Vec<MapFeature>, PipelineError> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    if collection.kind != "FeatureCollection" {
        return Err(PipelineError::InvalidInput(format!(
            "expected a GeoJSON FeatureCollection, found type '{}'",
            collection.kind
        )));
    }

    let features: Vec<MapFeature> = collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| {
            let id = feature
                .id
                .as_ref()
                .and_then(serde_json::Value::as_i64)
                .unwrap_or(index as i64);
            let mut out = MapFeature::new(id);
            for (name, value) in feature.properties.unwrap_or_default() {
                out.insert(name, json_to_value(&value));
            }
            out
        })
        .collect();

    log::debug!("Read {} feature(s) from GeoJSON", features.len());
    Ok(features)
}

/// Converts a JSON property to an expression value. Arrays and objects have no
/// scalar form and are kept as their JSON text.
pub fn json_to_value(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        serde_json::Value::String(s) => Value::String(s.clone()),
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lettering_expr::Feature;

    #[test]
    fn test_reads_properties_as_attributes() {
        let features = features_from_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "id": 42, "geometry": null,
                      "properties": { "name": "Elm Road", "lanes": 2, "oneway": true, "ref": null } },
                    { "type": "Feature", "geometry": null,
                      "properties": { "tags": ["a", "b"] } },
                    { "type": "Feature", "geometry": null }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(features.len(), 3);
        assert_eq!(features[0].id(), 42);
        assert_eq!(features[0].get("name"), Some(Value::from("Elm Road")));
        assert_eq!(features[0].get("lanes"), Some(Value::from(2.0)));
        assert_eq!(features[0].get("oneway"), Some(Value::from(true)));
        assert_eq!(features[0].get("ref"), Some(Value::Null));
        assert_eq!(features[1].id(), 1);
        assert_eq!(features[1].get("tags"), Some(Value::from(r#"["a","b"]"#)));
        assert!(features[2].attributes.is_empty());
    }

    #[test]
    fn test_rejects_other_geojson_types() {
        let err = features_from_geojson(r#"{ "type": "Topology", "features": [] }"#).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
        assert!(matches!(
            features_from_geojson("not json"),
            Err(PipelineError::Json(_))
        ));
    }
}
