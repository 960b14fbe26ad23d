use neocore::catalog::NeoSummary;
use neocore::prelude::{CatalogError, CatalogResult};
use serde_json::Value;

/// Flatten a NeoWs feed document into selection-list rows.
///
/// The feed groups objects under `near_earth_objects` keyed by date; every
/// date in the window contributes rows, in date order.
pub fn simplify_feed(raw: &Value) -> CatalogResult<Vec<NeoSummary>> {
    let by_date = raw
        .get("near_earth_objects")
        .and_then(Value::as_object)
        .ok_or_else(|| CatalogError::MalformedPayload("feed missing near_earth_objects".into()))?;

    let mut rows = Vec::new();
    for (date, objects) in by_date {
        let objects = objects.as_array().ok_or_else(|| {
            CatalogError::MalformedPayload(format!("feed entry for {date} is not an array"))
        })?;
        for object in objects {
            rows.push(summarize(object)?);
        }
    }
    Ok(rows)
}

fn summarize(object: &Value) -> CatalogResult<NeoSummary> {
    // The first close-approach entry supplies the list's date/distance/velocity columns.
    let approach = object.pointer("/close_approach_data/0");
    Ok(NeoSummary {
        name: required_str(object, "/name")?,
        id: required_str(object, "/id")?,
        absolute_magnitude_h: object
            .pointer("/absolute_magnitude_h")
            .and_then(Value::as_f64)
            .unwrap_or_default(),
        diameter_min_km: object
            .pointer("/estimated_diameter/kilometers/estimated_diameter_min")
            .and_then(Value::as_f64)
            .unwrap_or_default(),
        diameter_max_km: object
            .pointer("/estimated_diameter/kilometers/estimated_diameter_max")
            .and_then(Value::as_f64)
            .unwrap_or_default(),
        approach_date: optional_str(approach, "/close_approach_date"),
        miss_distance_km: optional_str(approach, "/miss_distance/kilometers"),
        velocity_kmph: optional_str(approach, "/relative_velocity/kilometers_per_hour"),
        is_hazardous: object
            .pointer("/is_potentially_hazardous_asteroid")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        nasa_jpl_url: object
            .pointer("/nasa_jpl_url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

fn required_str(object: &Value, pointer: &str) -> CatalogResult<String> {
    object
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| CatalogError::MalformedPayload(format!("feed object missing {pointer}")))
}

fn optional_str(value: Option<&Value>, pointer: &str) -> String {
    value
        .and_then(|v| v.pointer(pointer))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
