use chrono::NaiveDate;
use neocore::catalog::{ApproachRecord, ObjectDetail, OrbitRecord};
use neocore::prelude::{CatalogError, CatalogResult};
use serde_json::Value;

/// Build the nested detail document from a NeoWs lookup response.
///
/// Close approaches are sorted chronologically into `sorted_approaches`;
/// the single upstream `orbital_data` object becomes a one-element
/// sequence, which is the shape the detail panel iterates.
pub fn structure_object(raw: &Value) -> CatalogResult<ObjectDetail> {
    let approaches_raw = raw.get("close_approach_data").ok_or_else(|| {
        CatalogError::MalformedPayload("lookup missing close_approach_data".into())
    })?;
    let mut approaches: Vec<ApproachRecord> = serde_json::from_value(approaches_raw.clone())
        .map_err(|err| CatalogError::MalformedPayload(err.to_string()))?;
    approaches.sort_by_key(approach_ordinal);

    let orbit_raw = raw
        .get("orbital_data")
        .ok_or_else(|| CatalogError::MalformedPayload("lookup missing orbital_data".into()))?;
    let orbit: OrbitRecord = serde_json::from_value(orbit_raw.clone())
        .map_err(|err| CatalogError::MalformedPayload(err.to_string()))?;

    Ok(ObjectDetail {
        sorted_approaches: approaches,
        orbital_data: vec![orbit],
    })
}

fn approach_ordinal(record: &ApproachRecord) -> NaiveDate {
    // Unparseable dates sort first rather than poisoning the whole lookup.
    NaiveDate::parse_from_str(&record.close_approach_date, "%Y-%m-%d")
        .unwrap_or(NaiveDate::MIN)
}
