use serde::{Deserialize, Serialize};

/// One row of the catalog feed list, the selection surface of the viewer.
///
/// A flattened projection of a NeoWs feed object: the first close-approach
/// entry supplies the date/distance/velocity columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoSummary {
    pub name: String,
    pub id: String,
    pub absolute_magnitude_h: f64,
    pub diameter_min_km: f64,
    pub diameter_max_km: f64,
    pub approach_date: String,
    pub miss_distance_km: String,
    pub velocity_kmph: String,
    pub is_hazardous: bool,
    pub nasa_jpl_url: String,
}

impl NeoSummary {
    /// Label used for the selection list, with a hazard marker when the
    /// upstream flags the object as potentially hazardous.
    pub fn list_label(&self) -> String {
        if self.is_hazardous {
            format!("[!] {} | {}", self.name, self.approach_date)
        } else {
            format!("{} | {}", self.name, self.approach_date)
        }
    }
}
