use serde::{Deserialize, Serialize};

/// Miss distance of a flyby, in the four units the upstream catalog serves.
///
/// NeoWs serializes these as decimal strings; they are carried verbatim so
/// the viewer renders exactly what the catalog reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissDistance {
    pub astronomical: String,
    pub kilometers: String,
    pub lunar: String,
    pub miles: String,
}

/// Relative velocity of a flyby in three units, also decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_hour: String,
    pub kilometers_per_second: String,
    pub miles_per_hour: String,
}

/// One close-approach event of the selected object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachRecord {
    pub close_approach_date: String,
    #[serde(default)]
    pub close_approach_date_full: String,
    pub miss_distance: MissDistance,
    pub orbiting_body: String,
    pub relative_velocity: RelativeVelocity,
}

impl ApproachRecord {
    /// The ten labeled fields an approach card renders, in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Close Approach Date", self.close_approach_date.clone()),
            ("Full Date", self.close_approach_date_full.clone()),
            (
                "Miss Distance (Astronomical)",
                self.miss_distance.astronomical.clone(),
            ),
            (
                "Miss Distance (Kilometers)",
                self.miss_distance.kilometers.clone(),
            ),
            ("Miss Distance (Lunar)", self.miss_distance.lunar.clone()),
            ("Miss Distance (Miles)", self.miss_distance.miles.clone()),
            ("Orbiting Body", self.orbiting_body.clone()),
            (
                "Relative Velocity (km/h)",
                self.relative_velocity.kilometers_per_hour.clone(),
            ),
            (
                "Relative Velocity (km/s)",
                self.relative_velocity.kilometers_per_second.clone(),
            ),
            (
                "Relative Velocity (miles/h)",
                self.relative_velocity.miles_per_hour.clone(),
            ),
        ]
    }
}
