use serde::{Deserialize, Serialize};

/// One orbital solution for the selected object.
///
/// Field names follow the NeoWs `orbital_data` document. The two counts are
/// integers upstream; every other value is a decimal or date string and is
/// carried verbatim. The upstream `orbit_class` sub-document is not part of
/// the rendered card and is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitRecord {
    pub orbit_id: String,
    pub orbit_determination_date: String,
    pub first_observation_date: String,
    pub last_observation_date: String,
    pub data_arc_in_days: i64,
    pub observations_used: i64,
    pub orbit_uncertainty: String,
    pub minimum_orbit_intersection: String,
    pub jupiter_tisserand_invariant: String,
    pub epoch_osculation: String,
    pub eccentricity: String,
    pub semi_major_axis: String,
    pub inclination: String,
    pub ascending_node_longitude: String,
    pub orbital_period: String,
    pub perihelion_distance: String,
    pub perihelion_argument: String,
    pub aphelion_distance: String,
    pub perihelion_time: String,
    pub mean_anomaly: String,
    pub mean_motion: String,
    pub equinox: String,
}

impl OrbitRecord {
    /// The twenty-two labeled fields an orbit card renders, in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Orbit ID", self.orbit_id.clone()),
            (
                "Orbit Determination Date",
                self.orbit_determination_date.clone(),
            ),
            ("First Observation Date", self.first_observation_date.clone()),
            ("Last Observation Date", self.last_observation_date.clone()),
            ("Data Arc (in Days)", self.data_arc_in_days.to_string()),
            ("Observations Used", self.observations_used.to_string()),
            ("Orbit Uncertainty", self.orbit_uncertainty.clone()),
            (
                "Minimum Orbit Intersection",
                self.minimum_orbit_intersection.clone(),
            ),
            (
                "Jupiter Tisserand Invariant",
                self.jupiter_tisserand_invariant.clone(),
            ),
            ("Epoch Osculation", self.epoch_osculation.clone()),
            ("Eccentricity", self.eccentricity.clone()),
            ("Semi-Major Axis", self.semi_major_axis.clone()),
            ("Inclination", self.inclination.clone()),
            (
                "Ascending Node Longitude",
                self.ascending_node_longitude.clone(),
            ),
            ("Orbital Period", self.orbital_period.clone()),
            ("Perihelion Distance", self.perihelion_distance.clone()),
            ("Perihelion Argument", self.perihelion_argument.clone()),
            ("Aphelion Distance", self.aphelion_distance.clone()),
            ("Perihelion Time", self.perihelion_time.clone()),
            ("Mean Anomaly", self.mean_anomaly.clone()),
            ("Mean Motion", self.mean_motion.clone()),
            ("Equinox", self.equinox.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrbitRecord {
        OrbitRecord {
            orbit_id: "659".into(),
            orbit_determination_date: "2021-04-15 06:20:34".into(),
            first_observation_date: "1893-10-29".into(),
            last_observation_date: "2021-04-13".into(),
            data_arc_in_days: 46553,
            observations_used: 9130,
            orbit_uncertainty: "0".into(),
            minimum_orbit_intersection: ".149638".into(),
            jupiter_tisserand_invariant: "4.582".into(),
            epoch_osculation: "2460800.5".into(),
            eccentricity: ".2227480169011467".into(),
            semi_major_axis: "1.458114438717907".into(),
            inclination: "10.82830761253864".into(),
            ascending_node_longitude: "304.2719160185367".into(),
            orbital_period: "643.1403141999031".into(),
            perihelion_distance: "1.133356943989735".into(),
            perihelion_argument: "178.9269951795186".into(),
            aphelion_distance: "1.782871933446079".into(),
            perihelion_time: "2460804.00207346".into(),
            mean_anomaly: "358.0404029342164".into(),
            mean_motion: "0.5597534349061246".into(),
            equinox: "J2000".into(),
        }
    }

    #[test]
    fn orbit_card_has_twenty_two_labeled_fields() {
        let fields = sample().fields();
        assert_eq!(fields.len(), 22);
        assert_eq!(fields[0], ("Orbit ID", "659".to_string()));
        assert_eq!(fields[4], ("Data Arc (in Days)", "46553".to_string()));
        assert_eq!(fields[21], ("Equinox", "J2000".to_string()));
    }

    #[test]
    fn orbit_ignores_unmapped_upstream_fields() {
        let mut raw = serde_json::to_value(sample()).unwrap();
        raw["orbit_class"] = serde_json::json!({
            "orbit_class_type": "AMO",
            "orbit_class_description": "Near-Earth asteroid orbits similar to that of 1221 Amor",
            "orbit_class_range": "1.017 AU < q (perihelion) < 1.3 AU"
        });
        let record: OrbitRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.orbit_id, "659");
    }
}
