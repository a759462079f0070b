#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::categories::{Category, SubCategory};
    use crate::config::SNAPSHOT_VERSION;
    use crate::knobs::CategoryKnobs;
    use crate::packs::{CalculationPack, LevelDensity, PackSlot, PopulationPack};

    fn sample() -> ConfigurationSnapshot {
        let pack = PopulationPack::volumetric(
            "my-towers",
            Category::Residential,
            vec![LevelDensity::homes(80.0, 50.0, 10, false)],
        );
        ConfigurationSnapshot {
            custom_packs: vec![CalculationPack::Population(pack)],
            defaults: vec![DefaultRecord {
                slot: PackSlot::Population,
                category: Category::Residential,
                sub_category: SubCategory::ResidentialHigh,
                pack: "my-towers".to_string(),
            }],
            pins: vec![PinRecord {
                slot: PackSlot::Floor,
                identity: "Tower A".to_string(),
                category: Category::Residential,
                pack: "floor-office".to_string(),
            }],
            population_overrides: vec![OverrideRecord {
                identity: "Tower B".to_string(),
                count: 40,
            }],
            workplace_overrides: Vec::new(),
            knobs: vec![KnobsRecord {
                category: Category::Commercial,
                knobs: CategoryKnobs {
                    sales_multiplier_pct: 150,
                    ..Default::default()
                },
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_default_snapshot_is_empty() {
        let snapshot = ConfigurationSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert!(!sample().is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = sample();
        let text = snapshot.to_json().expect("serialize");
        assert!(text.contains("my-towers"));
        let back = ConfigurationSnapshot::from_json(&text).expect("deserialize");
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let text = r#"{ "version": 1, "population_overrides": [ { "identity": "Tower B", "count": 12 } ] }"#;
        let snapshot = ConfigurationSnapshot::from_json(text).expect("deserialize");
        assert!(snapshot.custom_packs.is_empty());
        assert!(snapshot.pins.is_empty());
        assert_eq!(snapshot.population_overrides.len(), 1);
        assert_eq!(snapshot.population_overrides[0].count, 12);
    }

    #[test]
    fn test_bitcode_round_trip() {
        let snapshot = sample();
        let bytes = bitcode::encode(&snapshot);
        let back: ConfigurationSnapshot = bitcode::decode(&bytes).expect("decode");
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(ConfigurationSnapshot::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_report_tracks_skips() {
        let mut report = LoadReport::default();
        assert!(report.is_clean());
        report.skip("pin for 'Tower A'".to_string());
        assert!(!report.is_clean());
        assert_eq!(report.skipped.len(), 1);
    }
}
