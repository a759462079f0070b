#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::categories::{Category, SubCategory};
    use crate::error::ConfigError;
    use crate::packs::{PackRegistry, PackSlot, VANILLA_PACK};

    fn setup() -> (PackRegistry, PackResolver) {
        (PackRegistry::with_builtins(), PackResolver::default())
    }

    // -------------------------------------------------------------------------
    // Base defaults
    // -------------------------------------------------------------------------

    #[test]
    fn test_base_default_total_and_registered() {
        let registry = PackRegistry::with_builtins();
        for slot in PackSlot::ALL {
            for category in Category::ALL.iter().copied().chain([Category::None]) {
                for sub in SubCategory::ALL {
                    let name = base_default(slot, category, sub);
                    assert!(
                        registry.find_by_name(name).is_some(),
                        "{slot:?}/{category:?}/{sub:?} -> missing '{name}'"
                    );
                }
            }
        }
    }

    #[test]
    fn test_base_default_matches_slot_and_category() {
        let registry = PackRegistry::with_builtins();
        for sub in SubCategory::ALL {
            let category = sub.category();
            for slot in [PackSlot::Population, PackSlot::Floor] {
                let name = base_default(slot, category, sub);
                assert!(
                    registry.get_for(name, slot, category).is_ok(),
                    "{slot:?}/{sub:?} -> '{name}' does not fit"
                );
            }
        }
    }

    #[test]
    fn test_exact_entry_ignored_for_foreign_category() {
        // A residential sub-category under the office category uses the office fallback.
        let name = base_default(
            PackSlot::Population,
            Category::Office,
            SubCategory::ResidentialHigh,
        );
        assert_eq!(name, "off-generic");
    }

    #[test]
    fn test_unclassified_defaults_to_vanilla() {
        let name = base_default(PackSlot::Population, Category::None, SubCategory::Generic);
        assert_eq!(name, VANILLA_PACK);
    }

    // -------------------------------------------------------------------------
    // Resolution order
    // -------------------------------------------------------------------------

    #[test]
    fn test_resolution_falls_to_base() {
        let (registry, resolver) = setup();
        let pack = resolver.resolve(
            &registry,
            PackSlot::Population,
            "House 1",
            Category::Residential,
            SubCategory::ResidentialLow,
        );
        assert_eq!(pack.name(), "res-detached");
        let (_, tier) = resolver.resolve_name(
            PackSlot::Population,
            "House 1",
            Category::Residential,
            SubCategory::ResidentialLow,
        );
        assert_eq!(tier, Resolution::Base);
    }

    #[test]
    fn test_default_beats_base() {
        let (registry, mut resolver) = setup();
        resolver
            .change_default(
                &registry,
                PackSlot::Population,
                Category::Residential,
                SubCategory::ResidentialLow,
                "res-terraced",
            )
            .unwrap();
        let pack = resolver.resolve(
            &registry,
            PackSlot::Population,
            "House 1",
            Category::Residential,
            SubCategory::ResidentialLow,
        );
        assert_eq!(pack.name(), "res-terraced");
    }

    #[test]
    fn test_pin_beats_default() {
        let (registry, mut resolver) = setup();
        resolver
            .change_default(
                &registry,
                PackSlot::Population,
                Category::Residential,
                SubCategory::ResidentialLow,
                "res-terraced",
            )
            .unwrap();
        resolver
            .pin(
                &registry,
                PackSlot::Population,
                "House 1",
                Category::Residential,
                "res-legacy",
            )
            .unwrap();

        let (name, tier) = resolver.resolve_name(
            PackSlot::Population,
            "House 1",
            Category::Residential,
            SubCategory::ResidentialLow,
        );
        assert_eq!((name, tier), ("res-legacy", Resolution::Pinned));

        // Other buildings still get the default.
        let other = resolver.resolve(
            &registry,
            PackSlot::Population,
            "House 2",
            Category::Residential,
            SubCategory::ResidentialLow,
        );
        assert_eq!(other.name(), "res-terraced");
    }

    #[test]
    fn test_slots_resolve_independently() {
        let (registry, mut resolver) = setup();
        resolver
            .pin(
                &registry,
                PackSlot::Floor,
                "Tower",
                Category::Residential,
                "floor-office",
            )
            .unwrap();
        let floor = resolver.resolve(
            &registry,
            PackSlot::Floor,
            "Tower",
            Category::Residential,
            SubCategory::ResidentialHigh,
        );
        let population = resolver.resolve(
            &registry,
            PackSlot::Population,
            "Tower",
            Category::Residential,
            SubCategory::ResidentialHigh,
        );
        assert_eq!(floor.name(), "floor-office");
        assert_eq!(population.name(), "res-apartment");
    }

    #[test]
    fn test_stale_pin_falls_through() {
        let (mut registry, mut resolver) = setup();
        resolver
            .pin(
                &registry,
                PackSlot::Population,
                "House 1",
                Category::Residential,
                "res-legacy",
            )
            .unwrap();
        // A fresh registry without the pinned pack name behaves as if unpinned.
        registry = PackRegistry::default();
        for pack in crate::packs::builtin_packs()
            .into_iter()
            .filter(|p| p.name() != "res-legacy")
        {
            registry.register(pack);
        }
        let pack = resolver.resolve(
            &registry,
            PackSlot::Population,
            "House 1",
            Category::Residential,
            SubCategory::ResidentialLow,
        );
        assert_eq!(pack.name(), "res-detached");
    }

    #[test]
    fn test_empty_registry_still_resolves() {
        let registry = PackRegistry::default();
        let resolver = PackResolver::default();
        let pack = resolver.resolve(
            &registry,
            PackSlot::Floor,
            "X",
            Category::Office,
            SubCategory::OfficeGeneric,
        );
        assert_eq!(pack.name(), "floor-office");
    }

    // -------------------------------------------------------------------------
    // change_default
    // -------------------------------------------------------------------------

    #[test]
    fn test_change_to_base_removes_entry() {
        let (registry, mut resolver) = setup();
        let key = (
            PackSlot::Population,
            Category::Commercial,
            SubCategory::CommercialHigh,
        );
        resolver
            .change_default(&registry, key.0, key.1, key.2, "com-legacy")
            .unwrap();
        assert_eq!(
            resolver.default_assignment(key.0, key.1, key.2),
            Some("com-legacy")
        );

        let change = resolver
            .change_default(&registry, key.0, key.1, key.2, "com-mall")
            .unwrap();
        assert_eq!(change.previous, "com-legacy");
        assert_eq!(change.current, "com-mall");
        assert!(change.changed());
        assert_eq!(resolver.default_assignment(key.0, key.1, key.2), None);
        assert_eq!(resolver.defaults().count(), 0);
    }

    #[test]
    fn test_change_default_rejects_unknown_pack() {
        let (registry, mut resolver) = setup();
        let err = resolver
            .change_default(
                &registry,
                PackSlot::Population,
                Category::Office,
                SubCategory::OfficeGeneric,
                "off-imaginary",
            )
            .unwrap_err();
        assert_eq!(err, ConfigError::PackNotFound("off-imaginary".into()));
        assert_eq!(resolver, PackResolver::default());
    }

    #[test]
    fn test_change_default_rejects_wrong_category() {
        let (registry, mut resolver) = setup();
        let err = resolver
            .change_default(
                &registry,
                PackSlot::Population,
                Category::Office,
                SubCategory::OfficeGeneric,
                "ind-factory",
            )
            .unwrap_err();
        assert!(matches!(err, ConfigError::CategoryMismatch { .. }));
    }

    #[test]
    fn test_unpin_restores_default() {
        let (registry, mut resolver) = setup();
        resolver
            .pin(
                &registry,
                PackSlot::Population,
                "Shop",
                Category::Commercial,
                VANILLA_PACK,
            )
            .unwrap();
        assert_eq!(
            resolver.unpin(PackSlot::Population, "Shop"),
            Some(VANILLA_PACK.to_string())
        );
        assert!(resolver.pinned(PackSlot::Population, "Shop").is_none());
    }
}
