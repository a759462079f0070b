use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::categories::Category;
use crate::config::SNAPSHOT_VERSION;
use crate::snapshot::{
    ConfigurationSnapshot, DefaultRecord, KnobsRecord, LoadReport, OverrideRecord, PinRecord,
};

use super::CalculationContext;

fn override_records(table: &BTreeMap<String, u16>) -> Vec<OverrideRecord> {
    table
        .iter()
        .map(|(identity, &count)| OverrideRecord {
            identity: identity.clone(),
            count,
        })
        .collect()
}

impl CalculationContext {
    /// Everything a user configured, in a stable order.
    pub fn snapshot(&self) -> ConfigurationSnapshot {
        let defaults = self
            .resolver
            .defaults()
            .map(|(slot, category, sub_category, pack)| DefaultRecord {
                slot,
                category,
                sub_category,
                pack: pack.to_string(),
            })
            .collect();
        let pins = self
            .resolver
            .pins()
            .map(|(slot, identity, pack)| PinRecord {
                slot,
                identity: identity.to_string(),
                category: self
                    .registry
                    .find_by_name(pack)
                    .map_or(Category::None, |p| p.category()),
                pack: pack.to_string(),
            })
            .collect();
        ConfigurationSnapshot {
            version: SNAPSHOT_VERSION,
            custom_packs: self.registry.custom_packs().cloned().collect(),
            defaults,
            pins,
            population_overrides: override_records(&self.population_overrides),
            workplace_overrides: override_records(&self.workplace_overrides),
            knobs: self
                .knobs
                .iter()
                .map(|(&category, &knobs)| KnobsRecord { category, knobs })
                .collect(),
        }
    }

    /// Replace the configuration with `snapshot`.
    ///
    /// Each entry is applied on its own. An entry that fails validation or
    /// names a missing pack is skipped and recorded in the report; the rest
    /// still load.
    pub fn load_snapshot(&mut self, snapshot: &ConfigurationSnapshot) -> LoadReport {
        self.reset();
        let mut report = LoadReport::default();
        if snapshot.version > SNAPSHOT_VERSION {
            warn!(
                "Configuration version {} is newer than {}, loading what is understood",
                snapshot.version, SNAPSHOT_VERSION
            );
        }

        for pack in &snapshot.custom_packs {
            match self.registry.register_custom(pack.clone()) {
                Ok(_) => report.applied += 1,
                Err(e) => report.skip(format!("custom pack: {e}")),
            }
        }

        for record in &snapshot.defaults {
            match self.resolver.change_default(
                &self.registry,
                record.slot,
                record.category,
                record.sub_category,
                &record.pack,
            ) {
                Ok(_) => report.applied += 1,
                Err(e) => report.skip(format!(
                    "{} default for {:?}: {e}",
                    record.slot.name(),
                    record.sub_category
                )),
            }
        }

        for record in &snapshot.pins {
            match self.resolver.pin(
                &self.registry,
                record.slot,
                &record.identity,
                record.category,
                &record.pack,
            ) {
                Ok(_) => report.applied += 1,
                Err(e) => report.skip(format!("pin for '{}': {e}", record.identity)),
            }
        }

        for (records, table) in [
            (&snapshot.population_overrides, &mut self.population_overrides),
            (&snapshot.workplace_overrides, &mut self.workplace_overrides),
        ] {
            for record in records {
                if record.count == 0 {
                    report.skip(format!("zero override for '{}'", record.identity));
                    continue;
                }
                table.insert(record.identity.clone(), record.count);
                report.applied += 1;
            }
        }

        for record in &snapshot.knobs {
            match record.knobs.validate(record.category) {
                Ok(()) => {
                    self.knobs.insert(record.category, record.knobs);
                    report.applied += 1;
                }
                Err(e) => report.skip(format!("{} settings: {e}", record.category.name())),
            }
        }

        self.cache.clear();
        self.bump();
        info!(
            "Configuration loaded: {} entries applied, {} skipped",
            report.applied,
            report.skipped.len()
        );
        report
    }

    /// Render the configuration as the human-editable JSON settings file.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.snapshot().to_json()
    }

    /// Parse and load a JSON settings file. Only a malformed document is an
    /// error; invalid entries inside it are skipped.
    pub fn import_json(&mut self, text: &str) -> Result<LoadReport, serde_json::Error> {
        let snapshot = ConfigurationSnapshot::from_json(text)?;
        Ok(self.load_snapshot(&snapshot))
    }
}
