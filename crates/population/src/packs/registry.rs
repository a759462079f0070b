use std::collections::HashMap;
use std::sync::Arc;

use crate::categories::Category;
use crate::error::ConfigError;

use super::builtin::builtin_packs;
use super::types::{CalculationPack, PackSlot, PackVersion};

/// Ordered, name-indexed store of calculation packs.
///
/// Packs are shared behind `Arc` so resolved packs can be handed out without
/// cloning parameter tables. Replacing a pack keeps its position in the
/// display order.
#[derive(Debug, Clone, Default)]
pub struct PackRegistry {
    packs: Vec<Arc<CalculationPack>>,
    index: HashMap<String, usize>,
}

impl PackRegistry {
    /// Registry seeded with every built-in pack.
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        for pack in builtin_packs() {
            registry.register(pack);
        }
        registry
    }

    /// Insert a pack, or replace the pack with the same name in place.
    /// Returns the replaced pack, if any.
    pub fn register(&mut self, pack: CalculationPack) -> Option<Arc<CalculationPack>> {
        let pack = Arc::new(pack);
        if let Some(&position) = self.index.get(pack.name()) {
            return Some(std::mem::replace(&mut self.packs[position], pack));
        }
        self.index.insert(pack.name().to_string(), self.packs.len());
        self.packs.push(pack);
        None
    }

    /// Register a user-defined pack. The pack is validated, tagged as custom,
    /// and may not replace a built-in pack.
    pub fn register_custom(
        &mut self,
        mut pack: CalculationPack,
    ) -> Result<Option<Arc<CalculationPack>>, ConfigError> {
        pack.validate()?;
        if let Some(existing) = self.find_by_name(pack.name()) {
            if existing.version() != PackVersion::Custom {
                return Err(ConfigError::BuiltInCollision(pack.name().to_string()));
            }
        }
        pack.meta_mut().version = PackVersion::Custom;
        Ok(self.register(pack))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Arc<CalculationPack>> {
        self.index.get(name).map(|&i| &self.packs[i])
    }

    /// Like [`find_by_name`](Self::find_by_name) but a miss is a configuration error.
    pub fn get(&self, name: &str) -> Result<&Arc<CalculationPack>, ConfigError> {
        self.find_by_name(name)
            .ok_or_else(|| ConfigError::PackNotFound(name.to_string()))
    }

    /// Look up `name` and check it can fill `slot` for buildings of `category`.
    pub fn get_for(
        &self,
        name: &str,
        slot: PackSlot,
        category: Category,
    ) -> Result<&Arc<CalculationPack>, ConfigError> {
        let pack = self.get(name)?;
        if pack.slot() != slot {
            return Err(ConfigError::WrongPackKind {
                name: name.to_string(),
                expected: slot,
            });
        }
        let found = pack.category();
        if found != Category::None && found != category {
            return Err(ConfigError::CategoryMismatch {
                name: name.to_string(),
                expected: category,
                found,
            });
        }
        Ok(pack)
    }

    /// Packs offered for `category`, in registration order. Packs in the
    /// `None` category are always included.
    pub fn packs_for_category(&self, category: Category) -> Vec<&Arc<CalculationPack>> {
        self.packs
            .iter()
            .filter(|p| p.category() == category || p.category() == Category::None)
            .collect()
    }

    /// Packs of one slot offered for `category`.
    pub fn packs_for_slot(&self, slot: PackSlot, category: Category) -> Vec<&Arc<CalculationPack>> {
        self.packs_for_category(category)
            .into_iter()
            .filter(|p| p.slot() == slot)
            .collect()
    }

    /// User-defined packs, in registration order.
    pub fn custom_packs(&self) -> impl Iterator<Item = &CalculationPack> + '_ {
        self.packs
            .iter()
            .filter(|p| p.version() == PackVersion::Custom)
            .map(|p| p.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CalculationPack>> + '_ {
        self.packs.iter()
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}
