use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::config::DEFAULT_INVENTORY_CAP;
use crate::error::ConfigError;

/// Category-wide tuning values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct CategoryKnobs {
    /// Multiplier applied to household counts by the building refresh system.
    pub population_multiplier: f32,
    /// Scales raw visitor demand before compression, in percent.
    pub visitor_multiplier_pct: u16,
    /// Goods moved per visitor, in percent.
    pub sales_multiplier_pct: u16,
    /// Upper bound on goods demand per building.
    pub inventory_cap: u32,
}

impl Default for CategoryKnobs {
    fn default() -> Self {
        Self {
            population_multiplier: 1.0,
            visitor_multiplier_pct: 100,
            sales_multiplier_pct: 100,
            inventory_cap: DEFAULT_INVENTORY_CAP,
        }
    }
}

impl CategoryKnobs {
    pub fn validate(&self, category: Category) -> Result<(), ConfigError> {
        if !(self.population_multiplier.is_finite() && self.population_multiplier > 0.0) {
            return Err(ConfigError::InvalidMultiplier {
                value: self.population_multiplier,
            });
        }
        if self.visitor_multiplier_pct == 0 {
            return Err(ConfigError::InvalidKnob {
                category,
                reason: "visitor multiplier must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_knobs_valid() {
        for category in Category::ALL {
            assert!(CategoryKnobs::default().validate(category).is_ok());
        }
    }

    #[test]
    fn test_non_positive_multiplier_rejected() {
        let knobs = CategoryKnobs {
            population_multiplier: 0.0,
            ..Default::default()
        };
        assert_eq!(
            knobs.validate(Category::Residential),
            Err(ConfigError::InvalidMultiplier { value: 0.0 })
        );
        let nan = CategoryKnobs {
            population_multiplier: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate(Category::Residential).is_err());
    }

    #[test]
    fn test_zero_visitor_multiplier_rejected() {
        let knobs = CategoryKnobs {
            visitor_multiplier_pct: 0,
            ..Default::default()
        };
        assert!(matches!(
            knobs.validate(Category::Commercial),
            Err(ConfigError::InvalidKnob { .. })
        ));
    }
}
