// ---------------------------------------------------------------------------
// ConfigError: typed errors for configuration mutations
// ---------------------------------------------------------------------------

use std::fmt;

use crate::categories::Category;
use crate::packs::PackSlot;

/// Errors raised by configuration setters and pack registration.
///
/// Query operations never surface these; they fall back to safe values and
/// log instead. Every setter that returns one of these leaves the context
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No pack with this name is registered.
    PackNotFound(String),
    /// The named pack exists but is the wrong kind for the requested slot.
    WrongPackKind { name: String, expected: PackSlot },
    /// The named pack belongs to a different category.
    CategoryMismatch {
        name: String,
        expected: Category,
        found: Category,
    },
    /// A custom pack tried to replace a built-in pack.
    BuiltInCollision(String),
    /// Pack parameters are out of range.
    InvalidPack { name: String, reason: String },
    /// Population override must be at least 1.
    InvalidPopulationOverride { identity: String, value: u16 },
    /// Multipliers must be finite and strictly positive.
    InvalidMultiplier { value: f32 },
    /// Category knob values are out of range.
    InvalidKnob { category: Category, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PackNotFound(name) => write!(f, "Pack not found: {name}"),
            ConfigError::WrongPackKind { name, expected } => {
                write!(f, "Pack '{name}' is not a {} pack", expected.name())
            }
            ConfigError::CategoryMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "Pack '{name}' is for {} buildings, expected {}",
                found.name(),
                expected.name()
            ),
            ConfigError::BuiltInCollision(name) => {
                write!(f, "Custom pack '{name}' would replace a built-in pack")
            }
            ConfigError::InvalidPack { name, reason } => {
                write!(f, "Invalid pack '{name}': {reason}")
            }
            ConfigError::InvalidPopulationOverride { identity, value } => write!(
                f,
                "Invalid population override {value} for '{identity}' (must be at least 1)"
            ),
            ConfigError::InvalidMultiplier { value } => {
                write!(f, "Invalid multiplier {value} (must be greater than 0)")
            }
            ConfigError::InvalidKnob { category, reason } => {
                write!(f, "Invalid {} settings: {reason}", category.name())
            }
        }
    }
}

impl std::error::Error for ConfigError {}
