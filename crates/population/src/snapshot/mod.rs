mod tests;
mod types;

pub use types::{
    ConfigurationSnapshot, DefaultRecord, KnobsRecord, LoadReport, OverrideRecord, PinRecord,
};
