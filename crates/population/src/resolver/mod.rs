mod base_defaults;
mod pack_resolver;
mod tests;

pub use base_defaults::base_default;
pub use pack_resolver::{DefaultChange, PackResolver, Resolution};
