mod calculations;
mod legacy;
mod school;
mod tests;
mod types;

pub use calculations::{
    compress_visitors, compute_unit_count, goods_demand, split_workplaces, unit_breakdown,
    visitor_demand,
};
pub use legacy::legacy_unit_count;
pub use school::{school_construction_cost, school_maintenance, school_workers};
pub use types::{UnitBreakdown, WorkplaceTiers};
