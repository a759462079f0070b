use crate::packs::SchoolPack;

use super::types::WorkplaceTiers;

/// Staff per tier: a base crew plus one per N students where N is set.
///
/// A school always employs someone: an all-zero result becomes one
/// uneducated worker.
pub fn school_workers(pack: &SchoolPack, students: u32) -> WorkplaceTiers {
    let mut tiers = pack.base_workers;
    for (tier, &per) in tiers.iter_mut().zip(&pack.students_per_extra_worker) {
        if per > 0 {
            *tier = tier.saturating_add(students / per);
        }
    }
    if tiers.iter().all(|&t| t == 0) {
        tiers[0] = 1;
    }
    WorkplaceTiers::from_array(tiers)
}

pub fn school_construction_cost(pack: &SchoolPack, students: u32) -> u64 {
    u64::from(pack.base_cost) + u64::from(pack.cost_per_student) * u64::from(students)
}

pub fn school_maintenance(pack: &SchoolPack, students: u32) -> u64 {
    u64::from(pack.base_maintenance) + u64::from(pack.maintenance_per_student) * u64::from(students)
}
