use crate::components::{ForceBreakdown, ForceMoment};

/// Sum the per-source loads.
///
/// Every producer already references its moment to the cg, so the total is a
/// plain sum. Gravity acts at the cg and carries no moment.
pub fn aggregate_forces_moments(
    aerodynamic: ForceMoment,
    propulsive: ForceMoment,
    gravitational: ForceMoment,
) -> ForceBreakdown {
    let total = ForceMoment::new(
        aerodynamic.force + propulsive.force + gravitational.force,
        aerodynamic.moment + propulsive.moment,
    );

    ForceBreakdown {
        aerodynamic,
        propulsive,
        gravitational,
        total,
    }
}
