use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Force and moment pair in body axes, moment about the cg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceMoment {
    pub force: Vector3<f64>,
    pub moment: Vector3<f64>,
}

impl ForceMoment {
    pub fn new(force: Vector3<f64>, moment: Vector3<f64>) -> Self {
        Self { force, moment }
    }

    pub fn zeros() -> Self {
        Self::default()
    }

    /// Pure force through the cg.
    pub fn force_only(force: Vector3<f64>) -> Self {
        Self {
            force,
            moment: Vector3::zeros(),
        }
    }
}

impl Add for ForceMoment {
    type Output = ForceMoment;

    fn add(self, rhs: ForceMoment) -> ForceMoment {
        ForceMoment::new(self.force + rhs.force, self.moment + rhs.moment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceCategory {
    Aerodynamic,
    Propulsive,
    Gravitational,
    Total,
}

/// Loads of one derivative evaluation, split by source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceBreakdown {
    pub aerodynamic: ForceMoment,
    pub propulsive: ForceMoment,
    pub gravitational: ForceMoment,
    pub total: ForceMoment,
}

impl ForceBreakdown {
    pub fn get(&self, category: ForceCategory) -> &ForceMoment {
        match category {
            ForceCategory::Aerodynamic => &self.aerodynamic,
            ForceCategory::Propulsive => &self.propulsive,
            ForceCategory::Gravitational => &self.gravitational,
            ForceCategory::Total => &self.total,
        }
    }
}
