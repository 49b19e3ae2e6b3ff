use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::components::table::{LookupTable, OutOfBounds};
use crate::utils::{Result, SimError};

/// Mass, cg and inertia about the cg in body axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassProperties {
    /// Total mass (kg).
    pub mass: f64,
    /// Centre of gravity in body axes (m).
    pub cg: Vector3<f64>,
    /// Inertia tensor about the cg (kg·m²).
    pub inertia: Matrix3<f64>,
}

impl MassProperties {
    pub fn new(mass: f64, cg: Vector3<f64>, inertia: Matrix3<f64>) -> Self {
        Self { mass, cg, inertia }
    }

    /// Builds the tensor from moments and products of inertia.
    ///
    /// Products enter with a negative sign:
    /// `[[Ixx, -Ixy, -Ixz], [-Ixy, Iyy, -Iyz], [-Ixz, -Iyz, Izz]]`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_components(
        mass: f64,
        cg: Vector3<f64>,
        ixx: f64,
        iyy: f64,
        izz: f64,
        ixy: f64,
        ixz: f64,
        iyz: f64,
    ) -> Self {
        let inertia = Matrix3::new(
            ixx, -ixy, -ixz, //
            -ixy, iyy, -iyz, //
            -ixz, -iyz, izz,
        );
        Self::new(mass, cg, inertia)
    }
}

/// Source of mass properties as fuel is burned.
pub trait MassPropsLookup: Send + Sync {
    fn mass_properties(&self, fuel_level: f64) -> Result<MassProperties>;
}

impl MassPropsLookup for MassProperties {
    fn mass_properties(&self, _fuel_level: f64) -> Result<MassProperties> {
        Ok(*self)
    }
}

const MASS_COLUMNS: [&str; 10] = [
    "mass", "cg_x", "cg_y", "cg_z", "Ixx", "Iyy", "Izz", "Ixy", "Ixz", "Iyz",
];

/// Mass properties interpolated from a one-axis fuel-level table.
#[derive(Debug, Clone)]
pub struct TableMassModel {
    table: LookupTable,
    columns: [usize; 10],
    policy: OutOfBounds,
}

impl TableMassModel {
    pub fn new(table: LookupTable) -> Result<Self> {
        if table.axes().len() != 1 {
            return Err(SimError::Table(format!(
                "mass table needs exactly one fuel axis, found {}",
                table.axes().len()
            )));
        }

        let mut columns = [0; 10];
        for (slot, name) in columns.iter_mut().zip(MASS_COLUMNS) {
            *slot = table
                .column_index(name)
                .ok_or_else(|| SimError::Table(format!("mass table is missing column '{}'", name)))?;
        }

        Ok(Self {
            table,
            columns,
            policy: OutOfBounds::Clamp,
        })
    }

    pub fn with_policy(mut self, policy: OutOfBounds) -> Self {
        self.policy = policy;
        self
    }
}

impl MassPropsLookup for TableMassModel {
    fn mass_properties(&self, fuel_level: f64) -> Result<MassProperties> {
        let row = self.table.interpolate(&[fuel_level], self.policy)?;
        let [mass, cg_x, cg_y, cg_z, ixx, iyy, izz, ixy, ixz, iyz] = self.columns.map(|i| row[i]);

        Ok(MassProperties::from_components(
            mass,
            Vector3::new(cg_x, cg_y, cg_z),
            ixx,
            iyy,
            izz,
            ixy,
            ixz,
            iyz,
        ))
    }
}
