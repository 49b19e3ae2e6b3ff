pub mod config;
pub mod geometry;
pub mod mass;
pub mod thruster;

pub use config::{AtmosphereConfig, InertiaConfig, ThrusterConfig, VehicleConfig};
pub use geometry::AeroReference;
pub use mass::{MassProperties, MassPropsLookup, TableMassModel};
pub use thruster::Thruster;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::{Result, SimError, GRAVITY, SEA_LEVEL_DENSITY, SEA_LEVEL_SPEED_OF_SOUND};

/// Ambient conditions held constant for a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    /// Air density (kg/m³)
    pub density: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Speed of sound, used to form Mach (m/s)
    pub speed_of_sound: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            density: SEA_LEVEL_DENSITY,
            gravity: GRAVITY,
            speed_of_sound: SEA_LEVEL_SPEED_OF_SOUND,
        }
    }
}

/// Validated, immutable description of a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleParameters {
    name: String,
    mass: f64,
    cg: Vector3<f64>,
    inertia: Matrix3<f64>,
    inertia_inv: Matrix3<f64>,
    reference: AeroReference,
    atmosphere: Atmosphere,
    thrusters: Vec<Thruster>,
}

const SYMMETRY_TOLERANCE: f64 = 1e-9;

impl VehicleParameters {
    pub fn new(
        name: impl Into<String>,
        mass_properties: MassProperties,
        reference: AeroReference,
        atmosphere: Atmosphere,
        thrusters: Vec<Thruster>,
    ) -> Result<Self> {
        let name = name.into();
        let MassProperties { mass, cg, inertia } = mass_properties;

        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "{}: mass must be positive, got {}",
                name, mass
            )));
        }
        if !cg.iter().all(|v| v.is_finite()) {
            return Err(SimError::InvalidConfig(format!("{}: non-finite cg", name)));
        }

        let inertia_inv = validate_inertia(&name, &inertia)?;

        if !reference.is_valid() {
            return Err(SimError::InvalidConfig(format!(
                "{}: reference area, span and chord must be positive",
                name
            )));
        }

        let Atmosphere {
            density,
            gravity,
            speed_of_sound,
        } = atmosphere;
        if !density.is_finite() || density <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "{}: density must be positive, got {}",
                name, density
            )));
        }
        if !gravity.is_finite() || !speed_of_sound.is_finite() || speed_of_sound <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "{}: invalid gravity or speed of sound",
                name
            )));
        }

        for thruster in &thrusters {
            if !thruster.time_constant.is_finite() || thruster.time_constant <= 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{}: thruster '{}' needs a positive time constant",
                    name, thruster.name
                )));
            }
            if !thruster.max_thrust.is_finite() || thruster.max_thrust < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{}: thruster '{}' has negative max thrust",
                    name, thruster.name
                )));
            }
            if !thruster.position.iter().all(|v| v.is_finite()) {
                return Err(SimError::InvalidConfig(format!(
                    "{}: thruster '{}' has a non-finite position",
                    name, thruster.name
                )));
            }
        }

        Ok(Self {
            name,
            mass,
            cg,
            inertia,
            inertia_inv,
            reference,
            atmosphere,
            thrusters,
        })
    }

    pub fn from_config(config: VehicleConfig) -> Result<Self> {
        config.build()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        VehicleConfig::from_yaml_str(yaml)?.build()
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        VehicleConfig::from_yaml_file(path)?.build()
    }

    /// Validated copy with new mass properties, e.g. from a [`MassPropsLookup`].
    pub fn with_mass_properties(&self, mass_properties: MassProperties) -> Result<Self> {
        Self::new(
            self.name.clone(),
            mass_properties,
            self.reference,
            self.atmosphere,
            self.thrusters.clone(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn cg(&self) -> &Vector3<f64> {
        &self.cg
    }

    pub fn inertia(&self) -> &Matrix3<f64> {
        &self.inertia
    }

    pub fn inertia_inv(&self) -> &Matrix3<f64> {
        &self.inertia_inv
    }

    pub fn mass_properties(&self) -> MassProperties {
        MassProperties::new(self.mass, self.cg, self.inertia)
    }

    pub fn reference(&self) -> &AeroReference {
        &self.reference
    }

    pub fn atmosphere(&self) -> &Atmosphere {
        &self.atmosphere
    }

    pub fn density(&self) -> f64 {
        self.atmosphere.density
    }

    pub fn gravity(&self) -> f64 {
        self.atmosphere.gravity
    }

    pub fn speed_of_sound(&self) -> f64 {
        self.atmosphere.speed_of_sound
    }

    pub fn thrusters(&self) -> &[Thruster] {
        &self.thrusters
    }

    pub fn thruster_index(&self, name: &str) -> Option<usize> {
        self.thrusters.iter().position(|t| t.name == name)
    }
}

/// Checks symmetry, invertibility and positive definiteness, returning the inverse.
fn validate_inertia(name: &str, inertia: &Matrix3<f64>) -> Result<Matrix3<f64>> {
    if !inertia.iter().all(|v| v.is_finite()) {
        return Err(SimError::InvalidConfig(format!("{}: non-finite inertia", name)));
    }

    let scale = inertia.amax().max(f64::MIN_POSITIVE);
    if (inertia - inertia.transpose()).amax() > SYMMETRY_TOLERANCE * scale {
        return Err(SimError::InvalidConfig(format!(
            "{}: inertia tensor is not symmetric",
            name
        )));
    }

    if inertia.determinant().abs() <= f64::EPSILON * scale.powi(3) {
        return Err(SimError::SingularInertia(format!(
            "{}: inertia tensor is singular",
            name
        )));
    }
    let inverse = inertia
        .try_inverse()
        .ok_or_else(|| SimError::SingularInertia(format!("{}: inertia tensor is singular", name)))?;

    if inertia.cholesky().is_none() {
        return Err(SimError::InvalidConfig(format!(
            "{}: inertia tensor is not positive definite",
            name
        )));
    }

    Ok(inverse)
}
