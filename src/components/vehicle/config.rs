use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use super::geometry::zero_vector;
use super::{AeroReference, Atmosphere, MassProperties, Thruster, VehicleParameters};
use crate::utils::{GRAVITY, Result, SEA_LEVEL_DENSITY, SEA_LEVEL_SPEED_OF_SOUND};

/// Moments and products of inertia about the cg (kg·m²).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertiaConfig {
    pub ixx: f64,
    pub iyy: f64,
    pub izz: f64,
    #[serde(default)]
    pub ixy: f64,
    #[serde(default)]
    pub ixz: f64,
    #[serde(default)]
    pub iyz: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereConfig {
    #[serde(default = "default_density")]
    pub density: f64,
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default = "default_speed_of_sound")]
    pub speed_of_sound: f64,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
            gravity: default_gravity(),
            speed_of_sound: default_speed_of_sound(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrusterConfig {
    pub name: String,
    pub position: Vector3<f64>,
    /// Thrust line roll, pitch, yaw (deg)
    #[serde(default = "zero_vector")]
    pub orientation: Vector3<f64>,
    pub time_constant: f64,
    pub max_thrust: f64,
}

/// Raw vehicle description as read from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Vehicle identification
    pub name: String,

    /// Mass properties
    pub mass: f64,
    #[serde(default = "zero_vector")]
    pub cg: Vector3<f64>,
    pub inertia: InertiaConfig,

    /// Geometry
    pub reference: AeroReference,

    #[serde(default)]
    pub atmosphere: AtmosphereConfig,

    #[serde(default)]
    pub thrusters: Vec<ThrusterConfig>,
}

impl VehicleConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading vehicle config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn mass_properties(&self) -> MassProperties {
        let InertiaConfig {
            ixx,
            iyy,
            izz,
            ixy,
            ixz,
            iyz,
        } = self.inertia;
        MassProperties::from_components(self.mass, self.cg, ixx, iyy, izz, ixy, ixz, iyz)
    }

    /// Convert into validated runtime parameters.
    pub fn build(self) -> Result<VehicleParameters> {
        let mass_properties = self.mass_properties();
        let atmosphere = Atmosphere {
            density: self.atmosphere.density,
            gravity: self.atmosphere.gravity,
            speed_of_sound: self.atmosphere.speed_of_sound,
        };
        let thrusters = self
            .thrusters
            .into_iter()
            .map(|t| {
                Thruster::from_orientation_deg(
                    t.name,
                    t.position,
                    t.orientation,
                    t.time_constant,
                    t.max_thrust,
                )
            })
            .collect::<Vec<_>>();

        let params = VehicleParameters::new(
            self.name,
            mass_properties,
            self.reference,
            atmosphere,
            thrusters,
        )?;

        info!(
            "Loaded vehicle '{}': mass {:.2} kg, {} thrusters",
            params.name(),
            params.mass(),
            params.thrusters().len()
        );
        Ok(params)
    }
}

fn default_density() -> f64 {
    SEA_LEVEL_DENSITY
}

fn default_gravity() -> f64 {
    GRAVITY
}

fn default_speed_of_sound() -> f64 {
    SEA_LEVEL_SPEED_OF_SOUND
}
