pub const GRAVITY: f64 = 9.81; // m/s^2
pub const SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m^3
pub const SEA_LEVEL_SPEED_OF_SOUND: f64 = 340.29; // m/s

/// Norm below which an attitude quaternion is treated as degenerate.
pub const MIN_QUATERNION_NORM: f64 = 1e-12;

/// Airspeed below which non-dimensional rates are forced to zero.
pub const MIN_AIRSPEED_THRESHOLD: f64 = 1e-6; // m/s
