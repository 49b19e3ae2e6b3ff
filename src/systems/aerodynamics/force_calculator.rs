use nalgebra::Vector3;

use super::air_data::AirData;
use crate::components::{AeroLookup, AeroQuery, ControlSurfaces, ForceMoment, VehicleParameters};
use crate::utils::{moment_transfer, Result, MIN_AIRSPEED_THRESHOLD};

/// Non-dimensional body rates `(b p, c q, b r) / 2V`, zero at rest.
pub fn nondimensional_rates(
    angular_velocity: &Vector3<f64>,
    airspeed: f64,
    span: f64,
    chord: f64,
) -> Vector3<f64> {
    if airspeed <= MIN_AIRSPEED_THRESHOLD {
        return Vector3::zeros();
    }
    let scale = 0.5 / airspeed;
    Vector3::new(
        span * angular_velocity.x * scale,
        chord * angular_velocity.y * scale,
        span * angular_velocity.z * scale,
    )
}

/// Calculates aerodynamic forces and moments in the body frame about the cg.
///
/// Coefficients from `lookup` are dimensionalised with the dynamic pressure
/// and reference geometry, then the moment is moved from the aerodynamic
/// reference point to the cg. NaN coefficients contribute nothing.
pub fn aerodynamic_forces_moments(
    air_data: &AirData,
    angular_velocity: &Vector3<f64>,
    surfaces: &ControlSurfaces,
    params: &VehicleParameters,
    lookup: &dyn AeroLookup,
) -> Result<ForceMoment> {
    let reference = params.reference();

    let query = AeroQuery {
        alpha: air_data.alpha,
        beta: air_data.beta,
        mach: air_data.mach(params.speed_of_sound()),
        surfaces: *surfaces,
        rates_hat: nondimensional_rates(
            angular_velocity,
            air_data.airspeed,
            reference.b_ref,
            reference.c_ref,
        ),
    };
    let coeffs = lookup.coefficients(&query)?.sanitized();

    let qs = air_data.dynamic_pressure(params.density()) * reference.s_ref;
    let force = coeffs.force * qs;
    let moment_ref = Vector3::new(
        qs * reference.b_ref * coeffs.moment.x,
        qs * reference.c_ref * coeffs.moment.y,
        qs * reference.b_ref * coeffs.moment.z,
    );

    Ok(ForceMoment::new(
        force,
        moment_transfer(&moment_ref, &force, &reference.r_ref, params.cg()),
    ))
}
