use std::io::Write;

use approx::assert_relative_eq;
use flyer_dynamics::{
    components::StabilityDerivatives, SimError, TrimSolverConfig, VehicleConfig,
    VehicleParameters,
};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use crate::common::{create_test_derivatives, create_test_uav, TEST_UAV_YAML};

#[test]
fn test_vehicle_from_yaml_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(TEST_UAV_YAML.as_bytes()).unwrap();

    let params = VehicleParameters::from_yaml_file(file.path()).unwrap();
    let expected = create_test_uav();

    assert_eq!(params.name(), "test_uav");
    assert_eq!(params.mass(), expected.mass());
    assert_eq!(params.inertia(), expected.inertia());
    // Product of inertia enters with a negative sign
    assert_eq!(params.inertia()[(0, 2)], -1.0);
    assert_relative_eq!(params.density(), 1.225);
    assert_eq!(params.thrusters().len(), 1);
}

#[test]
fn test_missing_vehicle_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = VehicleParameters::from_yaml_file(dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}

#[test]
fn test_singular_inertia_rejected() {
    let yaml = TEST_UAV_YAML.replace("iyy: 56.9", "iyy: 0.0");
    let err = VehicleConfig::from_yaml_str(&yaml)
        .and_then(VehicleConfig::build)
        .unwrap_err();
    assert!(matches!(err, SimError::SingularInertia(_)));

    let yaml = TEST_UAV_YAML.replace("mass: 128.0", "mass: -1.0");
    assert!(VehicleConfig::from_yaml_str(&yaml)
        .and_then(VehicleConfig::build)
        .is_err());
}

#[test]
fn test_derivatives_from_yaml_file() {
    let derivatives = create_test_derivatives();
    let yaml = serde_yaml::to_string(&derivatives).unwrap();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let loaded = StabilityDerivatives::from_yaml_file(file.path()).unwrap();
    assert_eq!(loaded, derivatives);
    assert!(loaded.validate().is_ok());

    // Families left out default to zero
    let partial = StabilityDerivatives::from_yaml_str("lift:\n  c_l_alpha: 4.5\n").unwrap();
    assert_eq!(partial.lift.c_l_alpha, 4.5);
    assert_eq!(partial.drag.c_d_0, 0.0);
}

#[test]
fn test_trim_config_from_yaml() {
    let yaml = "acceptance_tolerance: 1.0e-8\nmax_iterations: 500\nthrottle_thrusters: [pusher]\n";
    let config: TrimSolverConfig = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(config.acceptance_tolerance, 1e-8);
    assert_eq!(config.max_iterations, 500);
    assert_eq!(config.throttle_thrusters, Some(vec!["pusher".to_string()]));
    assert_eq!(config.bounds, TrimSolverConfig::default().bounds);
    assert!(config.use_gradient_refinement);
}
