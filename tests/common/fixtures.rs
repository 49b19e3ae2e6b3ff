use flyer_dynamics::components::aerodynamics::{
    DragCoefficients, LiftCoefficients, PitchCoefficients,
};
use flyer_dynamics::components::{StabilityDerivatives, VehicleConfig, VehicleParameters};

/// Fixed-wing test vehicle with a single pusher.
pub const TEST_UAV_YAML: &str = r#"
name: test_uav
mass: 128.0
cg: [-2.0, 0.0, 0.0]
inertia:
  ixx: 118.8
  iyy: 56.9
  izz: 172.0
  ixz: 1.0
reference:
  s_ref: 1.5
  b_ref: 4.0
  c_ref: 0.4
  r_ref: [-2.05, 0.0, 0.0]
thrusters:
  - name: pusher
    position: [-3.0, 0.0, 0.0]
    time_constant: 0.2
    max_thrust: 250.0
"#;

/// Same airframe with four lift rotors pointing up.
pub const TEST_VTOL_YAML: &str = r#"
name: test_vtol
mass: 128.0
cg: [-2.0, 0.0, 0.0]
inertia:
  ixx: 118.8
  iyy: 56.9
  izz: 172.0
  ixz: 1.0
reference:
  s_ref: 1.5
  b_ref: 4.0
  c_ref: 0.4
  r_ref: [-2.05, 0.0, 0.0]
thrusters:
  - name: pusher
    position: [-3.0, 0.0, 0.0]
    time_constant: 0.2
    max_thrust: 250.0
  - name: lift_front_left
    position: [-1.0, -1.0, 0.0]
    orientation: [0.0, 90.0, 0.0]
    time_constant: 0.05
    max_thrust: 400.0
  - name: lift_front_right
    position: [-1.0, 1.0, 0.0]
    orientation: [0.0, 90.0, 0.0]
    time_constant: 0.05
    max_thrust: 400.0
  - name: lift_rear_left
    position: [-3.0, -1.0, 0.0]
    orientation: [0.0, 90.0, 0.0]
    time_constant: 0.05
    max_thrust: 400.0
  - name: lift_rear_right
    position: [-3.0, 1.0, 0.0]
    orientation: [0.0, 90.0, 0.0]
    time_constant: 0.05
    max_thrust: 400.0
"#;

pub fn create_test_uav() -> VehicleParameters {
    VehicleConfig::from_yaml_str(TEST_UAV_YAML)
        .and_then(VehicleConfig::build)
        .expect("test_uav config is valid")
}

pub fn create_test_vtol() -> VehicleParameters {
    VehicleConfig::from_yaml_str(TEST_VTOL_YAML)
        .and_then(VehicleConfig::build)
        .expect("test_vtol config is valid")
}

/// Longitudinal derivatives matching the test airframe.
pub fn create_test_derivatives() -> StabilityDerivatives {
    StabilityDerivatives {
        drag: DragCoefficients {
            c_d_0: 0.03,
            c_d_alpha: 0.05,
            c_d_alpha2: 0.8,
            ..Default::default()
        },
        lift: LiftCoefficients {
            c_l_0: 0.3,
            c_l_alpha: 5.0,
            c_l_deltae: 0.3,
            ..Default::default()
        },
        pitch: PitchCoefficients {
            c_m_0: 0.12,
            c_m_alpha: -0.6,
            c_m_q: -8.0,
            c_m_deltae: -1.0,
        },
        ..Default::default()
    }
}
