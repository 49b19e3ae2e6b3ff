use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::components::{ForceMoment, StateVector};
use crate::systems::physics::Evaluation;
use crate::utils::{Result, SimError};

macro_rules! output_channels {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Named scalar signals of a simulation step.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum OutputChannel {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl OutputChannel {
            pub const ALL: &'static [OutputChannel] = &[$(OutputChannel::$variant),+];

            /// Stable identifier of the channel.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(OutputChannel::$variant => $name,)+
                }
            }
        }

        impl FromStr for OutputChannel {
            type Err = SimError;

            fn from_str(name: &str) -> Result<Self> {
                match name {
                    $($name => Ok(OutputChannel::$variant),)+
                    _ => Err(SimError::UnknownChannel(name.to_string())),
                }
            }
        }
    };
}

output_channels! {
    X => "x",
    Y => "y",
    Z => "z",
    U => "u",
    V => "v",
    W => "w",
    Qw => "qw",
    Qx => "qx",
    Qy => "qy",
    Qz => "qz",
    P => "p",
    Q => "q",
    R => "r",
    Phi => "phi",
    Theta => "theta",
    Psi => "psi",
    Altitude => "altitude",
    Airspeed => "airspeed",
    Alpha => "alpha",
    Beta => "beta",
    FxAero => "Fx_aero",
    FyAero => "Fy_aero",
    FzAero => "Fz_aero",
    MxAero => "Mx_aero",
    MyAero => "My_aero",
    MzAero => "Mz_aero",
    FxProp => "Fx_prop",
    FyProp => "Fy_prop",
    FzProp => "Fz_prop",
    MxProp => "Mx_prop",
    MyProp => "My_prop",
    MzProp => "Mz_prop",
    FxGrav => "Fx_grav",
    FyGrav => "Fy_grav",
    FzGrav => "Fz_grav",
    Fx => "Fx",
    Fy => "Fy",
    Fz => "Fz",
    Mx => "Mx",
    My => "My",
    Mz => "Mz",
}

impl fmt::Display for OutputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of every output channel for one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimOutputs {
    values: [f64; CHANNEL_COUNT],
}

const CHANNEL_COUNT: usize = 41;

impl SimOutputs {
    pub fn from_evaluation(state: &StateVector, evaluation: &Evaluation) -> Self {
        use OutputChannel::*;

        let mut values = [0.0; CHANNEL_COUNT];
        let mut set = |channel: OutputChannel, value: f64| values[channel as usize] = value;

        let attitude = state
            .unit_attitude()
            .map_or(state.attitude, |q| q.into_inner());
        let euler = state.euler_angles();
        let air = &evaluation.air_data;
        let forces = &evaluation.forces;

        set(X, state.position.x);
        set(Y, state.position.y);
        set(Z, state.position.z);
        set(U, state.velocity.x);
        set(V, state.velocity.y);
        set(W, state.velocity.z);
        set(Qw, attitude.w);
        set(Qx, attitude.i);
        set(Qy, attitude.j);
        set(Qz, attitude.k);
        set(P, state.angular_velocity.x);
        set(Q, state.angular_velocity.y);
        set(R, state.angular_velocity.z);
        set(Phi, euler.x);
        set(Theta, euler.y);
        set(Psi, euler.z);
        set(Altitude, state.altitude());
        set(Airspeed, air.airspeed);
        set(Alpha, air.alpha);
        set(Beta, air.beta);

        let mut set_loads = |loads: &ForceMoment, channels: [OutputChannel; 6]| {
            let components = loads.force.iter().chain(loads.moment.iter());
            for (channel, value) in channels.into_iter().zip(components) {
                set(channel, *value);
            }
        };
        set_loads(&forces.aerodynamic, [FxAero, FyAero, FzAero, MxAero, MyAero, MzAero]);
        set_loads(&forces.propulsive, [FxProp, FyProp, FzProp, MxProp, MyProp, MzProp]);
        set_loads(&forces.total, [Fx, Fy, Fz, Mx, My, Mz]);

        let gravity = &forces.gravitational.force;
        set(FxGrav, gravity.x);
        set(FyGrav, gravity.y);
        set(FzGrav, gravity.z);

        Self { values }
    }

    pub fn get(&self, channel: OutputChannel) -> f64 {
        self.values[channel as usize]
    }

    pub fn get_by_name(&self, name: &str) -> Result<f64> {
        Ok(self.get(name.parse()?))
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        OutputChannel::ALL
            .iter()
            .map(|channel| (channel.as_str(), self.get(*channel)))
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_map())?)
    }
}
