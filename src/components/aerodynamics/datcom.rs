use nalgebra::Vector3;

use super::{AeroCoefficients, AeroLookup, AeroQuery};
use crate::components::table::{LookupTable, OutOfBounds};
use crate::utils::{rad_to_deg, Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowAxis {
    Mach,
    Alpha,
    Beta,
    Elevator,
    Aileron,
}

impl FlowAxis {
    fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mach" => Some(Self::Mach),
            "alpha" => Some(Self::Alpha),
            "beta" => Some(Self::Beta),
            "elevator" | "de" => Some(Self::Elevator),
            "aileron" | "da" => Some(Self::Aileron),
            _ => None,
        }
    }
}

/// Coefficients from a DATCOM-style table.
///
/// Axial and normal force, pitching moment and the lateral sideslip
/// derivatives are mapped into body axes:
/// `CX = -CA`, `CZ = -CN`, `CY = CYB beta`, `Cl = CLB beta`, `Cm = CM`,
/// `Cn = CNB beta`. Missing lateral columns read as zero.
#[derive(Debug, Clone)]
pub struct DatcomTableModel {
    table: LookupTable,
    axes: Vec<FlowAxis>,
    ca: usize,
    cn: usize,
    cm: usize,
    cyb: Option<usize>,
    clb: Option<usize>,
    cnb: Option<usize>,
    policy: OutOfBounds,
    angles_in_degrees: bool,
}

impl DatcomTableModel {
    pub fn new(table: LookupTable) -> Result<Self> {
        let axes = table
            .axes()
            .iter()
            .map(|axis| {
                FlowAxis::parse(&axis.name).ok_or_else(|| {
                    SimError::Table(format!("unsupported aero table axis '{}'", axis.name))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let required = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| SimError::Table(format!("aero table is missing column '{}'", name)))
        };
        let ca = required("CA")?;
        let cn = required("CN")?;
        let cm = required("CM")?;

        Ok(Self {
            cyb: table.column_index("CYB"),
            clb: table.column_index("CLB"),
            cnb: table.column_index("CNB"),
            table,
            axes,
            ca,
            cn,
            cm,
            policy: OutOfBounds::Clamp,
            angles_in_degrees: false,
        })
    }

    pub fn with_policy(mut self, policy: OutOfBounds) -> Self {
        self.policy = policy;
        self
    }

    /// Treat angle axes as degrees; queries stay in radians.
    pub fn with_angles_in_degrees(mut self) -> Self {
        self.angles_in_degrees = true;
        self
    }

    fn angle(&self, radians: f64) -> f64 {
        if self.angles_in_degrees {
            rad_to_deg(radians)
        } else {
            radians
        }
    }

    fn point(&self, query: &AeroQuery) -> Vec<f64> {
        self.axes
            .iter()
            .map(|axis| match axis {
                FlowAxis::Mach => query.mach,
                FlowAxis::Alpha => self.angle(query.alpha),
                FlowAxis::Beta => self.angle(query.beta),
                FlowAxis::Elevator => self.angle(query.surfaces.elevator),
                FlowAxis::Aileron => self.angle(query.surfaces.aileron),
            })
            .collect()
    }
}

impl AeroLookup for DatcomTableModel {
    fn coefficients(&self, query: &AeroQuery) -> Result<AeroCoefficients> {
        let row = self.table.interpolate(&self.point(query), self.policy)?;
        let lateral = |column: Option<usize>| column.map_or(0.0, |i| row[i]);

        // Sideslip derivatives are tabulated per unit of the table's angle
        let beta = self.angle(query.beta);

        Ok(AeroCoefficients::new(
            Vector3::new(-row[self.ca], lateral(self.cyb) * beta, -row[self.cn]),
            Vector3::new(
                lateral(self.clb) * beta,
                row[self.cm],
                lateral(self.cnb) * beta,
            ),
        ))
    }
}
