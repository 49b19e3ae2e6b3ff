use serde::{Deserialize, Serialize};

use crate::utils::{Result, SimError};

/// Behaviour of a lookup outside the grid domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfBounds {
    /// Clamp each coordinate to the nearest boundary of its axis.
    #[default]
    Clamp,
    /// Reject the query with [`SimError::OutOfRange`].
    Error,
}

/// A named, strictly ascending grid axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub name: String,
    pub values: Vec<f64>,
}

/// A named dependent column aligned to the Cartesian grid of the axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Serialisable description of a lookup table.
///
/// Column values are laid out row-major over the axes, the last axis varying
/// fastest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub axes: Vec<Axis>,
    pub columns: Vec<Column>,
}

/// Multilinear interpolation table over N sorted axes.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    axes: Vec<Axis>,
    columns: Vec<Column>,
    strides: Vec<usize>,
}

impl LookupTable {
    pub fn new(axes: Vec<Axis>, columns: Vec<Column>) -> Result<Self> {
        if axes.is_empty() {
            return Err(SimError::Table("table needs at least one axis".into()));
        }

        for axis in &axes {
            if axis.values.is_empty() {
                return Err(SimError::Table(format!("axis '{}' is empty", axis.name)));
            }
            if axis.values.iter().any(|v| !v.is_finite()) {
                return Err(SimError::Table(format!(
                    "axis '{}' contains non-finite values",
                    axis.name
                )));
            }
            if axis.values.windows(2).any(|w| w[1] <= w[0]) {
                return Err(SimError::Table(format!(
                    "axis '{}' must be strictly ascending",
                    axis.name
                )));
            }
        }

        let grid_size: usize = axes.iter().map(|a| a.values.len()).product();
        for column in &columns {
            if column.values.len() != grid_size {
                return Err(SimError::Table(format!(
                    "column '{}' has {} values, grid has {} nodes",
                    column.name,
                    column.values.len(),
                    grid_size
                )));
            }
        }

        // Row-major strides, last axis fastest
        let mut strides = vec![1; axes.len()];
        for i in (0..axes.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * axes[i + 1].values.len();
        }

        Ok(Self {
            axes,
            columns,
            strides,
        })
    }

    pub fn from_data(data: TableData) -> Result<Self> {
        Self::new(data.axes, data.columns)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let data: TableData = serde_yaml::from_str(yaml)?;
        Self::from_data(data)
    }

    /// Build a table from the rows of a flat table whose first columns are the
    /// independent variables.
    ///
    /// Grid axes are the sorted unique values of each independent column. Rows
    /// may come in any order but must cover every grid node exactly once.
    pub fn from_rows(axis_names: &[&str], column_names: &[&str], rows: &[Vec<f64>]) -> Result<Self> {
        let n_axes = axis_names.len();
        let width = n_axes + column_names.len();

        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(SimError::Table(format!(
                "row has {} values, expected {}",
                row.len(),
                width
            )));
        }

        let mut axes = Vec::with_capacity(n_axes);
        for (i, name) in axis_names.iter().enumerate() {
            let mut values: Vec<f64> = rows.iter().map(|row| row[i]).collect();
            if values.iter().any(|v| !v.is_finite()) {
                return Err(SimError::Table(format!(
                    "independent column '{}' contains non-finite values",
                    name
                )));
            }
            values.sort_by(|a, b| a.total_cmp(b));
            values.dedup();
            axes.push(Axis {
                name: name.to_string(),
                values,
            });
        }

        let grid_size: usize = axes.iter().map(|a| a.values.len()).product();
        let mut strides = vec![1; n_axes];
        for i in (0..n_axes.saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * axes[i + 1].values.len();
        }

        let mut columns: Vec<Column> = column_names
            .iter()
            .map(|name| Column {
                name: name.to_string(),
                values: vec![f64::NAN; grid_size],
            })
            .collect();
        let mut filled = vec![false; grid_size];

        for row in rows {
            let mut offset = 0;
            for (i, axis) in axes.iter().enumerate() {
                let index = axis
                    .values
                    .binary_search_by(|v| v.total_cmp(&row[i]))
                    .map_err(|_| SimError::Table("row value missing from its axis".into()))?;
                offset += index * strides[i];
            }
            if filled[offset] {
                return Err(SimError::Table(format!(
                    "duplicate grid node {:?}",
                    &row[..n_axes]
                )));
            }
            filled[offset] = true;
            for (column, value) in columns.iter_mut().zip(&row[n_axes..]) {
                column.values[offset] = *value;
            }
        }

        if let Some(missing) = filled.iter().position(|f| !f) {
            return Err(SimError::Table(format!(
                "rows do not cover the grid, node {} is missing",
                missing
            )));
        }

        Self::new(axes, columns)
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn axis_index(&self, name: &str) -> Option<usize> {
        self.axes.iter().position(|a| a.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Interpolate every dependent column at `point`.
    pub fn interpolate(&self, point: &[f64], policy: OutOfBounds) -> Result<Vec<f64>> {
        let cell = self.locate(point, policy)?;
        Ok(self
            .columns
            .iter()
            .map(|column| self.blend(&column.values, &cell))
            .collect())
    }

    /// Interpolate a single named column at `point`.
    pub fn interpolate_column(&self, name: &str, point: &[f64], policy: OutOfBounds) -> Result<f64> {
        let index = self
            .column_index(name)
            .ok_or_else(|| SimError::Table(format!("no column named '{}'", name)))?;
        let cell = self.locate(point, policy)?;
        Ok(self.blend(&self.columns[index].values, &cell))
    }

    /// Lower node index and fractional position along every axis.
    fn locate(&self, point: &[f64], policy: OutOfBounds) -> Result<Vec<(usize, f64)>> {
        if point.len() != self.axes.len() {
            return Err(SimError::Table(format!(
                "query has {} coordinates, table has {} axes",
                point.len(),
                self.axes.len()
            )));
        }

        let mut cell = Vec::with_capacity(point.len());
        for (axis, &value) in self.axes.iter().zip(point) {
            if value.is_nan() {
                return Err(SimError::Table(format!("NaN query on axis '{}'", axis.name)));
            }

            let values = &axis.values;
            let min = values[0];
            let max = values[values.len() - 1];

            let x = if value < min || value > max {
                match policy {
                    OutOfBounds::Clamp => value.clamp(min, max),
                    OutOfBounds::Error => {
                        return Err(SimError::OutOfRange {
                            axis: axis.name.clone(),
                            value,
                            min,
                            max,
                        })
                    }
                }
            } else {
                value
            };

            if values.len() == 1 {
                cell.push((0, 0.0));
                continue;
            }

            let upper = values.partition_point(|v| *v <= x).clamp(1, values.len() - 1);
            let lower = upper - 1;
            let t = (x - values[lower]) / (values[upper] - values[lower]);
            cell.push((lower, t));
        }

        Ok(cell)
    }

    fn blend(&self, values: &[f64], cell: &[(usize, f64)]) -> f64 {
        let mut result = 0.0;
        for corner in 0..(1usize << cell.len()) {
            let mut weight = 1.0;
            let mut offset = 0;
            for (i, &(lower, t)) in cell.iter().enumerate() {
                let upper = corner & (1 << i) != 0;
                weight *= if upper { t } else { 1.0 - t };
                offset += (lower + upper as usize) * self.strides[i];
            }
            // Zero-weight corners are skipped so grid nodes come back exact
            if weight != 0.0 {
                result += weight * values[offset];
            }
        }
        result
    }
}
