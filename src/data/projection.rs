use super::model::{CellValue, Record, Variable};

// ---------------------------------------------------------------------------
// Design-matrix projection onto the first declared variables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Scatter2d,
    Scatter3d,
}

/// Up to three columns of a design matrix, lined up for a scatter plot.
///
/// `x`, `y` and `z` always have one entry per matrix row. Axes without a
/// variable are zero-filled.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    axes: Vec<String>,
    pub x: Vec<CellValue>,
    pub y: Vec<CellValue>,
    pub z: Vec<CellValue>,
    pub mode: RenderMode,
}

/// Project `matrix` onto the first one to three `variables` that exist as
/// keys of its first row.
///
/// Returns `None` when there is nothing to draw: no rows, or none of the
/// declared variables appear in the matrix (e.g. categorical factors that a
/// Latin hypercube design leaves out).
pub fn project(matrix: &[Record], variables: &[Variable]) -> Option<Projection> {
    let first = matrix.first()?;

    let axes: Vec<String> = variables
        .iter()
        .filter(|v| first.contains_key(&v.name))
        .take(3)
        .map(|v| v.name.clone())
        .collect();
    if axes.is_empty() {
        return None;
    }

    let column = |idx: usize| -> Vec<CellValue> {
        match axes.get(idx) {
            Some(name) => matrix
                .iter()
                .map(|row| row.get(name).cloned().unwrap_or(CellValue::Empty))
                .collect(),
            None => vec![CellValue::Number(0.0); matrix.len()],
        }
    };

    let (x, y, z) = (column(0), column(1), column(2));
    let mode = if axes.len() == 3 {
        RenderMode::Scatter3d
    } else {
        RenderMode::Scatter2d
    };

    Some(Projection { axes, x, y, z, mode })
}

impl Projection {
    /// Names of the variables on x, y and z (as many as are present).
    pub fn axis_names(&self) -> &[String] {
        &self.axes
    }

    pub fn axis_name(&self, idx: usize) -> Option<&str> {
        self.axes.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Plot coordinates for x/y. Rows with a missing coordinate are skipped.
    pub fn points_2d(&self) -> Vec<[f64; 2]> {
        let x = axis_coordinates(&self.x);
        let y = axis_coordinates(&self.y);
        x.into_iter()
            .zip(y)
            .filter_map(|(x, y)| Some([x?, y?]))
            .collect()
    }

    /// Plot coordinates for x/y/z. Rows with a missing coordinate are skipped.
    pub fn points_3d(&self) -> Vec<[f64; 3]> {
        let x = axis_coordinates(&self.x);
        let y = axis_coordinates(&self.y);
        let z = axis_coordinates(&self.z);
        x.into_iter()
            .zip(y)
            .zip(z)
            .filter_map(|((x, y), z)| Some([x?, y?, z?]))
            .collect()
    }

    /// Category labels for an axis holding text, in first-seen order.
    /// Empty when the axis is purely numeric.
    pub fn categories(&self, idx: usize) -> Vec<String> {
        let values = match idx {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        };
        category_labels(values)
    }
}

fn category_labels(values: &[CellValue]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for v in values {
        if v.as_number().is_some() || v.is_empty() {
            continue;
        }
        let label = v.to_string();
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

/// Numbers stay numbers; any other non-empty value becomes the ordinal of
/// its category.
fn axis_coordinates(values: &[CellValue]) -> Vec<Option<f64>> {
    let labels = category_labels(values);
    values
        .iter()
        .map(|v| {
            if v.is_empty() {
                return None;
            }
            v.as_number().or_else(|| {
                let label = v.to_string();
                labels.iter().position(|l| *l == label).map(|i| i as f64)
            })
        })
        .collect()
}
