use std::f64::consts::TAU;

use crate::data::model::{Column, InputTable, is_blank};
use crate::error::VslError;

use super::params::SpiralParameters;

// ---------------------------------------------------------------------------
// Sampling helpers
// ---------------------------------------------------------------------------

/// `n` evenly spaced samples over `[start, stop]`, both ends included.
///
/// Samples are computed as `start + k·step` with the last one pinned to
/// `stop`, so the end point is exact regardless of rounding.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|k| start + k as f64 * step).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// Dense sample index of every label slot.
///
/// `slot_count` evenly spaced positions over `0..=total_points-1`, truncated
/// to integers. The first slot is always `0`; with two or more slots the last
/// one is always `total_points - 1`.
pub fn slot_indices(slot_count: usize, total_points: usize) -> Vec<usize> {
    if total_points == 0 {
        return Vec::new();
    }
    linspace(0.0, (total_points - 1) as f64, slot_count)
        .into_iter()
        .map(|v| (v as usize).min(total_points - 1))
        .collect()
}

// ---------------------------------------------------------------------------
// Baseline – parametrisation shared by every spiral
// ---------------------------------------------------------------------------

/// Angle, height and master radius profile over `total_points` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    pub theta: Vec<f64>,
    pub height: Vec<f64>,
    /// Ease-in radius `r_main(t)`, identical for all spirals.
    pub radius: Vec<f64>,
}

impl Baseline {
    pub fn new(params: &SpiralParameters) -> Self {
        let n = params.total_points();
        let theta = linspace(0.0, params.turns as f64 * TAU, n);
        let height = linspace(0.0, params.spiral_height, n);
        let span = params.top_radius - params.bottom_radius;
        let radius = linspace(0.0, 1.0, n)
            .into_iter()
            .map(|s| params.bottom_radius + span * s.powf(params.expansion_power))
            .collect();
        Baseline {
            theta,
            height,
            radius,
        }
    }

    pub fn len(&self) -> usize {
        self.theta.len()
    }
}

// ---------------------------------------------------------------------------
// SpiralCurve – one dense braided strand
// ---------------------------------------------------------------------------

/// The dense curve of spiral `index` together with the profiles it was
/// projected from.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralCurve {
    pub index: usize,
    /// Final angle `θ_i(t)`.
    pub angle: Vec<f64>,
    pub height: Vec<f64>,
    /// Final radius `r_i(t)` (master profile plus wobble).
    pub radius: Vec<f64>,
    pub points: Vec<[f64; 3]>,
}

impl SpiralCurve {
    pub fn new(baseline: &Baseline, params: &SpiralParameters, index: usize) -> Self {
        let i = index as f64;
        let angle_offset = i * (TAU / params.spiral_count as f64);
        let skew = i * params.spiral_skew;

        let mut angle = Vec::with_capacity(baseline.len());
        let mut radius = Vec::with_capacity(baseline.len());
        let mut points = Vec::with_capacity(baseline.len());

        for t in 0..baseline.len() {
            let theta = baseline.theta[t];
            let r_main = baseline.radius[t];
            // Doubled phase desynchronises the wobble from the spiral spacing.
            let wobble = params.wobble_amplitude
                * (theta + 2.0 * angle_offset).sin()
                * (r_main / params.top_radius);
            let r = r_main + wobble;
            let a = theta + skew;

            points.push([r * a.cos(), r * a.sin(), baseline.height[t]]);
            angle.push(a);
            radius.push(r);
        }

        SpiralCurve {
            index,
            angle,
            height: baseline.height.clone(),
            radius,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

// ---------------------------------------------------------------------------
// LabeledNode – a non-blank cell placed on its curve
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledNode {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Trimmed label text.
    pub text: String,
    /// Dense sample index the node sits on.
    pub sample: usize,
}

/// Place every non-blank cell of `column` on `curve`. Blank cells still
/// consume their slot.
pub fn place_labels(curve: &SpiralCurve, column: &Column) -> Vec<LabeledNode> {
    let slots = slot_indices(column.slot_count(), curve.len());

    column
        .cells
        .iter()
        .zip(slots)
        .filter(|(text, _)| !is_blank(text))
        .map(|(text, sample)| {
            let [x, y, z] = curve.points[sample];
            LabeledNode {
                x,
                y,
                z,
                text: text.trim().to_string(),
                sample,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Generator entry-point
// ---------------------------------------------------------------------------

/// One spiral's computed geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralLayout {
    pub curve: SpiralCurve,
    /// Number of slots offered by the feeding column (0 without a column).
    pub slot_count: usize,
    pub nodes: Vec<LabeledNode>,
}

/// Compute every spiral's curve and labelled nodes.
///
/// Column `i` of `table` feeds spiral `i`. Spirals without a column get no
/// slots; columns beyond `spiral_count` are ignored.
pub fn generate(params: &SpiralParameters, table: &InputTable) -> Result<Vec<SpiralLayout>, VslError> {
    params.validate()?;

    if table.width() > params.spiral_count {
        log::warn!(
            "Input has {} columns but only {} spirals; ignoring {:?}",
            table.width(),
            params.spiral_count,
            &table.column_names()[params.spiral_count..]
        );
    }

    let baseline = Baseline::new(params);

    let layouts = (0..params.spiral_count)
        .map(|i| {
            let curve = SpiralCurve::new(&baseline, params, i);
            let (slot_count, nodes) = match table.column(i) {
                Some(col) => (col.slot_count(), place_labels(&curve, col)),
                None => (0, Vec::new()),
            };
            log::debug!("spiral {i}: {slot_count} slots, {} labelled nodes", nodes.len());
            SpiralLayout {
                curve,
                slot_count,
                nodes,
            }
        })
        .collect();

    Ok(layouts)
}
