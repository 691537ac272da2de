use serde::{Deserialize, Serialize};

use crate::color::{DEFAULT_PALETTE, Palette};
use crate::error::VslError;

// ---------------------------------------------------------------------------
// SpiralParameters – geometry + styling constants
// ---------------------------------------------------------------------------

/// Geometry and styling of the spiral bundle.
///
/// The defaults are the production constants; `vsl.json` may override any
/// subset of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralParameters {
    /// Number of interleaved spirals.
    pub spiral_count: usize,
    /// Dense samples per full turn.
    pub points_per_turn: usize,
    /// Full turns per spiral.
    pub turns: usize,
    /// Height reached at the last sample.
    pub spiral_height: f64,
    pub bottom_radius: f64,
    pub top_radius: f64,
    /// Exponent of the ease-in radial growth (`> 1` accelerates near the top).
    pub expansion_power: f64,
    /// Amplitude of the sinusoidal radial wobble that braids the spirals.
    pub wobble_amplitude: f64,
    /// Extra rotation per spiral index, in radians.
    pub spiral_skew: f64,
    pub line_width: f32,
    pub marker_size: f32,
    /// Hex colours, assigned to spirals cyclically.
    pub palette: Vec<String>,
}

impl Default for SpiralParameters {
    fn default() -> Self {
        Self {
            spiral_count: 6,
            points_per_turn: 120,
            turns: 7,
            spiral_height: 40.0,
            bottom_radius: 1.5,
            top_radius: 14.0,
            expansion_power: 2.5,
            wobble_amplitude: 0.3,
            spiral_skew: 0.3,
            line_width: 4.0,
            marker_size: 8.0,
            palette: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Upper bound on dense samples across all spirals (`spiral_count × turns ×
/// points_per_turn`).
pub const MAX_SAMPLES: usize = 10_000_000;

impl SpiralParameters {
    /// Dense samples per spiral: `turns × points_per_turn`. Saturates; only
    /// meaningful once [`validate`](Self::validate) has passed.
    pub fn total_points(&self) -> usize {
        self.turns.saturating_mul(self.points_per_turn)
    }

    /// Reject any value the layout cannot work with. Runs before any geometry
    /// is computed.
    pub fn validate(&self) -> Result<(), VslError> {
        if self.spiral_count == 0 {
            return Err(VslError::config("spiral_count must be > 0"));
        }
        if self.points_per_turn == 0 {
            return Err(VslError::config("points_per_turn must be > 0"));
        }
        if self.turns == 0 {
            return Err(VslError::config("turns must be > 0"));
        }
        let samples = self
            .turns
            .checked_mul(self.points_per_turn)
            .and_then(|n| n.checked_mul(self.spiral_count));
        match samples {
            Some(n) if n <= MAX_SAMPLES => {}
            _ => {
                return Err(VslError::config(format!(
                    "spiral_count × turns × points_per_turn must be <= {MAX_SAMPLES}"
                )));
            }
        }
        ensure_finite("spiral_height", self.spiral_height)?;
        ensure_finite("wobble_amplitude", self.wobble_amplitude)?;
        ensure_finite("spiral_skew", self.spiral_skew)?;
        ensure_finite("bottom_radius", self.bottom_radius)?;
        ensure_finite("top_radius", self.top_radius)?;
        if self.bottom_radius < 0.0 {
            return Err(VslError::config("bottom_radius must be >= 0"));
        }
        // r_main / top_radius scales the wobble.
        if self.top_radius <= 0.0 {
            return Err(VslError::config("top_radius must be > 0"));
        }
        if !(self.expansion_power.is_finite() && self.expansion_power > 0.0) {
            return Err(VslError::config("expansion_power must be a positive number"));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(VslError::config("line_width must be > 0"));
        }
        if !(self.marker_size.is_finite() && self.marker_size > 0.0) {
            return Err(VslError::config("marker_size must be > 0"));
        }
        Palette::parse(&self.palette)?;
        Ok(())
    }
}

fn ensure_finite(name: &str, value: f64) -> Result<(), VslError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(VslError::config(format!("{name} must be a finite number, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = SpiralParameters::default();
        p.validate().unwrap();
        assert_eq!(p.total_points(), 840);
    }

    #[test]
    fn zero_counts_are_rejected() {
        let tweaks: [fn(&mut SpiralParameters); 3] = [
            |p| p.spiral_count = 0,
            |p| p.points_per_turn = 0,
            |p| p.turns = 0,
        ];
        for tweak in tweaks {
            let mut p = SpiralParameters::default();
            tweak(&mut p);
            assert!(matches!(p.validate(), Err(VslError::Configuration(_))));
        }
    }

    #[test]
    fn oversized_sample_counts_are_rejected() {
        let p: SpiralParameters =
            serde_json::from_str(r#"{ "turns": 4294967296, "points_per_turn": 4294967296 }"#).unwrap();
        assert!(matches!(p.validate(), Err(VslError::Configuration(_))));
        assert_eq!(p.total_points(), usize::MAX);

        let p = SpiralParameters {
            spiral_count: 1,
            turns: 1,
            points_per_turn: MAX_SAMPLES + 1,
            ..SpiralParameters::default()
        };
        assert!(p.validate().is_err());

        let p = SpiralParameters {
            spiral_count: 10,
            turns: 1,
            points_per_turn: MAX_SAMPLES / 5,
            ..SpiralParameters::default()
        };
        assert!(p.validate().is_err());

        let p = SpiralParameters {
            spiral_count: 1,
            turns: 1,
            points_per_turn: MAX_SAMPLES,
            ..SpiralParameters::default()
        };
        p.validate().unwrap();
    }

    #[test]
    fn non_finite_and_non_positive_values_are_rejected() {
        let mut p = SpiralParameters::default();
        p.spiral_height = f64::NAN;
        assert!(p.validate().is_err());

        let mut p = SpiralParameters::default();
        p.top_radius = 0.0;
        assert!(p.validate().is_err());

        let mut p = SpiralParameters::default();
        p.expansion_power = 0.0;
        assert!(p.validate().is_err());

        let mut p = SpiralParameters::default();
        p.marker_size = -1.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn bad_palette_is_rejected() {
        let mut p = SpiralParameters::default();
        p.palette = vec!["not-a-colour".into()];
        assert!(matches!(p.validate(), Err(VslError::Configuration(_))));

        p.palette.clear();
        assert!(p.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p: SpiralParameters = serde_json::from_str(r#"{ "spiral_count": 3 }"#).unwrap();
        assert_eq!(p.spiral_count, 3);
        assert_eq!(p.points_per_turn, 120);
        assert_eq!(p.palette.len(), 6);
    }
}
