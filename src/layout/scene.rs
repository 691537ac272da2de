use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

use crate::color::Palette;
use crate::data::model::InputTable;
use crate::error::VslError;

use super::params::SpiralParameters;
use super::spiral::{self, LabeledNode};

// ---------------------------------------------------------------------------
// Scene-level display options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

/// How the render sink should present the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    pub show_axes: bool,
    pub show_legend: bool,
    /// Camera position relative to the scene centre, in normalised units.
    pub camera_eye: [f64; 3],
    /// Relative extent of the x/y/z axes after normalisation.
    pub aspect_ratio: [f64; 3],
    pub theme: Theme,
    /// Pixel size of the plot area.
    pub width: f32,
    pub height: f32,
    /// Use the whole available width instead of `width`.
    pub full_width: bool,
    /// Outer margin in pixels.
    pub margin: f32,
    pub label_size: f32,
    pub label_color: [u8; 3],
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            show_axes: false,
            show_legend: false,
            camera_eye: [1.2, 1.2, 0.3],
            aspect_ratio: [1.0, 1.0, 1.0],
            theme: Theme::Dark,
            width: 900.0,
            height: 900.0,
            full_width: true,
            margin: 10.0,
            label_size: 12.0,
            label_color: [255, 255, 255],
        }
    }
}

impl SceneOptions {
    pub fn validate(&self) -> Result<(), VslError> {
        if !(self.width.is_finite() && self.width > 0.0 && self.height.is_finite() && self.height > 0.0) {
            return Err(VslError::config("scene width and height must be > 0"));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(VslError::config("scene margin must be >= 0"));
        }
        if self.camera_eye.iter().any(|c| !c.is_finite())
            || self.camera_eye.iter().all(|c| *c == 0.0)
        {
            return Err(VslError::config("camera_eye must be finite and away from the origin"));
        }
        if self.aspect_ratio.iter().any(|a| !(a.is_finite() && *a > 0.0)) {
            return Err(VslError::config("aspect_ratio components must be > 0"));
        }
        if !(self.label_size.is_finite() && self.label_size > 0.0) {
            return Err(VslError::config("label_size must be > 0"));
        }
        Ok(())
    }

    pub fn label_color32(&self) -> Color32 {
        let [r, g, b] = self.label_color;
        Color32::from_rgb(r, g, b)
    }
}

// ---------------------------------------------------------------------------
// Artifacts
// ---------------------------------------------------------------------------

/// Dense strand of one spiral. Carries no text.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub spiral: usize,
    pub color: Color32,
    pub width: f32,
    pub points: Vec<[f64; 3]>,
}

/// Labelled markers of one spiral. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPoints {
    pub spiral: usize,
    pub color: Color32,
    pub marker_size: f32,
    pub nodes: Vec<LabeledNode>,
    /// Emphasised copy of each label shown on hover.
    pub hover_text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Polyline(Polyline),
    LabeledPoints(LabeledPoints),
}

impl Artifact {
    /// Every 3D position this artifact draws.
    pub fn positions(&self) -> Box<dyn Iterator<Item = [f64; 3]> + '_> {
        match self {
            Artifact::Polyline(line) => Box::new(line.points.iter().copied()),
            Artifact::LabeledPoints(pts) => Box::new(pts.nodes.iter().map(|n| [n.x, n.y, n.z])),
        }
    }

    pub fn spiral(&self) -> usize {
        match self {
            Artifact::Polyline(line) => line.spiral,
            Artifact::LabeledPoints(pts) => pts.spiral,
        }
    }
}

/// Hover form of a label.
pub fn emphasize(text: &str) -> String {
    format!("【{text}】")
}

// ---------------------------------------------------------------------------
// Scene – the full ordered artifact list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub artifacts: Vec<Artifact>,
    pub options: SceneOptions,
}

impl Scene {
    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.artifacts.iter().filter_map(|a| match a {
            Artifact::Polyline(line) => Some(line),
            Artifact::LabeledPoints(_) => None,
        })
    }

    pub fn labeled_points(&self) -> impl Iterator<Item = &LabeledPoints> {
        self.artifacts.iter().filter_map(|a| match a {
            Artifact::LabeledPoints(pts) => Some(pts),
            Artifact::Polyline(_) => None,
        })
    }

    pub fn node_count(&self) -> usize {
        self.labeled_points().map(|p| p.nodes.len()).sum()
    }
}

/// Run the layout and collect its output as an ordered artifact list:
/// per spiral, the polyline, then its labelled points when any exist.
pub fn build_scene(
    params: &SpiralParameters,
    options: SceneOptions,
    table: &InputTable,
) -> Result<Scene, VslError> {
    options.validate()?;
    let palette = Palette::parse(&params.palette)?;
    if params.spiral_count > palette.len() {
        log::debug!(
            "{} colours for {} spirals; palette wraps",
            palette.len(),
            params.spiral_count
        );
    }
    let layouts = spiral::generate(params, table)?;

    let mut artifacts = Vec::with_capacity(layouts.len() * 2);
    for layout in layouts {
        let index = layout.curve.index;
        let color = palette.color_for(index);

        artifacts.push(Artifact::Polyline(Polyline {
            spiral: index,
            color,
            width: params.line_width,
            points: layout.curve.points,
        }));

        if !layout.nodes.is_empty() {
            let hover_text = layout.nodes.iter().map(|n| emphasize(&n.text)).collect();
            artifacts.push(Artifact::LabeledPoints(LabeledPoints {
                spiral: index,
                color,
                marker_size: params.marker_size,
                nodes: layout.nodes,
                hover_text,
            }));
        }
    }

    Ok(Scene { artifacts, options })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn column(cells: &[&str]) -> Column {
        Column::new("c", cells.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn blank_column_emits_polyline_only() {
        let params = SpiralParameters {
            spiral_count: 2,
            ..SpiralParameters::default()
        };
        let table = InputTable::from_columns(vec![column(&["A", ""]), column(&["", "  "])]);
        let scene = build_scene(&params, SceneOptions::default(), &table).unwrap();

        assert_eq!(scene.polylines().count(), 2);
        let labeled: Vec<_> = scene.labeled_points().collect();
        assert_eq!(labeled.len(), 1);
        assert_eq!(labeled[0].spiral, 0);
        assert!(scene.polylines().all(|p| p.points.len() == 840));
    }

    #[test]
    fn artifacts_are_ordered_by_spiral() {
        let params = SpiralParameters::default();
        let table = InputTable::from_columns(
            (0..6).map(|i| column(&[format!("L{i}").as_str()])).collect(),
        );
        let scene = build_scene(&params, SceneOptions::default(), &table).unwrap();
        assert_eq!(scene.artifacts.len(), 12);
        for (k, artifact) in scene.artifacts.iter().enumerate() {
            assert_eq!(artifact.spiral(), k / 2);
            assert_eq!(matches!(artifact, Artifact::Polyline(_)), k % 2 == 0);
        }
        assert_eq!(scene.node_count(), 6);
    }

    #[test]
    fn hover_text_emphasises_labels() {
        let params = SpiralParameters::default();
        let table = InputTable::from_columns(vec![column(&[" 發音 ", "語法"])]);
        let scene = build_scene(&params, SceneOptions::default(), &table).unwrap();
        let pts = scene.labeled_points().next().unwrap();
        assert_eq!(pts.hover_text, vec!["【發音】", "【語法】"]);
        assert_eq!(pts.nodes[0].text, "發音");
    }

    #[test]
    fn palette_wraps_for_many_spirals() {
        let params = SpiralParameters {
            spiral_count: 8,
            ..SpiralParameters::default()
        };
        let scene = build_scene(&params, SceneOptions::default(), &InputTable::default()).unwrap();
        let colors: Vec<Color32> = scene.polylines().map(|p| p.color).collect();
        assert_eq!(colors.len(), 8);
        assert_eq!(colors[6], colors[0]);
        assert_eq!(colors[7], colors[1]);
    }

    #[test]
    fn bad_scene_options_are_configuration_errors() {
        let options = SceneOptions {
            camera_eye: [0.0, 0.0, 0.0],
            ..SceneOptions::default()
        };
        let err = build_scene(&SpiralParameters::default(), options, &InputTable::default()).unwrap_err();
        assert!(matches!(err, VslError::Configuration(_)));
    }

    #[test]
    fn scene_options_from_partial_json() {
        let o: SceneOptions = serde_json::from_str(r#"{ "theme": "light", "height": 600 }"#).unwrap();
        assert_eq!(o.theme, Theme::Light);
        assert_eq!(o.height, 600.0);
        assert_eq!(o.camera_eye, [1.2, 1.2, 0.3]);
    }
}
