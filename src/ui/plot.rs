use std::collections::HashMap;

use eframe::egui::{self, Align2, Color32, RichText, Ui};
use egui_plot::{Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::layout::scene::{Artifact, Scene, Theme};
use crate::state::AppState;

use super::projection::{Camera, Normalizer, Projector};

const DARK_BACKGROUND: Color32 = Color32::from_rgb(17, 17, 17);

// ---------------------------------------------------------------------------
// Scene → screen-plane artifacts
// ---------------------------------------------------------------------------

/// A polyline after projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedLine {
    pub name: String,
    pub color: Color32,
    pub width: f32,
    pub points: Vec<[f64; 2]>,
}

/// Labelled markers after projection. `points`, `labels` and `hover` stay
/// index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedLabels {
    pub name: String,
    pub color: Color32,
    pub radius: f32,
    pub points: Vec<[f64; 2]>,
    pub labels: Vec<String>,
    pub hover: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projected {
    Line(ProjectedLine),
    Labels(ProjectedLabels),
}

/// Project every artifact through the scene's fixed camera, in order.
/// Points that fall behind the eye are dropped.
pub fn project_scene(scene: &Scene) -> Vec<Projected> {
    let Some(camera) = Camera::looking_at_origin(scene.options.camera_eye) else {
        return Vec::new();
    };
    let normalizer = Normalizer::fit(
        scene.artifacts.iter().flat_map(Artifact::positions),
        scene.options.aspect_ratio,
    );
    let projector = Projector { normalizer, camera };

    scene
        .artifacts
        .iter()
        .map(|artifact| {
            let spiral = artifact.spiral();
            match artifact {
                Artifact::Polyline(line) => Projected::Line(ProjectedLine {
                    name: format!("spiral {spiral}"),
                    color: line.color,
                    width: line.width,
                    points: line.points.iter().filter_map(|&p| projector.project(p)).collect(),
                }),
                Artifact::LabeledPoints(pts) => {
                    let mut out = ProjectedLabels {
                        name: format!("labels {spiral}"),
                        color: pts.color,
                        radius: pts.marker_size / 2.0,
                        points: Vec::with_capacity(pts.nodes.len()),
                        labels: Vec::with_capacity(pts.nodes.len()),
                        hover: Vec::with_capacity(pts.nodes.len()),
                    };
                    for (node, hover) in pts.nodes.iter().zip(&pts.hover_text) {
                        if let Some(p) = projector.project([node.x, node.y, node.z]) {
                            out.points.push(p);
                            out.labels.push(node.text.clone());
                            out.hover.push(hover.clone());
                        }
                    }
                    Projected::Labels(out)
                }
            }
        })
        .collect()
}

/// Hover text of the node nearest to `at` in the series called `name`.
/// Polylines and empty space report nothing.
pub fn hover_label(
    lookup: &HashMap<String, Vec<([f64; 2], String)>>,
    name: &str,
    at: &PlotPoint,
) -> String {
    let Some(nodes) = lookup.get(name) else {
        return String::new();
    };
    nodes
        .iter()
        .min_by(|(a, _), (b, _)| {
            let da = (a[0] - at.x).powi(2) + (a[1] - at.y).powi(2);
            let db = (b[0] - at.x).powi(2) + (b[1] - at.y).powi(2);
            da.total_cmp(&db)
        })
        .map(|(_, text)| text.clone())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Scene plot (central panel)
// ---------------------------------------------------------------------------

/// Render the spiral scene in the central panel.
pub fn scene_plot(ui: &mut Ui, state: &AppState) {
    let scene = match &state.scene {
        Some(scene) => scene,
        None => {
            let msg = state
                .status_message
                .as_deref()
                .unwrap_or("No scene to display.");
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new(msg).color(Color32::RED).size(16.0));
            });
            return;
        }
    };

    let options = &scene.options;
    let projected = project_scene(scene);

    let hover_lookup: HashMap<String, Vec<([f64; 2], String)>> = projected
        .iter()
        .filter_map(|p| match p {
            Projected::Labels(l) => Some((
                l.name.clone(),
                l.points.iter().copied().zip(l.hover.iter().cloned()).collect(),
            )),
            Projected::Line(_) => None,
        })
        .collect();

    let width = if options.full_width {
        (ui.available_width() - 2.0 * options.margin).max(1.0)
    } else {
        options.width
    };
    let label_color = options.label_color32();
    let label_size = options.label_size;

    let mut frame = egui::Frame::new().inner_margin(options.margin);
    if options.theme == Theme::Dark {
        frame = frame.fill(DARK_BACKGROUND);
    }

    frame.show(ui, |ui: &mut Ui| {
        let mut plot = Plot::new("spiral_scene")
            .width(width)
            .height(options.height)
            .data_aspect(1.0)
            .show_axes(options.show_axes)
            .show_grid(options.show_axes)
            .show_background(false)
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(true)
            .allow_zoom(true)
            .label_formatter(move |name, value| hover_label(&hover_lookup, name, value));
        if options.show_legend {
            plot = plot.legend(egui_plot::Legend::default());
        }

        plot.show(ui, |plot_ui| {
            for item in &projected {
                match item {
                    Projected::Line(line) => {
                        let points: PlotPoints = line.points.iter().copied().collect();
                        plot_ui.line(
                            Line::new(points)
                                .name(&line.name)
                                .color(line.color)
                                .width(line.width),
                        );
                    }
                    Projected::Labels(labels) => {
                        // White ring under the coloured marker.
                        let ring: PlotPoints = labels.points.iter().copied().collect();
                        plot_ui.points(
                            Points::new(ring)
                                .name(&labels.name)
                                .shape(MarkerShape::Circle)
                                .filled(true)
                                .radius(labels.radius + 1.0)
                                .color(Color32::WHITE),
                        );
                        let markers: PlotPoints = labels.points.iter().copied().collect();
                        plot_ui.points(
                            Points::new(markers)
                                .name(&labels.name)
                                .shape(MarkerShape::Circle)
                                .filled(true)
                                .radius(labels.radius)
                                .color(labels.color),
                        );
                        for (p, text) in labels.points.iter().zip(&labels.labels) {
                            plot_ui.text(
                                Text::new(
                                    PlotPoint::new(p[0], p[1]),
                                    RichText::new(text).size(label_size).color(label_color),
                                )
                                .anchor(Align2::CENTER_BOTTOM),
                            );
                        }
                    }
                }
            }
        });
    });
}
