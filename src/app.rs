use eframe::egui;

use crate::layout::scene::Theme;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct VslApp {
    pub state: AppState,
}

impl VslApp {
    /// Wrap an already computed pipeline result and apply its theme.
    pub fn new(ctx: &egui::Context, state: AppState) -> Self {
        let dark = state
            .scene
            .as_ref()
            .map(|s| s.options.theme == Theme::Dark)
            .unwrap_or(true);
        ctx.set_visuals(if dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        Self { state }
    }
}

impl eframe::App for VslApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: page title ----
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            panels::title_bar(ui, &self.state);
        });

        // ---- Bottom panel: trailing status ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.state);
        });

        // ---- Central panel: scene ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    plot::scene_plot(ui, &self.state);
                });
        });
    }
}
