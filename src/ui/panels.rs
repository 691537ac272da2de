use eframe::egui::{RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Title bar
// ---------------------------------------------------------------------------

/// Render the page title.
pub fn title_bar(ui: &mut Ui, state: &AppState) {
    ui.add_space(6.0);
    ui.heading(RichText::new(&state.page.title).size(28.0).strong());
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

/// Render the trailing status line. Suppressed when the pipeline failed; the
/// error is shown in the central panel instead.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    if state.status_message.is_some() {
        return;
    }
    ui.horizontal(|ui: &mut Ui| {
        ui.label(&state.page.status_text);
        if let Some(scene) = &state.scene {
            ui.separator();
            ui.weak(format!(
                "{} spirals, {} labels",
                scene.polylines().count(),
                scene.node_count()
            ));
        }
    });
}
