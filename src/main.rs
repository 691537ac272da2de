mod app;
mod color;
mod config;
mod data;
mod error;
mod layout;
mod state;
mod ui;

use std::path::Path;

use app::VslApp;
use eframe::egui;
use state::AppState;

/// System fonts with CJK coverage, tried in order.
const CJK_FONT_PATHS: [&str; 8] = [
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\msjh.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
];

fn install_cjk_font(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    let Some((path, data)) = CJK_FONT_PATHS
        .iter()
        .find_map(|p| std::fs::read(p).ok().map(|d| (p, d)))
    else {
        log::warn!("No CJK system font found; labels may render as boxes");
        return;
    };

    log::info!("Using CJK font {path}");
    fonts
        .font_data
        .insert("cjk".to_owned(), egui::FontData::from_owned(data).into());
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("cjk".to_owned());
    }
    ctx.set_fonts(fonts);
}

fn main() -> eframe::Result {
    env_logger::init();

    // The whole pipeline runs once, before the first frame.
    let state = AppState::load(Path::new(config::CONFIG_FILE));
    let title = state.page.title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 1040.0])
            .with_min_inner_size([480.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            install_cjk_font(&cc.egui_ctx);
            Ok(Box::new(VslApp::new(&cc.egui_ctx, state)))
        }),
    )
}
