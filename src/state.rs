use std::path::Path;

use crate::config::{PageOptions, VslConfig};
use crate::data::loader::load_table;
use crate::error::VslError;
use crate::layout::scene::{Scene, build_scene};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Result of the read → layout pipeline, independent of rendering.
pub struct AppState {
    /// Page chrome (title / trailing status).
    pub page: PageOptions,

    /// Computed scene (None when the pipeline failed).
    pub scene: Option<Scene>,

    /// Error message shown instead of the scene.
    pub status_message: Option<String>,
}

impl AppState {
    /// Read the optional config file, then run the pipeline.
    pub fn load(config_path: &Path) -> Self {
        match VslConfig::load_or_default(config_path) {
            Ok(config) => Self::from_config(&config),
            Err(e) => Self::failed(PageOptions::default(), e),
        }
    }

    /// Run the pipeline for an already validated config.
    pub fn from_config(config: &VslConfig) -> Self {
        match run_pipeline(config) {
            Ok(scene) => {
                log::info!(
                    "Built scene: {} artifacts, {} labelled nodes",
                    scene.artifacts.len(),
                    scene.node_count()
                );
                Self {
                    page: config.page.clone(),
                    scene: Some(scene),
                    status_message: None,
                }
            }
            Err(e) => Self::failed(config.page.clone(), e),
        }
    }

    fn failed(page: PageOptions, err: VslError) -> Self {
        log::error!("{err}");
        Self {
            page,
            scene: None,
            status_message: Some(err.to_string()),
        }
    }
}

/// Load the table and lay it out. Nothing is kept from a failed run.
pub fn run_pipeline(config: &VslConfig) -> Result<Scene, VslError> {
    let path = config.input_path();
    let table = load_table(&path)?;
    log::info!(
        "Loaded {} columns × {} rows ({} labels) from {}: {:?}",
        table.width(),
        table.height(),
        table.columns.iter().map(|c| c.label_count()).sum::<usize>(),
        path.display(),
        table.column_names()
    );
    build_scene(&config.spiral, config.scene.clone(), &table)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vsl-state-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_input_yields_no_scene() {
        let config = VslConfig {
            input_path: Some(temp_dir("missing").join("spiral_data.csv")),
            ..VslConfig::default()
        };
        assert!(matches!(run_pipeline(&config), Err(VslError::MissingInput { .. })));

        let state = AppState::from_config(&config);
        assert!(state.scene.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.contains("spiral_data.csv"));
    }

    #[test]
    fn csv_input_builds_scene() {
        let dir = temp_dir("ok");
        let input = dir.join("spiral_data.csv");
        std::fs::write(&input, "a,b,c\nA,,C\n,B,\n").unwrap();

        let config = VslConfig {
            input_path: Some(input),
            ..VslConfig::default()
        };
        let state = AppState::from_config(&config);
        assert!(state.status_message.is_none());
        let scene = state.scene.unwrap();
        // 6 polylines + labelled points for columns a, b, c
        assert_eq!(scene.polylines().count(), 6);
        assert_eq!(scene.labeled_points().count(), 3);
        assert_eq!(scene.node_count(), 3);
    }

    #[test]
    fn bad_config_file_reports_configuration_error() {
        let dir = temp_dir("badcfg");
        let cfg = dir.join("vsl.json");
        std::fs::write(&cfg, r#"{ "spiral": { "spiral_count": 0 } }"#).unwrap();

        let state = AppState::load(&cfg);
        assert!(state.scene.is_none());
        assert!(state.status_message.unwrap().contains("spiral_count"));
        assert_eq!(state.page, PageOptions::default());
    }
}
