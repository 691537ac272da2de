use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::VslError;
use crate::layout::params::SpiralParameters;
use crate::layout::scene::SceneOptions;

/// Optional override file, looked up in the working directory.
pub const CONFIG_FILE: &str = "vsl.json";

/// Default input table, resolved relative to the working directory.
pub const DEFAULT_INPUT: &str = "spiral_data.csv";

// ---------------------------------------------------------------------------
// Page chrome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageOptions {
    pub title: String,
    /// Text shown below the scene.
    pub status_text: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "VSL 專項學習".to_string(),
            status_text: "請稍後。".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// VslConfig
// ---------------------------------------------------------------------------

/// Everything the pipeline needs, defaulting field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VslConfig {
    pub input_path: Option<PathBuf>,
    pub spiral: SpiralParameters,
    pub scene: SceneOptions,
    pub page: PageOptions,
}

impl VslConfig {
    /// Read `path` if it exists, otherwise fall back to the defaults.
    /// The result is validated either way.
    pub fn load_or_default(path: &Path) -> Result<Self, VslError> {
        let config = if path.is_file() {
            log::info!("Reading configuration from {}", path.display());
            let text = std::fs::read_to_string(path)
                .map_err(|e| VslError::config(format!("reading {}: {e}", path.display())))?;
            Self::from_json(&text)?
        } else {
            log::debug!("No {} found, using built-in parameters", path.display());
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, VslError> {
        serde_json::from_str(text).map_err(|e| VslError::config(format!("parsing configuration: {e}")))
    }

    pub fn validate(&self) -> Result<(), VslError> {
        self.spiral.validate()?;
        self.scene.validate()
    }

    pub fn input_path(&self) -> PathBuf {
        self.input_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }
}
