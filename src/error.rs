use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// The two ways the read → layout → render pipeline can fail.
///
/// Both are fatal: the scene is never partially built.
#[derive(Debug, Error)]
pub enum VslError {
    /// Input table absent, unreadable or not parseable.
    #[error("錯誤：找不到或無法讀取 '{}' 檔案（{reason}）。請確保資料檔和程式在同一個資料夾。", .path.display())]
    MissingInput { path: PathBuf, reason: String },

    /// A geometry / scene / config value is invalid.
    #[error("設定錯誤：{0}")]
    Configuration(String),
}

impl VslError {
    pub fn missing_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        VslError::MissingInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        VslError::Configuration(msg.into())
    }
}
