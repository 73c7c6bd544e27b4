use thiserror::Error;

/// Errors produced while building or configuring the scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid color {0:?}: expected #rrggbb or #rgb")]
    InvalidColor(String),

    #[error("invalid scene config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("config value out of range: {field} ({reason})")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, SceneError>;
