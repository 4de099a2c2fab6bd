use thiserror::Error;

/// Failures surfaced by the scene animator.
///
/// Only `SurfaceUnavailable` and `InvalidConfig` end an animator's life (it
/// stays inert); `Frame` is per-tick and the next tick simply tries again.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    /// The output surface or rendering backend could not be created.
    #[error("output surface unavailable: {0}")]
    SurfaceUnavailable(String),
    /// A single frame failed to draw.
    #[error("frame failed to draw: {0}")]
    Frame(String),
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),
    #[error("unknown scene preset `{0}`")]
    UnknownPreset(String),
    #[error("animator already initialized")]
    AlreadyInitialized,
}

impl SceneError {
    /// True for errors that leave the animator inert.
    pub fn is_initialization_failure(&self) -> bool {
        matches!(
            self,
            SceneError::SurfaceUnavailable(_) | SceneError::InvalidConfig(_)
        )
    }
}
