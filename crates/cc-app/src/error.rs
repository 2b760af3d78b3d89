//! Error types for the cc-app service layer.

use std::path::PathBuf;

/// Application error type shared by every front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Site validation failed: {0}")]
    Validation(String),

    #[error("Chamber not found: {0}")]
    ChamberNotFound(String),

    #[error("Runtime compilation failed: {0}")]
    Compile(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<cc_project::ProjectError> for AppError {
    fn from(err: cc_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<cc_project::ValidationError> for AppError {
    fn from(err: cc_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<cc_controls::ControlError> for AppError {
    fn from(err: cc_controls::ControlError) -> Self {
        AppError::Compile(err.to_string())
    }
}
