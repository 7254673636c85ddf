//! Error types for loman.
//!
//! All operations return `Result<T>` which aliases `Result<T, LomanError>`.

use thiserror::Error;

/// Errors from manifest operations.
#[derive(Debug, Error)]
pub enum LomanError {
    /// Manifest text is not well-formed, or the root element is wrong.
    #[error("Failed to parse manifest: {0}")]
    Parse(String),

    /// Project not found in the default manifest.
    #[error("Project '{0}' not found in the default manifest")]
    ProjectNotFound(String),

    /// Project name already bound to a different path.
    #[error("Project '{name}' already exists at '{existing}', refusing to add it at '{requested}'")]
    PathConflict {
        name: String,
        existing: String,
        requested: String,
    },

    /// Checkout path already claimed by another project.
    #[error("Path '{path}' is already used by project '{owner}'")]
    PathInUse { path: String, owner: String },

    /// Add without --workon.
    ///
    /// Pinned (non-workon) entries belong in the default manifest; only
    /// workon additions go through this tool.
    #[error("Adding of non-workon projects is currently unsupported")]
    WorkonRequired,

    /// Invalid project name.
    #[error("Invalid project name '{0}': {1}")]
    InvalidName(String, String),

    /// File system operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Unexpected error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for loman operations.
pub type Result<T> = std::result::Result<T, LomanError>;
