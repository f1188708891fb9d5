//! Error types for the walk mode and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::PartHandle;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors reported by a scene host while managing avatar parts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("scene part {0:?} does not exist")]
    UnknownPart(PartHandle),

    #[error("scene host rejected request: {0}")]
    Rejected(String),
}

/// Errors from entering or leaving walk mode.
#[derive(Debug, Error)]
pub enum WalkModeError {
    /// Entry requested with no aircraft to eject from.
    #[error("no aircraft found, spawn an aircraft first")]
    NoActiveVehicle,

    #[error("walk mode is already active")]
    AlreadyActive,

    #[error("failed to build avatar: {0}")]
    Scene(#[from] SceneError),
}
