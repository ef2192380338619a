// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the import run.

use std::path::PathBuf;

/// Result type alias for import operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop an import run before any element is created.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration is internally inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Sizing, grade or catalog configuration rejected.
    #[error(transparent)]
    Sections(#[from] planform_sections::Error),

    /// Geometry tolerances rejected.
    #[error(transparent)]
    Geometry(#[from] planform_geometry::Error),

    /// A configuration or drawing file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration or drawing file is not valid JSON for its schema.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}
