//! Error types for decanter
//!
//! Uses `thiserror` for library errors. Every failure aborts the whole
//! normalization; there is no partial-result mode.

use thiserror::Error;

/// Result type alias for decanter operations
pub type DecanterResult<T> = Result<T, DecanterError>;

/// Main error type for decanter operations
#[derive(Error, Debug)]
pub enum DecanterError {
    /// Malformed configuration document: the depth probe (or a later stage)
    /// reached a value that is not the mapping it must be
    #[error("malformed configuration document: {message}")]
    Structure { message: String },

    /// Two domain entries under the same project/target share a name
    #[error("duplicate domain '{domain}' in configuration for project '{project}', target '{target}'")]
    DuplicateDomain {
        domain: String,
        project: String,
        target: String,
    },

    /// Requested project/environment pair absent from the document
    #[error("no configuration data for project '{project}', environment '{environment}'")]
    MissingConfig {
        project: String,
        environment: String,
    },

    /// YAML value conversion error
    #[error("YAML conversion error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl DecanterError {
    /// Shorthand for a `Structure` error with a formatted message
    pub(crate) fn structure(message: impl Into<String>) -> Self {
        DecanterError::Structure {
            message: message.into(),
        }
    }
}
