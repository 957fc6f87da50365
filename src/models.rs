//! Core data models for decanter
//!
//! Defines the value types that flow through the filter pipeline:
//! - `ConfigContext`: which (project, environment) pair to normalize for
//! - `DomainRecord`: canonical representation of a deployment target host
//! - `DeployTargetSlot`: the external deploy-target specifier threaded
//!   through the pipeline as an explicit parameter

use serde::{Deserialize, Serialize};

/// A configuration document: a nested, insertion-order-preserving mapping.
///
/// Insertion order matters — the depth probe descends into the *first*
/// value at each level, so the document must keep the key order it was
/// loaded with.
pub type Document = serde_yaml_ng::Mapping;

/// The (project, environment) pair a normalization run targets.
///
/// Supplied by the caller; read-only to every pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigContext {
    project_name: String,
    environment_name: String,
}

impl ConfigContext {
    /// Create a new context for the given project and environment
    pub fn new(project_name: impl Into<String>, environment_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            environment_name: environment_name.into(),
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn environment_name(&self) -> &str {
        &self.environment_name
    }
}

/// Canonical representation of one deployment target host
///
/// Within one target's domain list, all `name` values are unique; the
/// normalization stage rejects duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Host name, or `"local"` for a local deployment
    pub name: String,

    /// Roles this host serves (e.g. "web", "db"); omitted when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl DomainRecord {
    /// A record with a name and no roles
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: None,
        }
    }
}

/// The deploy-target specifier owned by the caller's environment.
///
/// Historically a process-wide environment variable; modeled here as an
/// explicit value the caller passes mutably into the pipeline so the
/// project-scoping stage's one side effect stays visible and testable.
/// The value is either unset or a string like `"environment"` or
/// `"project:environment"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeployTargetSlot(Option<String>);

impl DeployTargetSlot {
    /// A slot holding the given specifier
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    /// A slot with no specifier set
    pub fn unset() -> Self {
        Self(None)
    }

    /// Current specifier, if any
    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether the specifier already carries a `project:` prefix
    pub(crate) fn is_project_qualified(&self) -> bool {
        self.0.as_deref().is_some_and(|v| v.contains(':'))
    }

    /// Prefix the specifier with `<project>:`, treating an unset slot as
    /// an empty suffix
    pub(crate) fn qualify_with_project(&mut self, project: &str) {
        let rest = self.0.take().unwrap_or_default();
        self.0 = Some(format!("{project}:{rest}"));
    }
}
