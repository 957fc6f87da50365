//! Selection and enrichment stages
//!
//! Selection narrows the fully scoped document down to the settings record
//! for the requested (project, environment) pair; the enrichment stages
//! then stamp that flat record with the identifiers the deployment tool
//! expects to find in it.

use serde_yaml_ng::Value;

use crate::error::{DecanterError, DecanterResult};
use crate::models::{ConfigContext, Document};

/// Extract `data[project_name][environment_name]`.
pub fn select_environment(context: &ConfigContext, mut data: Document) -> DecanterResult<Document> {
    let missing = || DecanterError::MissingConfig {
        project: context.project_name().to_string(),
        environment: context.environment_name().to_string(),
    };

    let mut project = match data.remove(context.project_name()) {
        Some(Value::Mapping(project)) => project,
        Some(_) => {
            return Err(DecanterError::structure(format!(
                "project '{}' is not a mapping",
                context.project_name()
            )))
        }
        None => return Err(missing()),
    };
    match project.remove(context.environment_name()) {
        Some(Value::Mapping(environment)) => Ok(environment),
        Some(_) => Err(DecanterError::structure(format!(
            "environment '{}' under project '{}' is not a mapping",
            context.environment_name(),
            context.project_name()
        ))),
        None => Err(missing()),
    }
}

/// Set `environment` to the environment name, overwriting any prior value.
pub fn add_environment_name(context: &ConfigContext, mut data: Document) -> Document {
    data.insert(
        Value::from("environment"),
        Value::from(context.environment_name()),
    );
    data
}

/// Set `project` to the project name, overwriting any prior value.
pub fn add_project_name(context: &ConfigContext, mut data: Document) -> Document {
    data.insert(Value::from("project"), Value::from(context.project_name()));
    data
}

/// Default `config_target` to the environment name. First-wins: an
/// existing value is preserved.
pub fn default_config_target(context: &ConfigContext, mut data: Document) -> Document {
    if matches!(data.get("config_target"), None | Some(Value::Null)) {
        data.insert(
            Value::from("config_target"),
            Value::from(context.environment_name()),
        );
    }
    data
}
