//! Scoping stages: restore hierarchy levels the caller omitted
//!
//! The true document shape is `project -> environment -> target settings`,
//! but a configuration may start anywhere in that hierarchy. The depth
//! probe measures how many levels were omitted; the two scoping stages
//! wrap the document back up to the full shape before anything else runs.

use serde_yaml_ng::Value;

use crate::error::{DecanterError, DecanterResult};
use crate::models::{ConfigContext, DeployTargetSlot, Document};

/// Number of mapping levels above the record that holds the `repository`
/// key, following the *first* value at each level.
///
/// The per-target settings record always and only contains `repository`;
/// every wrapping level is a mapping whose first key leads toward it.
/// Reaching a non-mapping (or an empty mapping) before finding
/// `repository` means the document is malformed.
pub(crate) fn repository_depth(data: &Document) -> DecanterResult<usize> {
    if data.contains_key("repository") {
        return Ok(0);
    }
    match data.values().next() {
        Some(Value::Mapping(inner)) => Ok(1 + repository_depth(inner)?),
        Some(_) | None => Err(DecanterError::structure(
            "no 'repository' key found while probing document depth",
        )),
    }
}

/// Wrap a bare target record (depth 0) under the environment name.
///
/// Deeper documents already carry an environment level and pass through
/// unchanged.
pub fn scope_environment(context: &ConfigContext, data: Document) -> DecanterResult<Document> {
    if repository_depth(&data)? != 0 {
        return Ok(data);
    }
    let mut wrapped = Document::new();
    wrapped.insert(
        Value::from(context.environment_name()),
        Value::Mapping(data),
    );
    Ok(wrapped)
}

/// Wrap an environment-level record (depth 1) under the project name.
///
/// Before wrapping, the deploy-target override runs against the still
/// unwrapped document: a project name discovered only now may retroactively
/// qualify a deploy-target specifier that was set before project inference.
pub fn scope_project(
    context: &ConfigContext,
    data: Document,
    deploy_target: &mut DeployTargetSlot,
) -> DecanterResult<Document> {
    if repository_depth(&data)? != 1 {
        return Ok(data);
    }
    override_deploy_target(context, &data, deploy_target);
    let mut wrapped = Document::new();
    wrapped.insert(Value::from(context.project_name()), Value::Mapping(data));
    Ok(wrapped)
}

/// Prefix the deploy-target specifier with `<project>:` when the slot is
/// not already project-qualified and the environment record names a
/// project. A slot that already contains `:` is never touched.
fn override_deploy_target(context: &ConfigContext, data: &Document, slot: &mut DeployTargetSlot) {
    if slot.is_project_qualified() {
        return;
    }
    let project = data
        .get(context.environment_name())
        .and_then(Value::as_mapping)
        .and_then(|environment| environment.get("project"))
        .and_then(Value::as_str);
    if let Some(project) = project {
        slot.qualify_with_project(project);
    }
}
