//! The filter pipeline
//!
//! Normalization runs as a fixed sequence of single-responsibility stages,
//! each consuming the previous stage's document and producing one closer
//! to canonical form:
//!
//! 1. environment scoping (wrap a bare target record)
//! 2. project scoping (wrap an environment record, deploy-target override)
//! 3. domain normalization
//! 4. project/environment selection
//! 5. environment, project, and config-target enrichment
//!
//! Selection must only run once both scoping levels are guaranteed
//! present, and enrichment only on the selected target-level record, so
//! the order is not configurable.

mod domain;
mod scope;
mod select;
#[cfg(test)]
mod tests;

pub use domain::normalize_domains;
pub use scope::{scope_environment, scope_project};
pub use select::{
    add_environment_name, add_project_name, default_config_target, select_environment,
};

use crate::error::DecanterResult;
use crate::models::{ConfigContext, DeployTargetSlot, Document};

/// Runs the normalization stages in fixed order for one
/// (project, environment) pair.
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    context: ConfigContext,
}

impl FilterPipeline {
    pub fn new(context: ConfigContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &ConfigContext {
        &self.context
    }

    /// Normalize a configuration document into the flat settings record
    /// for this pipeline's project and environment.
    ///
    /// Operates on a defensive copy; the caller's document is untouched.
    /// `deploy_target` is the external deploy-target specifier the
    /// project-scoping stage may qualify with an inferred project name.
    pub fn filter_data(
        &self,
        data: &Document,
        deploy_target: &mut DeployTargetSlot,
    ) -> DecanterResult<Document> {
        let current = scope::scope_environment(&self.context, data.clone())?;
        let current = scope::scope_project(&self.context, current, deploy_target)?;
        let current = domain::normalize_domains(current)?;
        let current = select::select_environment(&self.context, current)?;
        let current = select::add_environment_name(&self.context, current);
        let current = select::add_project_name(&self.context, current);
        Ok(select::default_config_target(&self.context, current))
    }
}
