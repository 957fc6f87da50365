//! End-to-end tests for the filter pipeline

use serde_yaml_ng::Value;

use super::FilterPipeline;
use crate::error::DecanterError;
use crate::models::{ConfigContext, DeployTargetSlot, Document};

fn doc(yaml: &str) -> Document {
    serde_yaml_ng::from_str(yaml).unwrap()
}

fn val(yaml: &str) -> Value {
    serde_yaml_ng::from_str(yaml).unwrap()
}

fn pipeline() -> FilterPipeline {
    FilterPipeline::new(ConfigContext::new("myproj", "prod"))
}

#[test]
fn fully_scoped_document_normalizes_to_flat_record() {
    let data = doc("myproj:\n  prod:\n    repository: git://x\n    domain: host1\n");
    let mut slot = DeployTargetSlot::new("prod");

    let result = pipeline().filter_data(&data, &mut slot).unwrap();

    let expected = doc(concat!(
        "repository: git://x\n",
        "domain:\n",
        "- name: host1\n",
        "environment: prod\n",
        "project: myproj\n",
        "config_target: prod\n",
    ));
    assert_eq!(result, expected);
}

#[test]
fn bare_target_record_is_scoped_twice_then_selected() {
    // Depth 0: both the environment and project levels are inferred.
    let data = doc("repository: git://x\n");
    let mut slot = DeployTargetSlot::new("prod");

    let result = pipeline().filter_data(&data, &mut slot).unwrap();

    assert_eq!(result.get("repository"), Some(&Value::from("git://x")));
    assert_eq!(result.get("environment"), Some(&Value::from("prod")));
    assert_eq!(result.get("project"), Some(&Value::from("myproj")));
    assert_eq!(result.get("config_target"), Some(&Value::from("prod")));
    // No domain declared: one local record.
    assert_eq!(result.get("domain"), Some(&val("- name: local\n")));
}

#[test]
fn environment_record_is_project_scoped_and_overrides_deploy_target() {
    let data = doc("prod:\n  repository: git://x\n  project: realproj\n");
    let pipeline = FilterPipeline::new(ConfigContext::new("realproj", "prod"));
    let mut slot = DeployTargetSlot::new("prod");

    let result = pipeline.filter_data(&data, &mut slot).unwrap();

    assert_eq!(result.get("project"), Some(&Value::from("realproj")));
    assert_eq!(slot.get(), Some("realproj:prod"));
}

#[test]
fn qualified_deploy_target_survives_the_whole_run() {
    let data = doc("prod:\n  repository: git://x\n  project: realproj\n");
    let pipeline = FilterPipeline::new(ConfigContext::new("realproj", "prod"));
    let mut slot = DeployTargetSlot::new("elsewhere:prod");

    pipeline.filter_data(&data, &mut slot).unwrap();

    assert_eq!(slot.get(), Some("elsewhere:prod"));
}

#[test]
fn preset_config_target_is_preserved() {
    let data = doc(concat!(
        "myproj:\n",
        "  prod:\n",
        "    repository: git://x\n",
        "    config_target: staging\n",
    ));
    let mut slot = DeployTargetSlot::unset();

    let result = pipeline().filter_data(&data, &mut slot).unwrap();

    assert_eq!(result.get("config_target"), Some(&Value::from("staging")));
}

#[test]
fn input_document_is_not_mutated() {
    let data = doc("myproj:\n  prod:\n    repository: git://x\n    domain: host1\n");
    let original = data.clone();
    let mut slot = DeployTargetSlot::unset();

    pipeline().filter_data(&data, &mut slot).unwrap();

    assert_eq!(data, original);
}

#[test]
fn missing_pair_aborts_with_both_identifiers() {
    let data = doc("otherproj:\n  prod:\n    repository: git://x\n");
    let mut slot = DeployTargetSlot::unset();

    let err = pipeline().filter_data(&data, &mut slot).unwrap_err();

    assert!(matches!(err, DecanterError::MissingConfig { .. }));
    let message = err.to_string();
    assert!(message.contains("myproj"));
    assert!(message.contains("prod"));
}

#[test]
fn duplicate_domains_abort_the_run() {
    let data = doc("myproj:\n  prod:\n    repository: git://x\n    domain: [a, a]\n");
    let mut slot = DeployTargetSlot::unset();

    let err = pipeline().filter_data(&data, &mut slot).unwrap_err();

    assert!(matches!(err, DecanterError::DuplicateDomain { .. }));
}

#[test]
fn malformed_document_aborts_during_scoping() {
    // First value bottoms out in a scalar before any repository key.
    let data = doc("myproj:\n  prod: oops\n");
    let mut slot = DeployTargetSlot::unset();

    let err = pipeline().filter_data(&data, &mut slot).unwrap_err();

    assert!(matches!(err, DecanterError::Structure { .. }));
}
