//! Domain-list normalization
//!
//! Every target's `domain` field is rewritten into a canonical list of
//! `DomainRecord`s. Heterogeneous inputs are accepted: a single scalar, a
//! list of scalars, a list of `{name, roles}` mappings, or any mix. Null
//! and empty entries mean "deploy locally" and become the literal name
//! `"local"`.
//!
//! The localization step runs before the empty-list check and never
//! removes entries, so the default-to-`["local"]` branch only fires when
//! the original list was genuinely empty. A list holding one null and one
//! real domain localizes the null instead. Intentional; do not reorder.

use std::collections::HashSet;

use serde_yaml_ng::Value;

use crate::error::{DecanterError, DecanterResult};
use crate::models::{Document, DomainRecord};

/// Rewrite `domain` under every (project, target) pair into a canonical
/// record list, rejecting duplicate names within one target.
pub fn normalize_domains(mut data: Document) -> DecanterResult<Document> {
    for (project, project_data) in data.iter_mut() {
        let project_name = key_name(project);
        let targets = project_data.as_mapping_mut().ok_or_else(|| {
            DecanterError::structure(format!("project '{project_name}' is not a mapping"))
        })?;
        for (target, target_data) in targets.iter_mut() {
            let target_name = key_name(target);
            let settings = target_data.as_mapping_mut().ok_or_else(|| {
                DecanterError::structure(format!(
                    "target '{target_name}' under project '{project_name}' is not a mapping"
                ))
            })?;
            let records = normalize_domain(settings.get("domain"))?;
            check_duplicates(&project_name, &target_name, &records)?;
            settings.insert(Value::from("domain"), serde_yaml_ng::to_value(&records)?);
        }
    }
    Ok(data)
}

/// Normalize one raw `domain` value into canonical records.
///
/// A missing field behaves like an explicit null: one local domain.
pub(crate) fn normalize_domain(raw: Option<&Value>) -> DecanterResult<Vec<DomainRecord>> {
    let mut localized = localize_domain_list(raw);
    if localized.is_empty() {
        localized.push(Value::from(LOCAL_DOMAIN));
    }
    localized.iter().map(domain_record).collect()
}

const LOCAL_DOMAIN: &str = "local";

/// Flatten the raw value one level and replace null/empty entries with
/// `"local"`. Never removes entries.
fn localize_domain_list(raw: Option<&Value>) -> Vec<Value> {
    flatten(raw)
        .into_iter()
        .map(|value| {
            if is_nil_or_empty(value) {
                Value::from(LOCAL_DOMAIN)
            } else {
                value.clone()
            }
        })
        .collect()
}

/// Treat the value as a single item or a list; splice nested lists one
/// level deep.
fn flatten(raw: Option<&Value>) -> Vec<&Value> {
    static NULL: Value = Value::Null;
    let mut flat = Vec::new();
    match raw {
        Some(Value::Sequence(items)) => {
            for item in items {
                match item {
                    Value::Sequence(inner) => flat.extend(inner.iter()),
                    other => flat.push(other),
                }
            }
        }
        Some(other) => flat.push(other),
        None => flat.push(&NULL),
    }
    flat
}

fn is_nil_or_empty(value: &Value) -> bool {
    matches!(value, Value::Null) || value.as_str().is_some_and(str::is_empty)
}

fn domain_record(value: &Value) -> DecanterResult<DomainRecord> {
    match value {
        Value::Mapping(map) => {
            let name = map.get("name").and_then(scalar_name).ok_or_else(|| {
                DecanterError::structure("domain entry has no usable 'name' field")
            })?;
            let roles = compact_roles(map.get("roles"));
            Ok(DomainRecord {
                name,
                roles: if roles.is_empty() { None } else { Some(roles) },
            })
        }
        other => {
            let name = scalar_name(other).ok_or_else(|| {
                DecanterError::structure(format!("domain entry is not a host name: {other:?}"))
            })?;
            Ok(DomainRecord::named(name))
        }
    }
}

/// Scalar usable as a name. YAML loaders parse bare numeric tokens as
/// numbers, so those are stringified rather than rejected.
fn scalar_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Flatten the raw `roles` value and drop null/empty entries.
fn compact_roles(raw: Option<&Value>) -> Vec<String> {
    flatten(raw)
        .into_iter()
        .filter(|value| !is_nil_or_empty(value))
        .filter_map(scalar_name)
        .collect()
}

fn check_duplicates(project: &str, target: &str, records: &[DomainRecord]) -> DecanterResult<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.name.as_str()) {
            return Err(DecanterError::DuplicateDomain {
                domain: record.name.clone(),
                project: project.to_string(),
                target: target.to_string(),
            });
        }
    }
    Ok(())
}

fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => format!("{other:?}"),
    }
}
