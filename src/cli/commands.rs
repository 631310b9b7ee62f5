//! Resource command handlers
//!
//! Each command drives one resource lifecycle call the way the host would,
//! prints the resulting state as JSON on stdout and the diagnostics on
//! stderr.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::path::Path;
use tokio_util::sync::CancellationToken;

use crate::config::ConfigLoader;
use crate::host::{Diagnostics, Response, StateChange};
use crate::provider::RadarrProvider;
use crate::resources::{self, DynResource, Verb, errors, listing};

/// Output options shared by the resource commands
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Print sensitive attributes instead of `(sensitive)`
    pub show_sensitive: bool,
}

/// Print every registered resource type
pub fn print_resources() {
    for resource in resources::all() {
        println!("{}", resource.type_name());
    }
}

/// Print the schema of one resource type as YAML
pub fn print_schema(type_name: &str) -> Result<()> {
    let resource = find(type_name)?;
    let yaml =
        serde_yaml::to_string(&resource.schema()).context("Failed to serialize schema")?;
    print!("{}", yaml);
    Ok(())
}

/// Configure the provider from the layered configuration
pub fn connect(config_path: Option<&Path>) -> Result<RadarrProvider> {
    let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;
    tracing::debug!("loaded configuration: {:?}", config);

    let mut provider = RadarrProvider::new();
    let mut diags = Diagnostics::new();
    provider.configure(&config, &mut diags);
    print_diagnostics(&diags);
    if diags.has_error() {
        return Err(anyhow::anyhow!("Failed to configure provider"));
    }
    Ok(provider)
}

/// Import a resource by id, then refresh it
pub async fn import(
    provider: &RadarrProvider,
    type_name: &str,
    id: &str,
    cancel: &CancellationToken,
    options: OutputOptions,
) -> Result<bool> {
    let resource = configured(provider, type_name)?;
    let Response { state, diagnostics } = resource.import(id);
    let response = match state {
        StateChange::Set(state) if !diagnostics.has_error() => {
            let mut refreshed = resource.read(state, cancel).await;
            let mut all = diagnostics;
            all.extend(refreshed.diagnostics);
            refreshed.diagnostics = all;
            refreshed
        }
        state => Response { state, diagnostics },
    };
    report(resource.as_ref(), response, options)
}

/// Refresh a stored state
pub async fn read(
    provider: &RadarrProvider,
    type_name: &str,
    state_path: &Path,
    cancel: &CancellationToken,
    options: OutputOptions,
) -> Result<bool> {
    let resource = configured(provider, type_name)?;
    let state = read_json(state_path)?;
    let response = resource.read(state, cancel).await;
    report(resource.as_ref(), response, options)
}

/// Create from a plan, or update when a prior state is given
pub async fn apply(
    provider: &RadarrProvider,
    type_name: &str,
    plan_path: &Path,
    state_path: Option<&Path>,
    cancel: &CancellationToken,
    options: OutputOptions,
) -> Result<bool> {
    let resource = configured(provider, type_name)?;
    let plan = read_json(plan_path)?;
    let response = match state_path {
        Some(path) => {
            let prior = read_json(path)?;
            resource.update(plan, prior, cancel).await
        }
        None => resource.create(plan, cancel).await,
    };
    report(resource.as_ref(), response, options)
}

/// Delete the resource a stored state describes
pub async fn destroy(
    provider: &RadarrProvider,
    type_name: &str,
    state_path: &Path,
    cancel: &CancellationToken,
    options: OutputOptions,
) -> Result<bool> {
    let resource = configured(provider, type_name)?;
    let state = read_json(state_path)?;
    let response = resource.delete(state, cancel).await;
    report(resource.as_ref(), response, options)
}

/// List every record of a family group as typed views
pub async fn list(
    provider: &RadarrProvider,
    group: listing::GroupName,
    cancel: &CancellationToken,
    options: OutputOptions,
) -> Result<bool> {
    let transport = provider
        .transport()
        .context("Provider has no configured client")?;

    let listed = match listing::list_group(group, transport.as_ref(), cancel).await {
        Ok(listed) => listed,
        Err(err) => {
            let mut diags = Diagnostics::new();
            errors::client_error(&mut diags, Verb::List, group.as_str(), &err);
            print_diagnostics(&diags);
            return Ok(diags.has_error());
        }
    };

    let mut entries = Vec::with_capacity(listed.len());
    for record in listed {
        let (Some(type_name), Some(state)) = (record.type_name, record.state) else {
            eprintln!(
                "Warning: skipping {} record {:?} ({}): unsupported implementation {:?}",
                group,
                record.id,
                record.name.unwrap_or_default(),
                record.implementation.unwrap_or_default()
            );
            continue;
        };
        let state = match resources::find(type_name) {
            Some(resource) if !options.show_sensitive => resource.schema().redact(&state),
            _ => state,
        };
        entries.push(json!({
            "type": type_name,
            "state": state,
        }));
    }

    print_json(&Value::Array(entries))?;
    Ok(false)
}

fn find(type_name: &str) -> Result<Box<dyn DynResource>> {
    resources::find(type_name).with_context(|| {
        format!(
            "Unknown resource type: {} (run `radarr-provider resources` for the list)",
            type_name
        )
    })
}

fn configured(provider: &RadarrProvider, type_name: &str) -> Result<Box<dyn DynResource>> {
    find(type_name)?;
    let mut diags = Diagnostics::new();
    let resource = provider
        .resource(type_name, &mut diags)
        .with_context(|| format!("Unknown resource type: {}", type_name))?;
    print_diagnostics(&diags);
    if diags.has_error() {
        return Err(anyhow::anyhow!("Failed to configure {}", type_name));
    }
    Ok(resource)
}

fn read_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

/// Print diagnostics to stderr
pub fn print_diagnostics(diags: &Diagnostics) {
    for diagnostic in diags.iter() {
        eprintln!("{}", diagnostic);
    }
}

/// Print a lifecycle response; returns whether it carried errors
fn report(
    resource: &dyn DynResource,
    response: Response<Value>,
    options: OutputOptions,
) -> Result<bool> {
    print_diagnostics(&response.diagnostics);
    match response.state {
        StateChange::Set(state) => {
            let state = if options.show_sensitive {
                state
            } else {
                resource.schema().redact(&state)
            };
            print_json(&state)?;
        }
        StateChange::Removed => {
            eprintln!("{} removed from state", resource.type_name());
        }
        StateChange::Unchanged => {}
    }
    Ok(response.diagnostics.has_error())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"label\": \"hd\"}}").unwrap();
        assert_eq!(read_json(file.path()).unwrap(), json!({"label": "hd"}));

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, "label: hd").unwrap();
        assert!(read_json(bad.path()).is_err());
    }

    #[test]
    fn test_unknown_type() {
        assert!(print_schema("series").is_err());
        assert!(print_schema("tag").is_ok());
    }

    #[test]
    fn test_report_flags_errors() {
        let resource = find("tag").unwrap();
        let mut diagnostics = Diagnostics::new();
        diagnostics.add_error("Client Error", "boom");
        let response = Response {
            state: StateChange::Unchanged,
            diagnostics,
        };
        assert!(report(resource.as_ref(), response, OutputOptions::default()).unwrap());
        assert!(!report(resource.as_ref(), Response::removed(), OutputOptions::default()).unwrap());
    }
}
