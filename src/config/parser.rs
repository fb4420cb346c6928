use std::path::Path;

use tracing::{debug, warn};

use crate::errors::DashError;
use super::schema::CONFIG_SCHEMA;
use super::security::validate_content;
use super::types::{RiskdeckConfig, Settings};

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<RiskdeckConfig, DashError> {
    if !path.exists() {
        return Err(DashError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(DashError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;
    if yaml.is_null() {
        debug!(path = %path.display(), "Empty config file, using defaults");
        return Ok(RiskdeckConfig::default());
    }

    validate_content(&yaml)?;
    validate_schema(&yaml)?;

    let config: RiskdeckConfig = serde_yaml::from_value(yaml)?;
    Ok(config)
}

/// Resolve effective settings from an optional config file, rejecting values
/// the scan engine cannot run with.
pub async fn load_settings(path: Option<&Path>) -> Result<Settings, DashError> {
    let config = match path {
        Some(p) => parse_config(p).await?,
        None => RiskdeckConfig::default(),
    };
    let settings = Settings::from_config(&config)?;
    settings.build_driver()?;
    Ok(settings)
}

/// Structural check against the JSON schema. Advisory: problems are logged,
/// typed parsing and semantic validation decide what is fatal.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), DashError> {
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| DashError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| DashError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}
