//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::CrmConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<CrmConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: CrmConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("crm-config-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_file() {
        let path = write_temp("[engine]\nkind = \"hyper\"\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.engine.kind, crate::engine::EngineKind::Hyper);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_reports_validation_errors() {
        let path = write_temp("[listener]\nbind_address = \"not an address\"\n");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("listener.bind_address"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_rejects_unknown_engine() {
        let path = write_temp("[engine]\nkind = \"fiber\"\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/no/such/crm.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
