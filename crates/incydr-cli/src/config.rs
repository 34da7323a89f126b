use crate::types::ShowFormat;
use anyhow::{Context, Result};
use incydr_models::Resource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. INCYDR_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory
/// 4. ~/.incydr (fallback for systems without XDG)
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(&path.to_string_lossy()));
    }

    if let Ok(env_path) = std::env::var("INCYDR_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("incydr").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".incydr").join("config.toml"));
    }

    anyhow::bail!("Could not determine config path: no HOME or XDG config directory found")
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default rendering for `show`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ShowFormat>,
}

/// Per-resource defaults, keyed by resource name (`alert`, `file-event`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Comma-separated export columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub resources: HashMap<String, ResourceConfig>,
}

impl Config {
    /// Load from the resolved path; a missing file means defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = resolve_config_path(explicit_path)?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    pub fn resource(&self, resource: Resource) -> Option<&ResourceConfig> {
        self.resources.get(resource.as_str())
    }

    /// Include list for `resource`: the explicit one if given, else the configured one.
    pub fn include_for(&self, resource: Resource, explicit: Vec<String>) -> Vec<String> {
        if !explicit.is_empty() {
            return explicit;
        }
        self.resource(resource)
            .map(|r| r.include.clone())
            .unwrap_or_default()
    }

    pub fn columns_for(&self, resource: Resource, explicit: Option<String>) -> Option<String> {
        explicit.or_else(|| self.resource(resource).and_then(|r| r.columns.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.resources.is_empty());
        assert_eq!(config.output.format, None);
    }

    #[test]
    fn test_missing_file_is_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.output.format = Some(ShowFormat::Json);
        config.resources.insert(
            "file-event".to_string(),
            ResourceConfig {
                include: vec!["event.id".to_string(), "file.*".to_string()],
                columns: None,
            },
        );
        std::fs::write(&config_path, toml::to_string_pretty(&config)?)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_parses_handwritten_file() -> Result<()> {
        let config: Config = toml::from_str(
            r#"
            [output]
            format = "card"

            [resources.alert]
            columns = "id, name"
            "#,
        )?;
        assert_eq!(config.output.format, Some(ShowFormat::Card));
        assert_eq!(
            config.columns_for(Resource::Alert, None).as_deref(),
            Some("id, name")
        );
        assert_eq!(
            config.columns_for(Resource::Alert, Some("id".to_string())).as_deref(),
            Some("id")
        );
        assert!(config.include_for(Resource::FileEvent, Vec::new()).is_empty());
        Ok(())
    }

    #[test]
    fn test_explicit_path_wins() -> Result<()> {
        let path = resolve_config_path(Some(Path::new("/tmp/incydr.toml")))?;
        assert_eq!(path, PathBuf::from("/tmp/incydr.toml"));
        Ok(())
    }
}
