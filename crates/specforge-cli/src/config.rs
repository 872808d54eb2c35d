//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`SPECFORGE_REGISTRY`)
//! 3. Config file (`--config` path or the default location)
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub assistant: Option<String>,
    pub script: Option<String>,
    pub workflow: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// npm registry templates are installed from; `None` means npm default.
    pub registry_url: Option<String>,
    /// Override the template package name.
    pub package: Option<String>,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config`.  An
    /// explicitly named file must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => {
                let path = Self::config_path();
                match std::fs::read_to_string(&path) {
                    Ok(text) => toml::from_str(&text)
                        .with_context(|| format!("parsing config file {}", path.display()))?,
                    Err(_) => Self::default(),
                }
            }
        };

        if let Ok(url) = std::env::var("SPECFORGE_REGISTRY") {
            if !url.is_empty() {
                config.templates.registry_url = Some(url);
            }
        }

        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.specforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "specforge", "specforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".specforge.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_registry() {
        let cfg = AppConfig::default();
        assert!(cfg.templates.registry_url.is_none());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [defaults]
            assistant = "claude"

            [templates]
            registry_url = "https://registry.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.defaults.assistant.as_deref(), Some("claude"));
        assert_eq!(
            cfg.templates.registry_url.as_deref(),
            Some("https://registry.example.com")
        );
        assert!(cfg.defaults.workflow.is_none());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = PathBuf::from("/definitely/not/here.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
