//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`RenderOptions`] part.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`STENCIL_TEMPLATES_DIR`, `NO_COLOR`; `.env` honoured)
//! 3. Config file (`--config FILE`, else the platform config directory)
//! 4. Built-in defaults (always present)
//!
//! # File format
//!
//! ```toml
//! [templates]
//! dir = "./templates"
//! default_template = "page.tmpl"
//!
//! [render]
//! template_keyword = "template"
//! ignore_template_errors = false
//! include_front_matter = true
//!
//! [pipeline]
//! chunk_size = 8192
//!
//! [output]
//! no_color = false
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stencil_core::domain::RenderOptions;

/// Default number of bytes fed to the stage per call.
pub const DEFAULT_CHUNK_SIZE: u64 = 8 * 1024;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Template lookup settings.
    pub templates: TemplateConfig,
    /// Options handed to the template stage.
    pub render: RenderOptions,
    /// How input files are fed to the stage.
    pub pipeline: PipelineConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub dir: Option<PathBuf>,
    pub default_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub chunk_size: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicit `config_file` must exist. Without one, the default
    /// location is read when present and skipped otherwise.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::config_path();
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read and parse one TOML config file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;

        anyhow::ensure!(
            config.pipeline.chunk_size > 0,
            "pipeline.chunk_size in '{}' must be at least 1",
            path.display()
        );

        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stencil.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(body: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, body).unwrap();
        (tmp, path)
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.pipeline.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(cfg.render, RenderOptions::default());
        assert!(cfg.templates.dir.is_none());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let (_tmp, path) = write_config(
            r#"
            [templates]
            dir = "site/templates"

            [render]
            template_keyword = "layout"
            "#,
        );

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.templates.dir, Some(PathBuf::from("site/templates")));
        assert_eq!(cfg.render.template_keyword, "layout");
        assert!(cfg.render.include_front_matter);
        assert_eq!(cfg.pipeline.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        let err = AppConfig::load(Some(&missing)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }

    #[test]
    fn malformed_file_is_error() {
        let (_tmp, path) = write_config("[render\n");
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config file"));
    }

    #[test]
    fn zero_chunk_size_is_error() {
        let (_tmp, path) = write_config("[pipeline]\nchunk_size = 0\n");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut cfg = AppConfig::default();
        cfg.templates.default_template = Some("page.tmpl".into());
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
