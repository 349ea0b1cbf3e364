//! Tool settings.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns settings; the core crate never sees them.  Not to be
//! confused with the configuration *document* (`curio.config.yml`), which
//! is project data handled by the core.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site via [`AppConfig::catalog_root`]
//!    and [`AppConfig::document_path`])
//! 2. `CURIO__*` environment variables, `__` separating nested keys
//!    (`CURIO__CATALOG__ROOT`)
//! 3. `settings.toml` in the platform config directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// Default document file name.
pub const DEFAULT_DOCUMENT: &str = "curio.config.yml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Artifact library settings.
    pub catalog: CatalogConfig,
    /// Configuration document settings.
    pub document: DocumentConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub path: PathBuf,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DOCUMENT),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load settings from the default location plus the environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path` (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("CURIO").separator("__"))
            .build()
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Path to the settings file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.curio.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "curio", "curio")
            .map(|d| d.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from(".curio.toml"))
    }

    /// `flag` (from `--catalog` or `CURIO_CATALOG_ROOT`), then settings,
    /// then the current directory.
    pub fn catalog_root(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.catalog.root.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Positional argument, then `--config`, then settings.
    pub fn document_path(&self, positional: Option<&Path>, flag: Option<&Path>) -> PathBuf {
        positional
            .or(flag)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.document.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn default_document_path() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.document.path, PathBuf::from(DEFAULT_DOCUMENT));
        assert!(cfg.catalog.root.is_none());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(cfg.document.path, PathBuf::from(DEFAULT_DOCUMENT));
    }

    #[test]
    fn load_reads_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[catalog]\nroot = \"/srv/library\"\n\n[output]\nno_color = true").unwrap();

        let cfg = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(cfg.catalog.root, Some(PathBuf::from("/srv/library")));
        assert!(cfg.output.no_color);
        assert_eq!(cfg.document.path, PathBuf::from(DEFAULT_DOCUMENT));
    }

    #[test]
    fn catalog_root_precedence() {
        let mut cfg = AppConfig::default();
        assert_eq!(cfg.catalog_root(None), PathBuf::from("."));

        cfg.catalog.root = Some("/lib".into());
        assert_eq!(cfg.catalog_root(None), PathBuf::from("/lib"));
        assert_eq!(cfg.catalog_root(Some(Path::new("/flag"))), PathBuf::from("/flag"));
    }

    #[test]
    fn document_path_precedence() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.document_path(None, None), PathBuf::from(DEFAULT_DOCUMENT));
        assert_eq!(
            cfg.document_path(None, Some(Path::new("team.yml"))),
            PathBuf::from("team.yml")
        );
        assert_eq!(
            cfg.document_path(Some(Path::new("mine.yml")), Some(Path::new("team.yml"))),
            PathBuf::from("mine.yml")
        );
    }

    #[test]
    fn config_path_is_absolute_or_relative() {
        let p = AppConfig::config_path();
        assert!(p.ends_with("settings.toml") || p.ends_with(".curio.toml"));
    }
}
