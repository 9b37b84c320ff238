//! # eco-config
//!
//! Layered configuration loading for EcoInspect using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ECOINSPECT_*` prefix, `__` as separator)
//! 2. Project-level `.ecoinspect/config.toml`
//! 3. User-level `~/.config/ecoinspect/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ECOINSPECT_DATABASE__PATH` -> `database.path`,
//! `ECOINSPECT_COMPLIANCE__REFERENCE_DATE` -> `compliance.reference_date`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use eco_config::EcoConfig;
//!
//! let config = EcoConfig::load_with_dotenv(std::path::Path::new(".")).expect("config");
//! println!("database at {}", config.database.path);
//! ```

mod compliance;
mod database;
mod error;
mod general;

pub use compliance::{CategoryRuleConfig, ComplianceConfig};
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Per-project state directory, holding `config.toml` and the database.
pub const PROJECT_DIR: &str = ".ecoinspect";

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "ECOINSPECT_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EcoConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub compliance: ComplianceConfig,
}

impl EcoConfig {
    /// Load configuration for the project rooted at `project_root`.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load_from(project_root: &Path) -> Result<Self, ConfigError> {
        Self::figment_at(project_root)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load `<project_root>/.env` into the process environment, then the
    /// layered configuration. A missing `.env` is not an error; variables
    /// already set in the environment are not overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Dotenv`] when `.env` exists but cannot be
    /// parsed, and [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load_with_dotenv(project_root: &Path) -> Result<Self, ConfigError> {
        Self::load_dotenv(project_root)?;
        Self::load_from(project_root)
    }

    /// Build the provider chain for a project root.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    pub fn figment_at(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = Self::project_config_path(project_root);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// `<project_root>/.ecoinspect/config.toml`
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join("config.toml")
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ecoinspect").join("config.toml"))
    }

    fn load_dotenv(project_root: &Path) -> Result<(), ConfigError> {
        let path = project_root.join(".env");
        if !path.exists() {
            return Ok(());
        }
        dotenvy::from_path(&path)
            .map_err(|source| ConfigError::Dotenv { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = EcoConfig::default();
        assert_eq!(config.database.path, ".ecoinspect/ecoinspect.db");
        assert_eq!(config.general.default_limit, 20);
        assert!(config.compliance.category_rules.is_empty());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: EcoConfig = EcoConfig::figment_at(Path::new(".")).extract()?;
            assert_eq!(config.general.default_limit, 20);
            assert!(config.compliance.reference_date.is_empty());
            Ok(())
        });
    }
}
