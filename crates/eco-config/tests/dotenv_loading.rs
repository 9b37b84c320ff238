//! `.env` loading from the project root.
//!
//! Kept in its own test binary because dotenv writes to the process
//! environment and `figment::Jail` only restores variables it set itself.

use eco_config::{ConfigError, EcoConfig};
use figment::Jail;

#[test]
fn project_dotenv_feeds_env_overrides() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "ECOINSPECT_COMPLIANCE__REFERENCE_DATE=2026-10-17\n")?;

        let config = EcoConfig::load_with_dotenv(jail.directory()).expect("config loads");
        assert_eq!(config.compliance.reference_date, "2026-10-17");
        Ok(())
    });
}

#[test]
fn missing_dotenv_is_not_an_error() {
    Jail::expect_with(|jail| {
        let config = EcoConfig::load_with_dotenv(jail.directory()).expect("config loads");
        assert_eq!(config.general.default_limit, 20);
        Ok(())
    });
}

#[test]
fn malformed_dotenv_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "this line has no equals sign\n")?;

        let err = EcoConfig::load_with_dotenv(jail.directory()).expect_err("dotenv should fail");
        assert!(matches!(err, ConfigError::Dotenv { .. }), "got {err:?}");
        Ok(())
    });
}
