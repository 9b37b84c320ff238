use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use eco_compliance::{CategoryRule, CategoryRules};
use eco_config::EcoConfig;

use crate::cli::GlobalFlags;
use crate::context;

/// Load `.env` and the layered configuration for `project_root`.
pub fn load_config(project_root: &Path) -> anyhow::Result<EcoConfig> {
    EcoConfig::load_with_dotenv(project_root).map_err(anyhow::Error::from)
}

/// Configuration for commands that may run outside a project: the
/// `--project` root or the nearest `.ecoinspect` ancestor, else the current
/// directory.
pub fn load_config_best_effort(flags: &GlobalFlags) -> anyhow::Result<EcoConfig> {
    let root = match flags.project.as_deref() {
        Some(path) => context::explicit_project_root(path)?,
        None => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            context::find_project_root(&cwd).unwrap_or(cwd)
        }
    };
    load_config(&root)
}

/// Configured reference date, or the local calendar date.
pub fn reference_date(config: &EcoConfig) -> anyhow::Result<NaiveDate> {
    Ok(config
        .compliance
        .reference_date()?
        .unwrap_or_else(|| chrono::Local::now().date_naive()))
}

/// Built-in category rules with configured rules consulted first.
pub fn category_rules(config: &EcoConfig) -> CategoryRules {
    CategoryRules::default().with_rules_first(
        config
            .compliance
            .category_rules
            .iter()
            .map(|rule| CategoryRule::new(rule.keywords.iter().cloned(), rule.category)),
    )
}
