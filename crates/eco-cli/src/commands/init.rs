use std::path::{Path, PathBuf};

use anyhow::Context;
use eco_config::{EcoConfig, PROJECT_DIR};
use eco_db::service::EcoService;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

const DEFAULT_CONFIG: &str = r#"# EcoInspect project configuration.
# Environment variables override these values, e.g. ECOINSPECT_DATABASE__PATH.

[database]
path = ".ecoinspect/ecoinspect.db"

[general]
default_limit = 20

[compliance]
# Fixed date (YYYY-MM-DD) for permit expiry checks. Empty uses today.
reference_date = ""

# Extra recommendation rules, checked before the built-in ones.
# [[compliance.category_rules]]
# keywords = ["sanitary"]
# category = "comply_lacking_permits"
"#;

#[derive(Debug, Serialize)]
struct InitResponse {
    project_root: PathBuf,
    config_path: PathBuf,
    config_created: bool,
    database: String,
}

/// Handle `ecoinspect init`.
pub async fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = match args.path.as_deref().or(flags.project.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let response = initialize(&root).await?;
    output(&response, flags.format)
}

async fn initialize(root: &Path) -> anyhow::Result<InitResponse> {
    let state_dir = root.join(PROJECT_DIR);
    std::fs::create_dir_all(&state_dir)
        .with_context(|| format!("failed to create {}", state_dir.display()))?;

    let config_path = EcoConfig::project_config_path(root);
    let config_created = !config_path.exists();
    if config_created {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
    }

    let config = bootstrap::load_config(root)?;
    let db_path = config.database.resolve(root);
    if let Some(parent) = db_path.parent().filter(|_| !config.database.is_in_memory()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let database = db_path.to_string_lossy().into_owned();
    EcoService::new_local(&database)
        .await
        .with_context(|| format!("failed to create database at {database}"))?;

    tracing::info!(root = %root.display(), %database, config_created, "project initialized");
    Ok(InitResponse {
        project_root: root.to_path_buf(),
        config_path,
        config_created,
        database,
    })
}
