use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use eco_config::EcoConfig;
use eco_db::service::EcoService;

use crate::bootstrap;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: EcoService,
    pub config: EcoConfig,
    /// Reference date for expiry checks.
    pub today: NaiveDate,
}

impl AppContext {
    /// Open the project database and apply configured evaluation settings.
    pub async fn init(project_root: PathBuf, config: EcoConfig) -> anyhow::Result<Self> {
        let db_path = config.database.resolve(&project_root);
        let db_path = db_path.to_string_lossy();

        let today = bootstrap::reference_date(&config)?;
        let service = EcoService::new_local(&db_path)
            .await
            .with_context(|| format!("failed to open database at {db_path}"))?
            .with_rules(bootstrap::category_rules(&config));

        tracing::debug!(
            root = %project_root.display(),
            db = %db_path,
            %today,
            "application context ready"
        );

        Ok(Self {
            service,
            config,
            today,
        })
    }
}
