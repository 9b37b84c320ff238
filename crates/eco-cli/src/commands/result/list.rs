use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    inspection: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    let results = ctx.service.list_results(inspection, limit).await?;
    output(&results, flags.format)
}
