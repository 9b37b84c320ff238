use crate::cli::GlobalFlags;
use crate::cli::subcommands::InspectionCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ecoinspect inspection`.
pub async fn handle(
    action: &InspectionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        InspectionCommands::Create { title, date } => {
            let scheduled_on = date
                .as_deref()
                .map(|raw| parse_date(raw, "date"))
                .transpose()?
                .unwrap_or(ctx.today);
            let inspection = ctx.service.create_inspection(title, scheduled_on).await?;
            output(&inspection, flags.format)
        }
        InspectionCommands::List => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            output(&ctx.service.list_inspections(limit).await?, flags.format)
        }
        InspectionCommands::Get { id } => {
            output(&ctx.service.get_inspection(id).await?, flags.format)
        }
    }
}
