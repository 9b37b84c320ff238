use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ecoinspect report`.
pub async fn handle(
    action: &ReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReportCommands::Responses {
            inspection,
            category,
        } => {
            let report = ctx
                .service
                .response_report(inspection.as_deref(), category.as_deref())
                .await?;
            output(&report, flags.format)
        }
        ReportCommands::Summary { inspection } => {
            let summary = ctx.service.verdict_summary(inspection.as_deref()).await?;
            output(&summary, flags.format)
        }
    }
}
