use crate::cli::GlobalFlags;
use crate::cli::subcommands::EstablishmentCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ecoinspect establishment`.
pub async fn handle(
    action: &EstablishmentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EstablishmentCommands::Create {
            name,
            address,
            business_type,
        } => {
            let establishment = ctx
                .service
                .create_establishment(name, address.as_deref(), business_type.as_deref())
                .await?;
            output(&establishment, flags.format)
        }
        EstablishmentCommands::List => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let establishments = ctx.service.list_establishments(limit).await?;
            output(&establishments, flags.format)
        }
        EstablishmentCommands::Get { id } => {
            output(&ctx.service.get_establishment(id).await?, flags.format)
        }
    }
}
