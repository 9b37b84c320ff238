mod amend;
mod finalize;
mod get;
mod list;
mod submit;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ResultCommands;
use crate::context::AppContext;

/// Handle `ecoinspect result`.
pub async fn handle(
    action: &ResultCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ResultCommands::Submit { file, draft } => submit::run(file, *draft, ctx, flags).await,
        ResultCommands::Get { id } => get::run(id, ctx, flags).await,
        ResultCommands::List { inspection } => list::run(inspection.as_deref(), ctx, flags).await,
        ResultCommands::Amend {
            id,
            question,
            answer,
            field,
            notes,
            remarks,
            expired,
        } => {
            let response = amend::response_input(
                question,
                answer,
                field,
                notes.as_deref(),
                remarks.as_deref(),
                *expired,
            )?;
            amend::run(id, &response, ctx, flags).await
        }
        ResultCommands::Finalize { id } => finalize::run(id, ctx, flags).await,
    }
}
