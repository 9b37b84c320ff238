use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Establishment { action } => {
            commands::establishment::handle(&action, ctx, flags).await
        }
        Commands::Inspection { action } => commands::inspection::handle(&action, ctx, flags).await,
        Commands::Question { action } => commands::question::handle(&action, ctx, flags).await,
        Commands::Result { action } => commands::result::handle(&action, ctx, flags).await,
        Commands::Report { action } => commands::report::handle(&action, ctx, flags).await,
        Commands::Init(_) | Commands::Schema(_) | Commands::Classify(_) | Commands::Evaluate(_) => {
            unreachable!("init/schema/classify/evaluate are pre-dispatched in main")
        }
    }
}
