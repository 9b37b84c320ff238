use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let detail = ctx.service.finalize_result(id, ctx.today).await?;
    output(&detail, flags.format)
}
