use eco_core::submission::Submission;

use crate::cli::GlobalFlags;
use crate::commands::shared::input::read_json_file;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    file: &str,
    draft: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let submission: Submission = read_json_file(file)?;
    let detail = ctx.service.submit_result(&submission, draft, ctx.today).await?;

    tracing::info!(
        result = %detail.result.id,
        verdict = detail.result.verdict.as_str(),
        draft,
        "result recorded"
    );
    output(&detail, flags.format)
}
