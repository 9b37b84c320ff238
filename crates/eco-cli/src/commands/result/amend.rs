use std::collections::BTreeMap;

use eco_core::submission::ResponseInput;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_field;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    response: &ResponseInput,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let detail = ctx.service.amend_response(id, response, ctx.today).await?;
    output(&detail, flags.format)
}

/// Build the replacement answer from `--question`, `--answer` and repeated
/// `--field name=value` flags.
pub fn response_input(
    question: &str,
    answer: &str,
    fields: &[String],
    notes: Option<&str>,
    remarks: Option<&str>,
    expired: bool,
) -> anyhow::Result<ResponseInput> {
    let conditional_fields = fields
        .iter()
        .map(|raw| parse_field(raw))
        .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

    Ok(ResponseInput {
        question_id: question.to_string(),
        raw_answer: answer.to_string(),
        notes: notes.map(str::to_string),
        remarks: remarks.map(str::to_string),
        conditional_fields,
        expired,
    })
}
