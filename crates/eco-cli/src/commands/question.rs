use eco_core::enums::QuestionKind;
use eco_core::submission::NewQuestion;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::QuestionCommands;
use crate::commands::shared::input::read_json_file;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_enum, parse_option};
use crate::context::AppContext;
use crate::output::output;

/// Handle `ecoinspect question`.
pub async fn handle(
    action: &QuestionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        QuestionCommands::Create {
            file,
            text,
            category,
            kind,
            option,
            sort_order,
        } => {
            let input = match file {
                Some(path) => read_json_file::<NewQuestion>(path)?,
                None => question_from_flags(
                    text.as_deref().unwrap_or_default(),
                    category.as_deref(),
                    kind.as_deref(),
                    option,
                    *sort_order,
                )?,
            };
            let question = ctx.service.create_question(input).await?;
            output(&question, flags.format)
        }
        QuestionCommands::List { category } => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let questions = ctx
                .service
                .list_questions(category.as_deref(), limit)
                .await?;
            output(&questions, flags.format)
        }
        QuestionCommands::Get { id } => output(&ctx.service.get_question(id).await?, flags.format),
    }
}

/// A non-conditional question built from command-line flags. Kind defaults
/// to single choice when options are given, free text otherwise.
fn question_from_flags(
    text: &str,
    category: Option<&str>,
    kind: Option<&str>,
    options: &[String],
    sort_order: Option<i64>,
) -> anyhow::Result<NewQuestion> {
    let kind = match kind {
        Some(raw) => parse_enum::<QuestionKind>(raw, "kind")?,
        None if options.is_empty() => QuestionKind::FreeText,
        None => QuestionKind::SingleChoice,
    };
    Ok(NewQuestion {
        text: text.to_string(),
        category: category.unwrap_or("General").to_string(),
        kind,
        options: options.iter().map(|raw| parse_option(raw)).collect(),
        is_conditional: false,
        conditional_logic: None,
        sort_order: sort_order.unwrap_or_default(),
    })
}
