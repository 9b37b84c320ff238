use eco_core::submission::{NewQuestion, ResponseInput, Submission};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::commands::evaluate::EvaluationInput;
use crate::output::output;

/// Input formats accepted by `--file` arguments.
const SCHEMA_NAMES: &[&str] = &["submission", "question", "response", "evaluation"];

/// Handle `ecoinspect schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_value(&args.type_name)?, flags.format)
}

fn schema_value(type_name: &str) -> anyhow::Result<serde_json::Value> {
    let schema = match type_name.trim().to_ascii_lowercase().as_str() {
        "submission" => schema_for!(Submission),
        "question" => schema_for!(NewQuestion),
        "response" => schema_for!(ResponseInput),
        "evaluation" => schema_for!(EvaluationInput),
        other => anyhow::bail!(
            "unknown schema '{other}' (expected one of: {})",
            SCHEMA_NAMES.join(", ")
        ),
    };
    Ok(serde_json::to_value(schema)?)
}
