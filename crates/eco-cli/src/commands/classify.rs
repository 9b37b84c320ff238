use eco_compliance::options::freeze_options;
use eco_compliance::{classify_by_options, classify_freeform};
use eco_core::responses::ClassifyResponse;
use eco_core::submission::OptionInput;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClassifyArgs;
use crate::commands::shared::input::read_json_file;
use crate::output::output;

/// Handle `ecoinspect classify`.
pub fn handle(args: &ClassifyArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let options = args
        .options
        .as_deref()
        .map(read_json_file::<Vec<OptionInput>>)
        .transpose()?;
    output(&classify(&args.answer, options.as_deref()), flags.format)
}

/// Option lookup when options are supplied, keyword heuristics otherwise.
fn classify(answer: &str, options: Option<&[OptionInput]>) -> ClassifyResponse {
    let (classification, path) = match options {
        Some(options) => (classify_by_options(answer, &freeze_options(options)), "options"),
        None => (classify_freeform(answer), "freeform"),
    };
    ClassifyResponse {
        answer: answer.to_string(),
        classification,
        path: path.to_string(),
    }
}
