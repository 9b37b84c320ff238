use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    EstablishmentCommands, InspectionCommands, QuestionCommands, ReportCommands, ResultCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize ecoinspect for a project.
    Init(InitArgs),
    /// Print the JSON Schema of an input file format.
    Schema(SchemaArgs),
    /// Classify one answer.
    Classify(ClassifyArgs),
    /// Evaluate answers without storing anything.
    Evaluate(EvaluateArgs),
    /// Establishments under inspection.
    Establishment {
        #[command(subcommand)]
        action: EstablishmentCommands,
    },
    /// Scheduled inspections.
    Inspection {
        #[command(subcommand)]
        action: InspectionCommands,
    },
    /// Checklist questions.
    Question {
        #[command(subcommand)]
        action: QuestionCommands,
    },
    /// Inspection results.
    Result {
        #[command(subcommand)]
        action: ResultCommands,
    },
    /// Aggregate reports.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
}

/// Arguments for `ecoinspect init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory).
    pub path: Option<String>,
}

/// Arguments for `ecoinspect schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// One of: submission, question, response, evaluation.
    pub type_name: String,
}

/// Arguments for `ecoinspect classify`.
#[derive(Clone, Debug, Args)]
pub struct ClassifyArgs {
    pub answer: String,
    /// JSON file with the question's options; switches to option lookup.
    #[arg(long)]
    pub options: Option<String>,
}

/// Arguments for `ecoinspect evaluate`.
#[derive(Clone, Debug, Args)]
pub struct EvaluateArgs {
    /// JSON file with `questions` and `responses`.
    #[arg(long)]
    pub file: String,
    /// Reference date (`YYYY-MM-DD`) for expiry checks.
    #[arg(long)]
    pub today: Option<String>,
}
