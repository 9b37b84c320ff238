use clap::Subcommand;

/// Inspection result commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ResultCommands {
    /// Submit one establishment's answers from a JSON file.
    Submit {
        #[arg(long)]
        file: String,
        /// Save as an editable draft instead of submitting.
        #[arg(long)]
        draft: bool,
    },
    /// Get a result with its responses and utilities.
    Get { id: String },
    /// List results, newest first.
    List {
        #[arg(long)]
        inspection: Option<String>,
    },
    /// Replace one answer on a draft result.
    Amend {
        id: String,
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
        /// Conditional field value as `name=value`. Repeatable.
        #[arg(long)]
        field: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        remarks: Option<String>,
        /// Mark the permit behind this answer as expired.
        #[arg(long)]
        expired: bool,
    },
    /// Submit a draft, recomputing its verdict.
    Finalize { id: String },
}
