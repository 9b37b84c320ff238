use clap::Subcommand;

/// Checklist question commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QuestionCommands {
    /// Create a question from flags or a JSON file.
    Create {
        /// JSON file holding the full question, including conditional logic.
        #[arg(long, conflicts_with_all = ["text", "kind", "option"])]
        file: Option<String>,
        #[arg(long, required_unless_present = "file")]
        text: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// free-text, single-choice or multi-choice.
        #[arg(long)]
        kind: Option<String>,
        /// Option label, optionally tagged: `Yes:positive`. Repeatable.
        #[arg(long)]
        option: Vec<String>,
        #[arg(long)]
        sort_order: Option<i64>,
    },
    /// List questions in checklist order.
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Get a question by ID.
    Get { id: String },
}
