use clap::Subcommand;

/// Inspection commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InspectionCommands {
    /// Schedule an inspection.
    Create {
        #[arg(long)]
        title: String,
        /// Scheduled date (`YYYY-MM-DD`, defaults to today).
        #[arg(long)]
        date: Option<String>,
    },
    /// List inspections, newest first.
    List,
    /// Get an inspection by ID.
    Get { id: String },
}
