use clap::Subcommand;

/// Report commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Positive/negative/N/A tallies over submitted answers.
    Responses {
        #[arg(long)]
        inspection: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Compliant versus not-compliant counts.
    Summary {
        #[arg(long)]
        inspection: Option<String>,
    },
}
