use clap::Subcommand;

/// Establishment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EstablishmentCommands {
    /// Register an establishment.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: Option<String>,
        #[arg(long = "type")]
        business_type: Option<String>,
    },
    /// List establishments.
    List,
    /// Get an establishment by ID.
    Get { id: String },
}
