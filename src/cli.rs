use clap::Parser;

/// Command-line surface. Credentials left out here are prompted for
/// interactively in `main`.
#[derive(Debug, Parser)]
#[command(name = "neveo-dl")]
#[command(about = "Pull recent family photos out of a Neveo account", long_about = None)]
pub struct Cli {
    /// Action to run. Only "list" is implemented.
    #[arg(long, default_value = "list")]
    pub action: String,

    /// Neveo account email.
    #[arg(long)]
    pub login: Option<String>,

    /// Neveo account password.
    #[arg(long)]
    pub password: Option<String>,

    /// Accepted for compatibility; the listing page size is fixed at 100.
    #[arg(long)]
    pub limit: Option<u32>,

    /// Base URL of the Neveo endpoint.
    #[arg(long, default_value = "https://neveo.io")]
    pub url: String,
}
