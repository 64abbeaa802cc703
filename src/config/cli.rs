use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "trial-link")]
#[command(about = "Clinical trials and glossary API clients with redirect glue")]
pub struct CliArgs {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "trial-link.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}
