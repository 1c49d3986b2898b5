use anyhow::Result;
use clap::{Parser, Subcommand};

/// mealweek - Weekly dinner planning with a local language model
#[derive(Parser)]
#[command(name = "mealweek")]
#[command(about = "Plan a week of dinners and build the shopping list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = mealweek::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Held until exit so buffered file logs are flushed
    let _guard = mealweek::observability::init_observability(&config.logging)?;

    match cli.command {
        Commands::Serve { host, port } => mealweek::server::serve(config, host, port).await,
    }
}
