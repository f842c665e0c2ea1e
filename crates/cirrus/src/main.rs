mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cirrus")]
#[command(
    about = "Provider bootstrap and data mapping for Outscale / AWS-compatible clouds",
    long_about = None
)]
struct Cli {
    /// Log at debug level, SDK wire logging included
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a provider configuration file without contacting the cloud
    Validate {
        /// Configuration file (discovered when omitted)
        file: Option<PathBuf>,
    },
    /// Build a session and print the resolved region and account
    Configure {
        /// Configuration file (discovered when omitted)
        file: Option<PathBuf>,
    },
    /// Print a JSON document in canonical form, or check a YAML one
    Normalize {
        file: PathBuf,
    },
    /// Convert configured blocks into API request shapes
    #[command(subcommand)]
    Expand(ExpandCommands),
    /// List the resource types served by the provider
    Resources,
    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ExpandCommands {
    /// Load balancer `listener` blocks
    Listeners {
        file: PathBuf,
    },
    /// Security group `ingress` blocks
    Ingress {
        file: PathBuf,
        /// Id of the group the rules belong to
        #[arg(long)]
        group_id: String,
        #[arg(long)]
        group_name: Option<String>,
        /// VPC of the group; classic mode when omitted
        #[arg(long)]
        vpc_id: Option<String>,
        /// Account owning the group
        #[arg(long)]
        owner_id: Option<String>,
    },
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Version => {
            println!("cirrus {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Validate { file } => {
            commands::validate::handle(file)?;
        }
        Commands::Configure { file } => {
            commands::configure::handle(file).await?;
        }
        Commands::Normalize { file } => {
            commands::normalize::handle(&file)?;
        }
        Commands::Expand(ExpandCommands::Listeners { file }) => {
            commands::expand::listeners(&file)?;
        }
        Commands::Expand(ExpandCommands::Ingress {
            file,
            group_id,
            group_name,
            vpc_id,
            owner_id,
        }) => {
            let group = cirrus_structure::api::SecurityGroup {
                group_id,
                group_name: group_name.unwrap_or_default(),
                vpc_id,
                owner_id,
            };
            commands::expand::ingress(&file, &group)?;
        }
        Commands::Resources => {
            commands::resources::handle();
        }
    }

    Ok(())
}
