use clap::{Parser, Subcommand};

mod algorithm;
mod convert;
mod dump;
mod error;
mod output;
mod tsr;
mod utils;

use error::Result;

#[derive(Parser)]
#[command(name = "berder")]
#[command(about = "BER to DER canonicalization toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert BER input to its DER encoding
    Convert {
        #[command(flatten)]
        config: convert::Config,
    },
    /// Show the value tree of BER input
    Dump {
        #[command(flatten)]
        config: dump::Config,
    },
    /// Inspect an RFC 3161 time-stamp response
    Timestamp {
        #[command(flatten)]
        config: tsr::Config,
    },
    /// Resolve a digest and signature OID pair to a signature algorithm
    Oid {
        #[command(flatten)]
        config: algorithm::Config,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { config } => convert::execute(config)?,
        Commands::Dump { config } => dump::execute(config)?,
        Commands::Timestamp { config } => tsr::execute(config)?,
        Commands::Oid { config } => algorithm::execute(config)?,
    }

    Ok(())
}
