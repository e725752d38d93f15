use clap::{Parser, Subcommand};

/// Course catalog service
#[derive(Parser)]
#[command(name = "catalog", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind (overrides CATALOG_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
