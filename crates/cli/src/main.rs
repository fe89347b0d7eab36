mod cli;
mod error;

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::cli::{Cli, Commands};
use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file from current directory
    dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let chain_override = cli.chain.clone();
    let rpc_url = cli.rpc_url.clone();

    match cli.command {
        Commands::Object { object, raw } => {
            cli::object::handle_object_command(rpc_url, object, raw, chain_override).await
        }
        Commands::Events { digest } => {
            cli::object::handle_events_command(rpc_url, digest, chain_override).await
        }
        Commands::Types => cli::object::handle_types_command(),
        Commands::Encode {
            schema,
            value,
            keys,
        } => cli::schema::handle_encode_command(schema, value, keys),
        Commands::Decode {
            schema,
            fields,
            keys,
        } => cli::schema::handle_decode_command(schema, fields, keys),
        Commands::Validate { schema, value } => cli::schema::handle_validate_command(schema, value),
        Commands::Keypair => cli::keypair::handle_keypair_command(),
        Commands::Demo { command } => {
            cli::demo::handle_demo_command(command, rpc_url, chain_override).await
        }
        Commands::Coin23 { command } => {
            cli::coin23::handle_coin23_command(command, rpc_url, chain_override).await
        }
    }
}
