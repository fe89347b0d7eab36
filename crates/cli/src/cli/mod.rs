mod commands;
pub mod coin23;
pub mod demo;
pub mod keypair;
pub mod object;
pub mod schema;

pub use commands::*;

use crate::error::{CliError, Result};
use sui_client::{SharedSuiState, Signer};

/// Connect without a signer.
pub async fn connect_read_only(
    rpc_url: Option<String>,
    chain_override: Option<String>,
) -> Result<()> {
    let rpc_url = sui_client::resolve_rpc_url(rpc_url, chain_override)?;
    SharedSuiState::initialize_read_only(&rpc_url).await?;
    Ok(())
}

/// Connect and load the signer from `secret_key` or `SUI_SECRET_KEY`.
pub async fn connect_with_signer(
    rpc_url: Option<String>,
    chain_override: Option<String>,
    secret_key: Option<&str>,
) -> Result<Signer> {
    let signer = Signer::from_key_or_env(secret_key)
        .map_err(|e| CliError::ConfigError(format!("no usable signer: {}", e)))?;
    let rpc_url = sui_client::resolve_rpc_url(rpc_url, chain_override)?;
    SharedSuiState::initialize_with_signer(&rpc_url, signer.clone()).await?;
    Ok(signer)
}
