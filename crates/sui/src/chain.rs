use anyhow::{Result, anyhow};
use std::env;
use std::fmt;
use std::str::FromStr;
use sui_rpc::Client as GrpcClient;
use sui_rpc::proto::sui::rpc::v2 as proto;
use tracing::debug;

/// Networks with a known public fullnode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chain {
    Devnet,
    Testnet,
    Mainnet,
    Localnet,
}

impl Chain {
    /// `SUI_CHAIN`, defaulting to devnet.
    pub fn from_env() -> Result<Self> {
        env::var("SUI_CHAIN")
            .unwrap_or_else(|_| "devnet".to_string())
            .parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Devnet => "devnet",
            Chain::Testnet => "testnet",
            Chain::Mainnet => "mainnet",
            Chain::Localnet => "localnet",
        }
    }

    pub fn fullnode_url(&self) -> &'static str {
        match self {
            Chain::Devnet => "https://fullnode.devnet.sui.io:443",
            Chain::Testnet => "https://fullnode.testnet.sui.io:443",
            Chain::Mainnet => "https://fullnode.mainnet.sui.io:443",
            Chain::Localnet => "http://127.0.0.1:9000",
        }
    }
}

impl FromStr for Chain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "devnet" => Ok(Chain::Devnet),
            "testnet" => Ok(Chain::Testnet),
            "mainnet" => Ok(Chain::Mainnet),
            "localnet" => Ok(Chain::Localnet),
            other => Err(anyhow!(
                "Invalid chain '{}'. Must be one of: devnet, testnet, mainnet, localnet",
                other
            )),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the RPC URL with the following priority:
/// 1. explicit `rpc_url`
/// 2. `SUI_RPC_URL`
/// 3. `SUI_RPC_URL_<CHAIN>` where the chain comes from `chain_override` or `SUI_CHAIN`
/// 4. the public fullnode of that chain
pub fn resolve_rpc_url(rpc_url: Option<String>, chain_override: Option<String>) -> Result<String> {
    if let Some(url) = rpc_url {
        return Ok(url);
    }

    if let Ok(custom_url) = env::var("SUI_RPC_URL") {
        return Ok(custom_url);
    }

    let chain = match chain_override {
        Some(chain) => chain.parse()?,
        None => Chain::from_env()?,
    };

    let chain_specific_var = format!("SUI_RPC_URL_{}", chain.as_str().to_uppercase());
    if let Ok(chain_url) = env::var(&chain_specific_var) {
        debug!("Using {} for {}", chain_specific_var, chain);
        return Ok(chain_url);
    }

    Ok(chain.fullnode_url().to_string())
}

/// Reference gas price of the current epoch.
pub async fn get_reference_gas_price(client: &mut GrpcClient) -> Result<u64> {
    let mut ledger = client.ledger_client();
    let mut request = proto::GetEpochRequest::default();
    request.read_mask = Some(prost_types::FieldMask {
        paths: vec!["reference_gas_price".into()],
    });

    let price = match ledger.get_epoch(request).await {
        Ok(resp) => resp
            .into_inner()
            .epoch
            .and_then(|e| e.reference_gas_price)
            .unwrap_or(1_000),
        Err(e) => {
            debug!("GetEpoch failed ({}); falling back to 1000 MIST", e);
            1_000
        }
    };
    debug!("Using reference gas price: {}", price);
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_parse() {
        assert_eq!("Testnet".parse::<Chain>().unwrap(), Chain::Testnet);
        assert_eq!(Chain::Mainnet.to_string(), "mainnet");
        assert!("moonnet".parse::<Chain>().is_err());
    }

    #[test]
    fn test_explicit_url_wins() {
        let url = resolve_rpc_url(Some("http://localhost:9000".into()), Some("mainnet".into()))
            .unwrap();
        assert_eq!(url, "http://localhost:9000");
    }

    #[test]
    fn test_invalid_chain_override() {
        // An explicit SUI_RPC_URL in the environment short-circuits chain validation.
        if env::var("SUI_RPC_URL").is_err() {
            assert!(resolve_rpc_url(None, Some("moonnet".into())).is_err());
        }
    }
}
