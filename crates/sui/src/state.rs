use std::sync::{Arc, OnceLock};
use sui_rpc::Client;
use sui_sdk_types as sui;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::{Result, SuiClientError};
use crate::signer::Signer;

static SHARED_SUI_STATE: OnceLock<Arc<SharedSuiState>> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::const_new(());

/// Process-wide gRPC client plus the default signer, initialised once.
pub struct SharedSuiState {
    sui_client: Client,
    rpc_url: String,
    signer: Option<Signer>,
}

impl SharedSuiState {
    pub fn is_initialized() -> bool {
        SHARED_SUI_STATE.get().is_some()
    }

    /// Initialise without a signer. Enough for fetching and decoding objects.
    pub async fn initialize_read_only(rpc_url: &str) -> Result<()> {
        Self::initialize_inner(rpc_url, None).await
    }

    /// Initialise with the signer from `SUI_SECRET_KEY`.
    pub async fn initialize(rpc_url: &str) -> Result<()> {
        let signer = Signer::from_env()?;
        Self::initialize_inner(rpc_url, Some(signer)).await
    }

    /// Initialise with an explicit signer.
    pub async fn initialize_with_signer(rpc_url: &str, signer: Signer) -> Result<()> {
        Self::initialize_inner(rpc_url, Some(signer)).await
    }

    async fn initialize_inner(rpc_url: &str, signer: Option<Signer>) -> Result<()> {
        if Self::is_initialized() {
            return Ok(());
        }

        let _guard = INIT_LOCK.lock().await;
        // Another task may have won the race while we waited.
        if Self::is_initialized() {
            return Ok(());
        }

        info!("Initializing SharedSuiState with RPC URL: {}", rpc_url);
        let sui_client = Client::new(rpc_url).map_err(|e| {
            SuiClientError::RpcConnectionError(format!("Failed to create Sui client: {}", e))
        })?;

        match &signer {
            Some(s) => info!("Initialized SharedSuiState with address: {}", s.address),
            None => info!("Initialized SharedSuiState in read-only mode"),
        }

        let state = Arc::new(Self {
            sui_client,
            rpc_url: rpc_url.to_string(),
            signer,
        });
        SHARED_SUI_STATE
            .set(state)
            .map_err(|_| anyhow::anyhow!("SharedSuiState was initialized concurrently"))?;
        Ok(())
    }

    pub fn get_instance() -> Result<Arc<SharedSuiState>> {
        SHARED_SUI_STATE
            .get()
            .cloned()
            .ok_or(SuiClientError::NotInitialized)
    }

    pub fn get_sui_client(&self) -> Client {
        self.sui_client.clone()
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn signer(&self) -> Option<&Signer> {
        self.signer.as_ref()
    }

    pub fn signer_required(&self) -> Result<&Signer> {
        self.signer.as_ref().ok_or(SuiClientError::SignerNotConfigured)
    }

    pub fn get_sui_address(&self) -> Option<sui::Address> {
        self.signer.as_ref().map(|s| s.address)
    }
}
