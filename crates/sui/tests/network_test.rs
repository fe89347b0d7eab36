//! Tests against a live fullnode. Run with `cargo test -- --ignored` and a
//! `.env` providing `SUI_CHAIN` (and `SUI_SECRET_KEY` for the signer tests).

use anyhow::Result;
use sui_client::constants::CLOCK_OBJECT_ID;
use sui_client::{SharedSuiState, Signer, fetch_object_bcs, fetch_object_json, list_coins};
use tracing::info;

async fn init_test() -> Result<()> {
    let _ = dotenvy::dotenv();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let rpc_url = sui_client::resolve_rpc_url(None, None)?;
    SharedSuiState::initialize_read_only(&rpc_url).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_fetch_clock() -> Result<()> {
    init_test().await?;

    let raw = fetch_object_bcs(CLOCK_OBJECT_ID).await?;
    info!("Clock: type={} version={} bytes={}", raw.object_type, raw.version, raw.bcs.len());
    assert!(raw.object_type.ends_with("::clock::Clock"), "{}", raw.object_type);
    // UID (32 bytes) followed by timestamp_ms: u64
    assert_eq!(raw.bcs.len(), 40);

    let parsed = fetch_object_json("0x6").await?;
    assert_eq!(parsed["dataType"], "moveObject");
    assert!(parsed["fields"]["timestamp_ms"].is_string() || parsed["fields"]["timestamp_ms"].is_number());
    Ok(())
}

#[tokio::test]
#[ignore = "requires network access and SUI_SECRET_KEY"]
async fn test_signer_has_gas() -> Result<()> {
    init_test().await?;

    let signer = Signer::from_env()?;
    let mut client = SharedSuiState::get_instance()?.get_sui_client();
    let coins = list_coins(&mut client, signer.address).await?;
    info!("{} owns {} SUI coins", signer.address, coins.len());
    assert!(!coins.is_empty(), "fund {} before running network tests", signer.address);
    Ok(())
}
