//! Tests against a live network. Run with `cargo test -- --ignored` and
//! `SUI_CHAIN`, `SUI_ADDRESS` and `SUI_SECRET_KEY` set (a `.env` file works).

use bindings::framework::coin::Coin;
use sui_client::SharedSuiState;

fn init_test() {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[tokio::test]
#[ignore]
async fn test_decode_owned_coins() {
    init_test();
    let rpc_url = sui_client::resolve_rpc_url(None, None).unwrap();
    SharedSuiState::initialize(&rpc_url).await.unwrap();
    let address = SharedSuiState::get_instance().unwrap().get_sui_address().unwrap();

    let coins = bindings::fetch_owned::<Coin>(&address.to_string()).await.unwrap();
    assert!(!coins.is_empty(), "{} owns no coins", address);

    let (id, coin) = &coins[0];
    let loaded = bindings::fetch_and_decode(id).await.unwrap();
    assert_eq!(loaded.downcast_ref::<Coin>(), Some(coin));
}
