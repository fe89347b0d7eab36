// Module declarations
pub mod chain;
pub mod coin;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod locks;
pub mod parse;
pub mod signer;
pub mod state;
pub mod transactions;

// Re-export commonly used types
pub use chain::{Chain, get_reference_gas_price, resolve_rpc_url};
pub use coin::{CoinInfo, fetch_gas_coin, list_coins};
pub use error::{Result, SuiClientError};
pub use fetch::{
    RawObject, fetch_object_bcs, fetch_object_json, fetch_transaction_events, list_owned_objects,
};
pub use locks::{LockGuard, LockManager, coin_locks, object_locks};
pub use signer::{Signer, derive_address, encode_secret_key, parse_secret_key};
pub use state::SharedSuiState;
pub use transactions::{CreatedObject, ExecuteOptions, TransactionBlockResult, execute_move_calls};

// Builder types used by move-call closures
pub use sui_sdk_types::{Address, Argument};
pub use sui_transaction_builder::TransactionBuilder;
