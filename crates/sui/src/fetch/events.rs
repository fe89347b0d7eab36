use serde_json::{Value, json};
use sui_rpc::field::{FieldMask, FieldMaskUtil};
use sui_rpc::proto::sui::rpc::v2 as proto;
use tracing::debug;

use crate::error::{Result, SuiClientError};
use crate::parse::proto_to_json;
use crate::state::SharedSuiState;

/// Events emitted by a transaction, one JSON object per event with its type,
/// emitting module, sender and decoded fields.
pub async fn fetch_transaction_events(tx_digest: &str) -> Result<Vec<Value>> {
    debug!("Fetching events for transaction: {}", tx_digest);
    let mut client = SharedSuiState::get_instance()?.get_sui_client();

    let mut request = proto::GetTransactionRequest::default();
    request.digest = Some(tx_digest.to_string());
    request.read_mask = Some(FieldMask::from_paths(["events"]));

    let transaction = client
        .ledger_client()
        .get_transaction(request)
        .await
        .map_err(|e| {
            SuiClientError::RpcConnectionError(format!(
                "Failed to fetch transaction {}: {}",
                tx_digest, e
            ))
        })?
        .into_inner()
        .transaction;

    let events: Vec<Value> = transaction
        .and_then(|tx| tx.events)
        .map(|e| e.events)
        .unwrap_or_default()
        .iter()
        .map(|event| {
            json!({
                "type": event.event_type,
                "package_id": event.package_id,
                "module": event.module,
                "sender": event.sender,
                "fields": event.json.as_ref().map(|v| proto_to_json(v)).unwrap_or(Value::Null),
            })
        })
        .collect();

    debug!("Found {} events in transaction {}", events.len(), tx_digest);
    Ok(events)
}
