use tracing::{debug, error};

use crate::error::Result;

pub async fn handle_object_command(
    rpc_url: Option<String>,
    object: String,
    raw: bool,
    chain_override: Option<String>,
) -> Result<()> {
    super::connect_read_only(rpc_url, chain_override).await?;

    let json = if raw {
        sui_client::fetch_object_json(&object).await?
    } else {
        match bindings::fetch_and_decode(&object).await {
            Ok(loaded) => {
                debug!("Decoded {} as {}", object, loaded.type_name);
                serde_json::json!({
                    "objectId": object,
                    "type": loaded.type_name.to_string(),
                    "fields": loaded.to_json()?,
                })
            }
            Err(e) => {
                error!("Failed to decode object {}: {}", object, e);
                return Err(e.into());
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

pub fn handle_types_command() -> Result<()> {
    let loader = bindings::loader();
    for type_name in loader.registered_types() {
        println!("{}", type_name);
    }
    println!("\n{} types registered", loader.len());
    Ok(())
}

pub async fn handle_events_command(
    rpc_url: Option<String>,
    digest: String,
    chain_override: Option<String>,
) -> Result<()> {
    super::connect_read_only(rpc_url, chain_override).await?;
    let events = sui_client::fetch_transaction_events(&digest).await?;
    if events.is_empty() {
        println!("Transaction {} emitted no events", digest);
    }
    for event in &events {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    Ok(())
}
