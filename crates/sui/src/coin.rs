use anyhow::Result;
use std::str::FromStr;
use sui_rpc::Client as GrpcClient;
use sui_rpc::field::{FieldMask, FieldMaskUtil};
use sui_rpc::proto::sui::rpc::v2 as proto;
use sui_sdk_types as sui;
use tracing::{debug, warn};

use crate::constants::{MIST_PER_SUI, SUI_COIN_TYPE};
use crate::locks::{LockGuard, coin_locks};

const MAX_RETRIES: u32 = 6;
const RETRY_DELAY_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct CoinInfo {
    pub object_ref: sui::ObjectReference,
    pub balance: u64,
}

impl CoinInfo {
    pub fn object_id(&self) -> sui::Address {
        *self.object_ref.object_id()
    }
}

/// Pick the smallest SUI coin with at least `min_balance` that no other
/// transaction of this process holds, and lock it.
pub async fn fetch_gas_coin(
    client: &mut GrpcClient,
    sender: sui::Address,
    min_balance: u64,
) -> Result<Option<(CoinInfo, LockGuard<sui::Address>)>> {
    let manager = coin_locks();

    for attempt in 1..=MAX_RETRIES {
        let mut coins: Vec<CoinInfo> = list_coins(client, sender)
            .await?
            .into_iter()
            .filter(|c| c.balance >= min_balance)
            .collect();
        coins.sort_by_key(|c| c.balance);

        debug!(
            "Attempt {}/{}: {} coins with balance >= {} MIST ({:.4} SUI)",
            attempt,
            MAX_RETRIES,
            coins.len(),
            min_balance,
            min_balance as f64 / MIST_PER_SUI
        );

        for coin in coins {
            if let Some(guard) = manager.try_lock(coin.object_id()) {
                debug!(
                    "Locked gas coin {} with balance {} MIST",
                    coin.object_id(),
                    coin.balance
                );
                return Ok(Some((coin, guard)));
            }
        }

        if attempt < MAX_RETRIES {
            tokio::time::sleep(tokio::time::Duration::from_millis(
                RETRY_DELAY_MS * attempt as u64,
            ))
            .await;
        }
    }

    debug!(
        "No unlocked coin with balance >= {} MIST after {} attempts",
        min_balance, MAX_RETRIES
    );
    Ok(None)
}

/// All SUI coins owned by `sender`, with balances read from their contents.
pub async fn list_coins(client: &mut GrpcClient, sender: sui::Address) -> Result<Vec<CoinInfo>> {
    let mut coins = Vec::new();
    let mut page_token = None;

    loop {
        let mut request = proto::ListOwnedObjectsRequest::default();
        request.owner = Some(sender.to_string());
        request.page_size = Some(100);
        request.page_token = page_token.take();
        request.read_mask = Some(FieldMask::from_paths([
            "object_id",
            "version",
            "digest",
            "contents",
        ]));
        request.object_type = Some(SUI_COIN_TYPE.to_string());

        let resp = client
            .state_client()
            .list_owned_objects(request)
            .await?
            .into_inner();

        for obj in resp.objects {
            let (Some(id_str), Some(version), Some(digest_str)) =
                (&obj.object_id, obj.version, &obj.digest)
            else {
                continue;
            };
            let object_id = sui::Address::from_str(id_str)?;
            let digest = sui::Digest::from_base58(digest_str)?;
            let contents = obj.contents.as_ref().and_then(|c| c.value.as_deref());
            let balance = match contents.map(coin_balance_from_bcs) {
                Some(Ok(balance)) => balance,
                Some(Err(e)) => {
                    warn!("Skipping coin {}: {}", object_id, e);
                    continue;
                }
                None => {
                    warn!("Skipping coin {}: no contents returned", object_id);
                    continue;
                }
            };
            coins.push(CoinInfo {
                object_ref: sui::ObjectReference::new(object_id, version, digest),
                balance,
            });
        }

        match resp.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    Ok(coins)
}

/// `Coin<T>` is `{ id: UID, balance: Balance<T> { value: u64 } }`: a 32-byte
/// id followed by the balance.
fn coin_balance_from_bcs(contents: &[u8]) -> Result<u64> {
    let (_id, balance): ([u8; 32], u64) = bcs::from_bytes(contents).map_err(|e| {
        anyhow::anyhow!("Malformed coin contents ({} bytes): {}", contents.len(), e)
    })?;
    Ok(balance)
}
