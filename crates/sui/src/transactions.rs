use anyhow::{Context, anyhow};
use std::collections::HashMap;
use sui_crypto::SuiSigner;
use sui_rpc::Client as GrpcClient;
use sui_rpc::field::{FieldMask, FieldMaskUtil};
use sui_rpc::proto::sui::rpc::v2 as proto;
use sui_sdk_types as sui;
use sui_transaction_builder::TransactionBuilder;
use sui_transaction_builder::unresolved::Input;
use tokio::time::{Duration, Instant, sleep};
use tracing::{debug, error, info, warn};

use crate::chain::get_reference_gas_price;
use crate::coin::fetch_gas_coin;
use crate::constants::{
    CLOCK_OBJECT_ID, GAS_BUFFER_MULTIPLIER, MAX_EXECUTION_RETRIES, MAX_GAS_BUDGET_MIST,
    MIN_GAS_BUDGET_MIST, MIST_PER_SUI, SIMULATION_GAS_BUDGET_MIST, TRANSACTION_WAIT_MS,
};
use crate::error::{Result, SuiClientError};
use crate::fetch::parse_object_id;
use crate::locks::{ObjectLockGuard, object_locks};
use crate::signer::Signer;
use crate::state::SharedSuiState;

#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Name used in logs and error messages, e.g. `outlaw::rename`.
    pub label: String,
    /// Fixed gas budget. Checked against the dry run instead of replacing it.
    pub gas_budget: Option<u64>,
    pub max_retries: u32,
    pub wait_ms: u64,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            label: "move call".to_string(),
            gas_budget: None,
            max_retries: MAX_EXECUTION_RETRIES,
            wait_ms: TRANSACTION_WAIT_MS,
        }
    }
}

impl ExecuteOptions {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatedObject {
    pub object_id: String,
    pub object_type: Option<String>,
}

/// Result of executing a transaction block
#[derive(Debug, Clone)]
pub struct TransactionBlockResult {
    pub digest: String,
    pub created_objects: Vec<CreatedObject>,
}

impl TransactionBlockResult {
    /// First created object whose type satisfies `matches`.
    pub fn find_created(&self, matches: impl Fn(&str) -> bool) -> Option<&CreatedObject> {
        self.created_objects
            .iter()
            .find(|o| o.object_type.as_deref().is_some_and(&matches))
    }
}

/// How a failed execution should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RetryKind {
    VersionConflict,
    Unavailable,
    Fatal,
}

impl RetryKind {
    fn backoff_ms(&self, retry: u32) -> u64 {
        let base = match self {
            RetryKind::Unavailable => 2_000,
            RetryKind::VersionConflict => 1_000,
            RetryKind::Fatal => 0,
        };
        base * 2_u64.pow(retry.saturating_sub(1))
    }
}

/// Build, sign and execute one programmable transaction.
///
/// Every id in `object_ids` is locked for the duration of the call, resolved
/// as a shared or owned input, and handed to `build` in the same order.
/// `build` appends the move calls. The gas budget comes from a dry run with
/// a 2x buffer unless `options.gas_budget` is set.
pub async fn execute_move_calls<F>(
    signer: &Signer,
    object_ids: &[String],
    build: F,
    options: ExecuteOptions,
) -> Result<TransactionBlockResult>
where
    F: Fn(&mut TransactionBuilder, &[sui::Argument]) -> anyhow::Result<()>,
{
    let label = options.label.as_str();
    let sender = signer.address;
    let shared_state = SharedSuiState::get_instance()?;

    let mut addresses = Vec::with_capacity(object_ids.len());
    for id in object_ids {
        addresses.push(parse_object_id(id)?);
    }
    let mut unique: Vec<sui::Address> = addresses.clone();
    unique.sort();
    unique.dedup();

    debug!("[{}] sender {} with {} objects", label, sender, unique.len());

    // Locks are taken in sorted order before versions are read.
    let mut object_guards: Vec<ObjectLockGuard> = Vec::with_capacity(unique.len());
    for id in &unique {
        let guard = object_locks()
            .lock_with_retry(*id, 50)
            .await
            .with_context(|| format!("Failed to lock object {}", id))?;
        object_guards.push(guard);
    }

    let mut retry_count = 0;
    let mut gas_budget: Option<u64> = None;
    let mut gas_guard = None;

    loop {
        let mut client = shared_state.get_sui_client();
        let mut tb = TransactionBuilder::new();
        tb.set_sender(sender);
        let gas_price = get_reference_gas_price(&mut client).await?;
        tb.set_gas_price(gas_price);

        if let Some(old_guard) = gas_guard.take() {
            debug!("[{}] releasing gas coin before retry", label);
            drop(old_guard);
        }

        let min_balance = options
            .gas_budget
            .or(gas_budget)
            .unwrap_or(MIN_GAS_BUDGET_MIST);
        let (gas_coin, guard) = fetch_gas_coin(&mut client, sender, min_balance)
            .await?
            .ok_or_else(|| {
                anyhow!(
                    "No available coin with at least {} MIST ({:.4} SUI) for gas",
                    min_balance,
                    min_balance as f64 / MIST_PER_SUI
                )
            })?;
        gas_guard = Some(guard);
        tb.add_gas_objects(vec![Input::owned(
            gas_coin.object_id(),
            gas_coin.object_ref.version(),
            *gas_coin.object_ref.digest(),
        )]);

        // Versions are read fresh on every attempt.
        let mut inputs: HashMap<sui::Address, sui::Argument> = HashMap::new();
        for id in &unique {
            let input = resolve_input(&mut client, *id).await?;
            inputs.insert(*id, tb.input(input));
        }
        let object_args: Vec<sui::Argument> = addresses
            .iter()
            .map(|id| inputs[id])
            .collect();

        build(&mut tb, &object_args)?;

        let budget = match gas_budget {
            Some(budget) => budget,
            None => {
                let simulation_budget = SIMULATION_GAS_BUDGET_MIST.min(gas_coin.balance);
                tb.set_gas_budget(simulation_budget);
                let dry_run = tb.clone().finish().map_err(|e| anyhow!("{}", e))?;
                let estimated = estimate_gas_budget(&mut client, dry_run, label).await?;
                let budget = match options.gas_budget {
                    Some(custom) if custom < estimated => {
                        return Err(anyhow!(
                            "Insufficient gas budget: provided {} MIST, dry run requires {} MIST",
                            custom,
                            estimated
                        )
                        .into());
                    }
                    Some(custom) => custom,
                    None => estimated,
                };
                gas_budget = Some(budget);
                budget
            }
        };
        if budget > gas_coin.balance {
            // A coin picked before the estimate may be too small; pick again.
            debug!("[{}] gas coin too small for budget {}, reselecting", label, budget);
            continue;
        }
        tb.set_gas_budget(budget);

        let tx = tb.finish().map_err(|e| anyhow!("Failed to build transaction: {}", e))?;
        let signature = signer
            .key
            .sign_transaction(&tx)
            .map_err(|e| anyhow!("Failed to sign transaction: {}", e))?;

        debug!(
            "[{}] executing with gas budget {} MIST (attempt {}/{})",
            label,
            budget,
            retry_count + 1,
            options.max_retries + 1
        );

        let mut request = proto::ExecuteTransactionRequest::default();
        request.transaction = Some(tx.into());
        request.signatures = vec![signature.into()];
        request.read_mask = Some(FieldMask::from_paths([
            "transaction.digest",
            "transaction.effects",
        ]));

        let started = Instant::now();
        let response = match client.execution_client().execute_transaction(request).await {
            Ok(r) => r.into_inner(),
            Err(e) => {
                let (clean_error, kind) = classify_execution_error(&e.to_string());
                if kind != RetryKind::Fatal && retry_count < options.max_retries {
                    retry_count += 1;
                    let delay = kind.backoff_ms(retry_count);
                    info!(
                        "[{}] failed ({:?}) on attempt {}/{}; retrying in {}ms: {}",
                        label,
                        kind,
                        retry_count,
                        options.max_retries + 1,
                        delay,
                        clean_error
                    );
                    sleep(Duration::from_millis(delay)).await;
                    continue;
                }
                error!("[{}] transaction failed: {}", label, clean_error);
                return Err(SuiClientError::TransactionError {
                    message: format!("{} failed: {}", label, clean_error),
                    tx_digest: None,
                });
            }
        };

        check_transaction_effects(&response, label)?;

        let digest = response
            .transaction
            .as_ref()
            .and_then(|t| t.digest.clone())
            .context("Failed to get transaction digest")?;
        let created_objects = created_objects(&response);

        info!(
            "[{}] executed {} ({} created, {}ms)",
            label,
            digest,
            created_objects.len(),
            started.elapsed().as_millis()
        );

        // The gas coin stays locked until the transaction is readable.
        if let Err(e) = wait_for_transaction(&mut client, &digest, options.wait_ms).await {
            warn!("[{}] {}", label, e);
        }
        drop(gas_guard);
        drop(object_guards);

        return Ok(TransactionBlockResult {
            digest,
            created_objects,
        });
    }
}

/// Shared objects become shared inputs at their initial version; the clock
/// is always read-only. Everything else is an owned or immutable reference.
async fn resolve_input(client: &mut GrpcClient, object_id: sui::Address) -> Result<Input> {
    let mut request = proto::GetObjectRequest::default();
    request.object_id = Some(object_id.to_string());
    request.read_mask = Some(FieldMask::from_paths(["object_id", "version", "digest", "owner"]));

    let object = client
        .ledger_client()
        .get_object(request)
        .await
        .map_err(|e| {
            SuiClientError::RpcConnectionError(format!("Failed to get object {}: {}", object_id, e))
        })?
        .into_inner()
        .object
        .ok_or_else(|| SuiClientError::ObjectNotFound(object_id.to_string()))?;

    let initial_shared_version = object.owner.as_ref().and_then(|owner| {
        if owner.address.as_deref().unwrap_or_default().is_empty() {
            owner.version
        } else {
            None
        }
    });

    if let Some(shared_version) = initial_shared_version {
        let mutable = object_id.to_string() != CLOCK_OBJECT_ID;
        debug!(
            "Object {} is shared (initial version {}, mutable {})",
            object_id, shared_version, mutable
        );
        return Ok(Input::shared(object_id, shared_version, mutable));
    }

    let version = object.version.context("Missing version")?;
    let digest = object
        .digest
        .context("Missing digest")?
        .parse()
        .context("Failed to parse digest")?;
    debug!("Object {} is owned at version {}", object_id, version);
    Ok(Input::owned(object_id, version, digest))
}

/// Dry-run `tx` and derive a budget: total gas used times the buffer,
/// clamped to `[MIN_GAS_BUDGET_MIST, MAX_GAS_BUDGET_MIST]`.
async fn estimate_gas_budget(
    client: &mut GrpcClient,
    tx: sui::Transaction,
    label: &str,
) -> Result<u64> {
    let mut request = proto::SimulateTransactionRequest::default();
    request.transaction = Some(tx.into());
    request.read_mask = Some(FieldMask::from_paths([
        "transaction.effects.status",
        "transaction.effects.gas_used",
    ]));
    request.checks =
        Some(proto::simulate_transaction_request::TransactionChecks::Enabled as i32);
    request.do_gas_selection = Some(false);

    let effects = match client.execution_client().simulate_transaction(request).await {
        Ok(resp) => resp.into_inner().transaction.and_then(|t| t.effects),
        Err(e) => {
            warn!("[{}] dry run failed: {}; using {} MIST", label, e, MAX_GAS_BUDGET_MIST);
            return Ok(MAX_GAS_BUDGET_MIST);
        }
    };
    let Some(effects) = effects else {
        warn!("[{}] dry run returned no effects; using {} MIST", label, MAX_GAS_BUDGET_MIST);
        return Ok(MAX_GAS_BUDGET_MIST);
    };

    if let Some(err) = effects.status.as_ref().and_then(|s| s.error.as_ref()) {
        let message = clean_move_abort(&format!("{:?}", err));
        error!("[{}] dry run failed: {}", label, message);
        return Err(SuiClientError::TransactionError {
            message: format!("{} dry run failed: {}", label, message),
            tx_digest: None,
        });
    }

    let Some(gas) = effects.gas_used.as_ref() else {
        return Ok(MAX_GAS_BUDGET_MIST);
    };
    let total = total_gas_used(
        gas.computation_cost.unwrap_or(0),
        gas.storage_cost.unwrap_or(0),
        gas.storage_rebate.unwrap_or(0),
        gas.non_refundable_storage_fee.unwrap_or(0),
    );
    let budget = budget_from_gas_used(total);
    debug!(
        "[{}] dry run used {} MIST; budget {} MIST ({:.4} SUI)",
        label,
        total,
        budget,
        budget as f64 / MIST_PER_SUI
    );
    if budget > MAX_GAS_BUDGET_MIST {
        return Err(anyhow!(
            "Gas requirement {} MIST exceeds maximum allowed {} MIST",
            budget,
            MAX_GAS_BUDGET_MIST
        )
        .into());
    }
    Ok(budget)
}

pub(crate) fn total_gas_used(computation: u64, storage: u64, rebate: u64, non_refundable: u64) -> u64 {
    (computation + storage + non_refundable).saturating_sub(rebate)
}

pub(crate) fn budget_from_gas_used(total: u64) -> u64 {
    total.saturating_mul(GAS_BUFFER_MULTIPLIER).max(MIN_GAS_BUDGET_MIST)
}

fn check_transaction_effects(response: &proto::ExecuteTransactionResponse, label: &str) -> Result<()> {
    let tx_digest = response
        .transaction
        .as_ref()
        .and_then(|t| t.digest.clone());
    let status = response
        .transaction
        .as_ref()
        .and_then(|t| t.effects.as_ref())
        .and_then(|e| e.status.as_ref());

    match status {
        Some(status) if status.error.is_none() => Ok(()),
        Some(status) => {
            let message = clean_move_abort(&format!("{:?}", status.error));
            error!(
                "[{}] transaction failed: {} (tx: {})",
                label,
                message,
                tx_digest.as_deref().unwrap_or("unknown")
            );
            Err(SuiClientError::TransactionError {
                message: format!("{} failed: {}", label, message),
                tx_digest,
            })
        }
        None => Err(SuiClientError::TransactionError {
            message: format!("{} returned no effects status", label),
            tx_digest,
        }),
    }
}

fn created_objects(response: &proto::ExecuteTransactionResponse) -> Vec<CreatedObject> {
    response
        .transaction
        .as_ref()
        .and_then(|t| t.effects.as_ref())
        .map(|effects| {
            effects
                .changed_objects
                .iter()
                .filter(|c| c.id_operation() == proto::changed_object::IdOperation::Created)
                .filter_map(|c| {
                    Some(CreatedObject {
                        object_id: c.object_id.clone()?,
                        object_type: c.object_type.clone(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Render a Move abort from the debug form of an execution error as
/// `MoveAbort: abort_code: 0x..., function: ...`.
pub(crate) fn clean_move_abort(error_str: &str) -> String {
    if !error_str.contains("MoveAbort") {
        return error_str.to_string();
    }

    let mut parts = vec![];
    if let Some(start) = error_str.find("abort_code: Some(") {
        let code_start = start + "abort_code: Some(".len();
        if let Some(end) = error_str[code_start..].find(')') {
            let code = &error_str[code_start..code_start + end];
            match code.parse::<u64>() {
                Ok(code) => parts.push(format!("abort_code: 0x{:016X}", code)),
                Err(_) => parts.push(format!("abort_code: {}", code)),
            }
        }
    }
    if let Some(start) = error_str.find("function_name: Some(\"") {
        let name_start = start + "function_name: Some(\"".len();
        if let Some(end) = error_str[name_start..].find('"') {
            parts.push(format!("function: {}", &error_str[name_start..name_start + end]));
        }
    }

    if parts.is_empty() {
        "Move execution aborted".to_string()
    } else {
        format!("MoveAbort: {}", parts.join(", "))
    }
}

/// Strip binary details from a gRPC error and decide whether to retry.
pub(crate) fn classify_execution_error(error_str: &str) -> (String, RetryKind) {
    let without_details = match error_str.find(", details: [") {
        Some(idx) => &error_str[..idx],
        None => error_str,
    };

    if error_str.contains("HTTP status code 503") || error_str.contains("Service Unavailable") {
        return (
            "Service temporarily unavailable (HTTP 503)".to_string(),
            RetryKind::Unavailable,
        );
    }

    if error_str.contains("is not available for consumption") {
        let message = match (error_str.find("Object ID"), error_str.find("current version:")) {
            (Some(obj_start), Some(version_info)) if obj_start < version_info => {
                let end = error_str[version_info..]
                    .find('.')
                    .map(|i| i + version_info)
                    .unwrap_or(error_str.len());
                format!("Object version conflict - {}", &error_str[obj_start..end])
            }
            _ => "Object version conflict - transaction inputs are outdated".to_string(),
        };
        return (message, RetryKind::VersionConflict);
    }

    if error_str.contains("HTTP status code 400") {
        return (
            format!("Transaction rejected by server (HTTP 400): {}", without_details),
            RetryKind::Fatal,
        );
    }

    (without_details.to_string(), RetryKind::Fatal)
}

/// Poll until `digest` can be read back from the fullnode.
async fn wait_for_transaction(client: &mut GrpcClient, digest: &str, max_wait_ms: u64) -> Result<()> {
    let start = Instant::now();
    loop {
        let mut request = proto::GetTransactionRequest::default();
        request.digest = Some(digest.to_string());
        request.read_mask = Some(FieldMask::from_paths(["digest"]));

        match client.ledger_client().get_transaction(request).await {
            Ok(_) => {
                debug!(
                    "Transaction {} available after {}ms",
                    digest,
                    start.elapsed().as_millis()
                );
                return Ok(());
            }
            Err(e) => debug!("Transaction {} not yet available: {}", digest, e),
        }

        if start.elapsed() > Duration::from_millis(max_wait_ms) {
            return Err(anyhow!(
                "Timeout waiting for transaction {} after {}ms",
                digest,
                max_wait_ms
            )
            .into());
        }
        sleep(Duration::from_millis(200)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_move_abort() {
        let raw = r#"ExecutionError { kind: Some(MoveAbort), abort_code: Some(255), location: Some(MoveLocation { function_name: Some("rename") }) }"#;
        assert_eq!(
            clean_move_abort(raw),
            "MoveAbort: abort_code: 0x00000000000000FF, function: rename"
        );
        assert_eq!(clean_move_abort("InsufficientGas"), "InsufficientGas");
        assert_eq!(clean_move_abort("MoveAbort"), "Move execution aborted");
    }

    #[test]
    fn test_classify_version_conflict() {
        let raw = "status: Aborted, message: \"Object ID 0xabc version 5 is not available for consumption, current version: 6.\", details: [1, 2]";
        let (message, kind) = classify_execution_error(raw);
        assert_eq!(kind, RetryKind::VersionConflict);
        assert_eq!(message, "Object version conflict - Object ID 0xabc version 5 is not available for consumption, current version: 6");
    }

    #[test]
    fn test_classify_unavailable_and_fatal() {
        let (_, kind) = classify_execution_error("grpc-status header missing, HTTP status code 503");
        assert_eq!(kind, RetryKind::Unavailable);

        let (message, kind) = classify_execution_error("invalid signature, details: [0, 1]");
        assert_eq!(kind, RetryKind::Fatal);
        assert_eq!(message, "invalid signature");
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(RetryKind::VersionConflict.backoff_ms(1), 1_000);
        assert_eq!(RetryKind::VersionConflict.backoff_ms(3), 4_000);
        assert_eq!(RetryKind::Unavailable.backoff_ms(2), 4_000);
    }

    #[test]
    fn test_budget_from_gas_used() {
        assert_eq!(total_gas_used(1_000, 500, 2_000, 10), 0);
        assert_eq!(budget_from_gas_used(0), MIN_GAS_BUDGET_MIST);
        assert_eq!(budget_from_gas_used(10_000_000), 20_000_000);
    }

    #[test]
    fn test_find_created() {
        let result = TransactionBlockResult {
            digest: "d".into(),
            created_objects: vec![
                CreatedObject {
                    object_id: "0x1".into(),
                    object_type: Some("0x2::coin::Coin<0x2::sui::SUI>".into()),
                },
                CreatedObject {
                    object_id: "0x2".into(),
                    object_type: Some("0xabc::outlaw::Outlaw".into()),
                },
            ],
        };
        assert_eq!(
            result.find_created(|t| t.ends_with("::outlaw::Outlaw")).map(|o| o.object_id.as_str()),
            Some("0x2")
        );
        assert!(result.find_created(|t| t.contains("Missing")).is_none());
    }
}
