use serde_json::{Value, json};
use sui_rpc::field::{FieldMask, FieldMaskUtil};
use sui_rpc::proto::sui::rpc::v2 as proto;
use sui_sdk_types as sui;
use tracing::debug;

use crate::error::{Result, SuiClientError};
use crate::parse::proto_to_json;
use crate::state::SharedSuiState;

/// An object as stored on chain: its Move type and the BCS of its contents.
#[derive(Debug, Clone)]
pub struct RawObject {
    pub object_id: String,
    pub object_type: String,
    pub version: u64,
    pub bcs: Vec<u8>,
}

/// Accepts ids with or without the `0x` prefix.
pub fn format_object_id(object_id: &str) -> String {
    if object_id.starts_with("0x") {
        object_id.to_string()
    } else {
        format!("0x{}", object_id)
    }
}

pub fn parse_object_id(object_id: &str) -> Result<sui::Address> {
    format_object_id(object_id)
        .parse()
        .map_err(|e| SuiClientError::InvalidObjectFormat(format!("bad object id {}: {}", object_id, e)))
}

async fn get_object(object_id: &str, paths: &[&str]) -> Result<proto::Object> {
    let formatted_id = format_object_id(object_id);
    let mut client = SharedSuiState::get_instance()?.get_sui_client();

    let mut request = proto::GetObjectRequest::default();
    request.object_id = Some(formatted_id.clone());
    request.read_mask = Some(FieldMask::from_paths(paths));

    let response = client
        .ledger_client()
        .get_object(request)
        .await
        .map_err(|e| {
            if e.code() == tonic::Code::NotFound {
                SuiClientError::ObjectNotFound(formatted_id.clone())
            } else {
                SuiClientError::RpcConnectionError(format!(
                    "Failed to fetch object {}: {}",
                    formatted_id, e
                ))
            }
        })?;

    response
        .into_inner()
        .object
        .ok_or(SuiClientError::ObjectNotFound(formatted_id))
}

/// Fetch the BCS contents of a Move object.
pub async fn fetch_object_bcs(object_id: &str) -> Result<RawObject> {
    let object = get_object(
        object_id,
        &["object_id", "version", "object_type", "contents"],
    )
    .await?;
    raw_object_from_proto(object)
}

/// Fetch a Move object in the parsed-data shape
/// `{ "dataType": "moveObject", "type": ..., "fields": ... }`.
pub async fn fetch_object_json(object_id: &str) -> Result<Value> {
    let object = get_object(object_id, &["object_id", "version", "object_type", "json"]).await?;

    let object_type = object.object_type.clone().ok_or_else(|| {
        SuiClientError::InvalidObjectFormat(format!("object {} has no type", object_id))
    })?;
    let fields = object.json.as_ref().map(|v| proto_to_json(v)).ok_or_else(|| {
        SuiClientError::InvalidObjectFormat(format!("object {} has no JSON contents", object_id))
    })?;

    debug!("Fetched {} as JSON ({})", object_id, object_type);
    Ok(json!({
        "dataType": if object_type == "package" { "package" } else { "moveObject" },
        "type": object_type,
        "version": object.version,
        "fields": fields,
    }))
}

/// Objects owned by `owner`, optionally filtered by Move type.
pub async fn list_owned_objects(owner: &str, object_type: Option<&str>) -> Result<Vec<RawObject>> {
    let mut client = SharedSuiState::get_instance()?.get_sui_client();
    let mut objects = Vec::new();
    let mut page_token = None;

    loop {
        let mut request = proto::ListOwnedObjectsRequest::default();
        request.owner = Some(format_object_id(owner));
        request.page_size = Some(100);
        request.page_token = page_token.take();
        request.object_type = object_type.map(str::to_string);
        request.read_mask = Some(FieldMask::from_paths([
            "object_id",
            "version",
            "object_type",
            "contents",
        ]));

        let resp = client
            .state_client()
            .list_owned_objects(request)
            .await
            .map_err(|e| {
                SuiClientError::RpcConnectionError(format!(
                    "Failed to list objects owned by {}: {}",
                    owner, e
                ))
            })?
            .into_inner();

        for object in resp.objects {
            objects.push(raw_object_from_proto(object)?);
        }

        match resp.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    debug!("{} owns {} matching objects", owner, objects.len());
    Ok(objects)
}

fn raw_object_from_proto(object: proto::Object) -> Result<RawObject> {
    let object_id = object
        .object_id
        .clone()
        .ok_or_else(|| SuiClientError::InvalidObjectFormat("missing object_id".into()))?;
    let object_type = object.object_type.clone().ok_or_else(|| {
        SuiClientError::InvalidObjectFormat(format!("object {} has no type", object_id))
    })?;
    let bcs = object
        .contents
        .as_ref()
        .and_then(|b| b.value.as_ref())
        .map(|v| v.to_vec())
        .ok_or_else(|| {
            SuiClientError::InvalidObjectFormat(format!(
                "Object.contents (BCS) missing for {}",
                object_id
            ))
        })?;

    Ok(RawObject {
        object_id,
        object_type,
        version: object.version.unwrap_or_default(),
        bcs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_object_id() {
        assert_eq!(format_object_id("abc"), "0xabc");
        assert_eq!(format_object_id("0xabc"), "0xabc");
        assert!(parse_object_id("6").is_ok());
        assert!(parse_object_id("0xnothex").is_err());
    }
}
