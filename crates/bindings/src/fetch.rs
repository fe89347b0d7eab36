//! Network helpers that pair object fetches with the struct mirrors.

use tracing::debug;

use crate::error::Result;
use crate::loader::{LoadedStruct, loader};
use crate::reified::MoveStruct;

/// Fetch an object and decode it with the mirror registered for its type.
pub async fn fetch_and_decode(object_id: &str) -> Result<LoadedStruct> {
    let raw = sui_client::fetch_object_bcs(object_id).await?;
    debug!(
        "Decoding object {} of type {} ({} bytes)",
        raw.object_id,
        raw.object_type,
        raw.bcs.len()
    );
    loader().from_bcs(&raw.object_type, &raw.bcs)
}

/// Fetch an object that must be a `T`.
pub async fn fetch<T: MoveStruct>(object_id: &str) -> Result<T> {
    let raw = sui_client::fetch_object_bcs(object_id).await?;
    T::check_type(&raw.object_type)?;
    T::from_bcs(&raw.bcs)
}

/// Fetch through the JSON view, decoding with `from_sui_parsed_data`.
pub async fn fetch_parsed<T: MoveStruct>(object_id: &str) -> Result<T> {
    let content = sui_client::fetch_object_json(object_id).await?;
    T::from_sui_parsed_data(&content)
}

/// Every object of type `T` owned by `owner`.
pub async fn fetch_owned<T: MoveStruct>(owner: &str) -> Result<Vec<(String, T)>> {
    let raw = sui_client::list_owned_objects(owner, None).await?;
    let mut out = Vec::new();
    for object in raw {
        if T::is_type(&object.object_type) {
            out.push((object.object_id, T::from_bcs(&object.bcs)?));
        }
    }
    Ok(out)
}
