pub mod events;
pub mod object;

pub use events::fetch_transaction_events;
pub use object::{
    RawObject, fetch_object_bcs, fetch_object_json, format_object_id, list_owned_objects,
    parse_object_id,
};
