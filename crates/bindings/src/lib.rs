//! Client bindings for the `ownership`, `economy` and `demo` Move packages.
//!
//! Every on-chain struct has a Rust mirror implementing [`MoveStruct`], every
//! public Move function a builder that appends the call to a
//! [`TransactionBuilder`](sui_transaction_builder::TransactionBuilder), and
//! [`loader()`] decodes objects whose type is only known at runtime.

pub mod address;
pub mod args;
pub mod demo;
pub mod economy;
pub mod error;
pub mod fetch;
pub mod framework;
pub mod init;
pub mod loader;
pub mod ownership;
pub mod reified;
pub mod type_name;

pub use address::Address;
pub use error::{BindingsError, Result};
pub use fetch::{fetch, fetch_and_decode, fetch_owned, fetch_parsed};
pub use loader::{DecodedStruct, LoadedStruct, StructClassLoader, loader};
pub use reified::{MoveField, MoveStruct, type_arg};
pub use type_name::{MoveType, MoveTypeName};
