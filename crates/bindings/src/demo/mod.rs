//! Bindings for the `demo` package, whose `Outlaw` object is used by the
//! end-to-end flows.

pub mod outlaw;

use crate::loader::StructClassLoader;

pub const PKG_V1: &str = "0x5d2f8a1c3e6b9d4f7a0c2e5b8d1f4a7c0e3b6d9f2a5c8e1b4d7f0a3c6e9b2d58";
pub const PUBLISHED_AT: &str = PKG_V1;

pub fn register_classes(loader: &mut StructClassLoader) {
    loader.register::<outlaw::Outlaw>();
    loader.register::<outlaw::EDITOR>();
    loader.register::<outlaw::Witness>();
}
