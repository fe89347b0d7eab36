//! Bindings for the `economy` package: the coin23 account ledger, funds and
//! deposit queues.

pub mod coin23;
pub mod fund;
pub mod queue;

use crate::loader::StructClassLoader;

pub const PKG_V1: &str = "0x7c4b1d3f9ae0e58a41f62c5b87d31a0e9b6f4c2d8e5a7b3c1f0d9e8a6b4c2d17";
pub const PUBLISHED_AT: &str = PKG_V1;

pub fn register_classes(loader: &mut StructClassLoader) {
    loader.register::<coin23::Coin23>();
    loader.register::<coin23::Rebill>();
    loader.register::<coin23::CurrencyRegistry>();
    loader.register::<coin23::CurrencyControls>();
    loader.register::<coin23::TransferFee>();
    loader.register::<coin23::FREEZE>();
    loader.register::<coin23::WITHDRAW>();
    loader.register::<coin23::MERCHANT>();
    loader.register::<fund::Fund>();
    loader.register::<queue::Queue>();
}
