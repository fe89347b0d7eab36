//! Mirrors of the Move standard library (`0x1`) and Sui framework (`0x2`)
//! structs referenced by the packages in this crate.

pub mod balance;
pub mod coin;
pub mod object;
pub mod table;
pub mod type_name;
pub mod url;
pub mod vec_map;
pub mod vec_set;

use crate::loader::StructClassLoader;

pub const MOVE_STDLIB: &str = "0x1";
pub const SUI_FRAMEWORK: &str = "0x2";

/// Register the non-generic framework mirrors. Generic containers such as
/// `VecMap<K, V>` are decoded through their typed Rust mirror instead.
pub fn register_classes(loader: &mut StructClassLoader) {
    loader.register::<type_name::TypeName>();
    loader.register::<object::UID>();
    loader.register::<object::ID>();
    loader.register::<balance::Balance>();
    loader.register::<coin::Coin>();
    loader.register::<table::Table>();
    loader.register::<url::Url>();
}
