//! `economy::coin23`, an account balance that lives in a shared object
//! instead of an owned `Coin`.

use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};
use sui_sdk_types::Argument;
use sui_transaction_builder::TransactionBuilder;

use super::{PKG_V1, PUBLISHED_AT};
use crate::address::Address;
use crate::args;
use crate::error::Result;
use crate::framework::balance::Balance;
use crate::framework::object::UID;
use crate::framework::vec_map::VecMap;
use crate::reified::{MoveField, MoveStruct};
use crate::witness_struct;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin23 {
    pub id: UID,
    pub available: Balance,
    pub rebills: VecMap<Address, Vec<Rebill>>,
    pub held_funds: VecMap<Address, Balance>,
    pub frozen: bool,
}

impl Coin23 {
    /// Funds held for merchants plus the available balance.
    pub fn total_balance(&self) -> u64 {
        self.held_funds
            .contents
            .iter()
            .fold(self.available.value, |acc, e| acc.saturating_add(e.value.value))
    }
}

impl MoveField for Coin23 {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Coin23 {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "coin23";
    const NAME: &'static str = "Coin23";
    const TYPE_ARITY: usize = 1;

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("id", UID::field_type())
            .field("available", Balance::field_type())
            .field("rebills", VecMap::<Address, Vec<Rebill>>::field_type())
            .field("held_funds", VecMap::<Address, Balance>::field_type())
            .field("frozen", FieldType::Bool)
    }
}

/// A recurring withdrawal a merchant may make from an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebill {
    pub available: u64,
    pub refresh_amount: u64,
    pub refresh_cadence: u64,
    pub latest_refresh: u64,
}

impl MoveField for Rebill {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Rebill {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "coin23";
    const NAME: &'static str = "Rebill";
    const TYPE_ARITY: usize = 1;

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("available", FieldType::U64)
            .field("refresh_amount", FieldType::U64)
            .field("refresh_cadence", FieldType::U64)
            .field("latest_refresh", FieldType::U64)
    }
}

/// Shared registry holding `CurrencyControls` per coin type in dynamic
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRegistry {
    pub id: UID,
}

impl MoveField for CurrencyRegistry {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for CurrencyRegistry {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "coin23";
    const NAME: &'static str = "CurrencyRegistry";

    fn layout() -> Layout {
        Layout::new(Self::base_type()).field("id", UID::field_type())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFee {
    /// Basis points of each transfer.
    pub bps: u64,
    pub pay_to: Address,
}

impl MoveField for TransferFee {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for TransferFee {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "coin23";
    const NAME: &'static str = "TransferFee";

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("bps", FieldType::U64)
            .field("pay_to", FieldType::Address)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyControls {
    pub creator_can_withdraw: bool,
    pub creator_can_freeze: bool,
    /// 0 open, 1 requires the creator's authority, 2 disabled.
    pub user_transfer_enum: u8,
    pub transfer_fee: Option<TransferFee>,
    pub export_auths: Vec<Address>,
}

impl MoveField for CurrencyControls {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for CurrencyControls {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "coin23";
    const NAME: &'static str = "CurrencyControls";
    const TYPE_ARITY: usize = 1;

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("creator_can_withdraw", FieldType::Bool)
            .field("creator_can_freeze", FieldType::Bool)
            .field("user_transfer_enum", FieldType::U8)
            .field("transfer_fee", FieldType::option(TransferFee::field_type()))
            .field("export_auths", FieldType::vector(FieldType::Address))
    }
}

witness_struct!(FREEZE, PKG_V1, "coin23");
witness_struct!(WITHDRAW, PKG_V1, "coin23");
witness_struct!(MERCHANT, PKG_V1, "coin23");

/// `coin23::create<T>(ctx): Coin23<T>`
pub fn create(tb: &mut TransactionBuilder, coin_type: &str) -> Result<Argument> {
    args::call(tb, PUBLISHED_AT, "coin23", "create", &[coin_type], vec![])
}

pub struct ReturnAndShareArgs {
    pub account: Argument,
    pub owner: Address,
}

/// `coin23::return_and_share<T>(account, owner)`
pub fn return_and_share(
    tb: &mut TransactionBuilder,
    coin_type: &str,
    args: ReturnAndShareArgs,
) -> Result<Argument> {
    let owner = args::pure(tb, &args.owner);
    args::call(
        tb,
        PUBLISHED_AT,
        "coin23",
        "return_and_share",
        &[coin_type],
        vec![args.account, owner],
    )
}

pub struct DepositFromCoinArgs {
    pub account: Argument,
    pub coin: Argument,
}

/// `coin23::deposit_from_coin<T>(account, coin)`
pub fn deposit_from_coin(
    tb: &mut TransactionBuilder,
    coin_type: &str,
    args: DepositFromCoinArgs,
) -> Result<Argument> {
    args::call(
        tb,
        PUBLISHED_AT,
        "coin23",
        "deposit_from_coin",
        &[coin_type],
        vec![args.account, args.coin],
    )
}

pub struct WithdrawToCoinArgs {
    pub account: Argument,
    pub amount: u64,
    pub auth: Argument,
}

/// `coin23::withdraw_to_coin<T>(account, amount, auth, ctx): Coin<T>`
pub fn withdraw_to_coin(
    tb: &mut TransactionBuilder,
    coin_type: &str,
    args: WithdrawToCoinArgs,
) -> Result<Argument> {
    let amount = args::pure(tb, &args.amount);
    args::call(
        tb,
        PUBLISHED_AT,
        "coin23",
        "withdraw_to_coin",
        &[coin_type],
        vec![args.account, amount, args.auth],
    )
}

pub struct TransferArgs {
    pub from: Argument,
    pub to: Argument,
    pub amount: u64,
    pub registry: Argument,
    pub auth: Argument,
}

/// `coin23::transfer<T>(from, to, amount, registry, auth)`
pub fn transfer(
    tb: &mut TransactionBuilder,
    coin_type: &str,
    args: TransferArgs,
) -> Result<Argument> {
    let amount = args::pure(tb, &args.amount);
    args::call(
        tb,
        PUBLISHED_AT,
        "coin23",
        "transfer",
        &[coin_type],
        vec![args.from, args.to, amount, args.registry, args.auth],
    )
}

pub struct FreezeArgs {
    pub account: Argument,
    pub registry: Argument,
    pub auth: Argument,
}

/// `coin23::freeze_<T>(account, registry, auth)`. The trailing underscore
/// is part of the Move name.
pub fn freeze_(tb: &mut TransactionBuilder, coin_type: &str, args: FreezeArgs) -> Result<Argument> {
    args::call(
        tb,
        PUBLISHED_AT,
        "coin23",
        "freeze_",
        &[coin_type],
        vec![args.account, args.registry, args.auth],
    )
}

/// `coin23::unfreeze<T>(account, registry, auth)`
pub fn unfreeze(tb: &mut TransactionBuilder, coin_type: &str, args: FreezeArgs) -> Result<Argument> {
    args::call(
        tb,
        PUBLISHED_AT,
        "coin23",
        "unfreeze",
        &[coin_type],
        vec![args.account, args.registry, args.auth],
    )
}

pub struct RegisterCurrencyArgs {
    pub registry: Argument,
    pub creator_can_withdraw: bool,
    pub creator_can_freeze: bool,
    pub user_transfer_enum: u8,
    pub transfer_fee: Option<TransferFee>,
    pub export_auths: Vec<Address>,
    pub auth: Argument,
}

/// `coin23::register_currency<T>(registry, ..controls, auth)`
pub fn register_currency(
    tb: &mut TransactionBuilder,
    coin_type: &str,
    args: RegisterCurrencyArgs,
) -> Result<Argument> {
    let creator_can_withdraw = args::pure(tb, &args.creator_can_withdraw);
    let creator_can_freeze = args::pure(tb, &args.creator_can_freeze);
    let user_transfer_enum = args::pure(tb, &args.user_transfer_enum);
    let transfer_fee = args::pure(tb, &args.transfer_fee);
    let export_auths = args::pure(tb, &args.export_auths);
    args::call(
        tb,
        PUBLISHED_AT,
        "coin23",
        "register_currency",
        &[coin_type],
        vec![
            args.registry,
            creator_can_withdraw,
            creator_can_freeze,
            user_transfer_enum,
            transfer_fee,
            export_auths,
            args.auth,
        ],
    )
}

pub struct AddRebillArgs {
    pub customer: Argument,
    pub merchant: Address,
    pub max_amount: u64,
    /// Milliseconds between refreshes.
    pub refresh_cadence: u64,
    pub clock: Argument,
    pub auth: Argument,
}

/// `coin23::add_rebill<T>(customer, merchant, max_amount, refresh_cadence, clock, auth)`
pub fn add_rebill(
    tb: &mut TransactionBuilder,
    coin_type: &str,
    args: AddRebillArgs,
) -> Result<Argument> {
    let merchant = args::pure(tb, &args.merchant);
    let max_amount = args::pure(tb, &args.max_amount);
    let refresh_cadence = args::pure(tb, &args.refresh_cadence);
    args::call(
        tb,
        PUBLISHED_AT,
        "coin23",
        "add_rebill",
        &[coin_type],
        vec![
            args.customer,
            merchant,
            max_amount,
            refresh_cadence,
            args.clock,
            args.auth,
        ],
    )
}

pub struct CancelRebillArgs {
    pub customer: Argument,
    pub merchant: Address,
    pub rebill_index: u64,
    pub auth: Argument,
}

pub fn cancel_rebill(
    tb: &mut TransactionBuilder,
    coin_type: &str,
    args: CancelRebillArgs,
) -> Result<Argument> {
    let merchant = args::pure(tb, &args.merchant);
    let rebill_index = args::pure(tb, &args.rebill_index);
    args::call(
        tb,
        PUBLISHED_AT,
        "coin23",
        "cancel_rebill",
        &[coin_type],
        vec![args.customer, merchant, rebill_index, args.auth],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coin23_content() -> serde_json::Value {
        json!({
            "dataType": "moveObject",
            "type": format!("{}::coin23::Coin23<0x2::sui::SUI>", PKG_V1),
            "fields": {
                "id": { "id": "0xc023" },
                "available": "2500",
                "rebills": {
                    "type": "0x2::vec_map::VecMap",
                    "fields": {
                        "contents": [{
                            "key": "0x3e7c",
                            "value": [{
                                "type": "coin23::Rebill<0x2::sui::SUI>",
                                "fields": {
                                    "available": "100",
                                    "refresh_amount": "100",
                                    "refresh_cadence": "86400000",
                                    "latest_refresh": "1700000000000"
                                }
                            }]
                        }]
                    }
                },
                "held_funds": { "fields": { "contents": [{ "key": "0x3e7c", "value": "500" }] } },
                "frozen": false
            }
        })
    }

    #[test]
    fn test_coin23_from_parsed_data() {
        let account = Coin23::from_sui_parsed_data(&coin23_content()).unwrap();
        assert_eq!(account.available.value, 2500);
        assert_eq!(account.total_balance(), 3000);
        let rebills = account.rebills.get(&"0x3e7c".parse().unwrap()).unwrap();
        assert_eq!(rebills[0].refresh_cadence, 86_400_000);
        assert!(!account.frozen);
    }

    #[test]
    fn test_coin23_requires_type_argument() {
        let mut content = coin23_content();
        content["type"] = json!(format!("{}::coin23::Coin23", PKG_V1));
        assert!(Coin23::from_sui_parsed_data(&content).is_err());
    }

    #[test]
    fn test_controls_optional_fee() {
        let controls = CurrencyControls {
            creator_can_withdraw: true,
            creator_can_freeze: false,
            user_transfer_enum: 1,
            transfer_fee: Some(TransferFee {
                bps: 25,
                pay_to: "0xfee".parse().unwrap(),
            }),
            export_auths: vec![],
        };
        let bytes = controls.to_bcs().unwrap();
        // 3 flag bytes, option tag, u64, address, empty vector
        assert_eq!(bytes.len(), 3 + 1 + 8 + 32 + 1);
        assert_eq!(CurrencyControls::from_bcs(&bytes).unwrap(), controls);
    }

    #[test]
    fn test_transfer_builder_targets_coin23() {
        let mut tb = TransactionBuilder::new();
        let from = Argument::Input(0);
        let to = Argument::Input(1);
        let registry = Argument::Input(2);
        let auth = Argument::Result(0);
        let result = transfer(
            &mut tb,
            "0x2::sui::SUI",
            TransferArgs {
                from,
                to,
                amount: 10,
                registry,
                auth,
            },
        )
        .unwrap();
        assert_eq!(result, Argument::Result(0));
        assert!(create(&mut tb, "not a type").is_err());
    }
}
