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

/// `fund::Fund<T, S>`: a pooled balance of coin `T` with shares of kind `S`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fund {
    pub id: UID,
    pub total_shares: u64,
    pub principal: Balance,
    pub owned_shares: VecMap<Address, u64>,
}

impl Fund {
    /// Principal redeemable for `shares`, rounded down. Saturates at
    /// `u64::MAX` when `shares` exceeds `total_shares` by enough to overflow.
    pub fn share_value(&self, shares: u64) -> u64 {
        if self.total_shares == 0 {
            return 0;
        }
        let value =
            u128::from(self.principal.value) * u128::from(shares) / u128::from(self.total_shares);
        u64::try_from(value).unwrap_or(u64::MAX)
    }
}

impl MoveField for Fund {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Fund {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "fund";
    const NAME: &'static str = "Fund";
    const TYPE_ARITY: usize = 2;

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("id", UID::field_type())
            .field("total_shares", FieldType::U64)
            .field("principal", Balance::field_type())
            .field("owned_shares", VecMap::<Address, u64>::field_type())
    }
}

pub struct DepositArgs {
    pub fund: Argument,
    pub account: Argument,
    pub amount: u64,
    pub auth: Argument,
}

/// `fund::deposit<T, S>(fund, account, amount, auth)`
pub fn deposit(
    tb: &mut TransactionBuilder,
    coin_type: &str,
    share_type: &str,
    args: DepositArgs,
) -> Result<Argument> {
    let amount = args::pure(tb, &args.amount);
    args::call(
        tb,
        PUBLISHED_AT,
        "fund",
        "deposit",
        &[coin_type, share_type],
        vec![args.fund, args.account, amount, args.auth],
    )
}

pub struct WithdrawArgs {
    pub fund: Argument,
    pub account: Argument,
    pub shares: u64,
    pub auth: Argument,
}

/// `fund::withdraw<T, S>(fund, account, shares, auth)`
pub fn withdraw(
    tb: &mut TransactionBuilder,
    coin_type: &str,
    share_type: &str,
    args: WithdrawArgs,
) -> Result<Argument> {
    let shares = args::pure(tb, &args.shares);
    args::call(
        tb,
        PUBLISHED_AT,
        "fund",
        "withdraw",
        &[coin_type, share_type],
        vec![args.fund, args.account, shares, args.auth],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_value() {
        let fund = Fund {
            id: UID::new("0xf".parse().unwrap()),
            total_shares: 3,
            principal: Balance { value: 100 },
            owned_shares: VecMap::default(),
        };
        assert_eq!(fund.share_value(1), 33);
        assert_eq!(fund.share_value(3), 100);
    }

    #[test]
    fn test_share_value_saturates() {
        let fund = Fund {
            id: UID::new("0xf".parse().unwrap()),
            total_shares: 2,
            principal: Balance { value: u64::MAX },
            owned_shares: VecMap::default(),
        };
        assert_eq!(fund.share_value(1), u64::MAX / 2);
        assert_eq!(fund.share_value(4), u64::MAX);
        assert_eq!(fund.share_value(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_fund_arity() {
        let base = Fund::base_type();
        assert!(Fund::is_type(&format!("{}<0x2::sui::SUI, u8>", base)));
        assert!(!Fund::is_type(&format!("{}<0x2::sui::SUI>", base)));
    }
}
