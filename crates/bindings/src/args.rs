//! Helpers shared by the move-call builders.

use serde::Serialize;
use sui_sdk_types::{self as sui, Argument, TypeTag};
use sui_transaction_builder::{Function, Serialized, TransactionBuilder};

use crate::address::Address;
use crate::error::{BindingsError, Result};
use crate::type_name::MoveType;

/// Add a pure BCS argument.
pub fn pure<T: Serialize>(tb: &mut TransactionBuilder, value: &T) -> Argument {
    tb.input(Serialized(value))
}

/// Parse a type argument, accepting short addresses such as `0x2::sui::SUI`.
pub fn type_tag(type_str: &str) -> Result<TypeTag> {
    let normalized: MoveType = type_str.parse()?;
    normalized
        .to_string()
        .parse()
        .map_err(|_| BindingsError::InvalidTypeName(type_str.to_string()))
}

/// Append `published_at::module::function<type_args>(args)` and return its
/// result.
pub fn call(
    tb: &mut TransactionBuilder,
    published_at: &str,
    module: &str,
    function: &str,
    type_args: &[&str],
    args: Vec<Argument>,
) -> Result<Argument> {
    let target = format!("{}::{}::{}", published_at, module, function);
    let invalid = |message: String| BindingsError::InvalidCall {
        target: target.clone(),
        message,
    };

    let package: Address = published_at
        .parse()
        .map_err(|e| invalid(format!("bad package address: {}", e)))?;
    let module = module
        .parse()
        .map_err(|e| invalid(format!("bad module name: {}", e)))?;
    let function = function
        .parse()
        .map_err(|e| invalid(format!("bad function name: {}", e)))?;
    let type_args = type_args
        .iter()
        .map(|t| type_tag(t))
        .collect::<Result<Vec<_>>>()?;

    let func = Function::new(sui::Address::from(package), module, function, type_args);
    Ok(tb.move_call(func, args))
}

/// Element `ix` of a call that returns a tuple or a vector of coins.
pub fn nested(arg: Argument, ix: u16) -> Argument {
    match arg {
        Argument::Result(cmd) => Argument::NestedResult(cmd, ix),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_accepts_short_addresses() {
        let short = type_tag("0x2::sui::SUI").unwrap();
        let long = type_tag(
            "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI",
        )
        .unwrap();
        assert_eq!(short, long);
        assert!(type_tag("vector<u8>").is_ok());
        assert!(type_tag("0x2::sui").is_err());
    }

    #[test]
    fn test_nested_result() {
        assert_eq!(nested(Argument::Result(3), 1), Argument::NestedResult(3, 1));
        assert_eq!(nested(Argument::Gas, 0), Argument::Gas);
    }

    #[test]
    fn test_call_rejects_bad_identifiers() {
        let mut tb = TransactionBuilder::new();
        let err = call(&mut tb, "0x2", "bad module", "f", &[], vec![]).unwrap_err();
        assert!(matches!(err, BindingsError::InvalidCall { .. }));
        let ok = call(&mut tb, "0x2", "coin", "zero", &["0x2::sui::SUI"], vec![]).unwrap();
        assert_eq!(ok, Argument::Result(0));
    }
}
