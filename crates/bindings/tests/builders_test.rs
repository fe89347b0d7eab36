use std::str::FromStr;

use bindings::args::type_tag;
use bindings::demo::outlaw::{self, CreateArgs, EDITOR, RenameArgs};
use bindings::economy::coin23::{self, TransferArgs};
use bindings::ownership::delegation::{self, AddPermissionArgs};
use bindings::ownership::tx_authority;
use bindings::{Address, type_arg};
use sui_sdk_types::{
    self as sui, Argument, Command, Identifier, Input, MoveCall, ProgrammableTransaction,
    TransactionKind,
};
use sui_transaction_builder::{TransactionBuilder, unresolved};

const SENDER: &str = "0x00000000000000000000000000000000000000000000000000000000000a11ce";
const GAS_COIN: &str = "0x00000000000000000000000000000000000000000000000000000000000000a5";
const STORE: &str = "0x0000000000000000000000000000000000000000000000000000000000005702";

fn addr(s: &str) -> sui::Address {
    sui::Address::from_str(s).unwrap()
}

/// Complete the builder with a dummy sender and gas payment and return the
/// programmable transaction it produced.
fn finish(mut tb: TransactionBuilder) -> ProgrammableTransaction {
    tb.set_sender(addr(SENDER));
    tb.set_gas_price(1000);
    tb.set_gas_budget(50_000_000);
    tb.add_gas_objects(vec![unresolved::Input::owned(
        addr(GAS_COIN),
        1,
        sui::Digest::from_base58("11111111111111111111111111111111").unwrap(),
    )]);
    let tx = tb.finish().unwrap();
    match tx.kind {
        TransactionKind::ProgrammableTransaction(ptb) => ptb,
        other => panic!("expected a programmable transaction, got {:?}", other),
    }
}

fn move_call(ptb: &ProgrammableTransaction, ix: usize) -> &MoveCall {
    match &ptb.commands[ix] {
        Command::MoveCall(call) => call,
        other => panic!("command {} is not a move call: {:?}", ix, other),
    }
}

fn pure_bytes(ptb: &ProgrammableTransaction, arg: &Argument) -> Vec<u8> {
    let Argument::Input(ix) = arg else {
        panic!("expected an input argument, got {:?}", arg);
    };
    match &ptb.inputs[*ix as usize] {
        Input::Pure { value } => value.clone(),
        other => panic!("input {} is not pure: {:?}", ix, other),
    }
}

fn assert_target(call: &MoveCall, published_at: &str, module: &str, function: &str) {
    let package: Address = published_at.parse().unwrap();
    assert_eq!(call.package, sui::Address::from(package));
    assert_eq!(call.module, Identifier::from_str(module).unwrap());
    assert_eq!(call.function, Identifier::from_str(function).unwrap());
}

#[test]
fn test_demo_create_and_rename_targets() {
    let mut tb = TransactionBuilder::new();
    let auth = tx_authority::begin(&mut tb).unwrap();
    let created = outlaw::create(
        &mut tb,
        CreateArgs {
            name: "Sundance".to_string(),
            image_url: "https://img.example/sundance.png".to_string(),
            auth,
        },
    )
    .unwrap();
    outlaw::rename(
        &mut tb,
        RenameArgs {
            outlaw: created,
            new_name: "Butch".to_string(),
            auth,
        },
    )
    .unwrap();
    outlaw::return_and_share(&mut tb, created).unwrap();

    let ptb = finish(tb);
    assert_eq!(ptb.commands.len(), 4);

    let begin = move_call(&ptb, 0);
    assert_target(begin, bindings::ownership::PUBLISHED_AT, "tx_authority", "begin");
    assert!(begin.type_arguments.is_empty());
    assert!(begin.arguments.is_empty());

    let create = move_call(&ptb, 1);
    assert_target(create, bindings::demo::PUBLISHED_AT, "outlaw", "create");
    assert!(create.type_arguments.is_empty());
    assert_eq!(create.arguments.len(), 3);
    assert_eq!(
        pure_bytes(&ptb, &create.arguments[0]),
        bcs::to_bytes("Sundance").unwrap()
    );
    assert_eq!(
        pure_bytes(&ptb, &create.arguments[1]),
        bcs::to_bytes("https://img.example/sundance.png").unwrap()
    );
    assert_eq!(create.arguments[2], Argument::Result(0));

    let rename = move_call(&ptb, 2);
    assert_target(rename, bindings::demo::PUBLISHED_AT, "outlaw", "rename");
    assert_eq!(rename.arguments[0], Argument::Result(1));
    assert_eq!(
        pure_bytes(&ptb, &rename.arguments[1]),
        bcs::to_bytes("Butch").unwrap()
    );
    assert_eq!(rename.arguments[2], Argument::Result(0));

    let share = move_call(&ptb, 3);
    assert_target(share, bindings::demo::PUBLISHED_AT, "outlaw", "return_and_share");
    assert_eq!(share.arguments, vec![Argument::Result(1)]);
}

#[test]
fn test_delegation_targets_and_type_arguments() {
    let agent: Address = "0xb0b".parse().unwrap();
    let editor = type_arg::<EDITOR>();

    let mut tb = TransactionBuilder::new();
    let store = tb.input(unresolved::Input::shared(addr(STORE), 7, true));
    let auth = tx_authority::begin(&mut tb).unwrap();
    delegation::add_permission(&mut tb, &editor, AddPermissionArgs { store, agent, auth })
        .unwrap();
    delegation::claim_delegation(&mut tb, store).unwrap();

    let ptb = finish(tb);
    assert_eq!(ptb.commands.len(), 3);
    assert!(matches!(
        ptb.inputs[0],
        Input::Shared {
            initial_shared_version: 7,
            mutable: true,
            ..
        }
    ));

    let add = move_call(&ptb, 1);
    assert_target(add, bindings::ownership::PUBLISHED_AT, "delegation", "add_permission");
    assert_eq!(add.type_arguments, vec![type_tag(&editor).unwrap()]);
    assert_eq!(add.arguments[0], store);
    let agent_bytes = pure_bytes(&ptb, &add.arguments[1]);
    assert_eq!(agent_bytes.len(), 32);
    assert_eq!(agent_bytes, bcs::to_bytes(&agent).unwrap());
    assert_eq!(add.arguments[2], Argument::Result(0));

    let claim = move_call(&ptb, 2);
    assert_target(claim, bindings::ownership::PUBLISHED_AT, "delegation", "claim_delegation");
    assert!(claim.type_arguments.is_empty());
    assert_eq!(claim.arguments, vec![store]);
}

#[test]
fn test_coin23_transfer_is_generic_over_the_coin_type() {
    let mut tb = TransactionBuilder::new();
    let from = tb.input(unresolved::Input::shared(addr(STORE), 3, true));
    let to = tb.input(unresolved::Input::shared(
        addr("0x0000000000000000000000000000000000000000000000000000000000000b0b"),
        4,
        true,
    ));
    let registry = tb.input(unresolved::Input::shared(
        addr("0x00000000000000000000000000000000000000000000000000000000000c0de"),
        5,
        false,
    ));
    let auth = tx_authority::begin(&mut tb).unwrap();
    coin23::transfer(
        &mut tb,
        "0x2::sui::SUI",
        TransferArgs {
            from,
            to,
            amount: 1_500,
            registry,
            auth,
        },
    )
    .unwrap();

    let ptb = finish(tb);
    let transfer = move_call(&ptb, 1);
    assert_target(transfer, bindings::economy::PUBLISHED_AT, "coin23", "transfer");
    assert_eq!(
        transfer.type_arguments,
        vec![type_tag(
            "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI"
        )
        .unwrap()]
    );
    assert_eq!(transfer.arguments.len(), 5);
    assert_eq!(transfer.arguments[0], from);
    assert_eq!(transfer.arguments[1], to);
    assert_eq!(
        pure_bytes(&ptb, &transfer.arguments[2]),
        1_500u64.to_le_bytes().to_vec()
    );
    assert_eq!(transfer.arguments[3], registry);
    assert_eq!(transfer.arguments[4], Argument::Result(0));
}
