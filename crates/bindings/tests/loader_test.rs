use bindings::demo::outlaw::{EDITOR, Outlaw};
use bindings::economy::coin23::Coin23;
use bindings::framework::coin::Coin;
use bindings::ownership::delegation::DelegationStore;
use bindings::{BindingsError, MoveStruct, StructClassLoader, loader};
use serde_json::json;

fn outlaw_content() -> serde_json::Value {
    json!({
        "dataType": "moveObject",
        "type": format!("{}::outlaw::Outlaw", bindings::demo::PKG_V1),
        "hasPublicTransfer": false,
        "fields": {
            "id": { "id": "0x4242" },
            "name": "Sundance",
            "image": "https://img.example/sundance.png",
            "power_level": "7",
            "attributes": { "contents": [] }
        }
    })
}

#[test]
fn test_every_package_registered() {
    let types = loader().registered_types();
    for expected in [
        Coin::base_type(),
        Coin23::base_type(),
        DelegationStore::base_type(),
        Outlaw::base_type(),
        EDITOR::base_type(),
    ] {
        assert!(types.contains(&expected), "missing {}", expected);
    }
    let mut sorted = types.clone();
    sorted.sort();
    assert_eq!(types, sorted);
}

#[test]
fn test_decode_by_type_string() {
    let loaded = loader().from_sui_parsed_data(&outlaw_content()).unwrap();
    assert_eq!(loaded.type_name.name, "Outlaw");
    let outlaw = loaded.downcast_ref::<Outlaw>().unwrap();
    assert_eq!(outlaw.name, "Sundance");
    assert!(loaded.downcast_ref::<Coin>().is_none());

    let bytes = outlaw.to_bcs().unwrap();
    let again = loader()
        .from_bcs(&loaded.type_name.to_string(), &bytes)
        .unwrap();
    assert_eq!(again.to_json().unwrap(), loaded.to_json().unwrap());
    assert_eq!(again.to_json().unwrap()["power_level"], "7");
}

#[test]
fn test_short_address_resolves() {
    assert!(loader().contains("0x2::coin::Coin<0x2::sui::SUI>"));
    assert!(!loader().contains("0x2::coin::Coin"));
    assert!(!loader().contains("0x3::coin::Coin<0x2::sui::SUI>"));
}

#[test]
fn test_errors() {
    let err = loader().from_bcs("0x3::nope::Nope", &[]).unwrap_err();
    assert!(matches!(err, BindingsError::UnknownType(_)));

    let err = loader()
        .from_bcs("0x2::balance::Balance", &[0; 8])
        .unwrap_err();
    assert!(matches!(err, BindingsError::ArityMismatch { expected: 1, found: 0, .. }));

    let err = loader().from_bcs("0x2::coin::Coin<", &[]).unwrap_err();
    assert!(matches!(err, BindingsError::InvalidTypeName(_)));

    // trailing byte
    let err = loader()
        .from_bcs("0x2::balance::Balance<0x2::sui::SUI>", &[0; 9])
        .unwrap_err();
    assert!(matches!(err, BindingsError::Bcs(_)));

    let mut content = outlaw_content();
    content["dataType"] = json!("package");
    let err = loader().from_sui_parsed_data(&content).unwrap_err();
    assert!(matches!(err, BindingsError::NotMoveObject(_)));
}

#[test]
fn test_register_is_idempotent() {
    let mut local = StructClassLoader::new();
    assert!(local.is_empty());
    local.register::<Outlaw>();
    local.register::<Outlaw>();
    assert_eq!(local.len(), 1);
    assert_eq!(
        local.layout("0x5d2f8a1c3e6b9d4f7a0c2e5b8d1f4a7c0e3b6d9f2a5c8e1b4d7f0a3c6e9b2d58::outlaw::Outlaw")
            .unwrap()
            .fields
            .len(),
        5
    );
}

#[test]
fn test_missing_field_is_reported() {
    let mut content = outlaw_content();
    content["fields"].as_object_mut().unwrap().remove("image");
    let err = Outlaw::from_sui_parsed_data(&content).unwrap_err();
    assert!(err.to_string().contains("image"), "{}", err);
}
