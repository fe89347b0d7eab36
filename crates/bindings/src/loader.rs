//! Runtime registry from on-chain type strings to struct mirrors.
//!
//! Callers that only know an object's type at runtime (explorers, the CLI)
//! go through [`StructClassLoader`]; callers that know the type statically
//! use [`MoveStruct`] directly.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::OnceLock;

use bcs_schema::Layout;
use serde_json::Value;
use tracing::debug;

use crate::error::{BindingsError, Result};
use crate::reified::{MoveStruct, parsed_data_type};
use crate::type_name::MoveTypeName;

/// A decoded struct of a type known only at runtime.
pub trait DecodedStruct: Debug + Send + Sync {
    fn to_json(&self) -> Result<Value>;
    fn as_any(&self) -> &dyn Any;
}

impl<T: MoveStruct> DecodedStruct for T {
    fn to_json(&self) -> Result<Value> {
        MoveStruct::to_json(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct LoadedStruct {
    pub type_name: MoveTypeName,
    pub value: Box<dyn DecodedStruct>,
}

impl LoadedStruct {
    pub fn downcast_ref<T: MoveStruct>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref::<T>()
    }

    pub fn to_json(&self) -> Result<Value> {
        self.value.to_json()
    }
}

type DecodeFn = fn(&[u8]) -> Result<Box<dyn DecodedStruct>>;

#[derive(Clone, Copy)]
struct StructClass {
    arity: usize,
    decode: DecodeFn,
    layout: fn() -> Layout,
}

fn decode_as<T: MoveStruct>(bytes: &[u8]) -> Result<Box<dyn DecodedStruct>> {
    Ok(Box::new(T::from_bcs(bytes)?))
}

#[derive(Default)]
pub struct StructClassLoader {
    classes: HashMap<String, StructClass>,
}

impl StructClassLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under its base type. Registering the same type twice
    /// keeps the first entry.
    pub fn register<T: MoveStruct>(&mut self) {
        let base = T::base_type();
        if self.classes.contains_key(&base) {
            debug!("Struct class {} already registered", base);
            return;
        }
        self.classes.insert(
            base,
            StructClass {
                arity: T::TYPE_ARITY,
                decode: decode_as::<T>,
                layout: T::layout,
            },
        );
    }

    pub fn contains(&self, type_str: &str) -> bool {
        self.resolve(type_str).is_ok()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Base types of every registered struct, sorted.
    pub fn registered_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.classes.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn layout(&self, type_str: &str) -> Result<Layout> {
        let (_, class) = self.resolve(type_str)?;
        Ok((class.layout)())
    }

    fn resolve(&self, type_str: &str) -> Result<(MoveTypeName, StructClass)> {
        let name: MoveTypeName = type_str.parse()?;
        let class = *self
            .classes
            .get(&name.base())
            .ok_or_else(|| BindingsError::UnknownType(name.base()))?;
        if class.arity != name.arity() {
            return Err(BindingsError::ArityMismatch {
                type_name: name.base(),
                expected: class.arity,
                found: name.arity(),
            });
        }
        Ok((name, class))
    }

    pub fn from_bcs(&self, type_str: &str, bytes: &[u8]) -> Result<LoadedStruct> {
        let (type_name, class) = self.resolve(type_str)?;
        let value = (class.decode)(bytes)?;
        Ok(LoadedStruct { type_name, value })
    }

    /// Decode parsed RPC fields by first encoding them with the registered
    /// layout.
    pub fn from_fields(&self, type_str: &str, fields: &Value) -> Result<LoadedStruct> {
        let (type_name, class) = self.resolve(type_str)?;
        let bytes = bcs_schema::encode_value(&(class.layout)().into_type(), fields)?;
        let value = (class.decode)(&bytes)?;
        Ok(LoadedStruct { type_name, value })
    }

    pub fn from_sui_parsed_data(&self, content: &Value) -> Result<LoadedStruct> {
        let type_str = parsed_data_type(content)?;
        self.from_fields(type_str, &content["fields"])
    }
}

/// Loader with every mirror in this crate registered.
pub fn loader() -> &'static StructClassLoader {
    static LOADER: OnceLock<StructClassLoader> = OnceLock::new();
    LOADER.get_or_init(|| {
        let mut loader = StructClassLoader::new();
        crate::init::register_all(&mut loader);
        debug!("Struct class loader ready with {} types", loader.len());
        loader
    })
}
