use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};

use super::SUI_FRAMEWORK;
use crate::reified::{MoveField, MoveStruct};

/// `0x2::vec_map::Entry<K, V>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

/// `0x2::vec_map::VecMap<K, V>`, an insertion-ordered association list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize, V: Serialize",
    deserialize = "K: Deserialize<'de>, V: Deserialize<'de>"
))]
pub struct VecMap<K, V> {
    pub contents: Vec<Entry<K, V>>,
}

impl<K, V> Default for VecMap<K, V> {
    fn default() -> Self {
        Self {
            contents: Vec::new(),
        }
    }
}

impl<K: PartialEq, V> VecMap<K, V> {
    pub fn get(&self, key: &K) -> Option<&V> {
        self.contents
            .iter()
            .find(|e| &e.key == key)
            .map(|e| &e.value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.contents.iter().map(|e| &e.key)
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl<K: MoveField, V: MoveField> MoveField for Entry<K, V> {
    fn field_type() -> FieldType {
        Layout::new(format!("{}::vec_map::Entry", SUI_FRAMEWORK))
            .field("key", K::field_type())
            .field("value", V::field_type())
            .into_type()
    }
}

fn layout_of<K: MoveField, V: MoveField>() -> Layout {
    Layout::new(format!("{}::vec_map::VecMap", SUI_FRAMEWORK))
        .field("contents", FieldType::vector(Entry::<K, V>::field_type()))
}

impl<K: MoveField, V: MoveField> MoveField for VecMap<K, V> {
    fn field_type() -> FieldType {
        layout_of::<K, V>().into_type()
    }
}

impl<K, V> MoveStruct for VecMap<K, V>
where
    K: MoveField + Serialize + for<'de> Deserialize<'de> + std::fmt::Debug + Send + Sync + 'static,
    V: MoveField + Serialize + for<'de> Deserialize<'de> + std::fmt::Debug + Send + Sync + 'static,
{
    const ADDRESS: &'static str = SUI_FRAMEWORK;
    const MODULE: &'static str = "vec_map";
    const NAME: &'static str = "VecMap";
    const TYPE_ARITY: usize = 2;

    fn layout() -> Layout {
        layout_of::<K, V>()
    }
}
