use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};

use super::SUI_FRAMEWORK;
use crate::reified::{MoveField, MoveStruct};

/// `0x2::vec_set::VecSet<T>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct VecSet<T> {
    pub contents: Vec<T>,
}

impl<T> Default for VecSet<T> {
    fn default() -> Self {
        Self {
            contents: Vec::new(),
        }
    }
}

impl<T: PartialEq> VecSet<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.contents.contains(item)
    }
}

fn layout_of<T: MoveField>() -> Layout {
    Layout::new(format!("{}::vec_set::VecSet", SUI_FRAMEWORK))
        .field("contents", FieldType::vector(T::field_type()))
}

impl<T: MoveField> MoveField for VecSet<T> {
    fn field_type() -> FieldType {
        layout_of::<T>().into_type()
    }
}

impl<T> MoveStruct for VecSet<T>
where
    T: MoveField + Serialize + for<'de> Deserialize<'de> + std::fmt::Debug + Send + Sync + 'static,
{
    const ADDRESS: &'static str = SUI_FRAMEWORK;
    const MODULE: &'static str = "vec_set";
    const NAME: &'static str = "VecSet";
    const TYPE_ARITY: usize = 1;

    fn layout() -> Layout {
        layout_of::<T>()
    }
}
