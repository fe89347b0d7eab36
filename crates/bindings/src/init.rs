use crate::loader::StructClassLoader;
use crate::{demo, economy, framework, ownership};

pub fn register_all(loader: &mut StructClassLoader) {
    framework::register_classes(loader);
    ownership::register_classes(loader);
    economy::register_classes(loader);
    demo::register_classes(loader);
}
