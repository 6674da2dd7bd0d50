//! Entity descriptor.

use std::any::TypeId;

/// Describes a planning entity type at runtime.
///
/// Nearby selectors only need the runtime identity of their origin entity,
/// to check it against the value type of the selected variable.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    /// Name of the entity type.
    pub type_name: &'static str,
    /// TypeId of the entity type.
    pub type_id: TypeId,
}

impl EntityDescriptor {
    /// Creates a new EntityDescriptor.
    pub fn new(type_name: &'static str, type_id: TypeId) -> Self {
        EntityDescriptor { type_name, type_id }
    }

    /// Creates a descriptor for `T`, named after its short type name.
    pub fn of<T: 'static>() -> Self {
        Self::new(short_type_name::<T>(), TypeId::of::<T>())
    }
}

pub(super) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    // Strip the module path but keep generic arguments intact.
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}
