//! Value type descriptor.

use std::any::TypeId;

use super::entity::short_type_name;

/// Describes the declared value type of a planning variable.
///
/// Rust has no subclassing, so a value type that can hold several concrete
/// types (an enum over anchors and entities, or a boxed trait object) lists
/// them explicitly with [`with_assignable`](Self::with_assignable).
///
/// # Example
///
/// ```
/// use std::any::TypeId;
/// use nearforge_core::ValueTypeDescriptor;
///
/// struct Vehicle;
/// struct Customer;
/// enum Standstill { Vehicle(Vehicle), Customer(Customer) }
///
/// let standstill = ValueTypeDescriptor::of::<Standstill>()
///     .with_assignable::<Vehicle>()
///     .with_assignable::<Customer>();
///
/// assert!(standstill.is_assignable_from(TypeId::of::<Customer>()));
/// assert!(!standstill.is_assignable_from(TypeId::of::<String>()));
/// ```
#[derive(Debug, Clone)]
pub struct ValueTypeDescriptor {
    /// Name of the value type.
    pub type_name: &'static str,
    /// TypeId of the value type.
    pub type_id: TypeId,
    /// Concrete types that may be stored in a value of this type.
    assignable: Vec<TypeId>,
}

impl ValueTypeDescriptor {
    /// Creates a descriptor for an explicitly named type.
    pub fn new(type_name: &'static str, type_id: TypeId) -> Self {
        Self {
            type_name,
            type_id,
            assignable: Vec::new(),
        }
    }

    /// Creates a descriptor for `T`.
    pub fn of<T: 'static>() -> Self {
        Self::new(short_type_name::<T>(), TypeId::of::<T>())
    }

    /// Declares `T` as storable in this value type.
    pub fn with_assignable<T: 'static>(mut self) -> Self {
        let type_id = TypeId::of::<T>();
        if !self.assignable.contains(&type_id) {
            self.assignable.push(type_id);
        }
        self
    }

    /// Returns true if a value of `type_id` can be assigned to this type.
    pub fn is_assignable_from(&self, type_id: TypeId) -> bool {
        self.type_id == type_id || self.assignable.contains(&type_id)
    }
}
