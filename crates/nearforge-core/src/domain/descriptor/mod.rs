//! Runtime descriptors for entities and planning variables.

mod entity;
mod value_type;
mod var_descriptor;

#[cfg(test)]
mod tests;

pub use entity::EntityDescriptor;
pub use value_type::ValueTypeDescriptor;
pub use var_descriptor::VariableDescriptor;
