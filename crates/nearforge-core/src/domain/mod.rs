//! Domain model metadata consumed by the nearby selectors.
//!
//! Nearforge does not define planning entities or variables itself. It only
//! reads the descriptors below to validate a selector graph before solving:
//! - `EntityDescriptor`: runtime identity of an entity class
//! - `VariableDescriptor`: a planning variable and its declared value type
//! - `ValueTypeDescriptor`: which concrete types a variable's value may be

mod descriptor;

pub use descriptor::{EntityDescriptor, ValueTypeDescriptor, VariableDescriptor};
