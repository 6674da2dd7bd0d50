//! Variable descriptor.

use super::ValueTypeDescriptor;

/// Describes a planning variable at runtime.
#[derive(Debug, Clone)]
pub struct VariableDescriptor {
    /// Name of the variable (field name).
    pub name: &'static str,
    /// Declared type of the values this variable holds.
    pub value_type: Option<ValueTypeDescriptor>,
}

impl VariableDescriptor {
    /// Creates a new genuine variable descriptor without a declared value type.
    pub fn genuine(name: &'static str) -> Self {
        VariableDescriptor {
            name,
            value_type: None,
        }
    }

    /// Sets the declared value type.
    pub fn with_value_type(mut self, value_type: ValueTypeDescriptor) -> Self {
        self.value_type = Some(value_type);
        self
    }
}
