//! Vehicle routing fixtures.
//!
//! Customers sit on a plane; the distance between two customers is the
//! Euclidean distance between their locations. A customer's `previous`
//! standstill is either a vehicle or another customer, which makes the
//! customers self-referential origins for nearby value selection.

use std::any::TypeId;

use nearforge_core::{EntityDescriptor, ValueTypeDescriptor, VariableDescriptor};

/// A point on the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A customer to be visited.
#[derive(Clone, Debug, PartialEq)]
pub struct Customer {
    pub id: usize,
    pub location: Location,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self {
            id,
            location: Location::new(x, y),
        }
    }
}

/// A vehicle starting at a depot.
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    pub id: usize,
    pub depot: Location,
}

/// The value type of a customer's `previous` variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Standstill {
    Vehicle(Vehicle),
    Customer(Customer),
}

impl Standstill {
    /// Returns the location of this standstill.
    pub fn location(&self) -> Location {
        match self {
            Standstill::Vehicle(v) => v.depot,
            Standstill::Customer(c) => c.location,
        }
    }
}

/// Creates `cols * rows` customers on a unit grid, numbered row by row.
pub fn grid_customers(cols: usize, rows: usize) -> Vec<Customer> {
    (0..rows)
        .flat_map(|y| (0..cols).map(move |x| (x, y)))
        .enumerate()
        .map(|(id, (x, y))| Customer::new(id, x as f64, y as f64))
        .collect()
}

/// Creates customers on the x axis at the given coordinates.
pub fn line_customers(xs: &[f64]) -> Vec<Customer> {
    xs.iter()
        .enumerate()
        .map(|(id, &x)| Customer::new(id, x, 0.0))
        .collect()
}

/// Value type of the `previous` variable: a customer or a vehicle.
pub fn standstill_value_type() -> ValueTypeDescriptor {
    ValueTypeDescriptor::of::<Standstill>()
        .with_assignable::<Customer>()
        .with_assignable::<Vehicle>()
}

/// The `previous` variable of a customer.
pub fn previous_variable_descriptor() -> VariableDescriptor {
    VariableDescriptor::genuine("previous")
        .with_value_type(standstill_value_type())
}

/// Descriptor for the customer entity.
pub fn create_customer_descriptor() -> EntityDescriptor {
    EntityDescriptor::new("Customer", TypeId::of::<Customer>())
}

/// Descriptor for the vehicle entity, which has no planning variables.
pub fn create_vehicle_descriptor() -> EntityDescriptor {
    EntityDescriptor::new("Vehicle", TypeId::of::<Vehicle>())
}
