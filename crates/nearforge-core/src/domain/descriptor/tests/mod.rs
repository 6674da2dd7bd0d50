//! Tests for descriptor types.


// Shared test types used across descriptor test modules.

#[allow(dead_code)]
pub(super) struct Visit;

#[allow(dead_code)]
pub(super) struct Vehicle;

#[allow(dead_code)]
pub(super) enum Standstill {
    Vehicle(Vehicle),
    Visit(Visit),
}
