//! Selectors for values.
//!
//! Selectors enumerate the elements that the solver considers when
//! exploring the solution space.

pub mod nearby;

pub use nearby::{NearEntityNearbyValueSelector, NearbyDistanceMeter};
