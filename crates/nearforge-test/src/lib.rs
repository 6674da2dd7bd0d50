//! Shared test fixtures for nearforge crates.
//!
//! This crate provides data types and pure functions for testing.
//! It depends only on `nearforge-core`, so the solver crate can use it as a
//! dev-dependency without a cycle.
//!
//! - [`routing`] - Customers and vehicles on a plane, with descriptors
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! nearforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use nearforge_test::routing::{grid_customers, Customer};
//!
//! let customers: Vec<Customer> = grid_customers(3, 2);
//! assert_eq!(customers.len(), 6);
//! ```

pub mod routing;

pub use routing::{Customer, Location, Standstill, Vehicle};
