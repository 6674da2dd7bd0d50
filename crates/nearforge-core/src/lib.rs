//! Nearforge Core - Shared types for nearby selection
//!
//! This crate provides the abstractions shared by the nearforge crates:
//! - Error types for fatal selector misconfiguration
//! - Descriptor types carrying the runtime metadata of entities and variables

pub mod domain;
pub mod error;

pub use domain::{EntityDescriptor, ValueTypeDescriptor, VariableDescriptor};
pub use error::{NearforgeError, Result};
