//! Test utilities for nearforge-solver
//!
//! Re-exports the routing fixtures from nearforge-test and adds
//! selector-specific helpers.

use nearforge_config::NearbySelectionConfig;
use nearforge_core::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use nearforge_test::routing::{
    create_customer_descriptor, grid_customers, line_customers, previous_variable_descriptor,
    Customer,
};

use crate::event::PhaseEvent;
use crate::heuristic::selector::nearby::{
    NearEntityNearbyValueSelector, NearbyDistanceMeter, StaticCandidateSource, StaticOriginSource,
};

/// Euclidean distance between two customers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerDistanceMeter;

impl NearbyDistanceMeter<Customer, Customer> for CustomerDistanceMeter {
    fn distance(&self, origin: &Customer, destination: &Customer) -> f64 {
        origin.location.distance_to(&destination.location)
    }
}

/// A selector over customers whose candidates are all customers.
pub type CustomerSelector = NearEntityNearbyValueSelector<
    StaticOriginSource<Customer>,
    StaticCandidateSource<Customer, Customer>,
    CustomerDistanceMeter,
>;

/// Creates a selector for the `previous` variable of `customers`.
pub fn customer_selector(
    customers: Vec<Customer>,
    config: &NearbySelectionConfig,
) -> Result<CustomerSelector> {
    NearEntityNearbyValueSelector::from_config(
        &previous_variable_descriptor(),
        &create_customer_descriptor(),
        StaticOriginSource::new(customers.clone()),
        StaticCandidateSource::new(customers),
        CustomerDistanceMeter,
        config,
    )
}

/// Returns the phase event used by tests.
pub fn local_search_phase(phase_index: usize) -> PhaseEvent {
    PhaseEvent::new(phase_index, "Local Search")
}

/// Creates a deterministic rng.
pub fn test_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
