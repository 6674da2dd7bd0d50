//! Nearby selection for distance-biased candidate values.
//!
//! Nearby selection improves move quality by preferring values that are
//! geographically or otherwise "close" to an origin entity. In vehicle
//! routing, moving a customer after one of its nearest neighbours improves
//! the solution far more often than moving it after a random customer.
//!
//! # Architecture
//!
//! - [`NearbyDistanceMeter`]: User-defined distance between origin and candidate
//! - [`OriginSource`] / [`CandidateSource`]: Enumerate origins and their candidates
//! - [`ProximityIndex`]: Per-phase rows of candidates sorted by distance
//! - [`IndexSampler`]: Draws row positions biased toward the nearest candidates
//! - [`SequentialNearbyIter`] / [`RandomNearbyIter`]: Walk or sample the rows
//! - [`NearEntityNearbyValueSelector`]: Owns the index for one phase
//!
//! # Lifecycle
//!
//! The index is built when a phase starts and dropped when it ends. Building
//! costs `O(ΣC log C)` once; every selection afterwards is `O(1)`.
//!
//! # Example
//!
//! ```
//! use nearforge_config::{NearbySelectionConfig, SelectionOrder};
//! use nearforge_core::{EntityDescriptor, ValueTypeDescriptor, VariableDescriptor};
//! use nearforge_solver::{
//!     NearEntityNearbyValueSelector, NearbyDistanceMeter, OriginId, PhaseEvent,
//!     PhaseLifecycleListener, StaticCandidateSource, StaticOriginSource,
//! };
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Stop { x: f64 }
//!
//! #[derive(Debug)]
//! struct AxisMeter;
//!
//! impl NearbyDistanceMeter<Stop, Stop> for AxisMeter {
//!     fn distance(&self, origin: &Stop, destination: &Stop) -> f64 {
//!         (origin.x - destination.x).abs()
//!     }
//! }
//!
//! let stops = vec![Stop { x: 0.0 }, Stop { x: 5.0 }, Stop { x: 2.0 }];
//! let variable = VariableDescriptor::genuine("previous")
//!     .with_value_type(ValueTypeDescriptor::of::<Stop>());
//! let entity = EntityDescriptor::of::<Stop>();
//! let config = NearbySelectionConfig::new().with_selection_order(SelectionOrder::Original);
//!
//! let mut selector = NearEntityNearbyValueSelector::from_config(
//!     &variable,
//!     &entity,
//!     StaticOriginSource::new(stops.clone()),
//!     StaticCandidateSource::new(stops),
//!     AxisMeter,
//!     &config,
//! )
//! .unwrap();
//!
//! let phase = PhaseEvent::new(0, "Local Search");
//! selector.phase_started(&phase).unwrap();
//!
//! // Nearest to stop 0, skipping stop 0 itself.
//! let nearest: Vec<Stop> = selector.sequential([OriginId::new(0)]).unwrap().collect();
//! assert_eq!(nearest, vec![Stop { x: 2.0 }]);
//!
//! selector.phase_ended(&phase);
//! assert!(selector.index().is_none());
//! ```

mod adapters;
mod distance_meter;
mod distribution;
mod index;
mod iterators;
mod source;
mod value_selector;

#[cfg(test)]
mod tests;

pub use adapters::{random_origins, FnCandidateSource, StaticCandidateSource, StaticOriginSource};
pub use distance_meter::{FnDistanceMeter, NearbyDistanceMeter};
pub use distribution::{
    working_rng, BlockDistribution, IndexSampler, LinearDistribution, NearbyDistribution,
    ParabolicDistribution,
};
pub use index::{ProximityIndex, NEARBY_INDEX_CAPACITY};
pub use iterators::{NearbyValueIter, RandomNearbyIter, SequentialNearbyIter};
pub use source::{CandidateSource, OriginId, OriginSource};
pub use value_selector::NearEntityNearbyValueSelector;
