//! Nearforge Solver Engine
//!
//! This crate provides the nearby value selection engine used by local search:
//! - A per-phase proximity index of candidates sorted by distance to each origin
//! - Sequential and biased-random iteration over that index
//! - Index samplers biased toward the nearest candidates
//! - Phase lifecycle hooks that build and drop the index

pub mod event;
pub mod heuristic;

#[cfg(test)]
pub(crate) mod test_utils;

pub use event::{PhaseEvent, PhaseLifecycleListener, PhaseLifecycleSupport};
pub use heuristic::{
    random_origins, working_rng, BlockDistribution, CandidateSource, FnCandidateSource,
    FnDistanceMeter, IndexSampler, LinearDistribution, NearEntityNearbyValueSelector,
    NearbyDistanceMeter, NearbyDistribution, NearbyValueIter, OriginId, OriginSource,
    ParabolicDistribution, ProximityIndex, RandomNearbyIter, SequentialNearbyIter,
    StaticCandidateSource, StaticOriginSource, NEARBY_INDEX_CAPACITY,
};
