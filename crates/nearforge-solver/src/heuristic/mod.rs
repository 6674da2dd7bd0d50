//! Heuristic building blocks used by local search.

pub mod selector;

pub use selector::nearby::{
    random_origins, working_rng, BlockDistribution, CandidateSource, FnCandidateSource,
    FnDistanceMeter, IndexSampler, LinearDistribution, NearEntityNearbyValueSelector,
    NearbyDistanceMeter, NearbyDistribution, NearbyValueIter, OriginId, OriginSource,
    ParabolicDistribution, ProximityIndex, RandomNearbyIter, SequentialNearbyIter,
    StaticCandidateSource, StaticOriginSource, NEARBY_INDEX_CAPACITY,
};
