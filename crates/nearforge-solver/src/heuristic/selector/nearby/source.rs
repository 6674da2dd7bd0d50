//! Origin and candidate sources consumed by nearby selection.

use std::fmt::Debug;

/// Identifies an origin by its position in the phase's final enumeration.
///
/// Ids are dense: a phase with `n` origins uses ids `0..n`, and the
/// [`ProximityIndex`](super::ProximityIndex) stores one row per id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OriginId(pub usize);

impl OriginId {
    /// Creates a new origin id.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position in the final enumeration.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Enumerates the origin entities of a nearby selector.
pub trait OriginSource: Debug {
    /// The origin entity type.
    type Origin;

    /// Returns the number of origins the final enumeration yields.
    fn size(&self) -> u64;

    /// Enumerates every origin once, in a stable order.
    ///
    /// Called when a phase starts. The n-th origin yielded gets `OriginId(n)`.
    fn enumerate_final(&self) -> impl Iterator<Item = Self::Origin> + '_;

    /// Returns the live origin stream consumed by the selectors.
    fn iter(&self) -> impl Iterator<Item = OriginId> + '_;
}

/// Enumerates the candidate values available to an origin.
pub trait CandidateSource<O>: Debug {
    /// The candidate value type.
    type Candidate;

    /// Enumerates every candidate of `origin` once, in a stable order.
    ///
    /// For self-referential variables the origin itself is expected among
    /// them, at distance 0.
    fn enumerate_final<'a>(&'a self, origin: &'a O) -> impl Iterator<Item = Self::Candidate> + 'a;

    /// Returns the number of candidates of `origin`.
    fn count(&self, origin: &O) -> u64;

    /// Returns true if the candidates are finite and never repeated.
    fn is_countable(&self) -> bool {
        true
    }
}
