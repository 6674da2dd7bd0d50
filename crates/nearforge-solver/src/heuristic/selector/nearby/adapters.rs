//! Ready-made origin and candidate sources.

use std::fmt::{self, Debug};
use std::marker::PhantomData;

use rand::Rng;

use super::source::{CandidateSource, OriginId, OriginSource};

/// An origin source over a fixed list of origins.
///
/// The live stream walks the origins once, in list order.
pub struct StaticOriginSource<O> {
    origins: Vec<O>,
}

impl<O: Clone> Clone for StaticOriginSource<O> {
    fn clone(&self) -> Self {
        Self {
            origins: self.origins.clone(),
        }
    }
}

impl<O: Debug> Debug for StaticOriginSource<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticOriginSource")
            .field("origins", &self.origins)
            .finish()
    }
}

impl<O: Clone> StaticOriginSource<O> {
    /// Creates a new origin source with the given origins.
    pub fn new(origins: Vec<O>) -> Self {
        Self { origins }
    }

    /// Returns the origins.
    pub fn origins(&self) -> &[O] {
        &self.origins
    }
}

impl<O: Clone + Debug> OriginSource for StaticOriginSource<O> {
    type Origin = O;

    fn size(&self) -> u64 {
        self.origins.len() as u64
    }

    fn enumerate_final(&self) -> impl Iterator<Item = O> + '_ {
        self.origins.iter().cloned()
    }

    fn iter(&self) -> impl Iterator<Item = OriginId> + '_ {
        (0..self.origins.len()).map(OriginId)
    }
}

/// A candidate source offering the same values to every origin.
pub struct StaticCandidateSource<O, V> {
    values: Vec<V>,
    _phantom: PhantomData<fn(&O)>,
}

impl<O, V: Clone> Clone for StaticCandidateSource<O, V> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<O, V: Debug> Debug for StaticCandidateSource<O, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCandidateSource")
            .field("values", &self.values)
            .finish()
    }
}

impl<O, V: Clone> StaticCandidateSource<O, V> {
    /// Creates a new candidate source with the given values.
    pub fn new(values: Vec<V>) -> Self {
        Self {
            values,
            _phantom: PhantomData,
        }
    }

    /// Returns the values.
    pub fn values(&self) -> &[V] {
        &self.values
    }
}

impl<O, V: Clone + Debug> CandidateSource<O> for StaticCandidateSource<O, V> {
    type Candidate = V;

    fn enumerate_final<'a>(&'a self, _origin: &'a O) -> impl Iterator<Item = V> + 'a {
        self.values.iter().cloned()
    }

    fn count(&self, _origin: &O) -> u64 {
        self.values.len() as u64
    }
}

/// A candidate source computing each origin's candidates with a function pointer.
///
/// Nothing is cached: [`count`](CandidateSource::count) and
/// [`enumerate_final`](CandidateSource::enumerate_final) each call the
/// function and allocate its result, so an index build runs it twice per
/// origin. Use [`StaticCandidateSource`] or a custom source when the
/// function is expensive.
pub struct FnCandidateSource<O, V> {
    candidates: fn(&O) -> Vec<V>,
}

impl<O, V> Debug for FnCandidateSource<O, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCandidateSource").finish()
    }
}

impl<O, V> FnCandidateSource<O, V> {
    /// Creates a new candidate source with the given function pointer.
    pub fn new(candidates: fn(&O) -> Vec<V>) -> Self {
        Self { candidates }
    }
}

impl<O, V> CandidateSource<O> for FnCandidateSource<O, V> {
    type Candidate = V;

    fn enumerate_final<'a>(&'a self, origin: &'a O) -> impl Iterator<Item = V> + 'a {
        (self.candidates)(origin).into_iter()
    }

    fn count(&self, origin: &O) -> u64 {
        (self.candidates)(origin).len() as u64
    }
}

/// Returns a never-ending stream of uniformly drawn origin ids.
///
/// The stream is empty when there are no origins. Pass `&mut rng` to keep
/// using the generator afterwards.
pub fn random_origins<R: Rng>(origin_count: usize, mut rng: R) -> impl Iterator<Item = OriginId> {
    std::iter::from_fn(move || {
        if origin_count == 0 {
            None
        } else {
            Some(OriginId(rng.random_range(0..origin_count)))
        }
    })
}
