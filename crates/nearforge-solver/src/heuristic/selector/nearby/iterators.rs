//! Iterators over a proximity index.

use std::fmt::{self, Debug};
use std::iter::Peekable;

use rand::Rng;
use tracing::warn;

use super::distribution::IndexSampler;
use super::index::ProximityIndex;
use super::source::OriginId;

/// Walks proximity rows in ascending position order.
///
/// The position counter is shared by every origin this iterator serves:
/// the n-th value yielded is at position `offset + n` of its origin's row,
/// whichever origin that is. Ends when the origin stream ends or when the
/// position reaches the end of the upcoming origin's row.
pub struct SequentialNearbyIter<'a, V, I: Iterator<Item = OriginId>> {
    index: &'a ProximityIndex<V>,
    origins: Peekable<I>,
    next_nearby_index: usize,
}

impl<'a, V, I: Iterator<Item = OriginId>> SequentialNearbyIter<'a, V, I> {
    /// Creates a new iterator starting at position `offset`.
    pub fn new(index: &'a ProximityIndex<V>, origins: I, offset: usize) -> Self {
        Self {
            index,
            origins: origins.peekable(),
            next_nearby_index: offset,
        }
    }

    /// Returns the row position the next value is taken from.
    pub fn next_nearby_index(&self) -> usize {
        self.next_nearby_index
    }
}

impl<V: Clone, I: Iterator<Item = OriginId>> Iterator for SequentialNearbyIter<'_, V, I> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        let origin = *self.origins.peek()?;
        let Some(row) = self.index.row(origin) else {
            warn!(
                event = "nearby_origin_unknown",
                origin = origin.index(),
                origins = self.index.origin_count() as u64,
            );
            return None;
        };
        let value = row.get(self.next_nearby_index)?.clone();
        self.origins.next();
        self.next_nearby_index += 1;
        Some(value)
    }
}

impl<V, I: Iterator<Item = OriginId>> Debug for SequentialNearbyIter<'_, V, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequentialNearbyIter")
            .field("next_nearby_index", &self.next_nearby_index)
            .finish()
    }
}

/// Samples proximity rows with a bias toward the nearest candidates.
///
/// Each origin is sampled over its own row, leaving out the first `offset`
/// positions. Never ends while the origin stream is infinite and every
/// origin has a selectable position.
pub struct RandomNearbyIter<'a, V, I, NS, R>
where
    I: Iterator<Item = OriginId>,
    R: Rng + ?Sized,
{
    index: &'a ProximityIndex<V>,
    origins: Peekable<I>,
    nearby_random: &'a NS,
    rng: &'a mut R,
    offset: usize,
}

impl<'a, V, I, NS, R> RandomNearbyIter<'a, V, I, NS, R>
where
    I: Iterator<Item = OriginId>,
    NS: IndexSampler,
    R: Rng + ?Sized,
{
    /// Creates a new iterator drawing with `rng`.
    pub fn new(
        index: &'a ProximityIndex<V>,
        origins: I,
        nearby_random: &'a NS,
        rng: &'a mut R,
        offset: usize,
    ) -> Self {
        Self {
            index,
            origins: origins.peekable(),
            nearby_random,
            rng,
            offset,
        }
    }
}

impl<V, I, NS, R> Iterator for RandomNearbyIter<'_, V, I, NS, R>
where
    V: Clone,
    I: Iterator<Item = OriginId>,
    NS: IndexSampler,
    R: Rng + ?Sized,
{
    type Item = V;

    fn next(&mut self) -> Option<V> {
        let origin = *self.origins.peek()?;
        let Some(row) = self.index.row(origin) else {
            warn!(
                event = "nearby_origin_unknown",
                origin = origin.index(),
                origins = self.index.origin_count() as u64,
            );
            return None;
        };
        let nearby_size = row.len().saturating_sub(self.offset);
        if nearby_size == 0 {
            return None;
        }
        self.origins.next();
        let nearby_index = self.nearby_random.sample(nearby_size, &mut *self.rng) + self.offset;
        row.get(nearby_index).cloned()
    }
}

impl<V, I, NS, R> Debug for RandomNearbyIter<'_, V, I, NS, R>
where
    I: Iterator<Item = OriginId>,
    NS: Debug,
    R: Rng + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomNearbyIter")
            .field("nearby_random", &self.nearby_random)
            .field("offset", &self.offset)
            .finish()
    }
}

/// A nearby iterator whose order was chosen by configuration.
pub enum NearbyValueIter<'a, V, I, NS, R>
where
    I: Iterator<Item = OriginId>,
    NS: Debug,
    R: Rng + ?Sized,
{
    Sequential(SequentialNearbyIter<'a, V, I>),
    Random(RandomNearbyIter<'a, V, I, NS, R>),
}

impl<V, I, NS, R> Iterator for NearbyValueIter<'_, V, I, NS, R>
where
    V: Clone,
    I: Iterator<Item = OriginId>,
    NS: IndexSampler,
    R: Rng + ?Sized,
{
    type Item = V;

    fn next(&mut self) -> Option<V> {
        match self {
            NearbyValueIter::Sequential(iter) => iter.next(),
            NearbyValueIter::Random(iter) => iter.next(),
        }
    }
}

impl<V, I, NS, R> Debug for NearbyValueIter<'_, V, I, NS, R>
where
    I: Iterator<Item = OriginId>,
    NS: Debug,
    R: Rng + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NearbyValueIter::Sequential(iter) => iter.fmt(f),
            NearbyValueIter::Random(iter) => iter.fmt(f),
        }
    }
}
