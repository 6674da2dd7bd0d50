//! Per-phase proximity index.

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::time::Instant;

use nearforge_core::{NearforgeError, Result};
use tracing::debug;

use super::distance_meter::NearbyDistanceMeter;
use super::source::{CandidateSource, OriginId, OriginSource};

/// Largest origin count, and largest candidate count per origin, the index accepts.
pub const NEARBY_INDEX_CAPACITY: u64 = u32::MAX as u64;

/// Candidates of every origin, sorted by ascending distance to that origin.
///
/// Rows live in a single arena indexed by [`OriginId`]: row `i` belongs to the
/// `i`-th origin of the final enumeration. Ties keep the candidate
/// enumeration order, so when an origin is among its own candidates at
/// distance 0 it sits at position 0 of its row.
///
/// The index is immutable once built. It reflects the working solution at
/// phase start and must be rebuilt for the next phase.
pub struct ProximityIndex<V> {
    candidates: Vec<V>,
    /// `row_starts[i]..row_starts[i + 1]` is the row of origin `i`.
    row_starts: Vec<usize>,
}

impl<V> ProximityIndex<V> {
    /// Builds the index from the final enumerations of both sources.
    ///
    /// # Errors
    ///
    /// - [`NearforgeError::CapacityExceeded`] if the origin count or any
    ///   origin's candidate count exceeds [`NEARBY_INDEX_CAPACITY`].
    ///   All counts are checked before any row is sorted.
    /// - [`NearforgeError::InvalidDistance`] if the meter returns NaN.
    /// - [`NearforgeError::InvalidState`] if a source enumerates a different
    ///   number of elements than its reported count. Enumeration stops at the
    ///   first element past the count, so the capacity bound holds.
    pub fn build<OS, CS, M>(
        selector: &str,
        origin_source: &OS,
        candidate_source: &CS,
        distance_meter: &M,
    ) -> Result<Self>
    where
        OS: OriginSource,
        CS: CandidateSource<OS::Origin, Candidate = V>,
        M: NearbyDistanceMeter<OS::Origin, V>,
    {
        let start = Instant::now();

        let origin_count = check_capacity(selector, "an origin count", origin_source.size())?;
        let origins: Vec<OS::Origin> = origin_source
            .enumerate_final()
            .take(origin_count.saturating_add(1))
            .collect();
        if origins.len() != origin_count {
            return Err(size_mismatch(selector, "origins", None, origin_count, origins.len()));
        }

        let mut total = 0usize;
        let mut row_sizes = Vec::with_capacity(origins.len());
        for origin in &origins {
            let size = check_capacity(selector, "a candidate count", candidate_source.count(origin))?;
            total = total.saturating_add(size);
            row_sizes.push(size);
        }

        let mut candidates = Vec::with_capacity(total);
        let mut row_starts = Vec::with_capacity(origins.len() + 1);
        row_starts.push(0);

        let mut measured: Vec<(f64, V)> = Vec::new();
        for (origin_index, (origin, row_size)) in origins.iter().zip(row_sizes).enumerate() {
            measured.clear();
            measured.reserve(row_size);
            for (candidate_index, candidate) in
                candidate_source.enumerate_final(origin).enumerate()
            {
                if candidate_index == row_size {
                    return Err(size_mismatch(
                        selector,
                        "candidates",
                        Some(origin_index),
                        row_size,
                        candidate_index + 1,
                    ));
                }
                let distance = distance_meter.distance(origin, &candidate);
                if distance.is_nan() {
                    return Err(NearforgeError::InvalidDistance {
                        selector: selector.to_string(),
                        origin: origin_index,
                        candidate: candidate_index,
                        distance,
                    });
                }
                measured.push((distance, candidate));
            }
            if measured.len() != row_size {
                return Err(size_mismatch(
                    selector,
                    "candidates",
                    Some(origin_index),
                    row_size,
                    measured.len(),
                ));
            }

            // sort_by is stable: equal distances keep enumeration order.
            measured.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
            candidates.extend(measured.drain(..).map(|(_, candidate)| candidate));
            row_starts.push(candidates.len());
        }

        let index = Self {
            candidates,
            row_starts,
        };

        debug!(
            event = "nearby_index_built",
            selector = selector,
            origins = index.origin_count() as u64,
            candidates = index.candidate_count() as u64,
            duration_ms = start.elapsed().as_millis() as u64,
        );

        Ok(index)
    }

    /// Returns the number of origins (rows).
    pub fn origin_count(&self) -> usize {
        self.row_starts.len() - 1
    }

    /// Returns the total number of candidates over all rows.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if the index has no origins.
    pub fn is_empty(&self) -> bool {
        self.origin_count() == 0
    }

    /// Returns the sorted candidates of an origin.
    pub fn row(&self, origin: OriginId) -> Option<&[V]> {
        let start = *self.row_starts.get(origin.index())?;
        let end = *self.row_starts.get(origin.index() + 1)?;
        Some(&self.candidates[start..end])
    }

    /// Returns the length of an origin's row.
    pub fn row_len(&self, origin: OriginId) -> Option<usize> {
        self.row(origin).map(<[V]>::len)
    }

    /// Returns the number of selectable positions of an origin's row,
    /// leaving out the first `offset` positions.
    pub fn row_size(&self, origin: OriginId, offset: usize) -> Option<usize> {
        self.row_len(origin).map(|len| len.saturating_sub(offset))
    }
}

impl<V> Debug for ProximityIndex<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProximityIndex")
            .field("origin_count", &self.origin_count())
            .field("candidate_count", &self.candidate_count())
            .finish()
    }
}

fn check_capacity(selector: &str, subject: &'static str, size: u64) -> Result<usize> {
    let capacity = NEARBY_INDEX_CAPACITY.min(usize::MAX as u64);
    if size > capacity {
        return Err(NearforgeError::CapacityExceeded {
            selector: selector.to_string(),
            subject,
            size,
            capacity,
        });
    }
    Ok(size as usize)
}

fn size_mismatch(
    selector: &str,
    subject: &str,
    origin: Option<usize>,
    reported: usize,
    enumerated: usize,
) -> NearforgeError {
    let enumerated = if enumerated > reported {
        format!("more than {reported}")
    } else {
        enumerated.to_string()
    };
    let owner = match origin {
        Some(origin) => format!(" for origin ({origin})"),
        None => String::new(),
    };
    NearforgeError::InvalidState(format!(
        "The selector ({selector}) enumerated {enumerated} {subject}{owner} \
         but its source reported a count of {reported}."
    ))
}
