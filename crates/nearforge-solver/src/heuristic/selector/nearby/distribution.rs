//! Index samplers biased toward the nearest candidates.
//!
//! Random nearby selection draws a row position instead of a value. A
//! uniform draw would make nearby selection pointless, so every sampler here
//! prefers small positions. The exact shape is a policy choice:
//!
//! | Distribution   | P(x) for a row of size m     |
//! |----------------|------------------------------|
//! | [`LinearDistribution`]    | `∝ m - x`         |
//! | [`ParabolicDistribution`] | `∝ (m - x)²`      |
//! | [`BlockDistribution`]     | uniform over the nearest block |

use std::fmt::Debug;

use nearforge_config::NearbyDistributionConfig;
use nearforge_core::{NearforgeError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws a row position in `[0, bound)`, biased toward 0.
pub trait IndexSampler: Debug {
    /// Returns a position in `[0, bound)`.
    ///
    /// `bound` must be positive; the selectors never call this for an empty row.
    fn sample<R: Rng + ?Sized>(&self, bound: usize, rng: &mut R) -> usize;

    /// Returns the largest position this sampler can ever return, plus one.
    fn overall_size_maximum(&self) -> usize {
        usize::MAX
    }
}

/// Creates the working random generator for a selector.
///
/// A seed makes every draw reproducible; without one the generator is
/// seeded from the operating system.
pub fn working_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn check_size_maximum(kind: &str, size_maximum: usize) -> Result<usize> {
    if size_maximum < 1 {
        return Err(NearforgeError::Config(format!(
            "The {kind} distribution's size_maximum ({size_maximum}) must be at least 1."
        )));
    }
    Ok(size_maximum)
}

/// Linearly decreasing probability: `P(x) = 2/m - 2x/m²`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearDistribution {
    size_maximum: usize,
}

impl LinearDistribution {
    /// Creates a linear distribution over at most `size_maximum` positions.
    pub fn new(size_maximum: usize) -> Result<Self> {
        Ok(Self {
            size_maximum: check_size_maximum("linear", size_maximum)?,
        })
    }
}

impl Default for LinearDistribution {
    fn default() -> Self {
        Self {
            size_maximum: usize::MAX,
        }
    }
}

impl IndexSampler for LinearDistribution {
    fn sample<R: Rng + ?Sized>(&self, bound: usize, rng: &mut R) -> usize {
        let m = bound.min(self.size_maximum);
        if m <= 1 {
            return 0;
        }
        // Inverse of the cumulative distribution.
        let p: f64 = rng.random();
        let x = m as f64 * (1.0 - (1.0 - p).sqrt());
        (x as usize).min(m - 1)
    }

    fn overall_size_maximum(&self) -> usize {
        self.size_maximum
    }
}

/// Quadratically decreasing probability: `P(x) = 3(m - x)²/m³`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParabolicDistribution {
    size_maximum: usize,
}

impl ParabolicDistribution {
    /// Creates a parabolic distribution over at most `size_maximum` positions.
    pub fn new(size_maximum: usize) -> Result<Self> {
        Ok(Self {
            size_maximum: check_size_maximum("parabolic", size_maximum)?,
        })
    }
}

impl Default for ParabolicDistribution {
    fn default() -> Self {
        Self {
            size_maximum: usize::MAX,
        }
    }
}

impl IndexSampler for ParabolicDistribution {
    fn sample<R: Rng + ?Sized>(&self, bound: usize, rng: &mut R) -> usize {
        let m = bound.min(self.size_maximum);
        if m <= 1 {
            return 0;
        }
        let p: f64 = rng.random();
        let x = m as f64 * (1.0 - (1.0 - p).cbrt());
        (x as usize).min(m - 1)
    }

    fn overall_size_maximum(&self) -> usize {
        self.size_maximum
    }
}

/// Uniform over the nearest block of a row.
///
/// The block is `bound * size_ratio` positions, raised to `size_minimum` and
/// capped at `size_maximum` and `bound`. With probability
/// `uniform_distribution_probability` the whole row is used instead, which
/// keeps far candidates reachable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockDistribution {
    size_minimum: usize,
    size_maximum: usize,
    size_ratio: f64,
    uniform_distribution_probability: f64,
}

impl BlockDistribution {
    /// Creates a block distribution.
    pub fn new(
        size_minimum: usize,
        size_maximum: usize,
        size_ratio: f64,
        uniform_distribution_probability: f64,
    ) -> Result<Self> {
        if size_minimum < 1 {
            return Err(NearforgeError::Config(format!(
                "The block distribution's size_minimum ({size_minimum}) must be at least 1."
            )));
        }
        if size_maximum < size_minimum {
            return Err(NearforgeError::Config(format!(
                "The block distribution's size_maximum ({size_maximum}) must be at least size_minimum ({size_minimum})."
            )));
        }
        if !(size_ratio > 0.0 && size_ratio <= 1.0) {
            return Err(NearforgeError::Config(format!(
                "The block distribution's size_ratio ({size_ratio}) must be in (0, 1]."
            )));
        }
        if !(0.0..=1.0).contains(&uniform_distribution_probability) {
            return Err(NearforgeError::Config(format!(
                "The block distribution's uniform_distribution_probability ({uniform_distribution_probability}) must be in [0, 1]."
            )));
        }
        Ok(Self {
            size_minimum,
            size_maximum,
            size_ratio,
            uniform_distribution_probability,
        })
    }

    /// Returns the block size used for a row of `bound` positions.
    pub fn block_size(&self, bound: usize) -> usize {
        let size = if self.size_ratio < 1.0 {
            let size = (bound as f64 * self.size_ratio) as usize;
            if size < self.size_minimum {
                self.size_minimum.min(bound)
            } else {
                size
            }
        } else {
            bound
        };
        size.min(self.size_maximum)
    }
}

impl Default for BlockDistribution {
    fn default() -> Self {
        Self {
            size_minimum: 1,
            size_maximum: usize::MAX,
            size_ratio: 1.0,
            uniform_distribution_probability: 0.0,
        }
    }
}

impl IndexSampler for BlockDistribution {
    fn sample<R: Rng + ?Sized>(&self, bound: usize, rng: &mut R) -> usize {
        if bound <= 1 {
            return 0;
        }
        if self.uniform_distribution_probability > 0.0
            && rng.random::<f64>() < self.uniform_distribution_probability
        {
            return rng.random_range(0..bound);
        }
        let size = self.block_size(bound);
        if size <= 1 {
            return 0;
        }
        rng.random_range(0..size)
    }

    fn overall_size_maximum(&self) -> usize {
        if self.uniform_distribution_probability > 0.0 {
            usize::MAX
        } else {
            self.size_maximum
        }
    }
}

/// A configurable sampler choosing one of the distributions at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NearbyDistribution {
    Linear(LinearDistribution),
    Parabolic(ParabolicDistribution),
    Block(BlockDistribution),
}

impl NearbyDistribution {
    /// Builds the sampler described by a configuration.
    pub fn from_config(config: &NearbyDistributionConfig) -> Result<Self> {
        match config {
            NearbyDistributionConfig::Linear(c) => Ok(NearbyDistribution::Linear(
                match c.size_maximum {
                    Some(max) => LinearDistribution::new(max)?,
                    None => LinearDistribution::default(),
                },
            )),
            NearbyDistributionConfig::Parabolic(c) => Ok(NearbyDistribution::Parabolic(
                match c.size_maximum {
                    Some(max) => ParabolicDistribution::new(max)?,
                    None => ParabolicDistribution::default(),
                },
            )),
            NearbyDistributionConfig::Block(c) => Ok(NearbyDistribution::Block(
                BlockDistribution::new(
                    c.size_minimum.unwrap_or(1),
                    c.size_maximum.unwrap_or(usize::MAX),
                    c.size_ratio.unwrap_or(1.0),
                    c.uniform_distribution_probability.unwrap_or(0.0),
                )?,
            )),
        }
    }
}

impl Default for NearbyDistribution {
    fn default() -> Self {
        NearbyDistribution::Linear(LinearDistribution::default())
    }
}

impl IndexSampler for NearbyDistribution {
    fn sample<R: Rng + ?Sized>(&self, bound: usize, rng: &mut R) -> usize {
        match self {
            NearbyDistribution::Linear(d) => d.sample(bound, rng),
            NearbyDistribution::Parabolic(d) => d.sample(bound, rng),
            NearbyDistribution::Block(d) => d.sample(bound, rng),
        }
    }

    fn overall_size_maximum(&self) -> usize {
        match self {
            NearbyDistribution::Linear(d) => d.overall_size_maximum(),
            NearbyDistribution::Parabolic(d) => d.overall_size_maximum(),
            NearbyDistribution::Block(d) => d.overall_size_maximum(),
        }
    }
}
