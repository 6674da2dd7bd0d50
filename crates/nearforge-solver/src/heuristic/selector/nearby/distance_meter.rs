//! Distance meters for nearby selection.

use std::fmt::{self, Debug};
use std::marker::PhantomData;

/// Trait for measuring distance between an origin and a destination.
///
/// Implementations should be stateless. The solver may reuse instances.
///
/// # Type Parameters
///
/// - `Origin`: The type of the origin element (usually an entity)
/// - `Destination`: The type of the destination element (usually a value)
///
/// # Example
///
/// ```
/// use nearforge_solver::NearbyDistanceMeter;
///
/// #[derive(Debug)]
/// struct Location { x: f64, y: f64 }
///
/// #[derive(Debug)]
/// struct EuclideanMeter;
///
/// impl NearbyDistanceMeter<Location, Location> for EuclideanMeter {
///     fn distance(&self, origin: &Location, dest: &Location) -> f64 {
///         let dx = origin.x - dest.x;
///         let dy = origin.y - dest.y;
///         (dx * dx + dy * dy).sqrt()
///     }
/// }
/// ```
pub trait NearbyDistanceMeter<Origin, Destination>: Send + Sync + Debug {
    /// Measures the distance from the origin to the destination.
    ///
    /// The distance can be in any unit (meters, seconds, cost, etc.).
    /// Distances can be asymmetrical: the distance from A to B may differ
    /// from the distance from B to A.
    ///
    /// Returns a value >= 0.0. If origin == destination, returns 0.0.
    /// The value must not change during a phase.
    fn distance(&self, origin: &Origin, destination: &Destination) -> f64;
}

/// A distance meter backed by a function or closure.
pub struct FnDistanceMeter<O, D, F> {
    f: F,
    _phantom: PhantomData<fn(&O, &D)>,
}

impl<O, D, F> FnDistanceMeter<O, D, F>
where
    F: Fn(&O, &D) -> f64,
{
    /// Wraps `f` as a distance meter.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}

impl<O, D, F> Debug for FnDistanceMeter<O, D, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDistanceMeter").finish()
    }
}

impl<O, D, F> NearbyDistanceMeter<O, D> for FnDistanceMeter<O, D, F>
where
    F: Fn(&O, &D) -> f64 + Send + Sync,
{
    fn distance(&self, origin: &O, destination: &D) -> f64 {
        (self.f)(origin, destination)
    }
}
