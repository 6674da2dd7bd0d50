//! Phase lifecycle events.
//!
//! A nearby selector keeps a proximity index only while a phase runs. The
//! surrounding solver announces phase boundaries through
//! [`PhaseLifecycleListener`]; [`PhaseLifecycleSupport`] broadcasts them to
//! every registered selector. Listeners are shared handles, so a selector
//! stays usable by the caller while the support drives its lifecycle.
//!
//! # Usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use nearforge_core::Result;
//! use nearforge_solver::event::{PhaseEvent, PhaseLifecycleListener, PhaseLifecycleSupport};
//!
//! #[derive(Debug, Default)]
//! struct PhaseCounter { started: usize }
//!
//! impl PhaseLifecycleListener for PhaseCounter {
//!     fn phase_started(&mut self, _event: &PhaseEvent) -> Result<()> {
//!         self.started += 1;
//!         Ok(())
//!     }
//!     fn phase_ended(&mut self, _event: &PhaseEvent) {}
//! }
//!
//! let counter = Rc::new(RefCell::new(PhaseCounter::default()));
//! let mut support = PhaseLifecycleSupport::new();
//! support.add_listener(counter.clone());
//! support.fire_phase_started(&PhaseEvent::new(0, "Local Search")).unwrap();
//! support.fire_phase_ended(&PhaseEvent::new(0, "Local Search"));
//! assert_eq!(counter.borrow().started, 1);
//! ```

use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::rc::Rc;

use nearforge_core::Result;
use tracing::{debug, info, warn};

/// A phase boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseEvent {
    /// The index of the phase (0-based).
    pub phase_index: usize,
    /// The type name of the phase.
    pub phase_type: &'static str,
}

impl PhaseEvent {
    /// Creates a new phase event.
    pub fn new(phase_index: usize, phase_type: &'static str) -> Self {
        Self {
            phase_index,
            phase_type,
        }
    }
}

/// Listener for phase lifecycle events.
pub trait PhaseLifecycleListener: Debug {
    /// Called when a phase starts, before any selection happens.
    ///
    /// An error aborts the phase.
    fn phase_started(&mut self, event: &PhaseEvent) -> Result<()>;

    /// Called when a phase ends. Releases per-phase state.
    fn phase_ended(&mut self, event: &PhaseEvent);
}

/// Broadcasts phase events to listeners in registration order.
#[derive(Default)]
pub struct PhaseLifecycleSupport {
    listeners: Vec<Rc<RefCell<dyn PhaseLifecycleListener>>>,
}

impl PhaseLifecycleSupport {
    /// Creates a new instance without listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener.
    pub fn add_listener(&mut self, listener: Rc<RefCell<dyn PhaseLifecycleListener>>) {
        self.listeners.push(listener);
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Fires the phase started event.
    ///
    /// Stops at the first listener that fails. The listeners already
    /// started are ended again, in reverse order, before the error returns.
    ///
    /// # Panics
    ///
    /// If a listener is mutably borrowed elsewhere while the event fires.
    pub fn fire_phase_started(&mut self, event: &PhaseEvent) -> Result<()> {
        info!(
            event = "phase_start",
            phase = event.phase_type,
            phase_index = event.phase_index,
            listeners = self.listeners.len(),
        );
        for (started, listener) in self.listeners.iter().enumerate() {
            let result = listener.borrow_mut().phase_started(event);
            if let Err(err) = result {
                warn!(
                    event = "phase_start_failed",
                    phase = event.phase_type,
                    phase_index = event.phase_index,
                    listener = started,
                    error = %err,
                );
                for listener in self.listeners[..started].iter().rev() {
                    listener.borrow_mut().phase_ended(event);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Fires the phase ended event.
    pub fn fire_phase_ended(&mut self, event: &PhaseEvent) {
        for listener in &self.listeners {
            listener.borrow_mut().phase_ended(event);
        }
        debug!(
            event = "phase_end",
            phase = event.phase_type,
            phase_index = event.phase_index,
        );
    }
}

impl Debug for PhaseLifecycleSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseLifecycleSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
