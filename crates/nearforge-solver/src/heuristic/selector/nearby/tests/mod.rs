//! Tests for nearby value selection.

mod value_selector;
