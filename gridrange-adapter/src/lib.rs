//! Adapter utilities for the `gridrange` crate.
//!
//! The `gridrange` crate is UI-agnostic and only decides what to render for a given frame. This
//! crate provides small, framework-neutral helpers commonly needed to drive it from a real
//! scroll container:
//!
//! - Scroll phase tracking (debouncing the end of a scroll gesture)
//! - A deferred measurement registry for cells whose size is only known after rendering
//! - A grid controller tying both to two sized axes and a renderer
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod measurements;
mod scroll;


pub use controller::{ControllerOptions, EstimateSize, GridController};
pub use measurements::{CellMeasurements, CellSize};
pub use scroll::{DEFAULT_SCROLL_RESET_DELAY_MS, ScrollTracker};
