//! Minimal DOM collaborator for the drawer effect — an arena-backed
//! in-memory document with element handles, a reduced computed-style
//! cascade, box measurement, and a single-threaded cooperative scheduler
//! (simulated clock, timers, next-tick queue, transition-end delivery).
//!
//! The core effect depends only on the handle API exposed here; tests and
//! demos drive a real `Document` headlessly. The document stands in for a
//! rendering engine: element content sizes are assigned by the embedding
//! harness (`Element::set_intrinsic_size`) in place of layout, computed
//! reads resolve inline style, registered class rules and tag defaults,
//! and writing an animatable property while a positive
//! `transition-duration` is in effect schedules a `transitionend`
//! dispatch on the simulated clock.

#![forbid(unsafe_code)]

mod computed;
mod document;
mod element;

pub use document::{Document, TimerId};
pub use element::Element;

/// A content or border box measured in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}
