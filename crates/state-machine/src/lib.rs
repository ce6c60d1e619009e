//! Lightweight finite state machine library for frame-driven simulations.
//!
//! This library provides a minimal state container keyed by a state
//! identifier. It is used both for per-entity behaviour and for global
//! phase control.
//!
//! - **Owner-driven**: the machine never stores its owner; every callback
//!   receives the owner by `&mut` from the caller
//! - **Synchronous**: transitions complete inside the call that requested them
//! - **Fail-soft**: unknown targets are rejected with a warning, never a panic
//!
//! # Architecture
//!
//! - [`State`]: Enter/Update/Exit capability trait with no-op defaults
//! - [`Transition`]: what a state's update asks the machine to do next
//! - [`StateMachine`]: registry of boxed states plus the current id
//! - [`ChangeOutcome`]: reportable result of a transition request

pub mod machine;
pub mod state;

// Re-export core types for ergonomic API
pub use machine::{ChangeOutcome, StateMachine};
pub use state::{State, Transition};
