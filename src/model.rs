//! Core data model for Timeline.
//!
//! An action is one recorded edit to one field. The history store
//! orders, reverts, and reapplies them.

mod action;

pub use action::{Action, ActionKind};
