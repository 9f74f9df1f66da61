//! Conversational application layer.
//!
//! The controller maps inbound chat events to dialog transitions, store
//! operations, and extraction pipeline calls; the event module defines the
//! transport-facing inbound/outbound types.

pub mod controller;
pub mod event;

pub use controller::Controller;
pub use event::{Inbound, Keyboard, Reply, UserCommand};
