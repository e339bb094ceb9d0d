//! Networking modules for the fleet REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` adapts `gloo-net` to the `fleet::Transport` seam and `api`
//! assembles a browser-bound `ApiClient` with the login redirect installed.

pub mod api;
pub mod transport;
