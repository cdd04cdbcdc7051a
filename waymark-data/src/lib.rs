//! Service adapters for the Waymark map engine.
//!
//! Responsibilities:
//! - Implement [`waymark_core::RouteProvider`] against real and offline
//!   directions services.
//! - Decode wire formats into core domain types.
//!
//! Boundaries:
//! - Do not encode screen behaviour (lives in `waymark-core`).
//! - Never block inside a returned route future; the host drives it.
//!
//! Invariants:
//! - Providers are cheap to clone and hold no global mutable state.

#![forbid(unsafe_code)]

pub mod routing;
