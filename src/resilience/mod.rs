//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream attempt:
//!     → timeouts.rs (per-attempt deadline)
//!     → on failure: relay::executor advances the failover sweep
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - No backoff and no second try of the same provider within a request

pub mod timeouts;
