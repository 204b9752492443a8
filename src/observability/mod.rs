//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → http::server (one span per request, tagged with x-request-id)
//! ```
//!
//! # Design Decisions
//! - Structured fields (pool, provider, attempt, error) over formatted strings
//! - Request ID flows through every event of a request
//! - Logs only; the relay keeps no metrics

pub mod logging;

pub use logging::init_logging;
