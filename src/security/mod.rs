//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request headers:
//!     → headers.rs (strip hop-by-hop, Host, Content-Length)
//!     → forwarded to the provider
//!
//! Provider response headers:
//!     → headers.rs (strip hop-by-hop, Content-Length)
//!     → CORS and cache overlay in relay::response
//! ```
//!
//! # Design Decisions
//! - No trust in client-supplied connection-level headers
//! - Body size limits are enforced by the DoH handler before buffering

pub mod headers;
