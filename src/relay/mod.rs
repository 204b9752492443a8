//! DoH relay core.
//!
//! # Data Flow
//! ```text
//! Validated GET/POST (router)
//!     → request.rs (RelayRequest, body buffered once)
//!     → executor.rs (weighted pick → attempt → ordered failover sweep)
//!     → response.rs (CORS + cache overlay, or terminal 503)
//! ```

pub mod executor;
pub mod request;
pub mod response;

pub use executor::{RelayExecutor, RelaySettings};
pub use request::{RelayRequest, DNS_MESSAGE};
pub use response::{RelayResponse, ALL_PROVIDERS_FAILED};
