//! Upstream provider subsystem.
//!
//! # Data Flow
//! ```text
//! Pool config (presets.rs or TOML)
//!     → provider.rs (validated, ordered ProviderList)
//!     → selector.rs (weighted random pick)
//!     → client.rs (one HTTPS request per attempt)
//!     → UpstreamResponse or UpstreamError
//! ```
//!
//! # Design Decisions
//! - Provider lists are immutable after startup; no shared mutable state
//! - Randomness is injected so selection is testable
//! - The client is a trait seam; `HttpsClient` is the production transport

pub mod client;
pub mod error;
pub mod presets;
pub mod provider;
pub mod selector;

pub use client::{HttpsClient, UpstreamClient, UpstreamRequest, UpstreamResponse};
pub use error::UpstreamError;
pub use provider::{Provider, ProviderError, ProviderList};
pub use selector::{RandomSource, SeededRandom, ThreadRandom, WeightedSelector};
