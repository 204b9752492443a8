//! DNS-over-HTTPS relay library.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client (GET ?dns= / POST wire)
//!         │
//!         ▼
//!     ┌──────────┐   ┌────────────┐   ┌────────────────────────────┐
//!     │  http    │──▶│  handlers  │──▶│  relay::executor            │
//!     │  server  │   │ validation │   │  weighted pick → attempt    │
//!     └──────────┘   └────────────┘   │  → ordered failover sweep   │
//!                                      └──────────────┬─────────────┘
//!                                                     │ one call in flight
//!                                                     ▼
//!                                      ┌────────────────────────────┐
//!                                      │ upstream::client (reqwest) │──▶ public DoH providers
//!                                      └────────────────────────────┘
//! ```
//!
//! Cross-cutting: `config` (TOML + compiled-in provider tables),
//! `observability` (tracing), `resilience` (per-attempt deadlines),
//! `security` (header hygiene), `lifecycle` (signals, graceful shutdown).

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod relay;
pub mod resilience;
pub mod security;
pub mod upstream;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
