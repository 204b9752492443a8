//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → plain: tokio TcpListener handed to axum::serve
//!     → TLS: tls.rs (rustls config from PEM) handed to axum-server
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - TLS is optional; most deployments terminate it in front of the relay
//! - Certificates are loaded once at startup

pub mod tls;
