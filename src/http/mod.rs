//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware: request ID, trace)
//!     → handlers.rs (preflight, validation, body buffering)
//!     → relay executor for the addressed pool
//!     → RelayResponse → Send to client
//! ```

pub mod handlers;
pub mod landing;
pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, DohExecutor, HttpServer, ServerError};
