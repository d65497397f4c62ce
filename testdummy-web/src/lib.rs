//! # TestDummy Web Utilities
//!
//! Web building blocks shared by the TestDummy HTTP surface:
//!
//! - **Errors**: [`WebError`] with a JSON error body
//! - **Extractors**: [`LenientQuery`], query parameters that never reject a request
//! - **Middleware**: per-request access logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::any, Router};
//! use testdummy_web::{request_logging_middleware, LenientQuery};
//!
//! async fn status(query: LenientQuery) -> String {
//!     query.get("status").unwrap_or("400").to_string()
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let app: Router = Router::new()
//!     .route("/status", any(status))
//!     .layer(middleware::from_fn(request_logging_middleware));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

pub mod errors;
pub mod extractors;
pub mod middleware;

// Re-export commonly used types and functions
pub use errors::{WebError, WebResult};
pub use extractors::LenientQuery;
pub use middleware::request_logging_middleware;
