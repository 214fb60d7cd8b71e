//! Axum-based HTTP server for the mathops service.
//!
//! # Components
//!
//! - `handlers`: Endpoint implementations (calculate, sum, chat, health, metrics).
//! - `middleware`: Request ID propagation and per-route metrics.
//! - `routes`: The router that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
