//! # Survey Web Library
//!
//! Exposes the Axum router and modules so integration tests can create
//! an in-process server without requiring `cargo run` in another terminal.

pub mod api;
pub mod coercion;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod handoff;
pub mod models;
pub mod pages;
pub mod routes;
pub mod state;
pub mod survey;

use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all route modules and middleware.
///
/// The caller is responsible for providing the application state (and with
/// it the survey API client). This function does NOT start a server.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::survey::router())
        .merge(routes::terminal::router())
        .merge(routes::health::router())
        .fallback(routes::terminal::fallback)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
