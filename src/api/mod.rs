//! HTTP API for the report facade

pub mod server;

pub use server::{build_router, start_server, AppState};
