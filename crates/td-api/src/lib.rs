//! TradeDesk API: library crate for the intent REST/WebSocket server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `td-e2e-tests`) can reach `AppState`, `build_router`, and the
//! `IntentBackend` implementations.

pub mod backend;
pub mod config;
pub mod error;
pub mod events;
pub mod mock;
pub mod routes;
pub mod state;

pub use backend::{BackendConfig, BackendError, HttpBackend, IntentBackend};
pub use mock::MockBackend;
