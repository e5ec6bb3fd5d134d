//! Flowva Networking - HTTP clients, configuration and backend bindings

pub mod api;
pub mod config;
pub mod http;

pub use config::ClientConfig;
pub use http::{SupabaseAuth, SupabaseClient};
