//! HTTP clients for the hosted backend

mod auth;
mod client;

pub use auth::SupabaseAuth;
pub use client::SupabaseClient;
