//! Flowva Core - Shared data models, types, errors and backend contracts

pub mod backend;
pub mod errors;
pub mod models;
pub mod types;

pub use backend::{AuthCallback, AuthSubscription, IdentityProvider, RewardsBackend};
pub use errors::{Error, Result};
pub use models::*;
pub use types::*;
