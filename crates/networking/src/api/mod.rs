//! Bindings of the HTTP clients to the backend contracts
//!
//! The engine only sees `RewardsBackend` and `IdentityProvider`; this
//! module is where the concrete clients are plugged into those seams.

mod identity;
mod rewards;

pub use rewards::DEFAULT_TRANSACTION_LIMIT;
