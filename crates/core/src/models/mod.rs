//! Data models for Flowva rewards entities

mod check_in;
mod dashboard;
mod referral;
mod reward;
mod session;
mod transaction;
mod week;

pub use check_in::*;
pub use dashboard::*;
pub use referral::*;
pub use reward::*;
pub use session::*;
pub use transaction::*;
pub use week::*;
