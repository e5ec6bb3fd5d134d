//! Pure derivations over fetched state

pub mod catalog;
pub mod progress;
pub mod week;

pub use catalog::{default_catalog, filter_rewards, tab_counts, GIFT_CARD_COST};
pub use progress::{gift_card_progress, LevelProgress, POINTS_PER_LEVEL};
pub use week::{compute_week_view, local_today, WEEKDAY_LABELS};
