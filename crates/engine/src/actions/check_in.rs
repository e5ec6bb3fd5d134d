//! Daily check-in action

use flowva_core::{
    CheckInOutcome, Error, Result, RewardsBackend, UserId, DEFAULT_CHECK_IN_POINTS,
};
use tracing::{error, info, warn};

/// Message used when the backend rejects without saying why
const GENERIC_FAILURE: &str = "Check-in failed";

/// Submit today's check-in for `user_id`
///
/// At most one request is sent and it is never retried: the backend
/// rejects a second claim for the same calendar day, so the caller only
/// needs to reload the dashboard after `Ok`.
pub async fn perform_check_in<B>(backend: &B, user_id: Option<&UserId>) -> Result<CheckInOutcome>
where
    B: RewardsBackend + ?Sized,
{
    let Some(user_id) = user_id else {
        warn!("Check-in attempted without a signed-in user");
        return Err(Error::NotAuthenticated);
    };

    info!("Submitting daily check-in for {}", user_id);

    let response = backend.check_in(user_id).await.map_err(|e| {
        error!("Check-in request failed: {}", e);
        Error::BackendError(e.message())
    })?;

    if !response.success {
        let message = response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        info!("Check-in rejected: {}", message);
        return Err(Error::AlreadyClaimed(message));
    }

    let outcome = CheckInOutcome {
        points_earned: response.points_earned.unwrap_or(DEFAULT_CHECK_IN_POINTS),
    };
    info!("Check-in accepted: {}", outcome.badge());
    Ok(outcome)
}
