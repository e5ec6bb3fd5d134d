//! Recent points activity

use flowva_core::{Error, PointsTransaction, Result, RewardsBackend, UserId};
use tracing::error;

/// Fetch the latest ledger rows, newest first
pub async fn load_recent_transactions<B>(
    backend: &B,
    user_id: Option<&UserId>,
    limit: u32,
) -> Result<Vec<PointsTransaction>>
where
    B: RewardsBackend + ?Sized,
{
    let user_id = user_id.ok_or(Error::NotAuthenticated)?;
    backend
        .get_points_transactions(user_id, limit)
        .await
        .map_err(|e| {
            error!("Points history load failed: {}", e);
            Error::LoadError(e.message())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{backend_error, MockBackend};

    fn row(points: i64) -> PointsTransaction {
        PointsTransaction {
            id: serde_json::json!(points),
            user_id: Some("u1".to_string()),
            points,
            transaction_type: Some("daily_checkin".to_string()),
            description: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_limit_and_errors() {
        let backend = MockBackend::new();
        backend.set_transactions(Ok(vec![row(5), row(-5000), row(25)]));
        let rows = load_recent_transactions(&backend, Some(&UserId::new("u1")), 2)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].signed_points(), "-5000");
        assert_eq!(rows[0].signed_points(), "+5");

        backend.set_transactions(Err(backend_error("boom")));
        let err = load_recent_transactions(&backend, Some(&UserId::new("u1")), 2)
            .await
            .unwrap_err();
        assert_eq!(err, Error::LoadError("boom".to_string()));
    }
}
