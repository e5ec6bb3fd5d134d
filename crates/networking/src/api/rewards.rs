//! `RewardsBackend` over the REST/RPC client

use crate::SupabaseClient;
use async_trait::async_trait;
use flowva_core::{
    CheckInResponse, DashboardResponse, PointsTransaction, ReferralRow, Result, RewardsBackend,
    UserId, UserRewardsRow,
};

/// Ledger rows shown when no limit is given
pub const DEFAULT_TRANSACTION_LIMIT: u32 = 20;

#[async_trait]
impl RewardsBackend for SupabaseClient {
    async fn get_user_dashboard(&self, user_id: &UserId) -> Result<DashboardResponse> {
        SupabaseClient::get_user_dashboard(self, user_id).await
    }

    async fn check_in(&self, user_id: &UserId) -> Result<CheckInResponse> {
        SupabaseClient::check_in(self, user_id).await
    }

    async fn get_user_rewards(&self, user_id: &UserId) -> Result<Option<UserRewardsRow>> {
        SupabaseClient::get_user_rewards(self, user_id).await
    }

    async fn get_user_referrals(&self, user_id: &UserId) -> Result<Vec<ReferralRow>> {
        SupabaseClient::get_user_referrals(self, user_id).await
    }

    async fn get_points_transactions(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<PointsTransaction>> {
        SupabaseClient::get_points_transactions(self, user_id, limit).await
    }
}
