use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::models::{CreateRewardRecord, RewardRecord};
use crate::risk::RiskScore;
use crate::services::monitoring_service::ScoreHistory;

/// Rewards received so far, each stamped with the score its protocol had at the time
#[derive(Debug, Clone, Default)]
pub struct RewardLedger {
    records: Arc<RwLock<Vec<RewardRecord>>>,
}

impl RewardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reward against the latest score in `history`.
    /// A protocol that has never been scored counts as missing (0).
    pub async fn record(
        &self,
        create: CreateRewardRecord,
        history: &ScoreHistory,
        now: DateTime<Utc>,
    ) -> RewardRecord {
        let score = history
            .latest(create.protocol)
            .await
            .map(|snapshot| snapshot.score)
            .unwrap_or(RiskScore::MIN);

        let record = RewardRecord::new(create, score, now);
        info!(
            protocol = %record.protocol,
            asset = %record.asset,
            amount = %record.reward_amount,
            score = record.risk_score_at_time.value(),
            "Reward recorded"
        );

        self.records.write().await.push(record.clone());
        record
    }

    pub async fn records(&self) -> Vec<RewardRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
