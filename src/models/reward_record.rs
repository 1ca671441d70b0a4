use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::currency::Currency;
use crate::risk::{ProtocolKind, RiskScore};

/// A yield payout, pinned to the protocol's PulseScore when it was received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub asset: String,
    pub protocol: ProtocolKind,
    pub reward_amount: Decimal,
    pub reward_currency: Currency,
    pub risk_score_at_time: RiskScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRewardRecord {
    pub asset: String,
    pub protocol: ProtocolKind,
    pub reward_amount: Decimal,
    pub reward_currency: Currency,
}

impl RewardRecord {
    pub fn new(create: CreateRewardRecord, risk_score: RiskScore, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            asset: create.asset,
            protocol: create.protocol,
            reward_amount: create.reward_amount,
            reward_currency: create.reward_currency,
            risk_score_at_time: risk_score,
        }
    }
}
