// On-disk metrics snapshot: the offline stand-in for protocol webhooks
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::AppError;
use crate::exit::{MarketQuote, RedemptionQuote};
use crate::models::CreateRewardRecord;
use crate::risk::{ProtocolKind, ProtocolMetrics};

/// Position to run through the exit comparator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitRequest {
    pub amount: f64,
    pub redemption: RedemptionQuote,
    pub market: MarketQuote,
}

/// Snapshot file layout.
///
/// ```json
/// {
///   "protocols": { "falcon": { "cooldown_days": 6, "confidence": 0.97 } },
///   "exit": { "amount": 100, "redemption": {..}, "market": {..} },
///   "rewards": [ { "asset": "sUSDe", "protocol": "ethena", "reward_amount": 1.5, "reward_currency": "USD" } ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(default)]
    pub protocols: BTreeMap<ProtocolKind, Value>,
    #[serde(default)]
    pub exit: Option<ExitRequest>,
    #[serde(default)]
    pub rewards: Vec<CreateRewardRecord>,
}

impl MetricsSnapshot {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::DataSourceError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Metrics for one protocol. The `protocol` tag may be omitted inside the
    /// entry since the map key already names it.
    pub fn metrics_for(&self, protocol: ProtocolKind) -> Result<ProtocolMetrics, AppError> {
        let entry = self.protocols.get(&protocol).ok_or_else(|| {
            AppError::DataSourceError(format!("No {} entry in snapshot", protocol))
        })?;

        let mut entry = entry.clone();
        match entry.as_object_mut() {
            Some(fields) => {
                fields
                    .entry("protocol")
                    .or_insert_with(|| Value::String(protocol.as_str().to_string()));
            }
            None => {
                return Err(AppError::DataSourceError(format!(
                    "{} entry must be a JSON object",
                    protocol
                )))
            }
        }

        let metrics: ProtocolMetrics = serde_json::from_value(entry)?;
        if metrics.kind() != protocol {
            return Err(AppError::DataSourceError(format!(
                "{} entry is tagged as {}",
                protocol,
                metrics.kind()
            )));
        }
        Ok(metrics)
    }
}
