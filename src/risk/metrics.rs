// Protocol metrics snapshots fed into the score engine
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::risk::RiskError;

/// Protocols the score engine knows how to assess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolKind {
    Pendle,
    Ethena,
    Falcon,
}

impl ProtocolKind {
    pub const ALL: [ProtocolKind; 3] = [ProtocolKind::Pendle, ProtocolKind::Ethena, ProtocolKind::Falcon];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolKind::Pendle => "pendle",
            ProtocolKind::Ethena => "ethena",
            ProtocolKind::Falcon => "falcon",
        }
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolKind {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendle" => Ok(ProtocolKind::Pendle),
            "ethena" => Ok(ProtocolKind::Ethena),
            "falcon" => Ok(ProtocolKind::Falcon),
            other => Err(RiskError::UnsupportedProtocol {
                protocol: other.to_string(),
            }),
        }
    }
}

/// Pendle principal-token position: risk grows as maturity approaches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendleMetrics {
    #[serde(default)]
    pub maturity_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Ethena synthetic dollar: funding and peg deviation drive the risk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EthenaMetrics {
    pub funding_rate: f64,
    pub depeg_risk: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Falcon vault: shorter redemption cooldowns mean less time to react
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FalconMetrics {
    #[serde(default)]
    pub cooldown_days: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// One metrics snapshot, tagged by protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "protocol", rename_all = "lowercase")]
pub enum ProtocolMetrics {
    Pendle(PendleMetrics),
    Ethena(EthenaMetrics),
    Falcon(FalconMetrics),
}

impl ProtocolMetrics {
    pub fn kind(&self) -> ProtocolKind {
        match self {
            ProtocolMetrics::Pendle(_) => ProtocolKind::Pendle,
            ProtocolMetrics::Ethena(_) => ProtocolKind::Ethena,
            ProtocolMetrics::Falcon(_) => ProtocolKind::Falcon,
        }
    }

    /// Data-source liveness, when the source reported one
    pub fn confidence(&self) -> Option<f64> {
        match self {
            ProtocolMetrics::Pendle(m) => m.confidence,
            ProtocolMetrics::Ethena(m) => m.confidence,
            ProtocolMetrics::Falcon(m) => m.confidence,
        }
    }

    /// Report values the data layer should have cleaned up.
    ///
    /// The engine copes with every value this rejects; validation exists so
    /// callers can log or clamp before scoring.
    pub fn validate(&self) -> Result<(), RiskError> {
        if let Some(confidence) = self.confidence() {
            if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
                return Err(RiskError::InvalidMetric {
                    field: "confidence".to_string(),
                    value: confidence,
                });
            }
        }

        match self {
            ProtocolMetrics::Pendle(_) => Ok(()),
            ProtocolMetrics::Ethena(m) => {
                check_finite("funding_rate", m.funding_rate)?;
                check_finite("depeg_risk", m.depeg_risk)
            }
            ProtocolMetrics::Falcon(m) => match m.cooldown_days {
                Some(days) if !days.is_finite() || days < 0.0 => Err(RiskError::InvalidMetric {
                    field: "cooldown_days".to_string(),
                    value: days,
                }),
                _ => Ok(()),
            },
        }
    }

    /// Copy of this snapshot with confidence clamped into [0, 1]. NaN becomes 0.
    pub fn with_clamped_confidence(&self) -> Self {
        let clamp = |c: Option<f64>| c.map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) });
        match self {
            ProtocolMetrics::Pendle(m) => ProtocolMetrics::Pendle(PendleMetrics {
                confidence: clamp(m.confidence),
                ..m.clone()
            }),
            ProtocolMetrics::Ethena(m) => ProtocolMetrics::Ethena(EthenaMetrics {
                confidence: clamp(m.confidence),
                ..m.clone()
            }),
            ProtocolMetrics::Falcon(m) => ProtocolMetrics::Falcon(FalconMetrics {
                confidence: clamp(m.confidence),
                ..m.clone()
            }),
        }
    }
}

fn check_finite(field: &str, value: f64) -> Result<(), RiskError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RiskError::InvalidMetric {
            field: field.to_string(),
            value,
        })
    }
}
