use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use metrics::increment_counter;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::config::MonitoringSettings;
use crate::error::AppError;
use crate::risk::{ProtocolKind, ProtocolMetrics, RiskScore, RiskStatus, ScoreBreakdown, ScoreEngine};
use crate::services::snapshot::MetricsSnapshot;

/// Anything that can produce a metrics snapshot for one protocol
#[async_trait]
pub trait MetricsSource: Send + Sync {
    fn name(&self) -> &str;

    fn protocol(&self) -> ProtocolKind;

    async fn fetch_metrics(&self) -> Result<ProtocolMetrics, AppError>;
}

/// Reads one protocol's entry from a JSON snapshot file on every fetch
pub struct FileMetricsSource {
    name: String,
    path: PathBuf,
    protocol: ProtocolKind,
}

impl FileMetricsSource {
    pub fn new(path: impl Into<PathBuf>, protocol: ProtocolKind) -> Self {
        let path = path.into();
        Self {
            name: format!("file:{}", path.display()),
            path,
            protocol,
        }
    }
}

#[async_trait]
impl MetricsSource for FileMetricsSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn protocol(&self) -> ProtocolKind {
        self.protocol
    }

    async fn fetch_metrics(&self) -> Result<ProtocolMetrics, AppError> {
        let snapshot = MetricsSnapshot::load(&self.path).await?;
        snapshot.metrics_for(self.protocol)
    }
}

/// Always returns the same snapshot
pub struct StaticMetricsSource {
    name: String,
    metrics: ProtocolMetrics,
}

impl StaticMetricsSource {
    pub fn new(name: impl Into<String>, metrics: ProtocolMetrics) -> Self {
        Self {
            name: name.into(),
            metrics,
        }
    }
}

#[async_trait]
impl MetricsSource for StaticMetricsSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn protocol(&self) -> ProtocolKind {
        self.metrics.kind()
    }

    async fn fetch_metrics(&self) -> Result<ProtocolMetrics, AppError> {
        Ok(self.metrics.clone())
    }
}

/// One scored fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub protocol: ProtocolKind,
    pub source: String,
    pub score: RiskScore,
    pub status: RiskStatus,
    pub breakdown: ScoreBreakdown,
    /// False when the fetch failed and the protocol was scored as missing
    pub fetched: bool,
    pub timestamp: DateTime<Utc>,
}

/// Bounded in-memory log of recent snapshots, oldest first
#[derive(Debug, Clone)]
pub struct ScoreHistory {
    entries: Arc<RwLock<VecDeque<ScoreSnapshot>>>,
    limit: usize,
}

impl ScoreHistory {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(limit))),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub async fn extend(&self, snapshots: impl IntoIterator<Item = ScoreSnapshot>) {
        let mut entries = self.entries.write().await;
        for snapshot in snapshots {
            if entries.len() == self.limit {
                entries.pop_front();
            }
            entries.push_back(snapshot);
        }
    }

    /// Most recent snapshot for `protocol`
    pub async fn latest(&self, protocol: ProtocolKind) -> Option<ScoreSnapshot> {
        let entries = self.entries.read().await;
        entries.iter().rev().find(|s| s.protocol == protocol).cloned()
    }

    pub async fn all(&self) -> Vec<ScoreSnapshot> {
        self.entries.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

pub struct MonitoringService {
    engine: ScoreEngine,
    sources: Vec<Arc<dyn MetricsSource>>,
    history: ScoreHistory,
    settings: MonitoringSettings,
}

impl MonitoringService {
    pub fn new(engine: ScoreEngine, settings: MonitoringSettings) -> Self {
        Self {
            engine,
            sources: Vec::new(),
            history: ScoreHistory::new(settings.history_limit),
            settings,
        }
    }

    pub fn with_source(mut self, source: Arc<dyn MetricsSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn add_source(&mut self, source: Arc<dyn MetricsSource>) {
        self.sources.push(source);
    }

    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    pub async fn start_monitoring(&self) -> Result<(), AppError> {
        info!(
            sources = self.sources.len(),
            interval_seconds = self.settings.poll_interval_seconds,
            "Starting PulseScore monitoring"
        );

        let mut interval = time::interval(Duration::from_secs(self.settings.poll_interval_seconds));

        loop {
            interval.tick().await;

            if let Err(e) = self.run_cycle(Utc::now()).await {
                error!("Error during monitoring cycle: {}", e);
            }

            if self.settings.run_once {
                info!("Single monitoring cycle requested; stopping");
                return Ok(());
            }
        }
    }

    /// Fetch every source concurrently, score what arrived, and record the results.
    ///
    /// A source that fails or times out is scored as missing; it never holds
    /// up the others.
    pub async fn run_cycle(&self, now: DateTime<Utc>) -> Result<Vec<ScoreSnapshot>, AppError> {
        if self.sources.is_empty() {
            return Err(AppError::ConfigError("No metrics sources registered".to_string()));
        }

        increment_counter!("pulse_monitoring_cycles_total");
        debug!(sources = self.sources.len(), "Starting monitoring cycle");

        let fetches = self.sources.iter().map(|source| self.fetch_one(source.as_ref()));
        let results = join_all(fetches).await;

        let snapshots: Vec<ScoreSnapshot> = self
            .sources
            .iter()
            .zip(results)
            .map(|(source, metrics)| self.score_snapshot(source.as_ref(), metrics, now))
            .collect();

        self.history.extend(snapshots.iter().cloned()).await;
        info!(scored = snapshots.len(), "Completed monitoring cycle");

        Ok(snapshots)
    }

    async fn fetch_one(&self, source: &dyn MetricsSource) -> Option<ProtocolMetrics> {
        let timeout = Duration::from_secs(self.settings.fetch_timeout_seconds);
        let result = match time::timeout(timeout, source.fetch_metrics()).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(format!(
                "{} did not answer within {}s",
                source.name(),
                self.settings.fetch_timeout_seconds
            ))),
        };

        let metrics = match result {
            Ok(metrics) if metrics.kind() == source.protocol() => metrics,
            Ok(metrics) => {
                warn!(
                    source = source.name(),
                    protocol = %source.protocol(),
                    found = %metrics.kind(),
                    "Source returned metrics for the wrong protocol; scoring as missing"
                );
                increment_counter!("pulse_fetch_failures_total", "protocol" => source.protocol().as_str());
                return None;
            }
            Err(e) => {
                warn!(
                    source = source.name(),
                    protocol = %source.protocol(),
                    error = %e,
                    "Metrics fetch failed; scoring as missing"
                );
                increment_counter!("pulse_fetch_failures_total", "protocol" => source.protocol().as_str());
                return None;
            }
        };

        if let Err(e) = metrics.validate() {
            warn!(source = source.name(), protocol = %source.protocol(), error = %e, "Clamping out-of-range metrics");
        }
        Some(metrics.with_clamped_confidence())
    }

    fn score_snapshot(
        &self,
        source: &dyn MetricsSource,
        metrics: Option<ProtocolMetrics>,
        now: DateTime<Utc>,
    ) -> ScoreSnapshot {
        let breakdown = self.engine.breakdown(metrics.as_ref(), now);
        increment_counter!("pulse_scores_computed_total", "protocol" => source.protocol().as_str());

        info!(
            protocol = %source.protocol(),
            source = source.name(),
            score = breakdown.score.value(),
            status = %breakdown.status(),
            "PulseScore updated"
        );

        ScoreSnapshot {
            protocol: source.protocol(),
            source: source.name().to_string(),
            score: breakdown.score,
            status: breakdown.status(),
            breakdown,
            fetched: metrics.is_some(),
            timestamp: now,
        }
    }
}
