use pulse_risk_monitor::{
    config::Settings,
    exit::{ExitAnalysis, ExitComparator},
    risk::{ProtocolKind, ScoreEngine},
    services::{
        CsvExporter, ExitRequest, FileMetricsSource, MetricsSnapshot, MonitoringService, RewardLedger,
    },
    utils::{init_logging, time::now_utc},
    AppError,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    init_logging(&settings.logging);
    settings.validate()?;
    info!("Configuration loaded successfully");

    let snapshot_path = settings.monitoring.snapshot_path.clone();
    let snapshot = match MetricsSnapshot::load(&snapshot_path).await {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(path = %snapshot_path, error = %e, "Snapshot unavailable at startup");
            None
        }
    };

    if let Some(request) = snapshot.as_ref().and_then(|s| s.exit.as_ref()) {
        let comparator = ExitComparator::new(settings.exit.to_exit_config());
        match run_exit_comparison(&comparator, request) {
            Ok(analysis) => log_exit_analysis(request, &analysis),
            Err(e) => error!("Exit comparison failed: {}", e),
        }
    }

    let engine = ScoreEngine::with_config(settings.scoring.clone());
    let mut service = MonitoringService::new(engine, settings.monitoring.clone());
    for protocol in ProtocolKind::ALL {
        service.add_source(Arc::new(FileMetricsSource::new(&snapshot_path, protocol)));
    }
    let service = Arc::new(service);

    let monitoring_handle = {
        let service = service.clone();
        tokio::spawn(async move {
            if let Err(e) = service.start_monitoring().await {
                error!("Monitoring service failed: {}", e);
            }
        })
    };

    info!(snapshot = %snapshot_path, "PulseScore monitor started");

    tokio::select! {
        result = monitoring_handle => {
            if let Err(e) = result {
                error!("Monitoring task aborted: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    let ledger = RewardLedger::new();
    if let Some(snapshot) = &snapshot {
        for reward in snapshot.rewards.iter().cloned() {
            ledger.record(reward, service.history(), now_utc()).await;
        }
    }

    if let Some(path) = &settings.export.output_path {
        let exporter = CsvExporter::new(settings.export.clone(), settings.export.exchange_rates());
        let records = ledger.records().await;
        if let Err(e) = exporter.export_to_path(&records, path) {
            error!("Reward export failed: {}", e);
        }
    }

    info!("Shutting down PulseScore monitor");
    Ok(())
}

fn run_exit_comparison(comparator: &ExitComparator, request: &ExitRequest) -> Result<ExitAnalysis, AppError> {
    comparator.config().validate()?;
    Ok(comparator.compare(request.amount, &request.redemption, &request.market)?)
}

fn log_exit_analysis(request: &ExitRequest, analysis: &ExitAnalysis) {
    let comparison = &analysis.comparison;
    info!(
        asset = %request.redemption.asset,
        amount = request.amount,
        redemption_value = analysis.redemption_path.final_value,
        market_value = analysis.market_path.final_value,
        net_difference = comparison.net_difference,
        breakeven_depeg_percent = comparison.breakeven_depeg_percent,
        recommendation = %comparison.recommendation,
        "Exit comparison"
    );
    for (name, outcome) in comparison.scenarios.iter() {
        info!(
            scenario = name,
            depeg_fraction = outcome.depeg_fraction,
            redemption_value = outcome.redemption_value,
            gain_loss = outcome.gain_loss,
            recommendation = %outcome.recommendation,
            "De-peg scenario"
        );
    }
}
