use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pulse_risk_monitor::{
    exit::{ExitComparator, MarketQuote, RedemptionQuote},
    models::{CreateRewardRecord, Currency, RewardRecord},
    risk::{EthenaMetrics, FalconMetrics, PendleMetrics, ProtocolKind, ProtocolMetrics, RiskScore, ScoreEngine},
    services::CsvExporter,
    config::ExportSettings,
};
use rust_decimal::Decimal;

fn benchmark_score_engine(c: &mut Criterion) {
    let engine = ScoreEngine::new();
    let now = Utc::now();

    let snapshots = vec![
        ProtocolMetrics::Pendle(PendleMetrics {
            maturity_date: Some(now + Duration::days(2)),
            confidence: Some(0.91),
        }),
        ProtocolMetrics::Ethena(EthenaMetrics {
            funding_rate: 0.031,
            depeg_risk: 0.012,
            confidence: Some(0.97),
        }),
        ProtocolMetrics::Falcon(FalconMetrics {
            cooldown_days: Some(4.0),
            confidence: None,
        }),
    ];

    c.bench_function("score_single", |b| {
        b.iter(|| engine.score(black_box(Some(&snapshots[1])), black_box(now)))
    });

    c.bench_function("score_batch_3", |b| {
        b.iter(|| engine.score_batch(black_box(snapshots.iter().map(Some)), black_box(now)))
    });
}

fn benchmark_exit_comparison(c: &mut Criterion) {
    let comparator = ExitComparator::default();
    let redemption = RedemptionQuote {
        asset: "sUSDe".to_string(),
        nav: 1.0,
        cooldown_days: 7.0,
    };
    let market = MarketQuote {
        asset: "sUSDe".to_string(),
        price: 0.998,
        liquidity: 25_000_000.0,
    };

    c.bench_function("exit_compare", |b| {
        b.iter(|| comparator.compare(black_box(10_000.0), black_box(&redemption), black_box(&market)))
    });
}

fn benchmark_csv_export(c: &mut Criterion) {
    let settings = ExportSettings::default();
    let exporter = CsvExporter::new(settings.clone(), settings.exchange_rates());
    let now = Utc::now();

    let records: Vec<RewardRecord> = (0..1000)
        .map(|i| {
            RewardRecord::new(
                CreateRewardRecord {
                    asset: "sUSDe".to_string(),
                    protocol: ProtocolKind::Ethena,
                    reward_amount: Decimal::new(i * 37 + 1, 3),
                    reward_currency: Currency::USD,
                },
                RiskScore::from((i % 101) as u8),
                now,
            )
        })
        .collect();

    c.bench_function("csv_export_1000", |b| {
        b.iter(|| {
            let mut buffer = Vec::with_capacity(128 * 1024);
            exporter.export(black_box(&records), &mut buffer)
        })
    });
}

criterion_group!(
    benches,
    benchmark_score_engine,
    benchmark_exit_comparison,
    benchmark_csv_export
);
criterion_main!(benches);
