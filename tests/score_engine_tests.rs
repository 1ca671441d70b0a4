use chrono::{DateTime, Duration, TimeZone, Utc};
use pulse_risk_monitor::risk::{
    EthenaMetrics, FalconMetrics, PendleMetrics, ProtocolKind, ProtocolMetrics, ProtocolRiskCalculator, RiskError, RiskStatus,
    ScoreEngine, ScoringConfig, Tier,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
}

fn pendle(maturity_in: Option<Duration>, confidence: Option<f64>) -> ProtocolMetrics {
    ProtocolMetrics::Pendle(PendleMetrics {
        maturity_date: maturity_in.map(|d| now() + d),
        confidence,
    })
}

fn falcon(cooldown_days: f64, confidence: f64) -> ProtocolMetrics {
    ProtocolMetrics::Falcon(FalconMetrics {
        cooldown_days: Some(cooldown_days),
        confidence: Some(confidence),
    })
}

#[test]
fn test_missing_snapshot_scores_zero() {
    let engine = ScoreEngine::new();
    let score = engine.score(None, now());
    assert_eq!(score.value(), 0);
    assert_eq!(score.status(), RiskStatus::Critical);
}

#[test]
fn test_healthy_pendle_scores_full() {
    let engine = ScoreEngine::new();
    let metrics = pendle(Some(Duration::days(7)), Some(0.95));
    assert_eq!(engine.score(Some(&metrics), now()).value(), 100);

    let metrics = pendle(Some(Duration::days(90)), Some(1.0));
    assert_eq!(engine.score(Some(&metrics), now()).status(), RiskStatus::Safe);
}

#[test]
fn test_pendle_maturity_ladder() {
    let engine = ScoreEngine::new();
    let cases = [
        (Duration::hours(6), 80),
        (Duration::days(2), 80),
        (Duration::days(3), 90),
        (Duration::days(6) + Duration::hours(1), 100),
        (Duration::days(-2), 70),
    ];
    for (until, expected) in cases {
        let metrics = pendle(Some(until), None);
        assert_eq!(
            engine.score(Some(&metrics), now()).value(),
            expected,
            "maturity in {:?}",
            until
        );
    }
}

#[test]
fn test_ethena_worst_case_is_35() {
    let engine = ScoreEngine::new();
    let metrics = ProtocolMetrics::Ethena(EthenaMetrics {
        funding_rate: 1.0,
        depeg_risk: 1.0,
        confidence: Some(0.0),
    });
    let breakdown = engine.breakdown(Some(&metrics), now());
    assert_eq!(breakdown.depeg_penalty, 35.0);
    assert_eq!(breakdown.liveness_penalty, 30.0);
    assert_eq!(breakdown.score.value(), 35);
    assert_eq!(breakdown.status(), RiskStatus::Warning);
}

#[test]
fn test_ethena_negative_funding_counts_by_magnitude() {
    let engine = ScoreEngine::new();
    let metrics = ProtocolMetrics::Ethena(EthenaMetrics {
        funding_rate: -0.03,
        depeg_risk: 0.0,
        confidence: None,
    });
    assert_eq!(engine.score(Some(&metrics), now()).value(), 90);
}

#[test]
fn test_falcon_cooldown_boundaries() {
    let engine = ScoreEngine::new();
    assert_eq!(engine.score(Some(&falcon(3.0, 1.0)), now()).value(), 85);
    assert_eq!(engine.score(Some(&falcon(5.0, 1.0)), now()).value(), 95);
    assert_eq!(engine.score(Some(&falcon(7.0, 1.0)), now()).value(), 100);
    assert_eq!(engine.score(Some(&falcon(1.0, 0.5)), now()).value(), 45);
}

#[test]
fn test_liveness_edge_cases() {
    let engine = ScoreEngine::new();
    assert_eq!(engine.score(Some(&falcon(10.0, 1.4)), now()).value(), 100);
    assert_eq!(engine.score(Some(&falcon(10.0, f64::NAN)), now()).value(), 70);
    assert_eq!(engine.score(Some(&falcon(10.0, 0.9)), now()).value(), 95);
}

#[test]
fn test_scoring_is_deterministic() {
    let engine = ScoreEngine::new();
    let metrics = pendle(Some(Duration::hours(50)), Some(0.85));
    let first = engine.breakdown(Some(&metrics), now());
    for _ in 0..10 {
        assert_eq!(engine.breakdown(Some(&metrics), now()), first);
    }
}

#[test]
fn test_custom_config_changes_thresholds() {
    let config = ScoringConfig {
        cooldown_tiers: vec![Tier::new(10.0, 40.0)],
        ..ScoringConfig::default()
    };
    let engine = ScoreEngine::with_config(config);
    assert_eq!(engine.score(Some(&falcon(8.0, 1.0)), now()).value(), 60);
}

#[test]
fn test_calculators_describe_themselves() {
    let engine = ScoreEngine::new();
    for kind in engine.supported_protocols() {
        let calculator = engine.calculator_for(kind);
        assert_eq!(calculator.protocol(), kind);
        assert!(!calculator.risk_factors().is_empty());
        assert_eq!(calculator.get_config()["protocol"], kind.as_str());
    }
    assert_eq!(engine.supported_protocols().len(), ProtocolKind::ALL.len());
}

#[test]
fn test_protocol_names_parse() {
    assert_eq!(" Ethena ".parse::<ProtocolKind>().unwrap(), ProtocolKind::Ethena);
    assert!(matches!(
        "lido".parse::<ProtocolKind>(),
        Err(RiskError::UnsupportedProtocol { .. })
    ));
}

#[test]
fn test_metrics_deserialize_from_tagged_json() {
    let metrics: ProtocolMetrics =
        serde_json::from_str(r#"{"protocol":"falcon","cooldown_days":2,"confidence":0.97}"#).unwrap();
    assert_eq!(metrics.kind(), ProtocolKind::Falcon);
    assert_eq!(ScoreEngine::new().score(Some(&metrics), now()).value(), 75);
}

#[test]
fn test_score_now_matches_injected_clock_for_timeless_metrics() {
    let engine = ScoreEngine::new();
    let metrics = falcon(4.0, 0.85);
    assert_eq!(engine.score_now(Some(&metrics)), engine.score(Some(&metrics), now()));
}
