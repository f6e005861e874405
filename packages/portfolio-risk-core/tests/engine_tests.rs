use approx::assert_relative_eq;
use portfolio_risk_core::portfolio::aggregate;
use portfolio_risk_core::{
    analyze_portfolio, volatility, EngineConfig, HoldingInput, PortfolioAnalysis,
    RecommendationKind, RiskEngine, RiskLevel, UnweightedHolding,
};

fn two_holding_fixture() -> Vec<HoldingInput> {
    vec![
        HoldingInput::new("A", 10.0, 100.0, 50.0).with_historical(vec![100.0, 50.0]),
        HoldingInput::new("B", 10.0, 50.0, 60.0).with_historical(vec![50.0, 60.0]),
    ]
}

fn kinds(analysis: &PortfolioAnalysis) -> Vec<RecommendationKind> {
    analysis.recommendations.iter().map(|r| r.kind).collect()
}

fn flat_holding(volatility: f64) -> UnweightedHolding {
    UnweightedHolding {
        symbol: "X".to_string(),
        quantity: 1.0,
        buy_price: 100.0,
        current_price: 100.0,
        current_value: 100.0,
        cost: 100.0,
        gain_loss: 0.0,
        gain_loss_pct: 0.0,
        return_1y: 0.0,
        volatility,
        beta: 1.0,
        history_points: 0,
    }
}

#[test]
fn canonical_two_holding_fixture() {
    let analysis = analyze_portfolio(&two_holding_fixture());
    let m = &analysis.metrics;

    assert_eq!(m.total_value, 1100.0);
    assert_eq!(m.total_cost, 1500.0);
    assert_relative_eq!(analysis.holdings[0].weight, 5.0 / 11.0, epsilon = 1e-12);
    assert_relative_eq!(analysis.holdings[1].weight, 6.0 / 11.0, epsilon = 1e-12);
    assert_relative_eq!(analysis.holdings[0].gain_loss_pct, -50.0, epsilon = 1e-9);
    assert_relative_eq!(analysis.holdings[1].gain_loss_pct, 20.0, epsilon = 1e-9);

    // Two prices give a single return each, so volatility is zero
    assert_eq!(m.weighted_volatility, 0.0);
    assert_eq!(m.risk_score, 0.0);
    assert_eq!(m.risk_level, RiskLevel::Basso);

    assert_relative_eq!(m.concentration_index, 61.0 / 121.0, epsilon = 1e-12);
    assert_relative_eq!(
        m.diversification_score,
        (1.0 - 61.0 / 121.0) * 100.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        m.portfolio_return_1y,
        (500.0 * -50.0 + 600.0 * 20.0) / 1100.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(m.weighted_beta, 1.0, epsilon = 1e-12);

    assert_eq!(
        kinds(&analysis),
        vec![
            RecommendationKind::Warning,
            RecommendationKind::Warning,
            RecommendationKind::Alert,
        ]
    );
    assert!(analysis.recommendations[0].message.starts_with("A rappresenta il 45.5%"));
    assert!(analysis.recommendations[1].message.starts_with("B rappresenta il 54.5%"));
    assert!(analysis.recommendations[2].message.starts_with("A è in perdita del 50.0%"));
}

#[test]
fn weights_sum_to_one() {
    let holdings: Vec<HoldingInput> = (1..=7)
        .map(|i| {
            let symbol = format!("S{}", i);
            HoldingInput::new(&symbol, i as f64 * 1.7, 10.0, 3.3 * i as f64)
        })
        .collect();
    let analysis = analyze_portfolio(&holdings);
    let sum: f64 = analysis.holdings.iter().map(|h| h.weight).sum();
    assert!((sum - 1.0).abs() < 1e-9);
    assert!(analysis.metrics.diversification_score >= 0.0);
    assert!(analysis.metrics.diversification_score <= 100.0);
}

#[test]
fn equal_weights_diversification() {
    for n in 1..=6 {
        let holdings: Vec<HoldingInput> = (0..n)
            .map(|i| HoldingInput::new(&format!("S{}", i), 1.0, 100.0, 100.0))
            .collect();
        let m = analyze_portfolio(&holdings).metrics;
        assert_relative_eq!(m.concentration_index, 1.0 / n as f64, epsilon = 1e-12);
        assert_relative_eq!(
            m.diversification_score,
            (1.0 - 1.0 / n as f64) * 100.0,
            epsilon = 1e-9
        );
    }
}

#[test]
fn risk_level_threshold_exactness() {
    let config = EngineConfig::default();
    let cases = [
        (15.0, 30.0, RiskLevel::Basso),
        (15.01, 30.02, RiskLevel::Medio),
        (30.0, 60.0, RiskLevel::Medio),
        (30.01, 60.02, RiskLevel::Alto),
    ];
    for (vol, score, level) in cases {
        let (_, m) = aggregate(vec![flat_holding(vol)], &config);
        assert_relative_eq!(m.risk_score, score, epsilon = 1e-9);
        assert_eq!(m.risk_level, level, "weighted volatility {}", vol);
    }
}

#[test]
fn volatility_degenerate_inputs() {
    assert_eq!(volatility(&[]), 0.0);
    assert_eq!(volatility(&[100.0]), 0.0);
    assert_eq!(volatility(&[100.0, 100.0, 100.0]), 0.0);
}

#[test]
fn single_holding_never_concentration_warning() {
    let holdings = vec![HoldingInput::new("ONLY", 10.0, 10.0, 12.0)];
    let analysis = analyze_portfolio(&holdings);
    assert_eq!(analysis.holdings[0].weight, 1.0);
    assert!(analysis
        .recommendations
        .iter()
        .all(|r| !matches!(r.kind, RecommendationKind::Warning | RecommendationKind::Info)));
}

#[test]
fn loss_of_exactly_twenty_percent_is_not_alerted() {
    let holdings = vec![
        HoldingInput::new("FLAT", 1.0, 100.0, 80.0),
        HoldingInput::new("DOWN", 1.0, 100.0, 79.0),
        HoldingInput::new("UP1", 1.0, 100.0, 110.0),
        HoldingInput::new("UP2", 1.0, 100.0, 110.0),
    ];
    let analysis = analyze_portfolio(&holdings);
    assert_eq!(analysis.holdings[0].gain_loss_pct, -20.0);

    let alerts: Vec<_> = analysis
        .recommendations
        .iter()
        .filter(|r| r.kind == RecommendationKind::Alert)
        .collect();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].message.starts_with("DOWN"));
}

#[test]
fn high_risk_portfolio_gets_one_risk_message() {
    let swings = vec![100.0, 120.0, 96.0, 115.2, 92.16, 110.59];
    let holdings = vec![
        HoldingInput::new("X", 1.0, 100.0, 110.0).with_historical(swings.clone()),
        HoldingInput::new("Y", 1.0, 100.0, 110.0).with_historical(swings),
    ];
    let analysis = analyze_portfolio(&holdings);
    assert_eq!(analysis.metrics.risk_level, RiskLevel::Alto);
    assert_eq!(
        kinds(&analysis)
            .iter()
            .filter(|k| **k == RecommendationKind::Risk)
            .count(),
        1
    );
}

#[test]
fn missing_history_is_distinguishable() {
    let holdings = vec![
        HoldingInput::new("NEW", 1.0, 100.0, 100.0),
        HoldingInput::new("OLD", 1.0, 100.0, 100.0).with_historical(vec![100.0, 100.0, 100.0]),
    ];
    let analysis = analyze_portfolio(&holdings);
    assert_eq!(analysis.holdings[0].volatility, analysis.holdings[1].volatility);
    assert!(!analysis.holdings[0].has_history());
    assert!(analysis.holdings[1].has_history());
}

#[test]
fn engine_can_be_shared_across_threads() {
    let engine = RiskEngine::default();
    let holdings = two_holding_fixture();
    let expected = engine.analyze(&holdings);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| engine.analyze(&holdings))).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn analysis_serializes_with_wire_names() {
    let analysis = analyze_portfolio(&two_holding_fixture());
    let value = serde_json::to_value(&analysis).unwrap();
    assert_eq!(value["metrics"]["riskLevel"], "Basso");
    assert_eq!(value["recommendations"][0]["type"], "warning");
    assert_eq!(value["recommendations"][2]["type"], "alert");
    assert!(value["holdings"][0].get("return1Y").is_some());
    assert!(value["holdings"][0].get("gainLossPct").is_some());
}
