// ==========================================
// 分析编排集成测试
// ==========================================
// 测试范围:
// 1. 示例数据完整分析（分类 → 预测 → 建议 → 汇总）
// 2. 汇总统计与明细一致
// 3. 并发分析与顺序分析结果一致
// 4. 参数校验
// ==========================================

mod helpers;

use helpers::test_data_builder::ItemBuilder;
use pharmacy_stock::domain::sample::load_sample_items;
use pharmacy_stock::domain::store::SalesHistoryStore;
use pharmacy_stock::domain::types::{AbcTier, Recommendation, VedTier};
use pharmacy_stock::engine::{AnalysisOrchestrator, AnalysisParams, RuleEngineConfig};
use pharmacy_stock::logging;

fn run_default(store: &SalesHistoryStore) -> pharmacy_stock::engine::AnalysisReport {
    logging::init_test();
    AnalysisOrchestrator::new(&AnalysisParams::default())
        .unwrap()
        .run(store)
        .unwrap()
}

#[test]
fn test_sample_summary() {
    let store = load_sample_items().unwrap();
    let report = run_default(&store);

    assert_eq!(report.summary.total_items, 10);
    assert_eq!(report.summary.tier_a_count, 6);
    assert_eq!(report.summary.vital_count, 3);
    assert_eq!(report.summary.tier_a_vital_count, 2);

    assert_eq!(report.classified.len(), 10);
    assert_eq!(report.forecasts.len(), 10);
    assert_eq!(report.recommendations.len(), 10);
}

#[test]
fn test_summary_matches_records() {
    let store = load_sample_items().unwrap();
    let report = run_default(&store);

    let count = |level: Recommendation| {
        report
            .recommendations
            .iter()
            .filter(|r| r.recommendation == level)
            .count()
    };
    assert_eq!(report.summary.critical_count, count(Recommendation::Critical));
    assert_eq!(report.summary.important_count, count(Recommendation::Important));
    assert_eq!(
        report.summary.fallback_forecast_count,
        report.forecasts.iter().filter(|f| f.method.is_fallback()).count()
    );
}

#[test]
fn test_recommendations_consistent_with_inputs() {
    let store = load_sample_items().unwrap();
    let report = run_default(&store);

    for record in &report.recommendations {
        let forecast = report.forecast_for(&record.item_name).unwrap();
        assert_eq!(record.forecast_next, forecast.values[0]);

        let understocked = record.forecast_next > f64::from(record.current_stock);
        let expected = match (record.abc, record.ved, understocked) {
            (AbcTier::A, VedTier::Vital, true) => Recommendation::Critical,
            (AbcTier::A, VedTier::Essential, true) => Recommendation::Important,
            (AbcTier::B, VedTier::Vital, true) => Recommendation::Moderate,
            (_, _, true) => Recommendation::Watch,
            (_, _, false) => Recommendation::Sufficient,
        };
        assert_eq!(record.recommendation, expected, "{}", record.item_name);
    }
}

#[test]
fn test_forecasts_keep_input_order() {
    let store = load_sample_items().unwrap();
    let report = run_default(&store);
    let forecast_names: Vec<&str> = report.forecasts.iter().map(|f| f.item_name.as_str()).collect();
    let input_names: Vec<&str> = store.names().collect();
    assert_eq!(forecast_names, input_names);
}

#[test]
fn test_inputs_not_mutated() {
    let store = load_sample_items().unwrap();
    let before = store.items().to_vec();
    let _ = run_default(&store);
    assert_eq!(store.items(), before.as_slice());
}

#[test]
fn test_constant_history_item_uses_fallback() {
    let store = SalesHistoryStore::new(vec![
        ItemBuilder::new("flat").history(&[5.0; 8]).stock(3).build(),
        ItemBuilder::new("varied").build(),
    ])
    .unwrap();
    let report = run_default(&store);

    let flat = report.forecast_for("flat").unwrap();
    assert!(flat.method.is_fallback());
    assert_eq!(flat.values, vec![5.0, 5.0, 5.0]);
    assert!(report.summary.fallback_forecast_count >= 1);
}

#[tokio::test]
async fn test_concurrent_matches_sequential() {
    logging::init_test();
    let store = load_sample_items().unwrap();
    let orchestrator = AnalysisOrchestrator::new(&AnalysisParams::default()).unwrap();

    let sequential = orchestrator.run(&store).unwrap();
    let concurrent = orchestrator.run_concurrent(&store).await.unwrap();
    assert_eq!(sequential, concurrent);
}

#[test]
fn test_invalid_safety_stock_rejected() {
    let params = AnalysisParams {
        rules: RuleEngineConfig {
            apply_safety_stock: true,
            safety_stock_pct: 150.0,
        },
        ..AnalysisParams::default()
    };
    assert!(AnalysisOrchestrator::new(&params).is_err());
}

#[test]
fn test_safety_stock_never_lowers_severity() {
    let store = load_sample_items().unwrap();
    let base = run_default(&store);

    let params = AnalysisParams {
        rules: RuleEngineConfig {
            apply_safety_stock: true,
            safety_stock_pct: 50.0,
        },
        ..AnalysisParams::default()
    };
    let padded = AnalysisOrchestrator::new(&params).unwrap().run(&store).unwrap();

    for (a, b) in base.recommendations.iter().zip(&padded.recommendations) {
        assert_eq!(a.item_name, b.item_name);
        assert!(b.recommendation >= a.recommendation, "{}", a.item_name);
    }
}
