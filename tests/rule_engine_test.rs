// ==========================================
// RecommendationEngine 单元测试
// ==========================================
// 测试范围:
// 1. 决策表逐行覆盖（含优先级）
// 2. 预测 = 库存 的边界
// 3. 安全库存开关
// 4. 批量判定与缺失预测
// ==========================================

mod helpers;

use helpers::test_data_builder::ItemBuilder;
use pharmacy_stock::domain::item::{ForecastMethod, ForecastResult};
use pharmacy_stock::domain::types::{AbcTier, Recommendation, VedTier};
use pharmacy_stock::engine::{AbcClassifier, RecommendationEngine, RuleEngineConfig};

fn engine() -> RecommendationEngine {
    RecommendationEngine::default()
}

#[test]
fn test_examples() {
    let e = engine();
    assert_eq!(e.evaluate(AbcTier::A, VedTier::Vital, 15, 20.0).0, Recommendation::Critical);
    assert_eq!(e.evaluate(AbcTier::A, VedTier::Vital, 15, 10.0).0, Recommendation::Sufficient);
    assert_eq!(e.evaluate(AbcTier::B, VedTier::Desirable, 15, 20.0).0, Recommendation::Watch);
}

#[test]
fn test_full_decision_table() {
    let e = engine();
    let tiers = [AbcTier::A, AbcTier::B, AbcTier::C];
    let veds = [VedTier::Vital, VedTier::Essential, VedTier::Desirable];

    for abc in tiers {
        for ved in veds {
            let expected = match (abc, ved) {
                (AbcTier::A, VedTier::Vital) => Recommendation::Critical,
                (AbcTier::A, VedTier::Essential) => Recommendation::Important,
                (AbcTier::B, VedTier::Vital) => Recommendation::Moderate,
                _ => Recommendation::Watch,
            };
            let (under, _) = e.evaluate(abc, ved, 10, 11.0);
            assert_eq!(under, expected, "abc={abc}, ved={ved}");

            // 库存充足时一律 Sufficient
            let (enough, _) = e.evaluate(abc, ved, 10, 9.0);
            assert_eq!(enough, Recommendation::Sufficient, "abc={abc}, ved={ved}");
        }
    }
}

#[test]
fn test_forecast_equal_to_stock_is_sufficient() {
    let (level, reason) = engine().evaluate(AbcTier::A, VedTier::Vital, 15, 15.0);
    assert_eq!(level, Recommendation::Sufficient);
    assert!(reason.contains("<= stock=15"));
}

#[test]
fn test_reason_explains_rule() {
    let (_, reason) = engine().evaluate(AbcTier::A, VedTier::Essential, 25, 31.4);
    assert!(reason.starts_with("RULE_IMPORTANT"));
    assert!(reason.contains("abc=A"));
    assert!(reason.contains("ved=E"));
    assert!(reason.contains("forecast=31.4"));
}

#[test]
fn test_pure_function() {
    let e = engine();
    let first = e.evaluate(AbcTier::B, VedTier::Vital, 8, 12.5);
    for _ in 0..10 {
        assert_eq!(e.evaluate(AbcTier::B, VedTier::Vital, 8, 12.5), first);
    }
}

// ==========================================
// 安全库存
// ==========================================

#[test]
fn test_safety_stock_disabled_by_default() {
    let e = engine();
    assert!(!e.config().apply_safety_stock);
    // 14 × 1.2 = 16.8 > 15，但默认不计入
    assert_eq!(e.evaluate(AbcTier::A, VedTier::Vital, 15, 14.0).0, Recommendation::Sufficient);
}

#[test]
fn test_safety_stock_applied() {
    let e = RecommendationEngine::new(RuleEngineConfig {
        apply_safety_stock: true,
        safety_stock_pct: 20.0,
    })
    .unwrap();
    let (level, reason) = e.evaluate(AbcTier::A, VedTier::Vital, 15, 14.0);
    assert_eq!(level, Recommendation::Critical);
    assert!(reason.contains("+20%"));

    // 0% 与默认判定一致
    let zero = RecommendationEngine::new(RuleEngineConfig {
        apply_safety_stock: true,
        safety_stock_pct: 0.0,
    })
    .unwrap();
    assert_eq!(zero.evaluate(AbcTier::A, VedTier::Vital, 15, 14.0).0, Recommendation::Sufficient);
}

#[test]
fn test_safety_stock_out_of_range_rejected() {
    for pct in [-1.0, 100.5, f64::NAN] {
        let result = RecommendationEngine::new(RuleEngineConfig {
            apply_safety_stock: true,
            safety_stock_pct: pct,
        });
        assert!(result.is_err(), "pct={pct}");
    }
}

// ==========================================
// 批量判定
// ==========================================

fn forecast(name: &str, next: f64) -> ForecastResult {
    ForecastResult {
        item_name: name.to_string(),
        values: vec![next, next, next],
        method: ForecastMethod::MeanFallback {
            reason: "test".to_string(),
        },
    }
}

#[test]
fn test_recommend_batch_follows_classified_order() {
    // 累计占比: high 70% (A), mid 90% (B), low 100% (C)
    let items = vec![
        ItemBuilder::new("low").annual_value(1_000.0).ved(VedTier::Desirable).stock(5).build(),
        ItemBuilder::new("high").annual_value(7_000.0).ved(VedTier::Vital).stock(5).build(),
        ItemBuilder::new("mid").annual_value(2_000.0).ved(VedTier::Vital).stock(5).build(),
    ];
    let classified = AbcClassifier::default().classify(&items).unwrap();
    let forecasts = vec![forecast("low", 6.0), forecast("high", 6.0), forecast("mid", 4.0)];

    let records = engine().recommend_batch(&classified, &forecasts).unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.item_name.as_str()).collect();
    assert_eq!(names, vec!["high", "mid", "low"]);

    assert_eq!(records[0].abc, AbcTier::A);
    assert_eq!(records[0].recommendation, Recommendation::Critical);
    assert_eq!(records[0].forecast_next, 6.0);
    assert_eq!(records[1].abc, AbcTier::B);
    assert_eq!(records[1].recommendation, Recommendation::Sufficient);
    assert_eq!(records[2].abc, AbcTier::C);
    assert_eq!(records[2].recommendation, Recommendation::Watch);
}

#[test]
fn test_recommend_batch_missing_forecast() {
    let items = vec![ItemBuilder::new("orphan").build()];
    let classified = AbcClassifier::default().classify(&items).unwrap();
    assert!(engine().recommend_batch(&classified, &[]).is_err());
}
