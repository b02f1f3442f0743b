// ==========================================
// 药房库存决策支持系统 - 补货建议规则引擎
// ==========================================
// 红线: 等级制，不打分；所有规则必须输出 reason
// 规则（顺序执行，命中即返回）:
// 1) ABC=A 且 VED=V 且 预测 > 库存 → Critical
// 2) ABC=A 且 VED=E 且 预测 > 库存 → Important
// 3) ABC=B 且 VED=V 且 预测 > 库存 → Moderate
// 4) 预测 > 库存                    → Watch
// 5) 其他                           → Sufficient
// 安全库存: 默认不参与判定；启用后比较 预测 × (1 + pct/100) > 库存
// ==========================================

use crate::domain::item::{ClassifiedItem, ForecastResult, RecommendationRecord};
use crate::domain::types::{AbcTier, Recommendation, VedTier};
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::instrument;

/// 规则引擎配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleEngineConfig {
    /// 是否将安全库存计入判定
    pub apply_safety_stock: bool,
    /// 安全库存百分比（0~100）
    pub safety_stock_pct: f64,
}

impl Default for RuleEngineConfig {
    fn default() -> Self {
        Self {
            apply_safety_stock: false,
            safety_stock_pct: 20.0,
        }
    }
}

impl RuleEngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if !self.safety_stock_pct.is_finite() || !(0.0..=100.0).contains(&self.safety_stock_pct) {
            return Err(EngineError::invalid(
                "*",
                "safety_stock_pct",
                format!("安全库存百分比需在 0~100 之间，实际 {}", self.safety_stock_pct),
            ));
        }
        Ok(())
    }
}

// ==========================================
// RecommendationEngine - 补货建议规则引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RuleEngineConfig,
}

impl RecommendationEngine {
    pub fn new(config: RuleEngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> RuleEngineConfig {
        self.config
    }

    /// 判定单个药品的补货建议
    ///
    /// 返回: (Recommendation, reason)
    pub fn evaluate(
        &self,
        abc: AbcTier,
        ved: VedTier,
        current_stock: u32,
        forecast_next: f64,
    ) -> (Recommendation, String) {
        let demand = self.effective_demand(forecast_next);
        let stock = f64::from(current_stock);
        let understocked = demand > stock;

        let (level, rule) = match (abc, ved, understocked) {
            (AbcTier::A, VedTier::Vital, true) => (Recommendation::Critical, "RULE_CRITICAL"),
            (AbcTier::A, VedTier::Essential, true) => (Recommendation::Important, "RULE_IMPORTANT"),
            (AbcTier::B, VedTier::Vital, true) => (Recommendation::Moderate, "RULE_MODERATE"),
            (_, _, true) => (Recommendation::Watch, "RULE_WATCH"),
            (_, _, false) => (Recommendation::Sufficient, "RULE_SUFFICIENT"),
        };

        let safety = if self.config.apply_safety_stock {
            format!(" (+{}% → {:.1})", self.config.safety_stock_pct, demand)
        } else {
            String::new()
        };
        let op = if understocked { ">" } else { "<=" };

        let reason = format!(
            "{}: abc={}, ved={}, forecast={:.1}{} {} stock={}",
            rule, abc, ved, forecast_next, safety, op, current_stock
        );
        (level, reason)
    }

    /// 判定分类药品 + 预测结果
    pub fn recommend(&self, classified: &ClassifiedItem, forecast: &ForecastResult) -> RecommendationRecord {
        let forecast_next = forecast.next_period();
        let (recommendation, reason) = self.evaluate(
            classified.abc,
            classified.item.ved,
            classified.item.current_stock,
            forecast_next,
        );

        RecommendationRecord {
            item_name: classified.item.name.clone(),
            abc: classified.abc,
            ved: classified.item.ved,
            current_stock: classified.item.current_stock,
            forecast_next,
            recommendation,
            reason,
        }
    }

    /// 批量判定（按分类结果顺序输出）
    ///
    /// 预测结果按药品名称匹配；缺失预测视为 InvalidInput
    #[instrument(skip(self, classified, forecasts), fields(count = classified.len()))]
    pub fn recommend_batch(
        &self,
        classified: &[ClassifiedItem],
        forecasts: &[ForecastResult],
    ) -> EngineResult<Vec<RecommendationRecord>> {
        let by_name: HashMap<&str, &ForecastResult> =
            forecasts.iter().map(|f| (f.item_name.as_str(), f)).collect();

        classified
            .iter()
            .map(|c| {
                let forecast = by_name.get(c.item.name.as_str()).ok_or_else(|| {
                    EngineError::invalid(&c.item.name, "forecast", "缺少该药品的预测结果")
                })?;
                Ok(self.recommend(c, forecast))
            })
            .collect()
    }

    fn effective_demand(&self, forecast_next: f64) -> f64 {
        if self.config.apply_safety_stock {
            forecast_next * (1.0 + self.config.safety_stock_pct / 100.0)
        } else {
            forecast_next
        }
    }
}
