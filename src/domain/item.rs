// ==========================================
// 药房库存决策支持系统 - 药品领域模型
// ==========================================
// 红线: Item 由 SalesHistoryStore 唯一持有，引擎只读
// 用途: 导入层写入，引擎层只读，派生对象每次分析重新计算
// ==========================================

use crate::domain::types::{AbcTier, Recommendation, VedTier};
use serde::{Deserialize, Serialize};

// ==========================================
// Item - 药品主数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    // ===== 主键 =====
    pub name: String, // 药品名称（唯一）

    // ===== 消耗与价格 =====
    pub monthly_consumption: f64, // 月平均消耗量
    pub unit_price: f64,          // 单价

    // ===== 关键性 =====
    pub ved: VedTier, // VED 等级

    // ===== 库存 =====
    pub current_stock: u32, // 当前库存（件）

    // ===== 历史销量 =====
    // 按时间顺序（最早在前），固定周期粒度（月）
    pub sales_history: Vec<f64>,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        monthly_consumption: f64,
        unit_price: f64,
        ved: VedTier,
        current_stock: u32,
        sales_history: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            monthly_consumption,
            unit_price,
            ved,
            current_stock,
            sales_history,
        }
    }

    /// 年消耗金额 = 月消耗 × 单价 × 12
    pub fn annual_value(&self) -> f64 {
        self.monthly_consumption * self.unit_price * 12.0
    }
}

// ==========================================
// ClassifiedItem - ABC 分类结果
// ==========================================
// 生命周期: 仅在一次分析内有效，不独立持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub item: Item,
    pub annual_value: f64,         // 年消耗金额
    pub cumulative_pct: f64,       // 累计占比（%）
    pub abc: AbcTier,              // ABC 等级
    pub rank: usize,               // 排名（从 1 开始）
}

// ==========================================
// ForecastMethod - 预测方法（主模型 / 兜底）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ForecastMethod {
    /// ARIMA(1,1,1) 拟合成功
    Arima {
        phi: f64,
        theta: f64,
        sse: f64,
        iterations: usize,
    },
    /// 拟合失败，回退为历史均值
    MeanFallback { reason: String },
}

impl ForecastMethod {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ForecastMethod::MeanFallback { .. })
    }
}

// ==========================================
// ForecastResult - 单品需求预测
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub item_name: String,
    pub values: Vec<f64>, // 未来 N 期预测值（非负）
    pub method: ForecastMethod,
}

impl ForecastResult {
    /// 下一期预测值（规则引擎输入）
    pub fn next_period(&self) -> f64 {
        self.values.first().copied().unwrap_or(0.0)
    }
}

// ==========================================
// RecommendationRecord - 补货建议（含可解释原因）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub item_name: String,
    pub abc: AbcTier,
    pub ved: VedTier,
    pub current_stock: u32,
    pub forecast_next: f64,
    pub recommendation: Recommendation,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_value() {
        let item = Item::new("Insulin", 15.0, 250.0, VedTier::Vital, 15, vec![12.0, 14.0]);
        assert_eq!(item.annual_value(), 45000.0);
    }

    #[test]
    fn test_forecast_method_serde_tag() {
        let method = ForecastMethod::MeanFallback {
            reason: "degenerate".to_string(),
        };
        let json = serde_json::to_value(&method).unwrap();
        assert_eq!(json["method"], "mean_fallback");
        assert!(method.is_fallback());
    }
}
