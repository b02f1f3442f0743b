// ==========================================
// 药房库存决策支持系统 - API 数据传输对象
// ==========================================
// 用途: 四个展示页签（总览 / 明细 / 预测 / 建议）的响应结构
// 说明: 只携带结构化等级，不携带颜色和文案
// ==========================================

use crate::domain::item::ForecastMethod;
use crate::domain::types::{AbcTier, Recommendation, VedTier};
use serde::{Deserialize, Serialize};

// ==========================================
// 总览
// ==========================================

/// ABC-VED 分级矩阵行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRow {
    pub rank: usize,
    pub name: String,
    pub abc: AbcTier,
    pub ved: VedTier,
    pub annual_value: f64,
    pub cumulative_pct: f64,
    pub current_stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub total_items: usize,
    pub tier_a_count: usize,
    pub vital_count: usize,
    /// A 类且 V 级（高风险）
    pub tier_a_vital_count: usize,
    /// 按年消耗金额降序
    pub rows: Vec<ClassificationRow>,
}

// ==========================================
// 明细
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetailResponse {
    pub name: String,
    pub abc: AbcTier,
    pub ved: VedTier,
    pub current_stock: u32,
    pub monthly_consumption: f64,
    pub unit_price: f64,
    pub annual_value: f64,
    /// 原始历史销量（供绘图）
    pub sales_history: Vec<f64>,
}

// ==========================================
// 预测
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub name: String,
    pub current_stock: u32,
    pub values: Vec<f64>,
    pub method: ForecastMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub horizon: usize,
    /// 与药品表输入顺序一致
    pub rows: Vec<ForecastRow>,
    pub fallback_count: usize,
}

// ==========================================
// 建议
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRow {
    pub name: String,
    pub abc: AbcTier,
    pub ved: VedTier,
    pub current_stock: u32,
    pub forecast_next: f64,
    pub recommendation: Recommendation,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub rows: Vec<RecommendationRow>,
    pub critical_count: usize,
    pub important_count: usize,
}
