// ==========================================
// 药房库存决策支持系统 - 驾驶舱 API
// ==========================================
// 职责: 按请求执行分析，并将分析结果整理为四个页签的响应
// 架构: 展示层 → DashboardApi → AnalysisOrchestrator
// 红线: 无隐式重算状态；每次 analyze 返回全新的 AnalysisReport
// ==========================================

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::api::dto::{
    ClassificationRow, ForecastResponse, ForecastRow, ItemDetailResponse, OverviewResponse,
    RecommendationResponse, RecommendationRow,
};
use crate::api::error::{ApiError, ApiResult};
use crate::domain::store::SalesHistoryStore;
use crate::engine::orchestrator::{AnalysisOrchestrator, AnalysisParams, AnalysisReport};

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================
pub struct DashboardApi {
    store: Arc<SalesHistoryStore>,
    params: AnalysisParams,
}

impl DashboardApi {
    /// 创建新的 DashboardApi 实例
    ///
    /// # 参数
    /// - store: 药品表（只读）
    /// - params: 分析参数（阈值、预测期数、安全库存）
    pub fn new(store: SalesHistoryStore, params: AnalysisParams) -> Self {
        Self {
            store: Arc::new(store),
            params,
        }
    }

    pub fn store(&self) -> &SalesHistoryStore {
        &self.store
    }

    pub fn params(&self) -> AnalysisParams {
        self.params
    }

    /// 以新参数共享同一药品表
    pub fn with_params(&self, params: AnalysisParams) -> Self {
        Self {
            store: Arc::clone(&self.store),
            params,
        }
    }

    // ==========================================
    // 分析
    // ==========================================

    /// 执行分析（各药品预测并发拟合）
    #[instrument(skip(self), fields(items = self.store.len()))]
    pub async fn analyze(&self) -> ApiResult<AnalysisReport> {
        let orchestrator = AnalysisOrchestrator::new(&self.params)?;
        Ok(orchestrator.run_concurrent(&self.store).await?)
    }

    /// 执行分析（顺序版）
    pub fn analyze_sequential(&self) -> ApiResult<AnalysisReport> {
        let orchestrator = AnalysisOrchestrator::new(&self.params)?;
        Ok(orchestrator.run(&self.store)?)
    }

    // ==========================================
    // 页签: 总览
    // ==========================================

    pub fn overview(&self, report: &AnalysisReport) -> OverviewResponse {
        let rows = report
            .classified
            .iter()
            .map(|c| ClassificationRow {
                rank: c.rank,
                name: c.item.name.clone(),
                abc: c.abc,
                ved: c.item.ved,
                annual_value: c.annual_value,
                cumulative_pct: c.cumulative_pct,
                current_stock: c.item.current_stock,
            })
            .collect();

        OverviewResponse {
            total_items: report.summary.total_items,
            tier_a_count: report.summary.tier_a_count,
            vital_count: report.summary.vital_count,
            tier_a_vital_count: report.summary.tier_a_vital_count,
            rows,
        }
    }

    // ==========================================
    // 页签: 明细
    // ==========================================

    /// 查询单品明细
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): 药品不存在
    pub fn item_detail(&self, report: &AnalysisReport, name: &str) -> ApiResult<ItemDetailResponse> {
        debug!(name = name, "查询药品明细");

        let item = self
            .store
            .get(name)
            .ok_or_else(|| ApiError::NotFound(format!("药品 {}", name)))?;
        let classified = report.classified_for(name).ok_or_else(|| {
            ApiError::InternalError(format!("分析结果缺少药品 {}", name))
        })?;

        Ok(ItemDetailResponse {
            name: item.name.clone(),
            abc: classified.abc,
            ved: item.ved,
            current_stock: item.current_stock,
            monthly_consumption: item.monthly_consumption,
            unit_price: item.unit_price,
            annual_value: classified.annual_value,
            sales_history: item.sales_history.clone(),
        })
    }

    // ==========================================
    // 页签: 预测
    // ==========================================

    pub fn forecasts(&self, report: &AnalysisReport) -> ForecastResponse {
        let rows = report
            .forecasts
            .iter()
            .map(|f| ForecastRow {
                name: f.item_name.clone(),
                current_stock: self
                    .store
                    .get(&f.item_name)
                    .map(|item| item.current_stock)
                    .unwrap_or_default(),
                values: f.values.clone(),
                method: f.method.clone(),
            })
            .collect();

        ForecastResponse {
            horizon: self.params.forecast.horizon,
            rows,
            fallback_count: report.summary.fallback_forecast_count,
        }
    }

    // ==========================================
    // 页签: 建议
    // ==========================================

    pub fn recommendations(&self, report: &AnalysisReport) -> RecommendationResponse {
        let rows = report
            .recommendations
            .iter()
            .map(|r| RecommendationRow {
                name: r.item_name.clone(),
                abc: r.abc,
                ved: r.ved,
                current_stock: r.current_stock,
                forecast_next: r.forecast_next,
                recommendation: r.recommendation,
                reason: r.reason.clone(),
            })
            .collect();

        RecommendationResponse {
            rows,
            critical_count: report.summary.critical_count,
            important_count: report.summary.important_count,
        }
    }

    /// 完整分析结果 JSON
    pub fn analysis_json(&self, report: &AnalysisReport) -> ApiResult<String> {
        serde_json::to_string_pretty(report)
            .map_err(|e| ApiError::InternalError(format!("序列化分析结果失败: {}", e)))
    }
}
