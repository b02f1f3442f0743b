// ==========================================
// 药房库存决策支持系统 - API 层
// ==========================================
// 职责: 面向展示层的请求/响应接口
// 页签: 总览 / 明细 / 预测 / 建议
// ==========================================

pub mod dashboard_api;
pub mod dto;
pub mod error;
pub mod import_api;

pub use dashboard_api::DashboardApi;
pub use dto::{
    ClassificationRow, ForecastResponse, ForecastRow, ItemDetailResponse, OverviewResponse,
    RecommendationResponse, RecommendationRow,
};
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
