// ==========================================
// 药房库存决策支持系统 - 核心库
// ==========================================
// 功能: ABC/VED 分类、ARIMA(1,1,1) 需求预测、补货建议规则
// 系统定位: 决策支持系统 (建议由人工确认)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分类/预测/规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 分析参数
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 页签接口
pub mod api;

// 应用层 - 命令行展示
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AbcTier, Recommendation, VedTier};

// 领域实体
pub use domain::{
    ClassifiedItem, ForecastMethod, ForecastResult, Item, RecommendationRecord,
    SalesHistoryStore,
};

// 引擎
pub use engine::{
    AbcClassifier, AnalysisOrchestrator, AnalysisParams, AnalysisReport, DemandForecaster,
    EngineError, RecommendationEngine,
};

// API
pub use api::{DashboardApi, ImportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "药房库存决策支持系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
