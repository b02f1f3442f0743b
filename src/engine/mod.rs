// ==========================================
// 药房库存决策支持系统 - 引擎层
// ==========================================
// 职责: ABC 分类、需求预测、补货建议规则
// 红线: 引擎无状态，只读药品表，所有规则必须输出 reason
// ==========================================

pub mod abc;
pub mod error;
pub mod forecast;
pub mod orchestrator;
pub mod rule;

// 重导出核心引擎
pub use abc::{AbcClassifier, AbcThresholds};
pub use error::{EngineError, EngineResult};
pub use forecast::arima::FittingFailure;
pub use forecast::optimizer::NelderMeadConfig;
pub use forecast::{
    mean_forecast, ArimaModel, DemandForecaster, ForecastConfig, ForecastModel, DEFAULT_HORIZON,
};
pub use orchestrator::{AnalysisOrchestrator, AnalysisParams, AnalysisReport, AnalysisSummary};
pub use rule::{RecommendationEngine, RuleEngineConfig};
