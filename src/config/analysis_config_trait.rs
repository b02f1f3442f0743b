// ==========================================
// 药房库存决策支持系统 - 分析配置读取 Trait
// ==========================================
// 职责: 定义分析流程所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::error::ConfigResult;
use crate::engine::abc::AbcThresholds;
use crate::engine::forecast::optimizer::NelderMeadConfig;
use crate::engine::forecast::ForecastConfig;
use crate::engine::orchestrator::AnalysisParams;
use crate::engine::rule::RuleEngineConfig;
use async_trait::async_trait;

// ==========================================
// AnalysisConfigReader Trait
// ==========================================
// 实现者: ConfigManager
#[async_trait]
pub trait AnalysisConfigReader: Send + Sync {
    /// 安全库存百分比（0~100）
    ///
    /// # 默认值
    /// - 20
    async fn get_safety_stock_pct(&self) -> ConfigResult<f64>;

    /// 是否将安全库存计入补货判定
    ///
    /// # 默认值
    /// - false
    async fn get_apply_safety_stock(&self) -> ConfigResult<bool>;

    /// 预测期数
    ///
    /// # 默认值
    /// - 3
    async fn get_forecast_horizon(&self) -> ConfigResult<usize>;

    /// ABC 阈值（A, B 累计占比）
    ///
    /// # 默认值
    /// - 80 / 95
    async fn get_abc_thresholds(&self) -> ConfigResult<AbcThresholds>;

    /// ARIMA 拟合最大迭代次数
    ///
    /// # 默认值
    /// - 500
    async fn get_arima_max_iterations(&self) -> ConfigResult<usize>;

    /// ARIMA 拟合收敛容差
    ///
    /// # 默认值
    /// - 1e-10
    async fn get_arima_tolerance(&self) -> ConfigResult<f64>;

    /// 展示语言
    ///
    /// # 默认值
    /// - zh-CN
    async fn get_locale(&self) -> ConfigResult<String>;
}

/// 组装分析参数
pub async fn load_analysis_params<R: AnalysisConfigReader + ?Sized>(
    reader: &R,
) -> ConfigResult<AnalysisParams> {
    let optimizer = NelderMeadConfig {
        max_iterations: reader.get_arima_max_iterations().await?,
        tolerance: reader.get_arima_tolerance().await?,
        ..NelderMeadConfig::default()
    };

    Ok(AnalysisParams {
        thresholds: reader.get_abc_thresholds().await?,
        forecast: ForecastConfig {
            horizon: reader.get_forecast_horizon().await?,
            optimizer,
        },
        rules: RuleEngineConfig {
            apply_safety_stock: reader.get_apply_safety_stock().await?,
            safety_stock_pct: reader.get_safety_stock_pct().await?,
        },
    })
}
