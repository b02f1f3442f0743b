// ==========================================
// 药房库存决策支持系统 - 需求预测引擎
// ==========================================
// 两阶段策略:
// 1) 主模型: ARIMA(1,1,1) 拟合 + N 步点预测
// 2) 兜底: 任意拟合失败 → N 期均取历史均值
// 红线: 拟合失败不向调用方传播；调用方只会收到 InvalidInput
// ==========================================

pub mod arima;
pub mod optimizer;

use crate::domain::item::{ForecastMethod, ForecastResult, Item};
use crate::domain::store::validate_history;
use crate::engine::error::{EngineError, EngineResult};
use arima::FittingFailure;
use optimizer::NelderMeadConfig;
use tracing::{debug, instrument, warn};

/// 默认预测期数
pub const DEFAULT_HORIZON: usize = 3;

// ==========================================
// ForecastModel Trait - 主模型接口
// ==========================================
pub trait ForecastModel: Send + Sync {
    /// 拟合并预测 horizon 期
    ///
    /// # 返回
    /// - Ok((预测值, 方法说明)): 拟合成功
    /// - Err(FittingFailure): 拟合失败（由上层转为均值兜底）
    fn fit_forecast(
        &self,
        history: &[f64],
        horizon: usize,
    ) -> Result<(Vec<f64>, ForecastMethod), FittingFailure>;
}

/// ARIMA(1,1,1) 主模型
#[derive(Debug, Clone, Default)]
pub struct ArimaModel {
    optimizer: NelderMeadConfig,
}

impl ArimaModel {
    pub fn new(optimizer: NelderMeadConfig) -> Self {
        Self { optimizer }
    }
}

impl ForecastModel for ArimaModel {
    fn fit_forecast(
        &self,
        history: &[f64],
        horizon: usize,
    ) -> Result<(Vec<f64>, ForecastMethod), FittingFailure> {
        let fitted = arima::fit(history, &self.optimizer)?;
        let values = fitted.forecast(horizon);

        if values.iter().any(|v| !v.is_finite()) {
            return Err(FittingFailure::NumericalInstability(
                "预测值出现非有限值".to_string(),
            ));
        }

        let method = ForecastMethod::Arima {
            phi: fitted.phi,
            theta: fitted.theta,
            sse: fitted.sse,
            iterations: fitted.iterations,
        };
        Ok((values, method))
    }
}

/// 均值兜底: N 期均等于历史算术平均
pub fn mean_forecast(history: &[f64], horizon: usize) -> Vec<f64> {
    let mean = if history.is_empty() {
        0.0
    } else {
        history.iter().sum::<f64>() / history.len() as f64
    };
    vec![mean; horizon]
}

// ==========================================
// 预测配置
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastConfig {
    pub horizon: usize,
    pub optimizer: NelderMeadConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            optimizer: NelderMeadConfig::default(),
        }
    }
}

// ==========================================
// DemandForecaster - 需求预测引擎（无状态）
// ==========================================
pub struct DemandForecaster {
    horizon: usize,
    model: Box<dyn ForecastModel>,
}

impl Default for DemandForecaster {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

impl DemandForecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            horizon: config.horizon,
            model: Box::new(ArimaModel::new(config.optimizer)),
        }
    }

    /// 替换主模型（测试或扩展使用）
    pub fn with_model(horizon: usize, model: Box<dyn ForecastModel>) -> Self {
        Self { horizon, model }
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// 使用默认期数预测
    pub fn forecast(&self, item_name: &str, history: &[f64]) -> EngineResult<ForecastResult> {
        self.forecast_with_horizon(item_name, history, self.horizon)
    }

    /// 预测指定期数
    ///
    /// # 错误
    /// - 历史少于 2 点、含负数或非有限值、horizon 为 0 → InvalidInput
    pub fn forecast_with_horizon(
        &self,
        item_name: &str,
        history: &[f64],
        horizon: usize,
    ) -> EngineResult<ForecastResult> {
        validate_history(item_name, history)?;
        if horizon == 0 {
            return Err(EngineError::invalid(item_name, "horizon", "预测期数必须 ≥ 1"));
        }

        let (raw, method) = match self.model.fit_forecast(history, horizon) {
            Ok(outcome) => outcome,
            Err(failure) => {
                warn!(item = %item_name, reason = %failure, "模型拟合失败，回退为历史均值");
                (
                    mean_forecast(history, horizon),
                    ForecastMethod::MeanFallback {
                        reason: failure.to_string(),
                    },
                )
            }
        };

        // 需求量不为负
        let values: Vec<f64> = raw.into_iter().map(|v| v.max(0.0)).collect();
        debug!(item = %item_name, ?values, fallback = method.is_fallback(), "预测完成");

        Ok(ForecastResult {
            item_name: item_name.to_string(),
            values,
            method,
        })
    }

    pub fn forecast_item(&self, item: &Item) -> EngineResult<ForecastResult> {
        self.forecast(&item.name, &item.sales_history)
    }

    /// 批量预测（顺序执行，结果与输入顺序一致）
    #[instrument(skip(self, items), fields(count = items.len(), horizon = self.horizon))]
    pub fn forecast_batch(&self, items: &[Item]) -> EngineResult<Vec<ForecastResult>> {
        items.iter().map(|item| self.forecast_item(item)).collect()
    }
}
