// ==========================================
// 药房库存决策支持系统 - ARIMA(1,1,1) 模型
// ==========================================
// 模型: 一阶差分后 d_t = φ·d_{t-1} + ε_t + θ·ε_{t-1}（无常数项）
// 拟合: 条件平方和（CSS），ε_0 = 0，Nelder-Mead 最小化
// 约束: |φ| < 1, |θ| < 1（经 tanh 变换后无约束优化）
// ==========================================

use crate::engine::forecast::optimizer::{minimize, NelderMeadConfig, OptimizeError};
use thiserror::Error;

/// 系数上界（保证平稳与可逆）
const MAX_COEF: f64 = 0.99;

/// 拟合所需的最少历史点数（差分后残差数需多于参数个数）
pub const MIN_FIT_POINTS: usize = 5;

/// 差分序列方差下限，低于此值视为退化序列
const MIN_DIFF_VARIANCE: f64 = 1e-12;

// ==========================================
// FittingFailure - 拟合失败（仅内部流转）
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FittingFailure {
    #[error("历史点数不足: {points} < {required}")]
    InsufficientData { points: usize, required: usize },

    #[error("差分后序列退化（常数或线性序列）")]
    DegenerateSeries,

    #[error("参数估计未收敛（{iterations} 次迭代）")]
    NonConvergence { iterations: usize },

    #[error("数值不稳定: {0}")]
    NumericalInstability(String),
}

impl From<OptimizeError> for FittingFailure {
    fn from(err: OptimizeError) -> Self {
        match err {
            OptimizeError::NonConvergence(iterations) => FittingFailure::NonConvergence { iterations },
            OptimizeError::NonFinite => {
                FittingFailure::NumericalInstability("目标函数出现非有限值".to_string())
            }
        }
    }
}

// ==========================================
// ArimaFit - 拟合结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaFit {
    pub phi: f64,
    pub theta: f64,
    pub sse: f64,
    pub iterations: usize,
    last_level: f64,
    last_diff: f64,
    last_residual: f64,
}

impl ArimaFit {
    /// 多步点预测（差分还原到原始水平）
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        let mut values = Vec::with_capacity(horizon);
        let mut level = self.last_level;
        let mut diff = self.phi * self.last_diff + self.theta * self.last_residual;

        for _ in 0..horizon {
            level += diff;
            values.push(level);
            diff *= self.phi;
        }
        values
    }
}

/// 拟合 ARIMA(1,1,1)
pub fn fit(history: &[f64], optimizer: &NelderMeadConfig) -> Result<ArimaFit, FittingFailure> {
    if history.len() < MIN_FIT_POINTS {
        return Err(FittingFailure::InsufficientData {
            points: history.len(),
            required: MIN_FIT_POINTS,
        });
    }

    let diffs: Vec<f64> = history.windows(2).map(|w| w[1] - w[0]).collect();

    let mean = diffs.iter().sum::<f64>() / diffs.len() as f64;
    let variance = diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / diffs.len() as f64;
    if variance < MIN_DIFF_VARIANCE {
        return Err(FittingFailure::DegenerateSeries);
    }

    let objective = |params: &[f64]| {
        let (phi, theta) = to_coefficients(params);
        css(&diffs, phi, theta).0
    };

    let minimum = minimize(objective, &[0.0, 0.0], optimizer)?;
    let (phi, theta) = to_coefficients(&minimum.point);
    let (sse, last_residual) = css(&diffs, phi, theta);

    if !sse.is_finite() || !last_residual.is_finite() {
        return Err(FittingFailure::NumericalInstability(format!(
            "sse={}, residual={}",
            sse, last_residual
        )));
    }

    Ok(ArimaFit {
        phi,
        theta,
        sse,
        iterations: minimum.iterations,
        last_level: history[history.len() - 1],
        last_diff: diffs[diffs.len() - 1],
        last_residual,
    })
}

/// 无约束参数 → (φ, θ)
fn to_coefficients(params: &[f64]) -> (f64, f64) {
    (MAX_COEF * params[0].tanh(), MAX_COEF * params[1].tanh())
}

/// 条件平方和，返回 (SSE, 最后一期残差)
fn css(diffs: &[f64], phi: f64, theta: f64) -> (f64, f64) {
    let mut sse = 0.0;
    let mut residual = 0.0;
    for t in 1..diffs.len() {
        let predicted = phi * diffs[t - 1] + theta * residual;
        residual = diffs[t] - predicted;
        sse += residual * residual;
    }
    (sse, residual)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_short_series_is_insufficient() {
        let err = fit(&[1.0, 2.0, 4.0], &NelderMeadConfig::default()).unwrap_err();
        assert_eq!(
            err,
            FittingFailure::InsufficientData {
                points: 3,
                required: MIN_FIT_POINTS
            }
        );
    }

    #[test]
    fn test_fit_constant_series_is_degenerate() {
        let err = fit(&[5.0; 8], &NelderMeadConfig::default()).unwrap_err();
        assert_eq!(err, FittingFailure::DegenerateSeries);
    }

    #[test]
    fn test_fit_linear_series_is_degenerate() {
        let history: Vec<f64> = (0..10).map(|i| 3.0 + 2.0 * i as f64).collect();
        assert_eq!(
            fit(&history, &NelderMeadConfig::default()).unwrap_err(),
            FittingFailure::DegenerateSeries
        );
    }

    #[test]
    fn test_fit_coefficients_within_bounds() {
        let history = [12.0, 14.0, 16.0, 15.0, 13.0, 17.0, 16.0, 15.0, 14.0, 18.0, 16.0, 17.0];
        let config = NelderMeadConfig {
            max_iterations: 5_000,
            ..NelderMeadConfig::default()
        };
        let fitted = fit(&history, &config).unwrap();
        assert!(fitted.phi.abs() < 1.0);
        assert!(fitted.theta.abs() < 1.0);
        assert!(fitted.sse.is_finite());

        let values = fitted.forecast(3);
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_css_with_zero_coefficients_is_plain_sum_of_squares() {
        let diffs = [1.0, -2.0, 3.0];
        let (sse, residual) = css(&diffs, 0.0, 0.0);
        assert_eq!(sse, 4.0 + 9.0);
        assert_eq!(residual, 3.0);
    }

    #[test]
    fn test_forecast_recursion() {
        let fitted = ArimaFit {
            phi: 0.5,
            theta: 0.0,
            sse: 0.0,
            iterations: 0,
            last_level: 10.0,
            last_diff: 2.0,
            last_residual: 0.0,
        };
        // diff: 1.0, 0.5, 0.25
        assert_eq!(fitted.forecast(3), vec![11.0, 11.5, 11.75]);
    }
}
