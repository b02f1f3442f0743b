// ==========================================
// 药房库存决策支持系统 - Nelder-Mead 单纯形优化器
// ==========================================
// 用途: 无导数最小化（ARIMA 条件平方和拟合）
// 收敛: 单纯形各顶点函数值极差 ≤ tolerance × (1 + |f_best|)
// ==========================================

use thiserror::Error;

/// 优化器配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelderMeadConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tolerance: 1e-10,
            initial_step: 0.25,
        }
    }
}

/// 优化结果
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    pub point: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizeError {
    #[error("迭代 {0} 次未收敛")]
    NonConvergence(usize),

    #[error("目标函数出现非有限值")]
    NonFinite,
}

// 标准系数
const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// 最小化目标函数
///
/// # 参数
/// - objective: 目标函数
/// - start: 初始点
/// - config: 优化器配置
pub fn minimize<F>(objective: F, start: &[f64], config: &NelderMeadConfig) -> Result<Minimum, OptimizeError>
where
    F: Fn(&[f64]) -> f64,
{
    let n = start.len();
    let eval = |x: &[f64]| -> Result<f64, OptimizeError> {
        let v = objective(x);
        if v.is_finite() {
            Ok(v)
        } else {
            Err(OptimizeError::NonFinite)
        }
    };

    // 初始单纯形: start + step·e_i
    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(n + 1);
    simplex.push((start.to_vec(), eval(start)?));
    for i in 0..n {
        let mut vertex = start.to_vec();
        vertex[i] += config.initial_step;
        let value = eval(&vertex)?;
        simplex.push((vertex, value));
    }

    for iteration in 0..config.max_iterations {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

        let best = simplex[0].1;
        let worst = simplex[n].1;
        if (worst - best).abs() <= config.tolerance * (1.0 + best.abs()) {
            return Ok(Minimum {
                point: simplex[0].0.clone(),
                value: best,
                iterations: iteration,
            });
        }

        // 除最差点外的质心
        let mut centroid = vec![0.0; n];
        for (vertex, _) in simplex.iter().take(n) {
            for (c, x) in centroid.iter_mut().zip(vertex) {
                *c += x / n as f64;
            }
        }

        let along = |coef: f64| -> Vec<f64> {
            centroid
                .iter()
                .zip(&simplex[n].0)
                .map(|(c, w)| c + coef * (c - w))
                .collect()
        };

        let reflected = along(REFLECT);
        let f_reflected = eval(&reflected)?;

        if f_reflected < simplex[0].1 {
            let expanded = along(EXPAND);
            let f_expanded = eval(&expanded)?;
            simplex[n] = if f_expanded < f_reflected {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
            continue;
        }

        if f_reflected < simplex[n - 1].1 {
            simplex[n] = (reflected, f_reflected);
            continue;
        }

        // 收缩（外收缩 / 内收缩）
        let (contracted, f_contracted) = if f_reflected < simplex[n].1 {
            let p = along(CONTRACT);
            let f = eval(&p)?;
            (p, f)
        } else {
            let p = along(-CONTRACT);
            let f = eval(&p)?;
            (p, f)
        };

        if f_contracted < simplex[n].1.min(f_reflected) {
            simplex[n] = (contracted, f_contracted);
            continue;
        }

        // 整体向最优点压缩
        let best_point = simplex[0].0.clone();
        for vertex in simplex.iter_mut().skip(1) {
            let shrunk: Vec<f64> = best_point
                .iter()
                .zip(&vertex.0)
                .map(|(b, x)| b + SHRINK * (x - b))
                .collect();
            let value = eval(&shrunk)?;
            *vertex = (shrunk, value);
        }
    }

    Err(OptimizeError::NonConvergence(config.max_iterations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimize_quadratic() {
        let f = |x: &[f64]| (x[0] - 1.5).powi(2) + (x[1] + 0.5).powi(2);
        let config = NelderMeadConfig {
            tolerance: 1e-14,
            ..NelderMeadConfig::default()
        };
        let min = minimize(f, &[0.0, 0.0], &config).unwrap();
        assert!((min.point[0] - 1.5).abs() < 1e-3);
        assert!((min.point[1] + 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_iteration_cap_reports_non_convergence() {
        let f = |x: &[f64]| (x[0] - 100.0).powi(2);
        let config = NelderMeadConfig {
            max_iterations: 2,
            tolerance: 0.0,
            initial_step: 0.1,
        };
        assert_eq!(minimize(f, &[0.0], &config), Err(OptimizeError::NonConvergence(2)));
    }

    #[test]
    fn test_non_finite_objective() {
        let f = |_: &[f64]| f64::NAN;
        assert_eq!(
            minimize(f, &[0.0], &NelderMeadConfig::default()),
            Err(OptimizeError::NonFinite)
        );
    }
}
