// ==========================================
// 药房库存决策支持系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写、持久化
// 存储: JSON 键值文件 (key → value 字符串)
// 默认路径: <系统配置目录>/pharmacy-stock/config.json
// ==========================================

use crate::config::analysis_config_trait::AnalysisConfigReader;
use crate::config::error::{ConfigError, ConfigResult};
use crate::engine::abc::AbcThresholds;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

pub const APP_CONFIG_DIR: &str = "pharmacy-stock";
pub const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: Arc<Mutex<BTreeMap<String, String>>>,
    path: Option<PathBuf>,
}

impl ConfigManager {
    /// 创建纯内存配置（不落盘，全部取默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    /// 从文件加载配置
    ///
    /// # 说明
    /// - 文件不存在: 返回空配置（后续 save 会创建文件）
    /// - 值可以是 JSON 字符串/数字/布尔，统一转为字符串存储
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            debug!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Ok(Self {
                values: Arc::new(Mutex::new(BTreeMap::new())),
                path: Some(path),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let values = parse_config_json(&content)?;
        info!(path = %path.display(), entries = values.len(), "配置已加载");

        Ok(Self {
            values: Arc::new(Mutex::new(values)),
            path: Some(path),
        })
    }

    /// 从默认路径加载（无法确定配置目录时退化为纯内存配置）
    pub fn load_default() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) => Self::load(path),
            None => {
                warn!("无法确定系统配置目录，使用内存配置");
                Ok(Self::new())
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 写回配置文件
    pub fn save(&self) -> ConfigResult<()> {
        let path = self.path.as_ref().ok_or(ConfigError::NoPath)?;
        let snapshot = self.get_config_snapshot()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }

        fs::write(path, snapshot).map_err(|e| ConfigError::WriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %path.display(), "配置已保存");
        Ok(())
    }

    fn lock(&self) -> ConfigResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.values
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    /// 读取配置值（不存在时返回默认值）
    pub fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入配置值（先校验，再覆写）
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        validate_value(key, value)?;
        self.lock()?.insert(key.to_string(), value.trim().to_string());
        debug!(key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 获取当前全部配置的快照（JSON，键有序）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let values = self.lock()?;
        Ok(serde_json::to_string_pretty(&*values)?)
    }

    /// 从快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 先整体校验，任一项非法则不做任何修改
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let incoming = parse_config_json(snapshot_json)?;
        for (key, value) in &incoming {
            validate_value(key, value)?;
        }

        let count = incoming.len();
        let mut values = self.lock()?;
        values.extend(incoming);
        Ok(count)
    }

    // ===== 类型化读取 =====

    /// 读取并解析配置；缺失或无法解析时返回默认值
    fn parse_or_default<T: std::str::FromStr + Copy>(&self, key: &str, default: T) -> ConfigResult<T> {
        match self.get_config_value(key)? {
            None => Ok(default),
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(v) => Ok(v),
                Err(_) => {
                    warn!(key = key, value = %raw, "配置值无法解析，使用默认值");
                    Ok(default)
                }
            },
        }
    }

    /// 读取区间配置并校验
    fn pct_value(&self, key: &str, default: f64) -> ConfigResult<f64> {
        let value = self.parse_or_default(key, default)?;
        check_pct(key, value)?;
        Ok(value)
    }
}

// ==========================================
// AnalysisConfigReader 实现
// ==========================================
#[async_trait]
impl AnalysisConfigReader for ConfigManager {
    async fn get_safety_stock_pct(&self) -> ConfigResult<f64> {
        self.pct_value(config_keys::SAFETY_STOCK_PCT, defaults::SAFETY_STOCK_PCT)
    }

    async fn get_apply_safety_stock(&self) -> ConfigResult<bool> {
        match self.get_config_value(config_keys::APPLY_SAFETY_STOCK)? {
            None => Ok(defaults::APPLY_SAFETY_STOCK),
            Some(raw) => Ok(parse_bool(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "apply_safety_stock 无法解析，使用默认值");
                defaults::APPLY_SAFETY_STOCK
            })),
        }
    }

    async fn get_forecast_horizon(&self) -> ConfigResult<usize> {
        let horizon = self.parse_or_default(config_keys::FORECAST_HORIZON, defaults::FORECAST_HORIZON)?;
        if horizon == 0 {
            return Err(invalid(config_keys::FORECAST_HORIZON, "0", "预测期数必须 ≥ 1"));
        }
        Ok(horizon)
    }

    async fn get_abc_thresholds(&self) -> ConfigResult<AbcThresholds> {
        let thresholds = AbcThresholds {
            a_pct: self.pct_value(config_keys::ABC_A_THRESHOLD_PCT, defaults::ABC_A_THRESHOLD_PCT)?,
            b_pct: self.pct_value(config_keys::ABC_B_THRESHOLD_PCT, defaults::ABC_B_THRESHOLD_PCT)?,
        };
        if thresholds.a_pct > thresholds.b_pct {
            return Err(invalid(
                config_keys::ABC_A_THRESHOLD_PCT,
                &thresholds.a_pct.to_string(),
                format!("A 阈值不得大于 B 阈值 ({})", thresholds.b_pct),
            ));
        }
        Ok(thresholds)
    }

    async fn get_arima_max_iterations(&self) -> ConfigResult<usize> {
        let iterations =
            self.parse_or_default(config_keys::ARIMA_MAX_ITERATIONS, defaults::ARIMA_MAX_ITERATIONS)?;
        if iterations == 0 {
            return Err(invalid(config_keys::ARIMA_MAX_ITERATIONS, "0", "迭代次数必须 ≥ 1"));
        }
        Ok(iterations)
    }

    async fn get_arima_tolerance(&self) -> ConfigResult<f64> {
        let tolerance = self.parse_or_default(config_keys::ARIMA_TOLERANCE, defaults::ARIMA_TOLERANCE)?;
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(invalid(
                config_keys::ARIMA_TOLERANCE,
                &tolerance.to_string(),
                "收敛容差必须为正数",
            ));
        }
        Ok(tolerance)
    }

    async fn get_locale(&self) -> ConfigResult<String> {
        self.get_config_or_default(config_keys::LOCALE, defaults::LOCALE)
    }
}

// ==========================================
// 校验
// ==========================================

fn invalid(key: &str, value: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.into(),
    }
}

fn check_pct(key: &str, value: f64) -> ConfigResult<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(invalid(key, &value.to_string(), "取值范围 0~100"));
    }
    Ok(())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// 写入前校验（未知键原样接受）
fn validate_value(key: &str, value: &str) -> ConfigResult<()> {
    let raw = value.trim();
    let parse_f64 = || {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(key, raw, "不是合法数值"))
    };
    let parse_positive_usize = || match raw.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(invalid(key, raw, "必须为正整数")),
    };

    match key {
        config_keys::SAFETY_STOCK_PCT
        | config_keys::ABC_A_THRESHOLD_PCT
        | config_keys::ABC_B_THRESHOLD_PCT => check_pct(key, parse_f64()?),
        config_keys::FORECAST_HORIZON | config_keys::ARIMA_MAX_ITERATIONS => {
            parse_positive_usize().map(|_| ())
        }
        config_keys::ARIMA_TOLERANCE => match parse_f64()? {
            v if v > 0.0 => Ok(()),
            _ => Err(invalid(key, raw, "收敛容差必须为正数")),
        },
        config_keys::APPLY_SAFETY_STOCK => parse_bool(raw)
            .map(|_| ())
            .ok_or_else(|| invalid(key, raw, "必须为 true/false")),
        config_keys::LOCALE => {
            if crate::i18n::is_supported_locale(raw) {
                Ok(())
            } else {
                Err(invalid(key, raw, "不支持的语言"))
            }
        }
        _ => Ok(()),
    }
}

/// 解析配置 JSON（对象，值为标量）
fn parse_config_json(content: &str) -> ConfigResult<BTreeMap<String, String>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let object = value
        .as_object()
        .ok_or_else(|| ConfigError::ParseError("配置文件顶层必须为 JSON 对象".to_string()))?;

    let mut values = BTreeMap::new();
    for (key, v) in object {
        let text = match v {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Null => continue,
            other => {
                return Err(ConfigError::ParseError(format!(
                    "配置项 {} 必须为标量值, 实际: {}",
                    key, other
                )))
            }
        };
        values.insert(key.clone(), text);
    }
    Ok(values)
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 补货
    pub const SAFETY_STOCK_PCT: &str = "safety_stock_pct";
    pub const APPLY_SAFETY_STOCK: &str = "apply_safety_stock";

    // 预测
    pub const FORECAST_HORIZON: &str = "forecast_horizon";
    pub const ARIMA_MAX_ITERATIONS: &str = "arima_max_iterations";
    pub const ARIMA_TOLERANCE: &str = "arima_tolerance";

    // ABC 分级
    pub const ABC_A_THRESHOLD_PCT: &str = "abc_a_threshold_pct";
    pub const ABC_B_THRESHOLD_PCT: &str = "abc_b_threshold_pct";

    // 展示
    pub const LOCALE: &str = "locale";
}

pub mod defaults {
    pub const SAFETY_STOCK_PCT: f64 = 20.0;
    pub const APPLY_SAFETY_STOCK: bool = false;
    pub const FORECAST_HORIZON: usize = 3;
    pub const ARIMA_MAX_ITERATIONS: usize = 500;
    pub const ARIMA_TOLERANCE: f64 = 1e-10;
    pub const ABC_A_THRESHOLD_PCT: f64 = 80.0;
    pub const ABC_B_THRESHOLD_PCT: f64 = 95.0;
    pub const LOCALE: &str = "zh-CN";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::analysis_config_trait::load_analysis_params;

    #[tokio::test]
    async fn test_defaults_when_empty() {
        let config = ConfigManager::new();
        let params = load_analysis_params(&config).await.unwrap();
        assert_eq!(params.thresholds.a_pct, 80.0);
        assert_eq!(params.thresholds.b_pct, 95.0);
        assert_eq!(params.forecast.horizon, 3);
        assert!(!params.rules.apply_safety_stock);
        assert_eq!(params.rules.safety_stock_pct, 20.0);
        assert_eq!(config.get_locale().await.unwrap(), "zh-CN");
    }

    #[tokio::test]
    async fn test_unparseable_value_falls_back() {
        let config = ConfigManager::new();
        config
            .restore_config_from_snapshot(r#"{"forecast_horizon": "6"}"#)
            .unwrap();
        assert_eq!(config.get_forecast_horizon().await.unwrap(), 6);

        // 直接写入绕过校验，模拟手工编辑的配置文件
        config
            .lock()
            .unwrap()
            .insert(config_keys::SAFETY_STOCK_PCT.to_string(), "abc".to_string());
        assert_eq!(config.get_safety_stock_pct().await.unwrap(), 20.0);
    }

    #[test]
    fn test_set_rejects_out_of_range() {
        let config = ConfigManager::new();
        assert!(config.set_config_value(config_keys::SAFETY_STOCK_PCT, "150").is_err());
        assert!(config.set_config_value(config_keys::FORECAST_HORIZON, "0").is_err());
        assert!(config.set_config_value(config_keys::APPLY_SAFETY_STOCK, "maybe").is_err());
        assert!(config.set_config_value(config_keys::SAFETY_STOCK_PCT, "35").is_ok());
        assert_eq!(
            config.get_config_value(config_keys::SAFETY_STOCK_PCT).unwrap().as_deref(),
            Some("35")
        );
    }

    #[tokio::test]
    async fn test_inverted_thresholds_rejected() {
        let config = ConfigManager::new();
        config.set_config_value(config_keys::ABC_A_THRESHOLD_PCT, "90").unwrap();
        config.set_config_value(config_keys::ABC_B_THRESHOLD_PCT, "85").unwrap();
        let err = config.get_abc_thresholds().await.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = ConfigManager::load(&path).unwrap();
        config.set_config_value(config_keys::FORECAST_HORIZON, "5").unwrap();
        config.set_config_value(config_keys::APPLY_SAFETY_STOCK, "true").unwrap();
        config.save().unwrap();

        let reloaded = ConfigManager::load(&path).unwrap();
        assert_eq!(
            reloaded.get_config_value(config_keys::FORECAST_HORIZON).unwrap().as_deref(),
            Some("5")
        );
    }

    #[test]
    fn test_load_accepts_scalar_json_values() {
        let values = parse_config_json(r#"{"forecast_horizon": 4, "apply_safety_stock": true, "x": null}"#)
            .unwrap();
        assert_eq!(values.get("forecast_horizon").map(String::as_str), Some("4"));
        assert_eq!(values.get("apply_safety_stock").map(String::as_str), Some("true"));
        assert!(!values.contains_key("x"));

        assert!(parse_config_json("[1, 2]").is_err());
        assert!(parse_config_json(r#"{"a": [1]}"#).is_err());
    }

    #[test]
    fn test_save_without_path_fails() {
        assert!(matches!(ConfigManager::new().save(), Err(ConfigError::NoPath)));
    }
}
