// ==========================================
// 药房库存决策支持系统 - 配置模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置写入失败 ({path}): {message}")]
    WriteError { path: String, message: String },

    #[error("配置文件格式错误: {0}")]
    ParseError(String),

    #[error("配置值非法 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("锁获取失败: {0}")]
    LockError(String),

    #[error("未设置配置文件路径")]
    NoPath,
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
