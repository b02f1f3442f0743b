// ==========================================
// 药房库存决策支持系统 - API层错误类型
// ==========================================
// 职责: 汇总引擎/导入/配置错误，转换为面向展示层的错误消息
// ==========================================

use crate::config::error::ConfigError;
use crate::domain::import::DqViolation;
use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    /// 数据校验未通过（逐行列出问题）
    #[error("数据验证失败: {reason}")]
    ValidationError {
        reason: String,
        violations: Vec<DqViolation>,
    },

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidInput { .. } => ApiError::InvalidInput(err.to_string()),
            EngineError::TaskFailed(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::DataQualityRejected(violations) => ApiError::ValidationError {
                reason: format!("共 {} 处数据问题", violations.len()),
                violations,
            },
            ImportError::Validation(engine_err) => ApiError::from(engine_err),
            ImportError::Other(e) => ApiError::Other(e),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

// ==========================================
// 从 ConfigError 转换
// ==========================================
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::LockError(msg) => ApiError::InternalError(msg),
            other => ApiError::ConfigError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
