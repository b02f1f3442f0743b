// ==========================================
// 药房库存决策支持系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 拟合失败（FittingFailure）只在预测器内部流转，不在此处
// ==========================================

use thiserror::Error;

/// 引擎层错误类型（调用方可见）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("无效输入 (药品 {item}, 字段 {field}): {message}")]
    InvalidInput {
        item: String,
        field: String,
        message: String,
    },

    #[error("预测任务异常: {0}")]
    TaskFailed(String),
}

impl EngineError {
    pub fn invalid(item: &str, field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            item: item.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
