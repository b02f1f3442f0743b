// ==========================================
// 药房库存决策支持系统 - 配置层
// ==========================================
// 职责: 分析参数管理（阈值、预测期数、安全库存、语言）
// 存储: JSON 键值文件
// ==========================================

pub mod analysis_config_trait;
pub mod config_manager;
pub mod error;

// 重导出核心配置管理器
pub use analysis_config_trait::{load_analysis_params, AnalysisConfigReader};
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
