// ==========================================
// 药房库存决策支持系统 - 应用层
// ==========================================
// 职责: 命令行展示，连接用户输入与 API 层
// ==========================================

pub mod cli;
pub mod render;
pub mod state;

// 重导出
pub use cli::CliArgs;
pub use state::{AppState, DataSource, ParamOverrides};
