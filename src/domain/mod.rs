// ==========================================
// 药房库存决策支持系统 - 领域模型层
// ==========================================
// 职责: 定义药品实体、派生对象、分级类型与内存药品表
// 红线: 不含引擎逻辑，不含展示逻辑
// ==========================================

pub mod import;
pub mod item;
pub mod sample;
pub mod store;
pub mod types;

// 重导出核心类型
pub use import::{DqLevel, DqViolation, ImportReport, RawItemRecord};
pub use item::{ClassifiedItem, ForecastMethod, ForecastResult, Item, RecommendationRecord};
pub use sample::{load_sample_items, sample_items};
pub use store::SalesHistoryStore;
pub use types::{AbcTier, Recommendation, VedTier};
