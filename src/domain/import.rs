// ==========================================
// 药房库存决策支持系统 - 导入领域模型
// ==========================================
// 用途: 导入管道中间产物（文件解析 → 字段映射 → 此结构）与 DQ 报告
// 生命周期: 仅在导入流程内
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// RawItemRecord - 导入中间结构体
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItemRecord {
    pub name: Option<String>,
    pub monthly_consumption: Option<f64>,
    pub unit_price: Option<f64>,
    pub ved_code: Option<String>,
    pub current_stock: Option<i64>,
    pub sales_history: Option<Vec<f64>>,

    // 元信息
    pub row_number: usize, // 原始文件行号（数据行，从 1 开始）
}

// ==========================================
// DQ 级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Error,   // 阻断导入
    Warning, // 允许导入，提示
}

// ==========================================
// DqViolation - 数据质量违规
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,
    pub item_name: Option<String>,
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for DqViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "行 {} 列 {}: {}",
            self.row_number, self.field, self.message
        )
    }
}

// ==========================================
// ImportReport - 导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,
    pub file_name: String,
    pub imported_at: DateTime<Utc>,
    pub total_rows: usize,
    pub imported_rows: usize,
    pub warnings: Vec<DqViolation>,
    pub elapsed_ms: u64,
}
