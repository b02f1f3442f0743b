// ==========================================
// 药房库存决策支持系统 - 药品导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 解析 → 映射 → DQ 校验 → 构建药品表
// ==========================================

use crate::domain::import::{DqViolation, ImportReport, RawItemRecord};
use crate::domain::store::SalesHistoryStore;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// ItemImporter Trait
// ==========================================
// 用途: 药品表导入主接口
// 实现者: ItemImporterImpl
#[async_trait]
pub trait ItemImporter: Send + Sync {
    /// 从 CSV 文件导入药品表
    ///
    /// # 返回
    /// - Ok((SalesHistoryStore, ImportReport)): 药品表 + 导入报告（含告警）
    /// - Err: 文件错误、类型转换错误、DQ 错误（含行/列信息）
    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<(SalesHistoryStore, ImportReport)>;

    /// 从 Excel 文件导入药品表（第一个工作表）
    async fn import_from_excel<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<(SalesHistoryStore, ImportReport)>;

    /// 按扩展名自动选择解析器
    async fn import_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<(SalesHistoryStore, ImportReport)>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（HashMap<列名, 值>）
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行记录映射为 RawItemRecord
    ///
    /// # 参数
    /// - row: 原始行记录（HashMap<列名, 值>）
    /// - row_number: 行号（用于错误定位）
    fn map_to_raw_item(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawItemRecord>;
}

// ==========================================
// DqValidator Trait
// ==========================================
// 用途: 数据质量校验接口（阶段 2）
// 实现者: DqValidator
pub trait DqValidator: Send + Sync {
    /// 校验主键（名称非空且唯一）
    fn validate_primary_key(&self, records: &[RawItemRecord]) -> Vec<DqViolation>;

    /// 校验必填字段
    fn validate_required_fields(&self, record: &RawItemRecord) -> Vec<DqViolation>;

    /// 校验数值范围（非负、历史长度）
    fn validate_ranges(&self, record: &RawItemRecord) -> Vec<DqViolation>;
}
