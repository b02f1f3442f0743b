// ==========================================
// 药房库存决策支持系统 - 药品导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到内存药品表
// 流程: 解析 → 映射 → DQ 校验 → 构建 SalesHistoryStore
// 红线: 存在 Error 级违规时整体拒绝，错误信息指明行/列
// ==========================================

use crate::domain::import::{DqLevel, DqViolation, ImportReport, RawItemRecord};
use crate::domain::item::Item;
use crate::domain::store::SalesHistoryStore;
use crate::domain::types::VedTier;
use crate::importer::dq_validator::DqValidator;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{FieldMapper, FIELD_VED};
use crate::importer::file_parser::{CsvParser, ExcelParser, UniversalFileParser};
use crate::importer::item_importer_trait::{FieldMapper as _, FileParser, ItemImporter};
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ItemImporterImpl - 药品导入器实现
// ==========================================
#[derive(Default)]
pub struct ItemImporterImpl {
    field_mapper: FieldMapper,
    dq_validator: DqValidator,
}

impl ItemImporterImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// 执行导入管道（同步）
    #[instrument(skip(self, parser, file_path), fields(batch_id))]
    pub fn run_pipeline(
        &self,
        parser: &dyn FileParser,
        file_path: &Path,
    ) -> ImportResult<(SalesHistoryStore, ImportReport)> {
        let start = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.display().to_string());
        info!(batch_id = %batch_id, file = %file_name, "开始导入药品表");

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let raw_rows = parser.parse_to_raw_records(file_path)?;
        let total_rows = raw_rows.len();
        info!(total_rows, "文件解析完成");

        // === 步骤 2: 字段映射 ===
        debug!("步骤 2: 字段映射");
        let records = raw_rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.field_mapper.map_to_raw_item(row, idx + 1))
            .collect::<ImportResult<Vec<RawItemRecord>>>()?;

        // === 步骤 3: DQ 校验 ===
        debug!("步骤 3: DQ 校验");
        let violations = self.dq_validator.validate_all(&records);
        let (errors, warnings): (Vec<DqViolation>, Vec<DqViolation>) = violations
            .into_iter()
            .partition(|v| v.level == DqLevel::Error);

        if !errors.is_empty() {
            warn!(errors = errors.len(), "DQ 校验未通过，拒绝导入");
            return Err(ImportError::DataQualityRejected(errors));
        }
        for w in &warnings {
            warn!(row = w.row_number, field = %w.field, message = %w.message, "DQ 告警");
        }

        // === 步骤 4: 构建药品表 ===
        debug!("步骤 4: 构建药品表");
        let items = records
            .into_iter()
            .map(to_item)
            .collect::<ImportResult<Vec<Item>>>()?;
        let store = SalesHistoryStore::new(items)?;

        let report = ImportReport {
            batch_id,
            file_name,
            imported_at: Utc::now(),
            total_rows,
            imported_rows: store.len(),
            warnings,
            elapsed_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            imported = report.imported_rows,
            warnings = report.warnings.len(),
            elapsed_ms = report.elapsed_ms,
            "药品表导入完成"
        );

        Ok((store, report))
    }
}

/// RawItemRecord → Item（DQ 通过后调用）
fn to_item(record: RawItemRecord) -> ImportResult<Item> {
    let missing = |field: &str| ImportError::TypeConversionError {
        row: record.row_number,
        field: field.to_string(),
        message: "字段缺失".to_string(),
    };

    let ved = record
        .ved_code
        .as_deref()
        .ok_or_else(|| missing(FIELD_VED))?
        .parse::<VedTier>()
        .map_err(|message| ImportError::TypeConversionError {
            row: record.row_number,
            field: FIELD_VED.to_string(),
            message,
        })?;

    let stock = record.current_stock.ok_or_else(|| missing("current_stock"))?;
    let current_stock = u32::try_from(stock).map_err(|_| ImportError::TypeConversionError {
        row: record.row_number,
        field: "current_stock".to_string(),
        message: format!("库存超出范围: {}", stock),
    })?;

    Ok(Item {
        name: record.name.clone().ok_or_else(|| missing("name"))?,
        monthly_consumption: record
            .monthly_consumption
            .ok_or_else(|| missing("monthly_consumption"))?,
        unit_price: record.unit_price.ok_or_else(|| missing("unit_price"))?,
        ved,
        current_stock,
        sales_history: record
            .sales_history
            .clone()
            .ok_or_else(|| missing("sales_history"))?,
    })
}

#[async_trait]
impl ItemImporter for ItemImporterImpl {
    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<(SalesHistoryStore, ImportReport)> {
        self.run_pipeline(&CsvParser, file_path.as_ref())
    }

    async fn import_from_excel<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<(SalesHistoryStore, ImportReport)> {
        self.run_pipeline(&ExcelParser, file_path.as_ref())
    }

    async fn import_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<(SalesHistoryStore, ImportReport)> {
        self.run_pipeline(&UniversalFileParser, file_path.as_ref())
    }
}
