// ==========================================
// 药房库存决策支持系统 - 药品表导入 API
// ==========================================
// 职责: 封装导入管道，将导入错误转为 API 错误
// ==========================================

use std::path::Path;

use tracing::info;

use crate::api::error::ApiResult;
use crate::domain::import::ImportReport;
use crate::domain::store::SalesHistoryStore;
use crate::importer::{ItemImporter, ItemImporterImpl};

/// 导入API
#[derive(Default)]
pub struct ImportApi {
    importer: ItemImporterImpl,
}

impl ImportApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// 导入药品表（CSV / Excel，按扩展名识别）
    ///
    /// # 返回
    /// - Ok((SalesHistoryStore, ImportReport)): 药品表 + 导入报告
    /// - Err(ApiError::ValidationError): 数据校验未通过，含逐行问题
    pub async fn import_items(
        &self,
        file_path: impl AsRef<Path> + Send,
    ) -> ApiResult<(SalesHistoryStore, ImportReport)> {
        let (store, report) = self.importer.import_file(file_path).await?;
        info!(
            batch_id = %report.batch_id,
            imported = report.imported_rows,
            "导入API完成"
        );
        Ok((store, report))
    }
}
