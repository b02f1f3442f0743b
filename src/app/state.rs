// ==========================================
// 药房库存决策支持系统 - 应用状态
// ==========================================
// 职责: 管理配置与 API 实例，按数据来源构建驾驶舱
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::api::{ApiResult, DashboardApi, ImportApi};
use crate::config::{load_analysis_params, AnalysisConfigReader, ConfigManager};
use crate::domain::import::ImportReport;
use crate::domain::sample::load_sample_items;
use crate::domain::store::SalesHistoryStore;
use crate::engine::orchestrator::AnalysisParams;

/// 药品表来源
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// 内置示例数据
    Sample,
    /// CSV / Excel 文件
    File(PathBuf),
}

/// 命令行覆写的参数
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParamOverrides {
    pub safety_stock_pct: Option<f64>,
    pub apply_safety_stock: Option<bool>,
}

/// 应用状态
pub struct AppState {
    /// 配置管理器
    pub config: Arc<ConfigManager>,

    /// 药品表导入API
    pub import_api: Arc<ImportApi>,
}

impl AppState {
    pub fn new(config: ConfigManager) -> Self {
        Self {
            config: Arc::new(config),
            import_api: Arc::new(ImportApi::new()),
        }
    }

    /// 读取配置并应用覆写
    pub async fn analysis_params(&self, overrides: ParamOverrides) -> ApiResult<AnalysisParams> {
        let mut params = load_analysis_params(self.config.as_ref()).await?;
        if let Some(pct) = overrides.safety_stock_pct {
            params.rules.safety_stock_pct = pct;
        }
        if let Some(apply) = overrides.apply_safety_stock {
            params.rules.apply_safety_stock = apply;
        }
        params.rules.validate()?;
        Ok(params)
    }

    /// 配置中的展示语言
    pub async fn configured_locale(&self) -> ApiResult<String> {
        Ok(self.config.get_locale().await?)
    }

    /// 加载药品表
    ///
    /// # 返回
    /// - ImportReport 仅在文件导入时存在
    pub async fn load_store(
        &self,
        source: &DataSource,
    ) -> ApiResult<(SalesHistoryStore, Option<ImportReport>)> {
        match source {
            DataSource::Sample => {
                let store = load_sample_items()?;
                info!(items = store.len(), "已加载示例数据");
                Ok((store, None))
            }
            DataSource::File(path) => {
                let (store, report) = self.import_api.import_items(path).await?;
                Ok((store, Some(report)))
            }
        }
    }

    /// 按来源与参数构建驾驶舱
    pub async fn build_dashboard(
        &self,
        source: &DataSource,
        overrides: ParamOverrides,
    ) -> ApiResult<(DashboardApi, Option<ImportReport>)> {
        let params = self.analysis_params(overrides).await?;
        let (store, report) = self.load_store(source).await?;
        Ok((DashboardApi::new(store, params), report))
    }
}
