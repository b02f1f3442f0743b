// ==========================================
// 药房库存决策支持系统 - 分析编排器
// ==========================================
// 流程: ABC 分类 → 需求预测 → 补货建议 → 汇总
// 红线: 输入只读，每次调用返回全新结果，不缓存
// 并发: run_concurrent 将各药品拟合放入 tokio 阻塞线程池，结果与顺序版一致
// ==========================================

use crate::domain::item::{ClassifiedItem, ForecastResult, Item, RecommendationRecord};
use crate::domain::store::SalesHistoryStore;
use crate::domain::types::{AbcTier, Recommendation, VedTier};
use crate::engine::abc::{AbcClassifier, AbcThresholds};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::forecast::{DemandForecaster, ForecastConfig};
use crate::engine::rule::{RecommendationEngine, RuleEngineConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

// ==========================================
// AnalysisParams - 分析参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalysisParams {
    pub thresholds: AbcThresholds,
    pub forecast: ForecastConfig,
    pub rules: RuleEngineConfig,
}

// ==========================================
// AnalysisSummary - 汇总统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_items: usize,
    pub tier_a_count: usize,
    pub vital_count: usize,
    pub tier_a_vital_count: usize,
    pub critical_count: usize,
    pub important_count: usize,
    pub fallback_forecast_count: usize,
}

// ==========================================
// AnalysisReport - 一次分析的完整输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub classified: Vec<ClassifiedItem>,
    /// 与药品表输入顺序一致
    pub forecasts: Vec<ForecastResult>,
    /// 与 classified 顺序一致（年消耗金额降序）
    pub recommendations: Vec<RecommendationRecord>,
    pub summary: AnalysisSummary,
}

impl AnalysisReport {
    pub fn forecast_for(&self, name: &str) -> Option<&ForecastResult> {
        self.forecasts.iter().find(|f| f.item_name == name)
    }

    pub fn classified_for(&self, name: &str) -> Option<&ClassifiedItem> {
        self.classified.iter().find(|c| c.item.name == name)
    }
}

// ==========================================
// AnalysisOrchestrator - 分析编排器
// ==========================================
pub struct AnalysisOrchestrator {
    classifier: AbcClassifier,
    forecast_config: ForecastConfig,
    forecaster: Arc<DemandForecaster>,
    rules: RecommendationEngine,
}

impl AnalysisOrchestrator {
    pub fn new(params: &AnalysisParams) -> EngineResult<Self> {
        params.thresholds.validate()?;
        if params.forecast.horizon == 0 {
            return Err(EngineError::invalid("*", "horizon", "预测期数必须 ≥ 1"));
        }

        Ok(Self {
            classifier: AbcClassifier::new(params.thresholds),
            forecast_config: params.forecast,
            forecaster: Arc::new(DemandForecaster::new(params.forecast)),
            rules: RecommendationEngine::new(params.rules)?,
        })
    }

    /// 顺序执行完整分析
    #[instrument(skip(self, store), fields(items = store.len()))]
    pub fn run(&self, store: &SalesHistoryStore) -> EngineResult<AnalysisReport> {
        let start = Instant::now();

        let classified = self.classifier.classify(store.items())?;
        let forecasts = self.forecaster.forecast_batch(store.items())?;
        let report = self.assemble(classified, forecasts)?;

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            critical = report.summary.critical_count,
            important = report.summary.important_count,
            "分析完成"
        );
        Ok(report)
    }

    /// 并发执行完整分析（各药品拟合互不依赖）
    #[instrument(skip(self, store), fields(items = store.len()))]
    pub async fn run_concurrent(&self, store: &SalesHistoryStore) -> EngineResult<AnalysisReport> {
        let start = Instant::now();

        let classified = self.classifier.classify(store.items())?;

        let tasks = store.items().iter().cloned().map(|item: Item| {
            let forecaster = Arc::clone(&self.forecaster);
            tokio::task::spawn_blocking(move || forecaster.forecast_item(&item))
        });

        let mut forecasts = Vec::with_capacity(store.len());
        for joined in futures::future::join_all(tasks).await {
            let result = match joined {
                Ok(result) => result,
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => return Err(EngineError::TaskFailed(e.to_string())),
            };
            forecasts.push(result?);
        }

        let report = self.assemble(classified, forecasts)?;
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            critical = report.summary.critical_count,
            important = report.summary.important_count,
            "并发分析完成"
        );
        Ok(report)
    }

    pub fn forecast_config(&self) -> ForecastConfig {
        self.forecast_config
    }

    fn assemble(
        &self,
        classified: Vec<ClassifiedItem>,
        forecasts: Vec<ForecastResult>,
    ) -> EngineResult<AnalysisReport> {
        let recommendations = self.rules.recommend_batch(&classified, &forecasts)?;
        let summary = summarize(&classified, &forecasts, &recommendations);

        Ok(AnalysisReport {
            classified,
            forecasts,
            recommendations,
            summary,
        })
    }
}

/// 汇总统计
pub fn summarize(
    classified: &[ClassifiedItem],
    forecasts: &[ForecastResult],
    recommendations: &[RecommendationRecord],
) -> AnalysisSummary {
    let count_rec = |level: Recommendation| {
        recommendations
            .iter()
            .filter(|r| r.recommendation == level)
            .count()
    };

    AnalysisSummary {
        total_items: classified.len(),
        tier_a_count: classified.iter().filter(|c| c.abc == AbcTier::A).count(),
        vital_count: classified
            .iter()
            .filter(|c| c.item.ved == VedTier::Vital)
            .count(),
        tier_a_vital_count: classified
            .iter()
            .filter(|c| c.abc == AbcTier::A && c.item.ved == VedTier::Vital)
            .count(),
        critical_count: count_rec(Recommendation::Critical),
        important_count: count_rec(Recommendation::Important),
        fallback_forecast_count: forecasts.iter().filter(|f| f.method.is_fallback()).count(),
    }
}
