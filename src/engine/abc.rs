// ==========================================
// 药房库存决策支持系统 - ABC 分类引擎
// ==========================================
// 规则: 年消耗金额降序排列，按累计占比分级
// - 累计 ≤ 80%      → A
// - 80% < 累计 ≤ 95% → B
// - 累计 > 95%      → C
// 约定: 总金额为 0 时累计占比全部记 0，且全部归入 C
// ==========================================

use crate::domain::item::{ClassifiedItem, Item};
use crate::domain::store::{validate_annual_value, validate_non_negative};
use crate::domain::types::AbcTier;
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// ABC 分级阈值（累计占比，%）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbcThresholds {
    pub a_pct: f64,
    pub b_pct: f64,
}

impl Default for AbcThresholds {
    fn default() -> Self {
        Self {
            a_pct: 80.0,
            b_pct: 95.0,
        }
    }
}

impl AbcThresholds {
    /// 校验 0 ≤ A ≤ B ≤ 100
    pub fn validate(&self) -> EngineResult<()> {
        let ok = self.a_pct.is_finite()
            && self.b_pct.is_finite()
            && 0.0 <= self.a_pct
            && self.a_pct <= self.b_pct
            && self.b_pct <= 100.0;
        if ok {
            Ok(())
        } else {
            Err(EngineError::invalid(
                "*",
                "abc_thresholds",
                format!("阈值需满足 0 ≤ A({}) ≤ B({}) ≤ 100", self.a_pct, self.b_pct),
            ))
        }
    }

    /// 按累计占比判定等级
    pub fn tier_for(&self, cumulative_pct: f64) -> AbcTier {
        if cumulative_pct <= self.a_pct {
            AbcTier::A
        } else if cumulative_pct <= self.b_pct {
            AbcTier::B
        } else {
            AbcTier::C
        }
    }
}

// ==========================================
// AbcClassifier - ABC 分类引擎（无状态）
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct AbcClassifier {
    thresholds: AbcThresholds,
}

impl AbcClassifier {
    pub fn new(thresholds: AbcThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> AbcThresholds {
        self.thresholds
    }

    /// 对药品集合做 ABC 分类
    ///
    /// 返回按年消耗金额降序排列的分类结果（金额相同保持输入顺序）
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub fn classify(&self, items: &[Item]) -> EngineResult<Vec<ClassifiedItem>> {
        self.thresholds.validate()?;

        for item in items {
            validate_non_negative(&item.name, "monthly_consumption", item.monthly_consumption)?;
            validate_non_negative(&item.name, "unit_price", item.unit_price)?;
            validate_annual_value(item)?;
        }

        let mut ranked: Vec<(&Item, f64)> = items.iter().map(|i| (i, i.annual_value())).collect();
        // sort_by 为稳定排序，金额相同保持原顺序
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        // 按排序后的顺序求和，保证最后一项累计占比恰为 100
        let total: f64 = ranked.iter().map(|(_, v)| v).sum();
        if !total.is_finite() {
            return Err(EngineError::invalid(
                "*",
                "annual_value",
                format!("年消耗金额合计溢出: {}", total),
            ));
        }
        debug!(total_annual_value = total, "年消耗金额汇总完成");

        let mut running = 0.0;
        let classified = ranked
            .into_iter()
            .enumerate()
            .map(|(idx, (item, annual_value))| {
                running += annual_value;
                let (cumulative_pct, abc) = if total > 0.0 {
                    let pct = running / total * 100.0;
                    (pct, self.thresholds.tier_for(pct))
                } else {
                    (0.0, AbcTier::C)
                };

                ClassifiedItem {
                    item: item.clone(),
                    annual_value,
                    cumulative_pct,
                    abc,
                    rank: idx + 1,
                }
            })
            .collect();

        Ok(classified)
    }
}
