// ==========================================
// 药房库存决策支持系统 - 销售历史仓（内存）
// ==========================================
// 红线: 持有全部 Item，构建时一次性校验，之后只读
// 说明: 无持久化；数据变化时重新构建新的 Store
// ==========================================

use crate::domain::item::Item;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::HashSet;
use tracing::warn;

/// 预测器建议的最少历史点数
pub const RECOMMENDED_MIN_HISTORY: usize = 3;

/// 历史销量硬性下限
pub const MIN_HISTORY: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct SalesHistoryStore {
    items: Vec<Item>,
}

impl SalesHistoryStore {
    /// 构建并校验药品表
    ///
    /// # 校验规则
    /// - 名称非空且唯一
    /// - 月消耗、单价为有限非负数
    /// - 历史销量至少 2 个点，且均为有限非负数
    ///
    /// 历史少于 3 个点只记录告警，预测器会回退到均值
    pub fn new(items: Vec<Item>) -> EngineResult<Self> {
        let mut seen = HashSet::new();

        for item in &items {
            validate_item(item)?;

            if !seen.insert(item.name.as_str()) {
                return Err(EngineError::invalid(&item.name, "name", "药品名称重复"));
            }

            if item.sales_history.len() < RECOMMENDED_MIN_HISTORY {
                warn!(
                    item = %item.name,
                    points = item.sales_history.len(),
                    "历史销量点数偏少，预测将回退为均值"
                );
            }
        }

        Ok(Self { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 按名称查询
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.name.as_str())
    }
}

/// 单个药品的字段校验
pub fn validate_item(item: &Item) -> EngineResult<()> {
    if item.name.trim().is_empty() {
        return Err(EngineError::invalid(&item.name, "name", "药品名称为空"));
    }
    validate_non_negative(&item.name, "monthly_consumption", item.monthly_consumption)?;
    validate_non_negative(&item.name, "unit_price", item.unit_price)?;
    validate_annual_value(item)?;
    validate_history(&item.name, &item.sales_history)
}

/// 年消耗金额必须为有限值（月消耗 × 单价 × 12 可能溢出）
pub fn validate_annual_value(item: &Item) -> EngineResult<()> {
    let value = item.annual_value();
    if !value.is_finite() {
        return Err(EngineError::invalid(
            &item.name,
            "annual_value",
            format!("年消耗金额溢出: {}", value),
        ));
    }
    Ok(())
}

/// 历史销量校验（长度 ≥ 2，非负有限值）
pub fn validate_history(item: &str, history: &[f64]) -> EngineResult<()> {
    if history.len() < MIN_HISTORY {
        return Err(EngineError::invalid(
            item,
            "sales_history",
            format!("历史销量至少需要 {} 个点，实际 {}", MIN_HISTORY, history.len()),
        ));
    }
    for (idx, value) in history.iter().enumerate() {
        if !value.is_finite() || *value < 0.0 {
            return Err(EngineError::invalid(
                item,
                "sales_history",
                format!("第 {} 期销量非法: {}", idx + 1, value),
            ));
        }
    }
    let sum: f64 = history.iter().sum();
    if !sum.is_finite() {
        return Err(EngineError::invalid(item, "sales_history", "历史销量合计溢出"));
    }
    Ok(())
}

pub(crate) fn validate_non_negative(item: &str, field: &str, value: f64) -> EngineResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::invalid(
            item,
            field,
            format!("必须为非负数，实际 {}", value),
        ));
    }
    Ok(())
}
