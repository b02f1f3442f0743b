// ==========================================
// 药房库存决策支持系统 - 数据质量校验器实现
// ==========================================
// 职责: 主键 / 必填 / 数值范围校验
// 级别: Error 阻断导入；Warning 随报告返回
// ==========================================

use crate::domain::import::{DqLevel, DqViolation, RawItemRecord};
use crate::domain::store::{MIN_HISTORY, RECOMMENDED_MIN_HISTORY};
use crate::importer::field_mapper::{
    FIELD_CURRENT_STOCK, FIELD_MONTHLY_CONSUMPTION, FIELD_NAME, FIELD_SALES_HISTORY,
    FIELD_UNIT_PRICE, FIELD_VED,
};
use crate::importer::item_importer_trait::DqValidator as DqValidatorTrait;
use crate::domain::types::VedTier;
use std::collections::HashSet;

pub struct DqValidator {
    min_history: usize,
    recommended_history: usize,
}

impl Default for DqValidator {
    fn default() -> Self {
        Self {
            min_history: MIN_HISTORY,
            recommended_history: RECOMMENDED_MIN_HISTORY,
        }
    }
}

impl DqValidator {
    /// 执行全部校验
    pub fn validate_all(&self, records: &[RawItemRecord]) -> Vec<DqViolation> {
        let mut violations = self.validate_primary_key(records);
        for record in records {
            violations.extend(self.validate_required_fields(record));
            violations.extend(self.validate_ranges(record));
        }
        violations.sort_by_key(|v| v.row_number);
        violations
    }

    fn violation(record: &RawItemRecord, level: DqLevel, field: &str, message: String) -> DqViolation {
        DqViolation {
            row_number: record.row_number,
            item_name: record.name.clone(),
            level,
            field: field.to_string(),
            message,
        }
    }
}

impl DqValidatorTrait for DqValidator {
    /// 校验主键（名称非空且唯一）
    fn validate_primary_key(&self, records: &[RawItemRecord]) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            let Some(name) = record.name.as_ref() else {
                violations.push(Self::violation(
                    record,
                    DqLevel::Error,
                    FIELD_NAME,
                    "药品名称缺失".to_string(),
                ));
                continue;
            };

            if !seen.insert(name.clone()) {
                violations.push(Self::violation(
                    record,
                    DqLevel::Error,
                    FIELD_NAME,
                    format!("药品名称重复: {}", name),
                ));
            }
        }

        violations
    }

    /// 校验必填字段
    fn validate_required_fields(&self, record: &RawItemRecord) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut missing = |field: &str, present: bool| {
            if !present {
                violations.push(Self::violation(
                    record,
                    DqLevel::Error,
                    field,
                    "必填字段缺失".to_string(),
                ));
            }
        };

        missing(FIELD_MONTHLY_CONSUMPTION, record.monthly_consumption.is_some());
        missing(FIELD_UNIT_PRICE, record.unit_price.is_some());
        missing(FIELD_VED, record.ved_code.is_some());
        missing(FIELD_CURRENT_STOCK, record.current_stock.is_some());
        missing(FIELD_SALES_HISTORY, record.sales_history.is_some());

        if let Some(code) = record.ved_code.as_deref() {
            if code.parse::<VedTier>().is_err() {
                violations.push(Self::violation(
                    record,
                    DqLevel::Error,
                    FIELD_VED,
                    format!("VED 等级非法: {}（仅支持 V/E/D）", code),
                ));
            }
        }

        violations
    }

    /// 校验数值范围
    fn validate_ranges(&self, record: &RawItemRecord) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        for (field, value) in [
            (FIELD_MONTHLY_CONSUMPTION, record.monthly_consumption),
            (FIELD_UNIT_PRICE, record.unit_price),
        ] {
            if let Some(v) = value {
                if v < 0.0 {
                    violations.push(Self::violation(
                        record,
                        DqLevel::Error,
                        field,
                        format!("不能为负数: {}", v),
                    ));
                }
            }
        }

        if let Some(stock) = record.current_stock {
            if stock < 0 || stock > i64::from(u32::MAX) {
                violations.push(Self::violation(
                    record,
                    DqLevel::Error,
                    FIELD_CURRENT_STOCK,
                    format!("库存超出范围 [0, {}]: {}", u32::MAX, stock),
                ));
            }
        }

        if let Some(history) = record.sales_history.as_ref() {
            if history.len() < self.min_history {
                violations.push(Self::violation(
                    record,
                    DqLevel::Error,
                    FIELD_SALES_HISTORY,
                    format!("历史销量至少需要 {} 期，实际 {}", self.min_history, history.len()),
                ));
            } else if history.len() < self.recommended_history {
                violations.push(Self::violation(
                    record,
                    DqLevel::Warning,
                    FIELD_SALES_HISTORY,
                    format!(
                        "历史销量仅 {} 期（建议 ≥ {}），预测将回退为均值",
                        history.len(),
                        self.recommended_history
                    ),
                ));
            }

            if let Some((idx, v)) = history.iter().enumerate().find(|(_, v)| **v < 0.0) {
                violations.push(Self::violation(
                    record,
                    DqLevel::Error,
                    FIELD_SALES_HISTORY,
                    format!("第 {} 期销量为负数: {}", idx + 1, v),
                ));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(row: usize, name: Option<&str>) -> RawItemRecord {
        RawItemRecord {
            name: name.map(str::to_string),
            monthly_consumption: Some(10.0),
            unit_price: Some(5.0),
            ved_code: Some("E".to_string()),
            current_stock: Some(4),
            sales_history: Some(vec![1.0, 2.0, 3.0]),
            row_number: row,
        }
    }

    #[test]
    fn test_valid_record_has_no_violations() {
        let v = DqValidator::default().validate_all(&[record(1, Some("A"))]);
        assert!(v.is_empty());
    }

    #[test]
    fn test_missing_and_duplicate_names() {
        let v = DqValidator::default().validate_all(&[
            record(1, Some("A")),
            record(2, Some("A")),
            record(3, None),
        ]);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].row_number, 2);
        assert_eq!(v[1].row_number, 3);
        assert!(v.iter().all(|x| x.level == DqLevel::Error && x.field == FIELD_NAME));
    }

    #[test]
    fn test_negative_stock_is_error() {
        let mut r = record(1, Some("A"));
        r.current_stock = Some(-1);
        let v = DqValidator::default().validate_ranges(&r);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].field, FIELD_CURRENT_STOCK);
    }

    #[test]
    fn test_two_point_history_is_warning() {
        let mut r = record(1, Some("A"));
        r.sales_history = Some(vec![3.0, 4.0]);
        let v = DqValidator::default().validate_ranges(&r);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].level, DqLevel::Warning);
    }

    #[test]
    fn test_bad_ved_code_is_error() {
        let mut r = record(1, Some("A"));
        r.ved_code = Some("X".to_string());
        let v = DqValidator::default().validate_required_fields(&r);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].field, FIELD_VED);
    }
}
