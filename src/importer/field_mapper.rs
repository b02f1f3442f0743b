// ==========================================
// 药房库存决策支持系统 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射 + 类型转换
// 别名: 英文列名 + 原始土耳其语列名
// ==========================================

use crate::domain::import::RawItemRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::item_importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

// 标准字段名
pub const FIELD_NAME: &str = "name";
pub const FIELD_MONTHLY_CONSUMPTION: &str = "monthly_consumption";
pub const FIELD_UNIT_PRICE: &str = "unit_price";
pub const FIELD_VED: &str = "ved";
pub const FIELD_CURRENT_STOCK: &str = "current_stock";
pub const FIELD_SALES_HISTORY: &str = "sales_history";

#[derive(Debug, Default)]
pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_raw_item(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawItemRecord> {
        Ok(RawItemRecord {
            name: self.get_string(row, FIELD_NAME),
            monthly_consumption: self.parse_f64(row, FIELD_MONTHLY_CONSUMPTION, row_number)?,
            unit_price: self.parse_f64(row, FIELD_UNIT_PRICE, row_number)?,
            ved_code: self.get_string(row, FIELD_VED),
            current_stock: self.parse_integer(row, FIELD_CURRENT_STOCK, row_number)?,
            sales_history: self.parse_series(row, FIELD_SALES_HISTORY, row_number)?,
            row_number,
        })
    }
}

impl FieldMapper {
    /// 列名别名（大小写不敏感）
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            FIELD_NAME => &["name", "item_name", "drug", "ilac_adi"],
            FIELD_MONTHLY_CONSUMPTION => &[
                "monthly_consumption",
                "monthly_avg_consumption",
                "aylik_ortalama_tuketim",
            ],
            FIELD_UNIT_PRICE => &["unit_price", "price", "birim_fiyat"],
            FIELD_VED => &["ved", "ved_tier", "ved_status", "ved_durumu"],
            FIELD_CURRENT_STOCK => &["current_stock", "stock", "mevcut_stok"],
            FIELD_SALES_HISTORY => &["sales_history", "history", "gecmis_satislar"],
            _ => &[],
        }
    }

    /// 提取字符串字段（空白视为缺失）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        for alias in Self::aliases(key) {
            let hit = row
                .iter()
                .find(|(col, _)| col.trim().eq_ignore_ascii_case(alias));
            if let Some((_, v)) = hit {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 解析浮点数
    fn parse_f64(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => parse_number(&value)
                .map(Some)
                .ok_or_else(|| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为数值: {}", value),
                }),
        }
    }

    /// 解析整数（允许 "15.0" 这类无小数部分的写法）
    fn parse_integer(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<i64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => {
                if let Ok(v) = value.parse::<i64>() {
                    return Ok(Some(v));
                }
                match parse_number(&value) {
                    Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(Some(v as i64)),
                    _ => Err(ImportError::TypeConversionError {
                        row: row_number,
                        field: key.to_string(),
                        message: format!("无法解析为整数: {}", value),
                    }),
                }
            }
        }
    }

    /// 解析历史销量序列
    ///
    /// 支持: "12;14;16" / "12|14|16" / "[12, 14, 16]" / "12 14 16"
    fn parse_series(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<Vec<f64>>> {
        let Some(value) = self.get_string(row, key) else {
            return Ok(None);
        };

        let inner = value.trim().trim_start_matches('[').trim_end_matches(']');
        let mut series = Vec::new();
        for (idx, token) in inner
            .split(|c: char| c == ',' || c == ';' || c == '|' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .enumerate()
        {
            let v = parse_number(token).ok_or_else(|| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("第 {} 期销量无法解析: {}", idx + 1, token),
            })?;
            series.push(v);
        }
        Ok(Some(series))
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
