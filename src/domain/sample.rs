// ==========================================
// 药房库存决策支持系统 - 示例数据
// ==========================================
// 用途: 无上传文件时的默认药品表（10 种药品，12 个月历史）
// ==========================================

use crate::domain::item::Item;
use crate::domain::store::SalesHistoryStore;
use crate::domain::types::VedTier;
use crate::engine::error::EngineResult;

/// 示例药品表原始数据: (名称, 月消耗, 单价, VED, 当前库存, 历史销量)
const SAMPLE_ROWS: &[(&str, f64, f64, VedTier, u32, [f64; 12])] = &[
    ("Insulin", 15.0, 250.0, VedTier::Vital, 15,
        [12.0, 14.0, 16.0, 15.0, 13.0, 17.0, 16.0, 15.0, 14.0, 18.0, 16.0, 17.0]),
    ("Cardiology Drug", 30.0, 120.0, VedTier::Essential, 25,
        [28.0, 30.0, 32.0, 31.0, 29.0, 33.0, 32.0, 30.0, 31.0, 34.0, 32.0, 33.0]),
    ("Painkiller", 100.0, 25.0, VedTier::Essential, 80,
        [95.0, 100.0, 105.0, 98.0, 102.0, 110.0, 108.0, 105.0, 100.0, 115.0, 112.0, 110.0]),
    ("Vitamin Supplement", 50.0, 40.0, VedTier::Desirable, 40,
        [45.0, 48.0, 50.0, 47.0, 49.0, 52.0, 51.0, 50.0, 48.0, 55.0, 53.0, 52.0]),
    ("Antibiotic", 40.0, 90.0, VedTier::Vital, 35,
        [38.0, 40.0, 42.0, 41.0, 39.0, 43.0, 42.0, 40.0, 41.0, 44.0, 42.0, 43.0]),
    ("Allergy Drug", 60.0, 35.0, VedTier::Desirable, 50,
        [55.0, 58.0, 60.0, 57.0, 59.0, 62.0, 61.0, 60.0, 58.0, 65.0, 63.0, 62.0]),
    ("Blood Pressure Drug", 80.0, 70.0, VedTier::Essential, 65,
        [75.0, 78.0, 80.0, 77.0, 79.0, 82.0, 81.0, 80.0, 78.0, 85.0, 83.0, 82.0]),
    ("Skin Cream", 20.0, 60.0, VedTier::Desirable, 15,
        [18.0, 20.0, 22.0, 21.0, 19.0, 23.0, 22.0, 20.0, 21.0, 24.0, 22.0, 23.0]),
    ("Flu Medicine", 70.0, 45.0, VedTier::Essential, 55,
        [65.0, 68.0, 70.0, 67.0, 69.0, 72.0, 71.0, 70.0, 68.0, 75.0, 73.0, 72.0]),
    ("Glucose Meter", 10.0, 150.0, VedTier::Vital, 8,
        [9.0, 10.0, 11.0, 10.0, 9.0, 12.0, 11.0, 10.0, 10.0, 13.0, 12.0, 12.0]),
];

/// 示例药品列表
pub fn sample_items() -> Vec<Item> {
    SAMPLE_ROWS
        .iter()
        .map(|(name, monthly, price, ved, stock, history)| {
            Item::new(*name, *monthly, *price, *ved, *stock, history.to_vec())
        })
        .collect()
}

/// 加载示例药品表
pub fn load_sample_items() -> EngineResult<SalesHistoryStore> {
    SalesHistoryStore::new(sample_items())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_store_is_valid() {
        let store = load_sample_items().unwrap();
        assert_eq!(store.len(), 10);
        assert!(store.items().iter().all(|i| i.sales_history.len() == 12));
    }
}
