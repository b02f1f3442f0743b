// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use pharmacy_stock::domain::item::Item;
use pharmacy_stock::domain::types::VedTier;
use std::io::Write;
use tempfile::NamedTempFile;

// ==========================================
// Item 构建器
// ==========================================

pub struct ItemBuilder {
    name: String,
    monthly_consumption: f64,
    unit_price: f64,
    ved: VedTier,
    current_stock: u32,
    sales_history: Vec<f64>,
}

impl ItemBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            monthly_consumption: 10.0,
            unit_price: 1.0,
            ved: VedTier::Essential,
            current_stock: 0,
            sales_history: vec![10.0, 11.0, 12.0, 11.0, 13.0, 12.0],
        }
    }

    pub fn monthly(mut self, monthly: f64) -> Self {
        self.monthly_consumption = monthly;
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.unit_price = price;
        self
    }

    /// 直接指定年消耗金额（单价固定为 1）
    pub fn annual_value(mut self, value: f64) -> Self {
        self.monthly_consumption = value / 12.0;
        self.unit_price = 1.0;
        self
    }

    pub fn ved(mut self, ved: VedTier) -> Self {
        self.ved = ved;
        self
    }

    pub fn stock(mut self, stock: u32) -> Self {
        self.current_stock = stock;
        self
    }

    pub fn history(mut self, history: &[f64]) -> Self {
        self.sales_history = history.to_vec();
        self
    }

    pub fn build(self) -> Item {
        Item::new(
            self.name,
            self.monthly_consumption,
            self.unit_price,
            self.ved,
            self.current_stock,
            self.sales_history,
        )
    }
}

// ==========================================
// CSV 临时文件
// ==========================================

pub const CSV_HEADER: &str = "name,monthly_consumption,unit_price,ved,current_stock,sales_history";

/// 写入带表头的临时 CSV 文件（文件需保持存活）
pub fn write_csv(rows: &[&str]) -> NamedTempFile {
    write_csv_with_header(CSV_HEADER, rows)
}

pub fn write_csv_with_header(header: &str, rows: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    writeln!(file, "{}", header).expect("write header");
    for row in rows {
        writeln!(file, "{}", row).expect("write row");
    }
    file.flush().expect("flush csv");
    file
}
