// ==========================================
// 示例数据 CSV 生成器
// ==========================================
// 用途: 将内置示例药品表导出为 CSV，供导入功能演示
// 用法: cargo run --bin generate_sample_csv -- [输出路径]
// 输出: tests/fixtures/datasets/sample_items.csv（缺省）
// ==========================================

use csv::Writer;
use pharmacy_stock::domain::sample::sample_items;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

// CSV 表头（与导入字段映射一致）
const CSV_HEADER: &[&str] = &[
    "name",
    "monthly_consumption",
    "unit_price",
    "ved",
    "current_stock",
    "sales_history",
];

fn main() -> Result<(), Box<dyn Error>> {
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/datasets/sample_items.csv"));

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = Writer::from_path(&output)?;
    writer.write_record(CSV_HEADER)?;

    let items = sample_items();
    for item in &items {
        let history = item
            .sales_history
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(";");

        writer.write_record([
            item.name.clone(),
            item.monthly_consumption.to_string(),
            item.unit_price.to_string(),
            item.ved.code().to_string(),
            item.current_stock.to_string(),
            history,
        ])?;
    }
    writer.flush()?;

    println!("✓ 已生成 {} 条药品记录: {}", items.len(), output.display());
    Ok(())
}
