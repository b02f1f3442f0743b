// ==========================================
// 导入模块集成测试
// ==========================================
// 测试范围:
// 1. CSV 正常导入 → SalesHistoryStore
// 2. 畸形数据整体拒绝，错误指明行/列
// 3. 告警不阻断导入
// 4. 文件级错误（不存在 / 格式不支持）
// ==========================================

mod helpers;

use helpers::test_data_builder::{write_csv, write_csv_with_header};
use pharmacy_stock::domain::import::DqLevel;
use pharmacy_stock::domain::types::VedTier;
use pharmacy_stock::importer::{ImportError, ItemImporter, ItemImporterImpl};
use pharmacy_stock::logging;

#[tokio::test]
async fn test_import_valid_csv() {
    logging::init_test();
    let file = write_csv(&[
        "Insulin,15,250,V,15,12;14;16;15;13;17;16;15;14;18;16;17",
        "Painkiller,100,25,E,80,95;100;105;98;102;110",
        "\"Skin Cream\",20,60,D,15,\"[18, 20, 22, 21]\"",
    ]);

    let importer = ItemImporterImpl::new();
    let (store, report) = importer.import_from_csv(file.path()).await.unwrap();

    assert_eq!(store.len(), 3);
    assert_eq!(report.total_rows, 3);
    assert_eq!(report.imported_rows, 3);
    assert!(report.warnings.is_empty());
    assert!(!report.batch_id.is_empty());

    let insulin = store.get("Insulin").unwrap();
    assert_eq!(insulin.ved, VedTier::Vital);
    assert_eq!(insulin.current_stock, 15);
    assert_eq!(insulin.sales_history.len(), 12);
    assert_eq!(insulin.annual_value(), 45_000.0);

    let cream = store.get("Skin Cream").unwrap();
    assert_eq!(cream.sales_history, vec![18.0, 20.0, 22.0, 21.0]);
}

#[tokio::test]
async fn test_import_turkish_headers() {
    let file = write_csv_with_header(
        "ilac_adi,aylik_ortalama_tuketim,birim_fiyat,ved_durumu,mevcut_stok,gecmis_satislar",
        &["Antibiyotik,40,90,V,35,38;40;42;41;39;43"],
    );

    let (store, _) = ItemImporterImpl::new().import_file(file.path()).await.unwrap();
    let item = store.get("Antibiyotik").unwrap();
    assert_eq!(item.monthly_consumption, 40.0);
    assert_eq!(item.unit_price, 90.0);
}

#[tokio::test]
async fn test_malformed_rows_rejected_with_row_and_column() {
    let file = write_csv(&[
        "Insulin,15,250,V,15,12;14;16",
        "Broken,10,-5,E,3,1;2;3",
        "Unknown,10,5,X,3,1;2;3",
        "Insulin,1,1,D,1,1;2;3",
    ]);

    let err = ItemImporterImpl::new()
        .import_from_csv(file.path())
        .await
        .unwrap_err();

    let violations = match err {
        ImportError::DataQualityRejected(violations) => violations,
        other => panic!("expected DataQualityRejected, got {other}"),
    };
    assert!(violations.iter().all(|v| v.level == DqLevel::Error));

    let has = |row: usize, field: &str| {
        violations
            .iter()
            .any(|v| v.row_number == row && v.field == field)
    };
    assert!(has(2, "unit_price"));
    assert!(has(3, "ved"));
    assert!(has(4, "name"));

    // 消息中包含行号与列名
    let text = violations[0].to_string();
    assert!(text.contains("行 2"));
    assert!(text.contains("unit_price"));
}

#[tokio::test]
async fn test_non_numeric_cell_names_row_and_column() {
    let file = write_csv(&["Insulin,15,abc,V,15,12;14;16"]);

    let err = ItemImporterImpl::new()
        .import_from_csv(file.path())
        .await
        .unwrap_err();
    match err {
        ImportError::TypeConversionError { row, field, .. } => {
            assert_eq!(row, 1);
            assert_eq!(field, "unit_price");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_short_history_warns_but_imports() {
    let file = write_csv(&[
        "Insulin,15,250,V,15,12;14",
        "Painkiller,100,25,E,80,95;100;105",
    ]);

    let (store, report) = ItemImporterImpl::new()
        .import_from_csv(file.path())
        .await
        .unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].row_number, 1);
    assert_eq!(report.warnings[0].level, DqLevel::Warning);
}

#[tokio::test]
async fn test_single_point_history_rejected() {
    let file = write_csv(&["Insulin,15,250,V,15,12"]);
    let err = ItemImporterImpl::new()
        .import_from_csv(file.path())
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::DataQualityRejected(ref v) if v[0].field == "sales_history"));
}

#[tokio::test]
async fn test_missing_file() {
    let err = ItemImporterImpl::new()
        .import_file("/nonexistent/stock.csv")
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[tokio::test]
async fn test_unsupported_extension() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let err = ItemImporterImpl::new()
        .import_file(file.path())
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
}
