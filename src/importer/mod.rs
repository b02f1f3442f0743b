// ==========================================
// 药房库存决策支持系统 - 导入层
// ==========================================
// 职责: 外部表格数据导入，生成内存药品表
// 支持: Excel, CSV
// 红线: 畸形数据在进入核心前拒绝，并指明行/列
// ==========================================

// 模块声明
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod item_importer_impl;
pub mod item_importer_trait;

// 重导出核心类型
pub use dq_validator::DqValidator as DqValidatorImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use item_importer_impl::ItemImporterImpl;

// 重导出 Trait 接口
pub use item_importer_trait::{DqValidator, FieldMapper, FileParser, ItemImporter};
