// ==========================================
// 排课系统 - 导入层
// ==========================================
// 职责: 外部文件 → 候选记录 → 逐条提交
// 支持: CSV, 工作簿（xlsx/xlsm/xlsb/xls/ods，首个工作表）
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod header_synonyms;
pub mod importer_trait;
pub mod normalizer;
pub mod pipeline;
pub mod record_importer;
pub mod value_cleaner;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{parse, CsvParser, FileKind, UniversalFileParser, WorkbookParser};
pub use normalizer::{normalize, Normalizer};
pub use pipeline::ImportPipeline;
pub use record_importer::{import, CancelFlag, RecordImporter};
pub use value_cleaner::ValueCleaner;

// 重导出 Trait 接口
pub use importer_trait::{FileParser, FnCreator, RecordCreator};
