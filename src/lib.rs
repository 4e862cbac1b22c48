// ==========================================
// 排课系统 - 批量数据导入对账引擎
// ==========================================
// 流程: 文件 → 原始行 → 候选记录 → 逐条创建 → 导入报告
// 实体: 教师 / 科目 / 班级
// 系统定位: 导入核心（远程创建接口由调用方注入）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "vi");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 原始行 / 候选记录 / 导入报告
pub mod domain;

// 导入层 - 解析 / 规范化 / 逐条提交
pub mod importer;

// 配置层 - 导入配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 按路径导入 / 预览 / 模板
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CandidateRecord, ClassCandidate, EntityKind, ImportOutcome, ImportReport, RawRow, RawValue,
    Session, Slot, SubjectCandidate, TeacherCandidate,
};

// 导入管道
pub use importer::{
    import, normalize, parse, CancelFlag, FileKind, FnCreator, ImportError, ImportPipeline,
    ImportResult, Normalizer, RecordCreator, RecordImporter,
};

// 配置
pub use config::{ImportSettings, PerGradeHeaderPolicy};

// API
pub use api::{ApiError, DispatchingCreator, EntityCreateApi, ImportApi, JsonLinesCreator};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Timetable Import";
