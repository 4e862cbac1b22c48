// ==========================================
// 排课系统 - API 层
// ==========================================
// 职责: 提供按路径导入、预览、模板等接口，供命令行或上层服务调用
// ==========================================

pub mod error;
pub mod export_sink;
pub mod import_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use export_sink::JsonLinesCreator;
pub use import_api::{
    DispatchingCreator, EntityCreateApi, ImportApi, ImportPreview, ImportTemplate,
};
