// ==========================================
// 排课系统 - 配置层
// ==========================================
// 职责: 导入引擎的可调参数（年级范围、列名策略、预览行数）
// 存储: JSON 文件 / 环境变量指定路径
// ==========================================

pub mod import_settings;

pub use import_settings::{ImportSettings, PerGradeHeaderPolicy, CONFIG_PATH_ENV};
