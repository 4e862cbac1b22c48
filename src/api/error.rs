// ==========================================
// 排课系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入层错误为用户可读的错误消息
// ==========================================

use crate::i18n::t_with_args;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 本地化的错误提示（供命令行/界面展示）
    pub fn localized(&self) -> String {
        match self {
            ApiError::Import(ImportError::FileNotFound(path)) => {
                t_with_args("import.file_not_found", &[("path", path.as_str())])
            }
            ApiError::Import(ImportError::UnsupportedFormat(ext)) => {
                t_with_args("import.unsupported_format", &[("ext", ext.as_str())])
            }
            ApiError::Import(err) if err.is_parse_error() => {
                let reason = err.to_string();
                t_with_args("import.parse_failed", &[("reason", reason.as_str())])
            }
            other => other.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
