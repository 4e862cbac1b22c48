// ==========================================
// 排课系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 单条记录提交失败不属于此类型（记录在 ImportOutcome 中）
// ==========================================

use std::path::Path;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.xlsx/.xlsm/.xlsb/.xls/.ods）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 解析错误（整次导入失败，不返回部分结果）=====
    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("工作簿解析失败: {0}")]
    WorkbookParseError(String),

    // ===== 配置错误 =====
    #[error("配置读取失败 ({path}): {message}")]
    ConfigReadError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

impl ImportError {
    /// 是否为文件内容解析错误
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ImportError::CsvParseError(_) | ImportError::WorkbookParseError(_)
        )
    }
}

impl ImportError {
    /// 文件 IO 错误（携带路径）
    pub fn from_io(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        let path = path.as_ref().display();
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(path.to_string()),
            _ => ImportError::FileReadError(format!("{}: {}", path, err)),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::WorkbookParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_parse_error() {
        assert!(ImportError::CsvParseError("bad".into()).is_parse_error());
        assert!(ImportError::WorkbookParseError("bad".into()).is_parse_error());
        assert!(!ImportError::FileNotFound("a.csv".into()).is_parse_error());
    }

    #[test]
    fn test_io_errors_carry_path() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        match ImportError::from_io("data/lop.csv", not_found) {
            ImportError::FileNotFound(path) => assert_eq!(path, "data/lop.csv"),
            other => panic!("期望文件不存在错误，实际 {other:?}"),
        }

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        match ImportError::from_io("data/lop.csv", denied) {
            ImportError::FileReadError(message) => assert_eq!(message, "data/lop.csv: denied"),
            other => panic!("期望文件读取错误，实际 {other:?}"),
        }
    }
}
