// ==========================================
// 排课系统 - 导入配置
// ==========================================
// 职责: 年级范围 / 分年级列名策略 / 预览行数
// 来源: JSON 文件（可选），缺省项取默认值
// 红线: 表头同义词表为固定配置，不在此处开放
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "TIMETABLE_IMPORT_CONFIG";

// ==========================================
// PerGradeHeaderPolicy - 分年级课时列名策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PerGradeHeaderPolicy {
    /// 依次尝试 "Khối N" / "Grade N" / "grade_N"
    #[default]
    AllSynonyms,
    /// 仅识别 "Khối N"（旧版行为）
    VietnameseOnly,
}

// ==========================================
// ImportSettings - 导入配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// 最低年级（含）
    pub min_grade: u8,

    /// 最高年级（含）
    pub max_grade: u8,

    /// 分年级课时列名策略
    pub per_grade_headers: PerGradeHeaderPolicy,

    /// 预览行数
    pub preview_rows: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            min_grade: 6,
            max_grade: 12,
            per_grade_headers: PerGradeHeaderPolicy::AllSynonyms,
            preview_rows: 5,
        }
    }
}

impl ImportSettings {
    /// 从 JSON 字符串解析（缺省字段取默认值）
    pub fn from_json_str(raw: &str) -> ImportResult<Self> {
        let settings: ImportSettings =
            serde_json::from_str(raw).map_err(|e| ImportError::ConfigValueError {
                key: "<root>".to_string(),
                value: raw.chars().take(64).collect(),
                message: e.to_string(),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// 从 JSON 文件读取
    pub fn from_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// 从环境变量指定的文件读取；未设置或读取失败时使用默认配置
    pub fn from_env() -> Self {
        let path = match std::env::var(CONFIG_PATH_ENV) {
            Ok(p) if !p.trim().is_empty() => p,
            _ => return Self::default(),
        };

        match Self::from_file(&path) {
            Ok(settings) => {
                tracing::debug!(config_path = %path, "已加载导入配置");
                settings
            }
            Err(e) => {
                tracing::warn!(
                    config_path = %path,
                    error = %e,
                    "导入配置读取失败，使用默认配置"
                );
                Self::default()
            }
        }
    }

    /// 校验配置
    pub fn validate(&self) -> ImportResult<()> {
        if self.min_grade == 0 || self.min_grade > self.max_grade {
            return Err(ImportError::ConfigValueError {
                key: "min_grade/max_grade".to_string(),
                value: format!("{}..={}", self.min_grade, self.max_grade),
                message: "年级范围无效".to_string(),
            });
        }
        if self.preview_rows == 0 {
            return Err(ImportError::ConfigValueError {
                key: "preview_rows".to_string(),
                value: "0".to_string(),
                message: "预览行数必须大于 0".to_string(),
            });
        }
        Ok(())
    }

    /// 年级范围
    pub fn grades(&self) -> std::ops::RangeInclusive<u8> {
        self.min_grade..=self.max_grade
    }

    pub fn is_known_grade(&self, grade: i64) -> bool {
        grade >= i64::from(self.min_grade) && grade <= i64::from(self.max_grade)
    }
}
