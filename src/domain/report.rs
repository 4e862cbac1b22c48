// ==========================================
// 排课系统 - 导入结果模型
// ==========================================
// 用途: 导入接口返回值（每次运行新建，返回后不可变，核心层不落库）
// ==========================================

use crate::domain::candidate::CandidateRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ImportOutcome - 单条提交结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub record: CandidateRecord,
    pub succeeded: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ImportOutcome {
    pub fn success(record: CandidateRecord) -> Self {
        Self {
            record,
            succeeded: true,
            error_message: None,
        }
    }

    pub fn failure(record: CandidateRecord, message: impl Into<String>) -> Self {
        Self {
            record,
            succeeded: false,
            error_message: Some(message.into()),
        }
    }
}

// ==========================================
// ImportReport - 导入汇总报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub run_id: String,                // 运行 ID（UUID，仅用于日志追溯）
    pub total_accepted: usize,         // 进入导入环节的记录数
    pub succeeded: usize,              // 成功数
    pub failed: usize,                 // 失败数
    pub cancelled: bool,               // 是否在记录之间被调用方中止
    pub outcomes: Vec<ImportOutcome>,  // 逐条结果（与输入顺序一致）
    pub started_at: DateTime<Utc>,     // 开始时间
    pub elapsed_ms: u64,               // 耗时（毫秒）
}

impl ImportReport {
    /// 失败明细
    pub fn failures(&self) -> impl Iterator<Item = &ImportOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// 已处理（已调用创建接口）的记录数
    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }
}
