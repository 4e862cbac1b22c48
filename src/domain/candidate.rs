// ==========================================
// 排课系统 - 候选记录领域模型
// ==========================================
// 用途: 规范化输出，逐条提交给创建接口
// 对齐: 后端 /teachers /subjects /classes 创建请求体（snake_case）
// ==========================================

use crate::domain::types::{EntityKind, Session, Slot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// TeacherCandidate - 教师候选记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherCandidate {
    pub id: String,   // 教师编码（Mã GV）
    pub name: String, // 姓名

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "professional_group_name", skip_serializing_if = "Option::is_none")]
    pub professional_group: Option<String>, // 教研组（Tổ CM）

    #[serde(rename = "subjects")]
    pub primary_subjects: Vec<String>, // 主授科目（去重，保持首次出现顺序）

    pub secondary_subjects: Vec<String>, // 兼授科目

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_periods: Option<u32>, // 目标周课时

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    pub work_days_preference: i64, // 默认 0

    #[serde(rename = "is_locked")]
    pub locked: bool, // 导入时恒为 false

    pub busy_slots: Vec<Slot>, // 导入时恒为空
}

// ==========================================
// SubjectCandidate - 科目候选记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCandidate {
    pub name: String,

    // 年级标签 → 周课时；无对应列的年级不出现（不是 0）
    #[serde(rename = "periods_per_week")]
    pub periods_per_grade: BTreeMap<String, u32>,

    #[serde(rename = "is_double_period_only")]
    pub double_period_only: bool,
}

// ==========================================
// ClassCandidate - 班级候选记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCandidate {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homeroom_teacher_id: Option<String>, // 班主任（GVCN），不校验是否存在

    #[serde(rename = "is_locked")]
    pub locked: bool,

    pub fixed_off_slots: Vec<Slot>,
}

// ==========================================
// CandidateRecord - 候选记录（封闭和类型）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum CandidateRecord {
    Teacher(TeacherCandidate),
    Subject(SubjectCandidate),
    Class(ClassCandidate),
}

impl CandidateRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            CandidateRecord::Teacher(_) => EntityKind::Teacher,
            CandidateRecord::Subject(_) => EntityKind::Subject,
            CandidateRecord::Class(_) => EntityKind::Class,
        }
    }

    /// 标识字段（用于日志与失败定位）
    pub fn identity(&self) -> &str {
        match self {
            CandidateRecord::Teacher(t) => &t.id,
            CandidateRecord::Subject(s) => &s.name,
            CandidateRecord::Class(c) => &c.name,
        }
    }

    /// 可接受性: 标识字段去除空白后非空
    pub fn is_acceptable(&self) -> bool {
        match self {
            CandidateRecord::Teacher(t) => !t.id.trim().is_empty() && !t.name.trim().is_empty(),
            CandidateRecord::Subject(s) => !s.name.trim().is_empty(),
            CandidateRecord::Class(c) => !c.name.trim().is_empty(),
        }
    }

    /// 创建接口请求体（不含 entity 标签）
    pub fn payload(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            CandidateRecord::Teacher(t) => serde_json::to_value(t),
            CandidateRecord::Subject(s) => serde_json::to_value(s),
            CandidateRecord::Class(c) => serde_json::to_value(c),
        }
    }
}
