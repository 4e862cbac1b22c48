// ==========================================
// 排课系统 - 领域模型层
// ==========================================
// 职责: 定义原始行、候选记录、导入结果等实体与类型
// 红线: 不含文件解析逻辑，不含提交逻辑
// ==========================================

pub mod candidate;
pub mod report;
pub mod row;
pub mod types;

// 重导出核心类型
pub use candidate::{CandidateRecord, ClassCandidate, SubjectCandidate, TeacherCandidate};
pub use report::{ImportOutcome, ImportReport};
pub use row::{RawRow, RawValue};
pub use types::{EntityKind, Session, Slot};
