// ==========================================
// 排课系统 - 领域类型定义
// ==========================================
// 职责: 实体种类 / 上课时段 / 时间槽 等基础枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 实体种类 (Entity Kind)
// ==========================================
// 导入目标: 教师 / 科目 / 班级（封闭集合，新增实体需补全所有 match）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Teacher,
    Subject,
    Class,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Teacher => "teacher",
            EntityKind::Subject => "subject",
            EntityKind::Class => "class",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "teacher" | "teachers" => Ok(EntityKind::Teacher),
            "subject" | "subjects" => Ok(EntityKind::Subject),
            "class" | "classes" => Ok(EntityKind::Class),
            other => Err(format!("未知实体类型: {}", other)),
        }
    }
}

// ==========================================
// 上课时段 (Session)
// ==========================================
// 序列化格式: 与后端一致，使用越南语标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Session {
    #[serde(rename = "Sáng")]
    Morning,
    #[serde(rename = "Chiều")]
    Afternoon,
}

impl Session {
    pub fn label(&self) -> &'static str {
        match self {
            Session::Morning => "Sáng",
            Session::Afternoon => "Chiều",
        }
    }

    /// 解析时段标签（不区分大小写，兼容英文写法）
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "sáng" | "morning" => Some(Session::Morning),
            "chiều" | "afternoon" => Some(Session::Afternoon),
            _ => None,
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 时间槽 (Slot)
// ==========================================
// (星期, 节次)，序列化为二元数组 [day, period]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot(pub u8, pub u8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_from_str() {
        assert_eq!("teacher".parse::<EntityKind>(), Ok(EntityKind::Teacher));
        assert_eq!(" Subjects ".parse::<EntityKind>(), Ok(EntityKind::Subject));
        assert_eq!("CLASS".parse::<EntityKind>(), Ok(EntityKind::Class));
        assert!("room".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_session_parse_label() {
        assert_eq!(Session::parse_label("Sáng"), Some(Session::Morning));
        assert_eq!(Session::parse_label(" chiều "), Some(Session::Afternoon));
        assert_eq!(Session::parse_label("Afternoon"), Some(Session::Afternoon));
        assert_eq!(Session::parse_label("Tối"), None);
    }

    #[test]
    fn test_session_serde_label() {
        let json = serde_json::to_string(&Session::Morning).unwrap();
        assert_eq!(json, "\"Sáng\"");
    }

    #[test]
    fn test_slot_serializes_as_pair() {
        let json = serde_json::to_string(&vec![Slot(1, 3)]).unwrap();
        assert_eq!(json, "[[1,3]]");
    }
}
