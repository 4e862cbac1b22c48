// ==========================================
// 排课系统 - 表头同义词表
// ==========================================
// 职责: 逻辑字段 → 可接受表头（按优先级排序）
// 红线: 固定配置表，不接受运行时输入；新增同义词只改此文件
// ==========================================

use crate::config::PerGradeHeaderPolicy;
use crate::domain::{EntityKind, RawRow, RawValue};

/// 逻辑字段接口
pub trait LogicalField: Copy {
    /// 字段名（模板与日志用）
    fn field_name(&self) -> &'static str;

    /// 可接受表头（优先级从高到低）
    fn headers(&self) -> &'static [&'static str];
}

// ==========================================
// 教师字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeacherField {
    Id,
    Name,
    Email,
    ProfessionalGroup,
    Subjects,
    SecondarySubjects,
    TargetPeriods,
    Role,
    WorkDaysPreference,
}

impl TeacherField {
    pub const ALL: [TeacherField; 9] = [
        TeacherField::Id,
        TeacherField::Name,
        TeacherField::Email,
        TeacherField::ProfessionalGroup,
        TeacherField::Subjects,
        TeacherField::SecondarySubjects,
        TeacherField::TargetPeriods,
        TeacherField::Role,
        TeacherField::WorkDaysPreference,
    ];
}

impl LogicalField for TeacherField {
    fn field_name(&self) -> &'static str {
        match self {
            TeacherField::Id => "id",
            TeacherField::Name => "name",
            TeacherField::Email => "email",
            TeacherField::ProfessionalGroup => "professional_group",
            TeacherField::Subjects => "primary_subjects",
            TeacherField::SecondarySubjects => "secondary_subjects",
            TeacherField::TargetPeriods => "target_periods",
            TeacherField::Role => "role",
            TeacherField::WorkDaysPreference => "work_days_preference",
        }
    }

    fn headers(&self) -> &'static [&'static str] {
        match self {
            TeacherField::Id => &["ID", "id", "Mã GV"],
            TeacherField::Name => &["Họ tên", "name", "Tên"],
            TeacherField::Email => &["Email", "email"],
            TeacherField::ProfessionalGroup => {
                &["Tổ CM", "Tổ chuyên môn", "professional_group_name"]
            }
            TeacherField::Subjects => &["Môn dạy"],
            TeacherField::SecondarySubjects => &["Môn dạy phụ"],
            TeacherField::TargetPeriods => &["Số tiết", "target_periods"],
            TeacherField::Role => &["Vai trò", "role"],
            TeacherField::WorkDaysPreference => &["work_days_preference"],
        }
    }
}

// ==========================================
// 科目字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectField {
    Name,
    DoublePeriodOnly,
}

impl SubjectField {
    pub const ALL: [SubjectField; 2] = [SubjectField::Name, SubjectField::DoublePeriodOnly];
}

impl LogicalField for SubjectField {
    fn field_name(&self) -> &'static str {
        match self {
            SubjectField::Name => "name",
            SubjectField::DoublePeriodOnly => "double_period_only",
        }
    }

    fn headers(&self) -> &'static [&'static str] {
        match self {
            SubjectField::Name => &["Tên môn", "name", "Môn học"],
            SubjectField::DoublePeriodOnly => &["Chỉ tiết đôi", "is_double_period_only"],
        }
    }
}

// ==========================================
// 班级字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassField {
    Name,
    Grade,
    Session,
    HomeroomTeacherId,
}

impl ClassField {
    pub const ALL: [ClassField; 4] = [
        ClassField::Name,
        ClassField::Grade,
        ClassField::Session,
        ClassField::HomeroomTeacherId,
    ];
}

impl LogicalField for ClassField {
    fn field_name(&self) -> &'static str {
        match self {
            ClassField::Name => "name",
            ClassField::Grade => "grade",
            ClassField::Session => "session",
            ClassField::HomeroomTeacherId => "homeroom_teacher_id",
        }
    }

    fn headers(&self) -> &'static [&'static str] {
        match self {
            ClassField::Name => &["Tên lớp", "name", "Lớp"],
            ClassField::Grade => &["Khối", "grade"],
            ClassField::Session => &["Buổi", "session"],
            ClassField::HomeroomTeacherId => &["GVCN", "homeroom_teacher_id"],
        }
    }
}

// ==========================================
// 分年级课时列名
// ==========================================
pub fn grade_headers(grade: u8, policy: PerGradeHeaderPolicy) -> Vec<String> {
    match policy {
        PerGradeHeaderPolicy::AllSynonyms => vec![
            format!("Khối {}", grade),
            format!("Grade {}", grade),
            format!("grade_{}", grade),
        ],
        PerGradeHeaderPolicy::VietnameseOnly => vec![format!("Khối {}", grade)],
    }
}

/// 各实体的 (字段名, 可接受表头) 列表，用于模板与文档
pub fn field_table(kind: EntityKind) -> Vec<(&'static str, &'static [&'static str])> {
    match kind {
        EntityKind::Teacher => TeacherField::ALL
            .iter()
            .map(|f| (f.field_name(), f.headers()))
            .collect(),
        EntityKind::Subject => SubjectField::ALL
            .iter()
            .map(|f| (f.field_name(), f.headers()))
            .collect(),
        EntityKind::Class => ClassField::ALL
            .iter()
            .map(|f| (f.field_name(), f.headers()))
            .collect(),
    }
}

// ==========================================
// 查找
// ==========================================

/// 按优先级返回第一个"有值"的表头对应值（键存在且文本去空白后非空）
pub fn resolve<'r, F: LogicalField>(row: &'r RawRow, field: F) -> Option<&'r RawValue> {
    resolve_in(row, field.headers().iter().copied())
}

/// 在给定表头序列中按顺序查找第一个有值的单元格
pub fn resolve_in<'r, 'h, I>(row: &'r RawRow, headers: I) -> Option<&'r RawValue>
where
    I: IntoIterator<Item = &'h str>,
{
    headers
        .into_iter()
        .filter_map(|h| row.get(h))
        .find(|v| !v.to_text().trim().is_empty())
}

/// 按顺序返回第一个存在的键（不要求有值）
pub fn first_present<'r, 'h, I>(row: &'r RawRow, headers: I) -> Option<&'r RawValue>
where
    I: IntoIterator<Item = &'h str>,
{
    headers.into_iter().find_map(|h| row.get(h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_id_priority_order() {
        let row = RawRow::from_pairs(2, [("Mã GV", "GV-C"), ("id", "GV-B"), ("ID", "GV-A")]);
        assert_eq!(
            resolve(&row, TeacherField::Id).map(|v| v.to_text()),
            Some("GV-A".to_string())
        );
    }

    #[test]
    fn test_blank_synonym_falls_through() {
        let row = RawRow::from_pairs(2, [("ID", "  "), ("Mã GV", "GV009")]);
        assert_eq!(
            resolve(&row, TeacherField::Id).map(|v| v.to_text()),
            Some("GV009".to_string())
        );
    }

    #[test]
    fn test_missing_field_resolves_none() {
        let row = RawRow::from_pairs(2, [("Tên lớp", "6A1")]);
        assert!(resolve(&row, ClassField::HomeroomTeacherId).is_none());
    }

    #[test]
    fn test_first_present_accepts_empty_value() {
        let row = RawRow::from_pairs(2, [("Khối 9", "")]);
        let headers = grade_headers(9, PerGradeHeaderPolicy::AllSynonyms);
        assert!(first_present(&row, headers.iter().map(String::as_str)).is_some());
        assert!(resolve_in(&row, headers.iter().map(String::as_str)).is_none());
    }

    #[test]
    fn test_grade_headers_policy() {
        assert_eq!(
            grade_headers(10, PerGradeHeaderPolicy::AllSynonyms),
            vec!["Khối 10", "Grade 10", "grade_10"]
        );
        assert_eq!(
            grade_headers(10, PerGradeHeaderPolicy::VietnameseOnly),
            vec!["Khối 10"]
        );
    }

    #[test]
    fn test_field_table_covers_entities() {
        assert_eq!(field_table(EntityKind::Teacher).len(), 9);
        assert_eq!(field_table(EntityKind::Subject).len(), 2);
        let class_table = field_table(EntityKind::Class);
        assert_eq!(class_table[0], ("name", &["Tên lớp", "name", "Lớp"][..]));
    }
}
