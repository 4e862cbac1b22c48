// ==========================================
// 排课系统 - 规范化器实现（字段映射）
// ==========================================
// 阶段 2: 原始行 → 候选记录
// 职责: 同义词表头 → 逻辑字段 + 类型转换 + 默认值 + 可接受性过滤
// 红线: 过滤掉的行不报错、不计入失败；输出顺序与输入一致
// ==========================================

use crate::config::ImportSettings;
use crate::domain::{
    CandidateRecord, ClassCandidate, EntityKind, RawRow, SubjectCandidate, TeacherCandidate,
};
use crate::importer::header_synonyms::{
    first_present, grade_headers, resolve, resolve_in, ClassField, LogicalField, SubjectField,
    TeacherField,
};
use crate::importer::value_cleaner::ValueCleaner;
use std::collections::BTreeMap;
use tracing::{debug, info};

pub struct Normalizer {
    settings: ImportSettings,
    cleaner: ValueCleaner,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(ImportSettings::default())
    }
}

impl Normalizer {
    pub fn new(settings: ImportSettings) -> Self {
        Self {
            settings,
            cleaner: ValueCleaner,
        }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// 规范化整批原始行（normalize(rows, entityKind)）
    pub fn normalize(&self, rows: &[RawRow], kind: EntityKind) -> Vec<CandidateRecord> {
        let records: Vec<CandidateRecord> = rows
            .iter()
            .filter_map(|row| self.normalize_row(row, kind))
            .collect();

        info!(
            entity = %kind,
            total_rows = rows.len(),
            accepted = records.len(),
            dropped = rows.len() - records.len(),
            "规范化完成"
        );
        records
    }

    /// 规范化单行；标识字段为空时返回 None
    pub fn normalize_row(&self, row: &RawRow, kind: EntityKind) -> Option<CandidateRecord> {
        let record = match kind {
            EntityKind::Teacher => CandidateRecord::Teacher(self.map_teacher(row)),
            EntityKind::Subject => CandidateRecord::Subject(self.map_subject(row)),
            EntityKind::Class => CandidateRecord::Class(self.map_class(row)),
        };

        if record.is_acceptable() {
            Some(record)
        } else {
            debug!(row_number = row.row_number, entity = %kind, "标识字段为空，跳过该行");
            None
        }
    }

    fn map_teacher(&self, row: &RawRow) -> TeacherCandidate {
        let c = &self.cleaner;

        // 负数课时视为无效
        let target_periods = c
            .parse_int(resolve(row, TeacherField::TargetPeriods))
            .and_then(|n| u32::try_from(n).ok());

        TeacherCandidate {
            id: c.clean_text(resolve(row, TeacherField::Id)).unwrap_or_default(),
            name: c.clean_text(resolve(row, TeacherField::Name)).unwrap_or_default(),
            email: c.clean_text(resolve(row, TeacherField::Email)),
            professional_group: c.clean_text(resolve(row, TeacherField::ProfessionalGroup)),
            primary_subjects: c.split_list(resolve(row, TeacherField::Subjects)),
            secondary_subjects: c.split_list(resolve(row, TeacherField::SecondarySubjects)),
            target_periods,
            role: c.clean_text(resolve(row, TeacherField::Role)),
            work_days_preference: c
                .parse_int(resolve(row, TeacherField::WorkDaysPreference))
                .unwrap_or(0),
            // 以下字段从不从文件导入
            locked: false,
            busy_slots: Vec::new(),
        }
    }

    fn map_subject(&self, row: &RawRow) -> SubjectCandidate {
        let c = &self.cleaner;

        SubjectCandidate {
            name: c.clean_text(resolve(row, SubjectField::Name)).unwrap_or_default(),
            periods_per_grade: self.periods_per_grade(row),
            double_period_only: self.double_period_only(row),
        }
    }

    /// 任一同义列为真即为真（各列独立判断）
    fn double_period_only(&self, row: &RawRow) -> bool {
        SubjectField::DoublePeriodOnly
            .headers()
            .iter()
            .any(|h| self.cleaner.parse_bool(row.get(h)))
    }

    /// 分年级课时: 取第一个有值的同义列；同义列均为空时记 0；无列的年级不出现
    fn periods_per_grade(&self, row: &RawRow) -> BTreeMap<String, u32> {
        let mut periods = BTreeMap::new();
        for grade in self.settings.grades() {
            let headers = grade_headers(grade, self.settings.per_grade_headers);
            let value = resolve_in(row, headers.iter().map(String::as_str))
                .or_else(|| first_present(row, headers.iter().map(String::as_str)));
            if let Some(value) = value {
                let count = self
                    .cleaner
                    .parse_int(Some(value))
                    .and_then(|n| u32::try_from(n).ok())
                    .unwrap_or(0);
                periods.insert(grade.to_string(), count);
            }
        }
        periods
    }

    fn map_class(&self, row: &RawRow) -> ClassCandidate {
        let c = &self.cleaner;

        // 超出已知年级范围视为无效
        let grade = c
            .parse_int(resolve(row, ClassField::Grade))
            .filter(|g| self.settings.is_known_grade(*g))
            .and_then(|g| u8::try_from(g).ok());

        let session_value = resolve(row, ClassField::Session);
        let session = c.parse_session(session_value);
        if session.is_none() {
            if let Some(raw) = session_value {
                debug!(row_number = row.row_number, value = %raw, "无法识别的上课时段，按缺失处理");
            }
        }

        ClassCandidate {
            name: c.clean_text(resolve(row, ClassField::Name)).unwrap_or_default(),
            grade,
            session,
            homeroom_teacher_id: c.clean_text(resolve(row, ClassField::HomeroomTeacherId)),
            locked: false,
            fixed_off_slots: Vec::new(),
        }
    }
}

/// 使用默认配置规范化
pub fn normalize(rows: &[RawRow], kind: EntityKind) -> Vec<CandidateRecord> {
    Normalizer::default().normalize(rows, kind)
}
