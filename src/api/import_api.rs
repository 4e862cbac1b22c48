// ==========================================
// 排课系统 - 批量导入API
// ==========================================
// 职责: 封装按路径导入、预览、模板下载等功能
// 说明: 实际创建操作由调用方通过 RecordCreator / EntityCreateApi 注入
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportSettings;
use crate::domain::{
    CandidateRecord, ClassCandidate, EntityKind, ImportReport, SubjectCandidate, TeacherCandidate,
};
use crate::i18n::t;
use crate::importer::header_synonyms::field_table;
use crate::importer::{CancelFlag, FileKind, ImportError, ImportPipeline, RecordCreator};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument};

/// 预览响应
#[derive(Debug, Clone, Serialize)]
pub struct ImportPreview {
    /// 实体类型
    pub entity: EntityKind,
    /// 文件类型（csv / workbook）
    pub file_kind: String,
    /// 通过规范化的记录总数
    pub total_accepted: usize,
    /// 前 N 条记录
    pub records: Vec<CandidateRecord>,
}

/// 导入模板（列名 + 示例行）
#[derive(Debug, Clone, Serialize)]
pub struct ImportTemplate {
    pub entity: EntityKind,
    pub title: String,
    pub columns: Vec<&'static str>,
    pub example: Vec<&'static str>,
    /// 每个字段可识别的全部表头（字段名, 表头列表）
    pub accepted_headers: Vec<(&'static str, &'static [&'static str])>,
}

pub struct ImportApi {
    pipeline: ImportPipeline,
}

impl Default for ImportApi {
    fn default() -> Self {
        Self::new(ImportSettings::default())
    }
}

impl ImportApi {
    pub fn new(settings: ImportSettings) -> Self {
        Self {
            pipeline: ImportPipeline::new(settings),
        }
    }

    /// 从环境变量指定的配置文件创建
    pub fn from_env() -> Self {
        Self::new(ImportSettings::from_env())
    }

    pub fn settings(&self) -> &ImportSettings {
        self.pipeline.settings()
    }

    /// 按路径导入文件
    ///
    /// # 参数
    /// - file_path: 文件路径（按扩展名识别格式）
    /// - entity: 目标实体类型
    /// - creator: 单条创建接口
    ///
    /// # 返回
    /// - Ok(ImportReport): 导入报告（单条失败记录在报告中）
    /// - Err(ApiError): 文件不存在/格式不支持/解析失败
    pub async fn import_file<C>(
        &self,
        file_path: &str,
        entity: EntityKind,
        creator: &C,
    ) -> ApiResult<ImportReport>
    where
        C: RecordCreator + ?Sized,
    {
        self.import_file_with_cancel(file_path, entity, creator, &CancelFlag::new())
            .await
    }

    #[instrument(skip(self, creator, cancel))]
    pub async fn import_file_with_cancel<C>(
        &self,
        file_path: &str,
        entity: EntityKind,
        creator: &C,
        cancel: &CancelFlag,
    ) -> ApiResult<ImportReport>
    where
        C: RecordCreator + ?Sized,
    {
        let (bytes, file_kind) = read_source(file_path).await?;
        let report = self
            .pipeline
            .run_with_cancel(&bytes, file_kind, entity, creator, cancel)
            .await?;

        info!(
            run_id = %report.run_id,
            succeeded = report.succeeded,
            failed = report.failed,
            "文件导入完成"
        );
        Ok(report)
    }

    /// 预览前 rows 条规范化记录（rows 为空时取配置值）
    pub async fn preview_file(
        &self,
        file_path: &str,
        entity: EntityKind,
        rows: Option<usize>,
    ) -> ApiResult<ImportPreview> {
        let limit = rows.unwrap_or(self.settings().preview_rows);
        if limit == 0 {
            return Err(ApiError::InvalidInput("预览行数必须大于 0".to_string()));
        }

        let (bytes, file_kind) = read_source(file_path).await?;
        let mut records = self.pipeline.normalize_bytes(&bytes, file_kind, entity)?;
        let total_accepted = records.len();
        records.truncate(limit);

        Ok(ImportPreview {
            entity,
            file_kind: file_kind.to_string(),
            total_accepted,
            records,
        })
    }

    /// 导入模板
    pub fn template(&self, entity: EntityKind) -> ImportTemplate {
        let (title_key, columns, example) = match entity {
            EntityKind::Teacher => (
                "template.teacher_title",
                vec!["ID", "Họ tên", "Email", "Tổ CM", "Môn dạy", "Số tiết"],
                vec!["GV001", "Nguyễn Văn A", "nguyenvana@example.com", "Toán", "Toán, Lý", "20"],
            ),
            EntityKind::Subject => (
                "template.subject_title",
                vec!["Tên môn", "Khối 6", "Khối 7", "Khối 8", "Chỉ tiết đôi"],
                vec!["Toán", "4", "4", "4", "Không"],
            ),
            EntityKind::Class => (
                "template.class_title",
                vec!["Tên lớp", "Khối", "Buổi", "GVCN"],
                vec!["6A1", "6", "Sáng", "GV001"],
            ),
        };

        ImportTemplate {
            entity,
            title: t(title_key),
            columns,
            example,
            accepted_headers: field_table(entity),
        }
    }

    /// 模板渲染为 CSV（表头 + 示例行）
    pub fn template_csv(&self, entity: EntityKind) -> ApiResult<String> {
        let template = self.template(entity);
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(&template.columns)
            .and_then(|_| writer.write_record(&template.example))
            .map_err(|e| ApiError::InternalError(format!("模板生成失败: {}", e)))?;

        let bytes = writer
            .into_inner()
            .map_err(|e| ApiError::InternalError(format!("模板生成失败: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| ApiError::InternalError(e.to_string()))
    }
}

/// 读取文件内容并识别格式
async fn read_source(file_path: &str) -> ApiResult<(Vec<u8>, FileKind)> {
    let file_kind = FileKind::from_path(file_path)?;
    let bytes = tokio::fs::read(file_path)
        .await
        .map_err(|e| ImportError::from_io(file_path, e))?;
    Ok((bytes, file_kind))
}

// ==========================================
// EntityCreateApi - 分实体创建接口
// ==========================================
// 用途: 远程服务的三个创建端点（教师/科目/班级）
#[async_trait]
pub trait EntityCreateApi: Send + Sync {
    async fn create_teacher(&self, teacher: &TeacherCandidate) -> Result<(), String>;
    async fn create_subject(&self, subject: &SubjectCandidate) -> Result<(), String>;
    async fn create_class(&self, class: &ClassCandidate) -> Result<(), String>;
}

/// 按记录类型分派到对应创建端点
pub struct DispatchingCreator<A> {
    api: A,
}

impl<A: EntityCreateApi> DispatchingCreator<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn inner(&self) -> &A {
        &self.api
    }
}

#[async_trait]
impl<A: EntityCreateApi> RecordCreator for DispatchingCreator<A> {
    async fn create(&self, record: &CandidateRecord) -> Result<(), String> {
        match record {
            CandidateRecord::Teacher(teacher) => self.api.create_teacher(teacher).await,
            CandidateRecord::Subject(subject) => self.api.create_subject(subject).await,
            CandidateRecord::Class(class) => self.api.create_class(class).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::Builder;

    #[derive(Default)]
    struct MockEntityApi {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EntityCreateApi for MockEntityApi {
        async fn create_teacher(&self, teacher: &TeacherCandidate) -> Result<(), String> {
            self.calls.lock().unwrap().push(format!("teacher:{}", teacher.id));
            Ok(())
        }

        async fn create_subject(&self, subject: &SubjectCandidate) -> Result<(), String> {
            self.calls.lock().unwrap().push(format!("subject:{}", subject.name));
            Ok(())
        }

        async fn create_class(&self, class: &ClassCandidate) -> Result<(), String> {
            self.calls.lock().unwrap().push(format!("class:{}", class.name));
            Err("Lớp đã tồn tại".to_string())
        }
    }

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_import_file_dispatches_by_entity() {
        let file = write_temp(".csv", "Tên lớp,Khối\n6A1,6\n6A2,6\n");
        let creator = DispatchingCreator::new(MockEntityApi::default());

        let report = ImportApi::default()
            .import_file(file.path().to_str().unwrap(), EntityKind::Class, &creator)
            .await
            .unwrap();

        assert_eq!(report.total_accepted, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(
            *creator.inner().calls.lock().unwrap(),
            vec!["class:6A1", "class:6A2"]
        );
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let creator = DispatchingCreator::new(MockEntityApi::default());
        let result = ImportApi::default()
            .import_file("/nonexistent/giao_vien.csv", EntityKind::Teacher, &creator)
            .await;

        match result {
            Err(ApiError::Import(ImportError::FileNotFound(path))) => {
                assert_eq!(path, "/nonexistent/giao_vien.csv");
            }
            other => panic!("期望文件不存在错误，实际 {:?}", other.map(|r| r.succeeded)),
        }
    }

    #[tokio::test]
    async fn test_import_directory_is_read_error_with_path() {
        let dir = Builder::new().suffix(".csv").tempdir().unwrap();
        let dir_path = dir.path().to_str().unwrap().to_string();
        let creator = DispatchingCreator::new(MockEntityApi::default());

        let result = ImportApi::default()
            .import_file(&dir_path, EntityKind::Teacher, &creator)
            .await;

        match result {
            Err(ApiError::Import(ImportError::FileReadError(message))) => {
                assert!(message.starts_with(&dir_path), "{message}");
            }
            other => panic!("期望文件读取错误，实际 {:?}", other.map(|r| r.succeeded)),
        }
    }

    #[tokio::test]
    async fn test_import_unsupported_extension() {
        let file = write_temp(".txt", "ID\nGV001\n");
        let creator = DispatchingCreator::new(MockEntityApi::default());
        let result = ImportApi::default()
            .import_file(file.path().to_str().unwrap(), EntityKind::Teacher, &creator)
            .await;

        assert!(matches!(
            result,
            Err(ApiError::Import(ImportError::UnsupportedFormat(_)))
        ));
    }

    #[tokio::test]
    async fn test_preview_file() {
        let file = write_temp(
            ".csv",
            "Tên môn,Khối 6\nToán,4\nVăn,4\nAnh,3\n,2\n",
        );
        let preview = ImportApi::default()
            .preview_file(file.path().to_str().unwrap(), EntityKind::Subject, Some(2))
            .await
            .unwrap();

        assert_eq!(preview.total_accepted, 3);
        assert_eq!(preview.records.len(), 2);
        assert_eq!(preview.file_kind, "csv");
    }

    #[tokio::test]
    async fn test_preview_zero_rows_rejected() {
        let file = write_temp(".csv", "Tên môn\nToán\n");
        let result = ImportApi::default()
            .preview_file(file.path().to_str().unwrap(), EntityKind::Subject, Some(0))
            .await;

        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_template_columns() {
        let api = ImportApi::default();
        let template = api.template(EntityKind::Class);
        assert_eq!(template.columns, vec!["Tên lớp", "Khối", "Buổi", "GVCN"]);
        assert_eq!(template.columns.len(), template.example.len());
    }

    #[test]
    fn test_template_lists_accepted_headers() {
        let api = ImportApi::default();

        let teacher = api.template(EntityKind::Teacher);
        assert_eq!(teacher.accepted_headers.len(), 9);
        assert_eq!(teacher.accepted_headers[0], ("id", &["ID", "id", "Mã GV"][..]));

        // 模板列均为可识别的表头
        let subject = api.template(EntityKind::Subject);
        let known: Vec<&str> = subject
            .accepted_headers
            .iter()
            .flat_map(|(_, headers)| headers.iter().copied())
            .collect();
        assert!(known.contains(&"Tên môn"));
        assert!(known.contains(&"Chỉ tiết đôi"));
    }

    #[test]
    fn test_template_csv_round_trips_through_importer() {
        let api = ImportApi::default();
        let csv_text = api.template_csv(EntityKind::Teacher).unwrap();
        assert!(csv_text.starts_with("ID,Họ tên,Email,Tổ CM,Môn dạy,Số tiết\n"));

        let records = api
            .pipeline
            .normalize_bytes(csv_text.as_bytes(), FileKind::Csv, EntityKind::Teacher)
            .unwrap();
        assert_eq!(records.len(), 1);
        match &records[0] {
            CandidateRecord::Teacher(teacher) => {
                assert_eq!(teacher.id, "GV001");
                assert_eq!(teacher.primary_subjects, vec!["Toán", "Lý"]);
                assert_eq!(teacher.target_periods, Some(20));
            }
            other => panic!("期望教师记录，实际 {:?}", other.kind()),
        }
    }
}
