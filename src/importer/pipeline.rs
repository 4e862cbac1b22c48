// ==========================================
// 排课系统 - 导入管道
// ==========================================
// 流程: 文件解析 → 规范化 → 逐条提交
// 红线: 阶段严格串行；解析失败时不提交任何记录
// ==========================================

use crate::config::ImportSettings;
use crate::domain::{CandidateRecord, EntityKind, ImportReport};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{FileKind, UniversalFileParser};
use crate::importer::importer_trait::RecordCreator;
use crate::importer::normalizer::Normalizer;
use crate::importer::record_importer::{CancelFlag, RecordImporter};
use tracing::{info, instrument};

pub struct ImportPipeline {
    parser: UniversalFileParser,
    normalizer: Normalizer,
    importer: RecordImporter,
}

impl Default for ImportPipeline {
    fn default() -> Self {
        Self::new(ImportSettings::default())
    }
}

impl ImportPipeline {
    pub fn new(settings: ImportSettings) -> Self {
        Self {
            parser: UniversalFileParser,
            normalizer: Normalizer::new(settings),
            importer: RecordImporter,
        }
    }

    pub fn settings(&self) -> &ImportSettings {
        self.normalizer.settings()
    }

    /// 阶段 1 + 2: 解析并规范化，不提交
    pub fn normalize_bytes(
        &self,
        bytes: &[u8],
        file_kind: FileKind,
        entity: EntityKind,
    ) -> ImportResult<Vec<CandidateRecord>> {
        let rows = self.parser.parse(bytes, file_kind)?;
        info!(file_kind = %file_kind, rows = rows.len(), "文件解析完成");
        Ok(self.normalizer.normalize(&rows, entity))
    }

    /// 预览: 规范化后的前 limit 条记录
    pub fn preview(
        &self,
        bytes: &[u8],
        file_kind: FileKind,
        entity: EntityKind,
        limit: usize,
    ) -> ImportResult<Vec<CandidateRecord>> {
        let mut records = self.normalize_bytes(bytes, file_kind, entity)?;
        records.truncate(limit);
        Ok(records)
    }

    /// 完整导入
    pub async fn run<C>(
        &self,
        bytes: &[u8],
        file_kind: FileKind,
        entity: EntityKind,
        creator: &C,
    ) -> ImportResult<ImportReport>
    where
        C: RecordCreator + ?Sized,
    {
        self.run_with_cancel(bytes, file_kind, entity, creator, &CancelFlag::new())
            .await
    }

    /// 完整导入，支持在记录之间中止
    #[instrument(skip(self, bytes, creator, cancel), fields(byte_len = bytes.len()))]
    pub async fn run_with_cancel<C>(
        &self,
        bytes: &[u8],
        file_kind: FileKind,
        entity: EntityKind,
        creator: &C,
        cancel: &CancelFlag,
    ) -> ImportResult<ImportReport>
    where
        C: RecordCreator + ?Sized,
    {
        let records = self.normalize_bytes(bytes, file_kind, entity)?;
        Ok(self
            .importer
            .import_with_cancel(records, creator, cancel)
            .await)
    }
}
