// ==========================================
// 排课系统 - 记录导入器实现
// ==========================================
// 阶段 3: 候选记录 → 逐条调用创建接口 → 导入报告
// 红线: 严格顺序、每条恰好一次、单条失败不中断批次、不重试
// ==========================================

use crate::domain::{CandidateRecord, ImportOutcome, ImportReport};
use crate::importer::importer_trait::RecordCreator;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// CancelFlag - 中止标记
// ==========================================
// 调用方在任意时刻设置；导入器仅在两条记录之间检查
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ==========================================
// RecordImporter - 记录导入器
// ==========================================
#[derive(Debug, Default)]
pub struct RecordImporter;

impl RecordImporter {
    /// 逐条导入（import(records, createOne)）
    pub async fn import<C>(&self, records: Vec<CandidateRecord>, creator: &C) -> ImportReport
    where
        C: RecordCreator + ?Sized,
    {
        self.import_with_cancel(records, creator, &CancelFlag::new())
            .await
    }

    /// 逐条导入，支持在记录之间中止；已成功创建的记录不回滚
    #[instrument(skip_all, fields(run_id = tracing::field::Empty, total = records.len()))]
    pub async fn import_with_cancel<C>(
        &self,
        records: Vec<CandidateRecord>,
        creator: &C,
        cancel: &CancelFlag,
    ) -> ImportReport
    where
        C: RecordCreator + ?Sized,
    {
        let start_time = Instant::now();
        let started_at = Utc::now();
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        let total_accepted = records.len();
        info!(run_id = %run_id, total = total_accepted, "开始逐条提交");

        let mut outcomes = Vec::with_capacity(total_accepted);
        let mut succeeded = 0usize;
        let mut failed = 0usize;
        let mut cancelled = false;

        for (idx, record) in records.into_iter().enumerate() {
            if cancel.is_cancelled() {
                cancelled = true;
                warn!(
                    processed = idx,
                    remaining = total_accepted - idx,
                    "导入已被中止，剩余记录不再提交"
                );
                break;
            }

            match creator.create(&record).await {
                Ok(()) => {
                    debug!(index = idx, entity = %record.kind(), identity = %record.identity(), "记录创建成功");
                    succeeded += 1;
                    outcomes.push(ImportOutcome::success(record));
                }
                Err(message) => {
                    warn!(
                        index = idx,
                        entity = %record.kind(),
                        identity = %record.identity(),
                        error = %message,
                        "记录创建失败"
                    );
                    failed += 1;
                    outcomes.push(ImportOutcome::failure(record, message));
                }
            }
        }

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            run_id = %run_id,
            total = total_accepted,
            succeeded = succeeded,
            failed = failed,
            cancelled = cancelled,
            elapsed_ms = elapsed_ms,
            "逐条提交完成"
        );

        ImportReport {
            run_id,
            total_accepted,
            succeeded,
            failed,
            cancelled,
            outcomes,
            started_at,
            elapsed_ms,
        }
    }
}

/// 逐条导入（默认导入器）
pub async fn import<C>(records: Vec<CandidateRecord>, creator: &C) -> ImportReport
where
    C: RecordCreator + ?Sized,
{
    RecordImporter.import(records, creator).await
}
