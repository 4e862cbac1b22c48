// ==========================================
// 排课系统 - 导入接口 Trait
// ==========================================
// 职责: 定义导入管道各阶段的接口（不包含实现）
// 管道: 文件解析 → 规范化 → 逐条提交
// ==========================================

use crate::domain::{CandidateRecord, RawRow};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::future::Future;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 1）
// 实现者: CsvParser, WorkbookParser
pub trait FileParser: Send + Sync {
    /// 解析字节流为原始行记录
    ///
    /// # 参数
    /// - bytes: 文件完整内容
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表（保持文件行序）
    /// - Err: 解析错误（不返回部分结果）
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// RecordCreator Trait
// ==========================================
// 用途: 单条记录创建接口（由调用方注入，负责实际远程提交）
// 实现者: DispatchingCreator, JsonLinesCreator, 测试桩
//
// # 约定
// - 每条记录恰好调用一次，顺序执行
// - 失败返回可读错误信息，不中断批次
// - 超时由实现方自行控制
#[async_trait]
pub trait RecordCreator: Send + Sync {
    async fn create(&self, record: &CandidateRecord) -> Result<(), String>;
}

// ==========================================
// FnCreator - 闭包适配器
// ==========================================
// 用途: 以 async 闭包作为 RecordCreator（记录按值传入）
pub struct FnCreator<F>(pub F);

#[async_trait]
impl<F, Fut> RecordCreator for FnCreator<F>
where
    F: Fn(CandidateRecord) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), String>> + Send + 'static,
{
    async fn create(&self, record: &CandidateRecord) -> Result<(), String> {
        (self.0)(record.clone()).await
    }
}
