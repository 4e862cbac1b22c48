// ==========================================
// 排课系统 - JSON Lines 导出接收器
// ==========================================
// 用途: 离线模式下代替远程创建接口，每条记录写为一行请求体 JSON
// ==========================================

use crate::domain::CandidateRecord;
use crate::importer::{ImportError, ImportResult, RecordCreator};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub struct JsonLinesCreator {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesCreator {
    /// 创建（覆盖）输出文件
    pub async fn create<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)
            .await
            .map_err(|e| ImportError::from_io(&path, e))?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordCreator for JsonLinesCreator {
    async fn create(&self, record: &CandidateRecord) -> Result<(), String> {
        let payload = record.payload().map_err(|e| e.to_string())?;
        let mut line = serde_json::to_string(&payload).map_err(|e| e.to_string())?;
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| format!("写入 {} 失败: {}", self.path.display(), e))?;
        file.flush().await.map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubjectCandidate;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn subject(name: &str, grade6: u32) -> CandidateRecord {
        let mut periods = BTreeMap::new();
        periods.insert("6".to_string(), grade6);
        CandidateRecord::Subject(SubjectCandidate {
            name: name.to_string(),
            periods_per_grade: periods,
            double_period_only: false,
        })
    }

    #[tokio::test]
    async fn test_writes_one_line_per_record() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("subjects.jsonl");
        let sink = JsonLinesCreator::create(&out).await.unwrap();

        sink.create(&subject("Toán", 4)).await.unwrap();
        sink.create(&subject("Văn", 4)).await.unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["name"], "Toán");
        assert_eq!(first["periods_per_week"]["6"], 4);
        assert_eq!(first["is_double_period_only"], false);
    }

    #[tokio::test]
    async fn test_create_in_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("missing").join("out.jsonl");
        let result = JsonLinesCreator::create(&out).await;
        match result {
            Err(ImportError::FileNotFound(path)) => assert!(path.ends_with("out.jsonl"), "{path}"),
            Err(other) => panic!("期望文件不存在错误，实际 {other:?}"),
            Ok(_) => panic!("期望创建失败"),
        }
    }
}
