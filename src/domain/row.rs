// ==========================================
// 排课系统 - 原始行模型
// ==========================================
// 用途: 导入管道中间产物（文件解析 → 此结构 → 规范化）
// 生命周期: 仅在单次导入流程内
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ==========================================
// RawValue - 原始单元格值
// ==========================================
// CSV 全部为 Text；工作簿可能出现 Number / Bool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl RawValue {
    /// 转为文本（数字按最短形式输出: 4.0 → "4"）
    pub fn to_text(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::Number(n) => n.to_string(),
            RawValue::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

// ==========================================
// RawRow - 原始行（列名 → 值）
// ==========================================
// 列名保持源文件表头原样（仅去除首尾空白），不做任何含义解释
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub fields: HashMap<String, RawValue>,

    // 元信息: 源文件行号（表头为第 1 行）
    pub row_number: usize,
}

impl RawRow {
    pub fn new(row_number: usize) -> Self {
        Self {
            fields: HashMap::new(),
            row_number,
        }
    }

    /// 测试/构造辅助: 由 (列名, 值) 列表创建
    pub fn from_pairs<K, V, I>(row_number: usize, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<RawValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            row_number,
        }
    }

    pub fn insert(&mut self, header: impl Into<String>, value: RawValue) {
        self.fields.insert(header.into(), value);
    }

    pub fn get(&self, header: &str) -> Option<&RawValue> {
        self.fields.get(header)
    }

    pub fn contains(&self, header: &str) -> bool {
        self.fields.contains_key(header)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 所有值是否均为空白
    pub fn is_blank(&self) -> bool {
        self.fields
            .values()
            .all(|v| matches!(v, RawValue::Text(s) if s.trim().is_empty()))
    }
}
