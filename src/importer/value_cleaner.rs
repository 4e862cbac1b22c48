// ==========================================
// 排课系统 - 值清洗器实现
// ==========================================
// 职责: TRIM / 空值标准化 / 列表拆分 / 整数与布尔转换
// ==========================================

use crate::domain::{RawValue, Session};

/// 布尔真值文本（去空白、不区分大小写后比较）
const TRUE_TOKENS: &[&str] = &["có", "true"];

pub struct ValueCleaner;

impl ValueCleaner {
    /// 文本字段: 转文本 + TRIM，空串视为缺失
    pub fn clean_text(&self, value: Option<&RawValue>) -> Option<String> {
        value.and_then(|v| {
            let text = v.to_text();
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 列表字段: 按逗号拆分，去空白，去空项，去重（保持首次出现顺序）
    pub fn split_list(&self, value: Option<&RawValue>) -> Vec<String> {
        let text = match value {
            Some(v) => v.to_text(),
            None => return Vec::new(),
        };

        let mut items: Vec<String> = Vec::new();
        for piece in text.split(',') {
            let piece = piece.trim();
            if piece.is_empty() || items.iter().any(|s| s == piece) {
                continue;
            }
            items.push(piece.to_string());
        }
        items
    }

    /// 整数字段: 取前导整数（"4.5" → 4，"12 tiết" → 12）；无数字返回 None
    pub fn parse_int(&self, value: Option<&RawValue>) -> Option<i64> {
        match value? {
            RawValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            RawValue::Number(_) => None,
            RawValue::Bool(_) => None,
            RawValue::Text(s) => parse_leading_int(s),
        }
    }

    /// 布尔字段: 识别固定真值集合，其余一律为 false
    pub fn parse_bool(&self, value: Option<&RawValue>) -> bool {
        match value {
            Some(RawValue::Bool(b)) => *b,
            Some(RawValue::Text(s)) => {
                let lowered = s.trim().to_lowercase();
                TRUE_TOKENS.contains(&lowered.as_str())
            }
            _ => false,
        }
    }

    /// 上课时段: 无法识别视为缺失
    pub fn parse_session(&self, value: Option<&RawValue>) -> Option<Session> {
        self.clean_text(value)
            .and_then(|label| Session::parse_label(&label))
    }
}

/// 前导整数解析: 可选空白 + 可选符号 + 十进制数字
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
