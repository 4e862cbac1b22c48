// ==========================================
// 排课系统 - 文件解析器实现
// ==========================================
// 阶段 1: 字节流 → 原始行（列名 → 值）
// 支持: CSV / 工作簿（xlsx/xlsm/xlsb/xls/ods，仅读取第一个工作表）
// 红线: 不解释字段含义；解析失败时不返回部分结果
// ==========================================

use crate::domain::{RawRow, RawValue};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ==========================================
// FileKind - 文件类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Csv,
    Workbook,
}

impl FileKind {
    /// 根据扩展名判断文件类型（不区分大小写，可带前导点）
    pub fn from_extension(ext: &str) -> ImportResult<Self> {
        let ext = ext.trim().trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "csv" => Ok(FileKind::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(FileKind::Workbook),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::from_extension(ext)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Csv => write!(f, "csv"),
            FileKind::Workbook => write!(f, "workbook"),
        }
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        // 读取表头（空表头列忽略）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);

            let mut row = RawRow::new(row_number);
            for (col_idx, value) in record.iter().enumerate() {
                match headers.get(col_idx) {
                    Some(header) if !header.is_empty() => {
                        row.insert(header.clone(), RawValue::Text(value.to_string()));
                    }
                    _ => {}
                }
            }

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }

            records.push(row);
        }

        Ok(records)
    }
}

// ==========================================
// Workbook Parser 实现
// ==========================================
pub struct WorkbookParser;

impl FileParser for WorkbookParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        // 格式由内容自动识别
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        // 仅读取第一个 sheet
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::WorkbookParseError("工作簿无工作表".to_string()))??;

        let start_row = range.start().map(|(r, _)| r as usize).unwrap_or(0);

        // 提取表头（第一行）；空工作表返回空结果
        let mut rows = range.rows();
        let header_row = match rows.next() {
            Some(r) => r,
            None => return Ok(Vec::new()),
        };

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (offset, data_row) in rows.enumerate() {
            // 行号: 表头所在行 + 1 + offset，按 1 起计
            let mut row = RawRow::new(start_row + offset + 2);

            for (col_idx, cell) in data_row.iter().enumerate() {
                let header = match headers.get(col_idx) {
                    Some(h) if !h.is_empty() => h,
                    _ => continue,
                };
                // 空单元格不产生键
                if let Some(value) = cell_to_raw_value(cell) {
                    row.insert(header.clone(), value);
                }
            }

            if row.is_blank() {
                continue;
            }

            records.push(row);
        }

        Ok(records)
    }
}

fn cell_to_raw_value(cell: &Data) -> Option<RawValue> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(RawValue::Text(s.clone())),
        Data::Float(f) => Some(RawValue::Number(*f)),
        Data::Int(i) => Some(RawValue::Number(*i as f64)),
        Data::Bool(b) => Some(RawValue::Bool(*b)),
        // 日期按 Excel 序列号处理
        Data::DateTime(dt) => Some(RawValue::Number(dt.as_f64())),
        other => Some(RawValue::Text(other.to_string())),
    }
}

// ==========================================
// 通用文件解析器（按文件类型分派）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse(&self, bytes: &[u8], kind: FileKind) -> ImportResult<Vec<RawRow>> {
        let rows = match kind {
            FileKind::Csv => CsvParser.parse_bytes(bytes)?,
            FileKind::Workbook => WorkbookParser.parse_bytes(bytes)?,
        };
        debug!(file_kind = %kind, rows = rows.len(), "文件解析完成");
        Ok(rows)
    }
}

/// 解析字节流（parse(fileBytes, fileKind)）
pub fn parse(bytes: &[u8], kind: FileKind) -> ImportResult<Vec<RawRow>> {
    UniversalFileParser.parse(bytes, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn text(row: &RawRow, header: &str) -> Option<String> {
        row.get(header).map(|v| v.to_text())
    }

    #[test]
    fn test_file_kind_from_extension() {
        assert_eq!(FileKind::from_extension("csv").unwrap(), FileKind::Csv);
        assert_eq!(FileKind::from_extension(".XLSX").unwrap(), FileKind::Workbook);
        assert_eq!(FileKind::from_extension("xls").unwrap(), FileKind::Workbook);
        assert_eq!(FileKind::from_path("data/gv.ods").unwrap(), FileKind::Workbook);
        assert!(matches!(
            FileKind::from_extension("pdf"),
            Err(ImportError::UnsupportedFormat(_))
        ));
        assert!(FileKind::from_path("no_extension").is_err());
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let data = "ID,Họ tên,Môn dạy\nGV001,Nguyễn Văn A,\"Toán, Lý\"\nGV002,Trần Thị B,Văn\n";
        let rows = CsvParser.parse_bytes(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(text(&rows[0], "ID"), Some("GV001".to_string()));
        assert_eq!(text(&rows[0], "Môn dạy"), Some("Toán, Lý".to_string()));
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[1].row_number, 3);
    }

    #[test]
    fn test_csv_parser_skip_blank_rows() {
        let data = "ID,Họ tên\nGV001,A\n\n,\n  ,  \nGV002,B\n";
        let rows = CsvParser.parse_bytes(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(text(&rows[1], "ID"), Some("GV002".to_string()));
    }

    #[test]
    fn test_csv_parser_strips_bom_and_trims_headers() {
        let mut data = UTF8_BOM.to_vec();
        data.extend_from_slice(" ID , Họ tên \nGV001, A \n".as_bytes());
        let rows = CsvParser.parse_bytes(&data).unwrap();

        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("ID"));
        // 值保持原样，由规范化阶段去除空白
        assert_eq!(text(&rows[0], "Họ tên"), Some(" A ".to_string()));
    }

    #[test]
    fn test_csv_parser_ragged_rows() {
        let data = "ID,Họ tên,Email\nGV001,A\nGV002,B,b@example.com,extra\n";
        let rows = CsvParser.parse_bytes(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert!(!rows[0].contains("Email"));
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn test_csv_parser_invalid_utf8_fails_whole_file() {
        let mut data = b"ID,Name\nGV001,A\n".to_vec();
        data.extend_from_slice(b"GV002,\xFF\xFE\n");
        let result = CsvParser.parse_bytes(&data);

        assert!(matches!(result, Err(ImportError::CsvParseError(_))));
    }

    #[test]
    fn test_csv_parser_header_only() {
        let rows = CsvParser.parse_bytes("ID,Họ tên\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_workbook_parser_first_sheet_only() {
        let mut workbook = Workbook::new();
        {
            let sheet = workbook.add_worksheet();
            sheet.write_string(0, 0, "Tên môn").unwrap();
            sheet.write_string(0, 1, "Khối 6").unwrap();
            sheet.write_string(0, 2, "Chỉ tiết đôi").unwrap();
            sheet.write_string(1, 0, "Toán").unwrap();
            sheet.write_number(1, 1, 4).unwrap();
            sheet.write_string(1, 2, "Có").unwrap();
            // 第 3 行 B 列留空
            sheet.write_string(2, 0, "Văn").unwrap();
        }
        {
            let sheet = workbook.add_worksheet();
            sheet.write_string(0, 0, "Tên môn").unwrap();
            sheet.write_string(1, 0, "Không được đọc").unwrap();
        }
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = WorkbookParser.parse_bytes(&bytes).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Khối 6"), Some(&RawValue::Number(4.0)));
        assert_eq!(text(&rows[0], "Chỉ tiết đôi"), Some("Có".to_string()));
        assert_eq!(rows[0].row_number, 2);
        // 空单元格不产生键
        assert!(!rows[1].contains("Khối 6"));
        assert!(!rows[1].contains("Chỉ tiết đôi"));
    }

    #[test]
    fn test_workbook_parser_skips_empty_rows() {
        let mut workbook = Workbook::new();
        {
            let sheet = workbook.add_worksheet();
            sheet.write_string(0, 0, "Tên lớp").unwrap();
            sheet.write_string(1, 0, "6A1").unwrap();
            sheet.write_string(3, 0, "6A2").unwrap();
        }
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = WorkbookParser.parse_bytes(&bytes).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].row_number, 4);
    }

    #[test]
    fn test_workbook_parser_garbage_bytes() {
        let result = WorkbookParser.parse_bytes(b"definitely not a workbook");
        assert!(matches!(result, Err(ImportError::WorkbookParseError(_))));
    }

    #[test]
    fn test_universal_parser_dispatch() {
        let rows = parse("Tên lớp\n6A1\n".as_bytes(), FileKind::Csv).unwrap();
        assert_eq!(rows.len(), 1);

        let result = parse("Tên lớp\n6A1\n".as_bytes(), FileKind::Workbook);
        assert!(result.is_err());
    }
}
