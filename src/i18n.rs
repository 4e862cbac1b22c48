// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持越南语（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::ImportReport;

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"vi" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use timetable_import::i18n::t;
/// let msg = t("template.teacher_title");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use timetable_import::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/giao_vien.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 导入结果摘要（全部成功 / 部分失败 / 中止）
pub fn summary_message(report: &ImportReport) -> String {
    let succeeded = report.succeeded.to_string();
    let failed = report.failed.to_string();

    let mut message = if report.has_failures() {
        t_with_args(
            "import.summary_partial",
            &[("succeeded", succeeded.as_str()), ("failed", failed.as_str())],
        )
    } else {
        t_with_args("import.summary_ok", &[("succeeded", succeeded.as_str())])
    };

    if report.cancelled {
        let processed = report.processed().to_string();
        let total = report.total_accepted.to_string();
        message.push('\n');
        message.push_str(&t_with_args(
            "import.cancelled",
            &[("processed", processed.as_str()), ("total", total.as_str())],
        ));
    }
    message
}

/// 失败明细（每条一行）
pub fn failure_lines(report: &ImportReport) -> Vec<String> {
    report
        .failures()
        .map(|outcome| {
            t_with_args(
                "import.failure_line",
                &[
                    ("identity", outcome.record.identity()),
                    ("error", outcome.error_message.as_deref().unwrap_or("")),
                ],
            )
        })
        .collect()
}
