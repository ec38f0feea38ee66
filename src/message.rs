use crate::error::NotifyError;
use crate::fields::TranslatedRecord;
use chrono::{DateTime, FixedOffset};

/// Fixed trailing link/branding block appended to every notification.
const CLOSING: &str =
    "\n\n## [点击访问来源](https://hetrixtools.com)\n\n![logo](https://hetrixtools.com/img/ht_logo.png)";

/// Render a translated record as the Markdown notification body.
///
/// Pure function: name and time lines always appear (time empty when no
/// timestamp), category and status lines only when present, then the fixed
/// closing block. The only failure is an epoch outside chrono's range.
pub fn build_message(record: &TranslatedRecord) -> Result<String, NotifyError> {
    let time = match record.timestamp {
        Some(epoch) => format_timestamp(epoch)?,
        None => String::new(),
    };

    let mut content_parts = vec![
        format!(
            "业务名称: {}",
            record.monitor_name.as_deref().unwrap_or("None")
        ),
        format!("时间: {}", time),
    ];
    if let Some(category) = &record.monitor_category {
        content_parts.push(format!("分类: {}", category));
    }
    if let Some(status) = &record.monitor_status {
        content_parts.push(format!("状态: {}", status));
    }

    Ok(content_parts.join("\n") + CLOSING)
}

/// Epoch seconds rendered in UTC+8 (Asia/Shanghai, no DST).
fn format_timestamp(epoch: i64) -> Result<String, NotifyError> {
    let utc = DateTime::from_timestamp(epoch, 0)
        .ok_or_else(|| NotifyError::Unexpected(anyhow::anyhow!("timestamp {} out of range", epoch)))?;
    let shanghai = FixedOffset::east_opt(8 * 3600).expect("UTC+8 is a valid offset");
    Ok(utc.with_timezone(&shanghai).format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> TranslatedRecord {
        TranslatedRecord {
            monitor_name: Some("API 服务器".to_string()),
            monitor_type: None,
            monitor_category: Some("正常运行时间".to_string()),
            monitor_status: Some("正常".to_string()),
            monitor_id: Some(serde_json::json!(42)),
            monitor_target: Some("https://api.example.com".to_string()),
            timestamp: Some(1_700_000_000),
            monitor_errors: None,
        }
    }

    #[test]
    fn test_build_message_full_record() {
        let message = build_message(&sample_record()).expect("should format");

        assert!(message.contains("业务名称: API 服务器"));
        // 1700000000 UTC = 2023-11-14 22:13:20, +8h = 2023-11-15 06:13:20
        assert!(message.contains("时间: 2023-11-15 06:13:20"));
        assert!(message.contains("分类: 正常运行时间"));
        assert!(message.contains("状态: 正常"));
        assert!(message.ends_with("![logo](https://hetrixtools.com/img/ht_logo.png)"));
    }

    #[test]
    fn test_build_message_line_order() {
        let message = build_message(&sample_record()).expect("should format");
        let lines: Vec<&str> = message.lines().collect();

        assert!(lines[0].starts_with("业务名称:"));
        assert!(lines[1].starts_with("时间:"));
        assert!(lines[2].starts_with("分类:"));
        assert!(lines[3].starts_with("状态:"));
    }

    #[test]
    fn test_build_message_without_timestamp_renders_empty_time() {
        let mut record = sample_record();
        record.timestamp = None;

        let message = build_message(&record).expect("should format");
        assert_eq!(message.lines().nth(1), Some("时间: "));
    }

    #[test]
    fn test_build_message_omits_absent_optional_lines() {
        let mut record = sample_record();
        record.monitor_category = None;
        record.monitor_status = None;

        let message = build_message(&record).expect("should format");
        assert!(!message.contains("分类:"));
        assert!(!message.contains("状态:"));
        assert!(message.contains("点击访问来源"));
    }

    #[test]
    fn test_build_message_out_of_range_timestamp_fails() {
        let mut record = sample_record();
        record.timestamp = Some(i64::MAX);

        let result = build_message(&record);
        assert!(matches!(result, Err(NotifyError::Unexpected(_))));
    }

    #[test]
    fn test_format_timestamp_epoch_zero() {
        assert_eq!(format_timestamp(0).unwrap(), "1970-01-01 08:00:00");
    }
}
