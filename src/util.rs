use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use serde_json::{Map, Value};

use crate::errors::{ExportError, Result};
use crate::models::ticket::DayWindow;

// 日期转换工具
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")?)
}

fn to_millis<Z: TimeZone>(naive: &NaiveDateTime, tz: &Z) -> Result<i64> {
    // 夏令时重叠时取较早的时刻，落在夏令时缺口中的时刻无法表示
    tz.from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| ExportError::WindowError(format!("{} does not exist in the configured time zone", naive)))
}

/// 计算某一天在指定时区下的起止毫秒时间戳
pub fn day_window<Z: TimeZone>(date: NaiveDate, tz: &Z) -> Result<DayWindow> {
    let start = date
        .and_hms_milli_opt(0, 0, 0, 0)
        .ok_or_else(|| ExportError::WindowError(format!("Invalid start of day for {}", date)))?;
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| ExportError::WindowError(format!("Invalid end of day for {}", date)))?;

    Ok(DayWindow {
        date,
        start_ms: to_millis(&start, tz)?,
        end_ms: to_millis(&end, tz)?,
    })
}

/// 用于日志的工单号，缺失时为 "N/A"
pub fn ticket_id_label(ticket: &Map<String, Value>) -> String {
    match ticket.get("ticket_id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => "N/A".to_string(),
        Some(other) => other.to_string(),
    }
}

/// JSON 值的类型名称，用于日志
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
