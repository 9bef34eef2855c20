use crate::config::Config;
use crate::errors::{ExportError, Result};
use crate::models::ticket::{DateRange, DayStatus, DayWindow, ExportReport};
use crate::sources::base::TicketSource;
use crate::util;
use chrono::{Local, NaiveDate};
use log::{error, info, warn};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// 单日响应的分类结果
#[derive(Debug, Clone, PartialEq)]
pub enum DayOutcome {
    Ticket(Map<String, Value>),
    Missing,
    Unexpected(Value),
}

/// 接口目前每天返回单个工单对象；若将来改为列表或分页结构，只需调整这里
pub fn classify(result: Option<Value>) -> DayOutcome {
    match result {
        Some(Value::Object(ticket)) => DayOutcome::Ticket(ticket),
        // 响应体为 null 与请求失败同样视为无数据
        Some(Value::Null) | None => DayOutcome::Missing,
        Some(other) => DayOutcome::Unexpected(other),
    }
}

/// 导出服务，按天请求工单并写入输出文件
pub struct ExportService {
    config: Config,
    source: Arc<dyn TicketSource + Send + Sync>,
}

impl ExportService {
    pub fn new(config: Config, source: Arc<dyn TicketSource + Send + Sync>) -> Self {
        Self { config, source }
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.config.start_date, self.config.end_date)
    }

    /// 所有请求使用同一时区换算
    pub fn day_window(&self, date: NaiveDate) -> Result<DayWindow> {
        match &self.config.timezone {
            Some(tz) => util::day_window(date, tz),
            None => util::day_window(date, &Local),
        }
    }

    /// 请求某一天的数据，失败时记录日志并返回 None
    pub async fn fetch_day(&self, date: NaiveDate) -> Option<Value> {
        let window = match self.day_window(date) {
            Ok(window) => window,
            Err(e) => {
                error!("Cannot build time window for {}: {}", date, e);
                return None;
            }
        };

        info!("Fetching tickets for {} ({} to {})", date, window.start_ms, window.end_ms);

        match self.source.fetch_day(&window).await {
            Ok(value) => Some(value),
            Err(ExportError::HttpStatus { status, reason, body }) => {
                error!("HTTP error for {}–{}: {} {}", window.start_ms, window.end_ms, status, reason);
                if let Some(body) = body {
                    error!("Response: {}", body);
                }
                None
            }
            Err(e) => {
                error!("Request failed for {}–{}: {}", window.start_ms, window.end_ms, e);
                None
            }
        }
    }

    /// 遍历整个日期区间，最后一次性写出结果
    pub async fn run(&self) -> Result<ExportReport> {
        let range = self.date_range();
        info!("Exporting {} day(s) from {} to {} via {}",
              range.day_count(), range.start, range.end, self.source.source_name());

        let mut tickets = Vec::new();
        let mut days = Vec::with_capacity(range.day_count());

        for date in range.days() {
            let status = match classify(self.fetch_day(date).await) {
                DayOutcome::Ticket(ticket) => {
                    info!("✅ Success: Got 1 ticket (ID: {})", util::ticket_id_label(&ticket));
                    tickets.push(Value::Object(ticket));
                    DayStatus::Exported
                }
                DayOutcome::Missing => {
                    warn!("⚠️ No data or error for {}", date);
                    DayStatus::NoData
                }
                DayOutcome::Unexpected(value) => {
                    warn!("⚠️ Unexpected response format for {} (got {})", date, util::json_kind(&value));
                    DayStatus::UnexpectedFormat
                }
            };
            days.push((date, status));
        }

        save_tickets(&tickets, &self.config.output_path)?;

        info!("✅ Export complete! {} tickets saved to {}", tickets.len(), self.config.output_path.display());

        Ok(ExportReport {
            tickets,
            days,
            output_path: self.config.output_path.clone(),
        })
    }
}

/// 以缩进格式写出 JSON 数组，覆盖已有文件
pub fn save_tickets(tickets: &[Value], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, tickets)?;
    writer.flush()?;

    Ok(())
}
