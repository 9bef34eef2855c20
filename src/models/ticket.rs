use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// 含首尾的日期区间，按天迭代
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// 升序返回区间内的每一天；start > end 时为空
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn day_count(&self) -> usize {
        if self.start > self.end {
            return 0;
        }
        (self.end - self.start).num_days() as usize + 1
    }
}

/// 某一天 00:00:00.000 至 23:59:59.999 的毫秒时间戳
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub date: NaiveDate,
    pub start_ms: i64,
    pub end_ms: i64,
}

/// 工单查询请求体，除日期和鉴权字段外全部为空字符串
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TicketQuery {
    #[serde(rename = "API")]
    pub api: String,
    pub module: String,
    pub ticket_id: String,
    pub route: String,
    pub email_subject: String,
    pub responsible_employee: String,
    pub age: String,
    pub location: String,
    pub status: String,
    pub source: String,
    pub category: String,
    pub disposition: String,
    pub sub_disposition: String,
    pub comments: String,
    pub date_start: String,
    pub date_end: String,
    pub created_by: String,
    pub assigned_to: String,
    pub asset_name: String,
}

impl TicketQuery {
    pub fn for_window(api_key: &str, module: &str, window: &DayWindow) -> Self {
        Self {
            api: api_key.to_string(),
            module: module.to_string(),
            ticket_id: String::new(),
            route: String::new(),
            email_subject: String::new(),
            responsible_employee: String::new(),
            age: String::new(),
            location: String::new(),
            status: String::new(),
            source: String::new(),
            category: String::new(),
            disposition: String::new(),
            sub_disposition: String::new(),
            comments: String::new(),
            date_start: window.start_ms.to_string(),
            date_end: window.end_ms.to_string(),
            created_by: String::new(),
            assigned_to: String::new(),
            asset_name: String::new(),
        }
    }
}

/// 单日请求的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    /// 返回了 JSON 对象并已加入导出结果
    Exported,
    /// 请求失败或没有返回数据
    NoData,
    /// 返回了合法 JSON，但不是单个对象
    UnexpectedFormat,
}

/// 一次导出的结果
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub tickets: Vec<Value>,
    pub days: Vec<(NaiveDate, DayStatus)>,
    pub output_path: PathBuf,
}

impl ExportReport {
    pub fn exported_count(&self) -> usize {
        self.tickets.len()
    }

    pub fn count(&self, status: DayStatus) -> usize {
        self.days.iter().filter(|(_, s)| *s == status).count()
    }
}
