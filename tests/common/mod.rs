//! 集成测试共用的辅助工具

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use helpdesk_ticket_export::config::Config;
use helpdesk_ticket_export::errors::{ExportError, Result};
use helpdesk_ticket_export::models::ticket::DayWindow;
use helpdesk_ticket_export::sources::base::TicketSource;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

/// 预设的一次响应
#[allow(dead_code)]
pub enum Reply {
    Json(Value),
    Status(u16, &'static str, Option<String>),
    Malformed,
}

/// 按顺序回放预设响应，并记录每次请求的时间窗口
#[allow(dead_code)]
pub struct ScriptedSource {
    replies: Mutex<VecDeque<Reply>>,
    windows: Mutex<Vec<DayWindow>>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            windows: Mutex::new(Vec::new()),
        }
    }

    pub fn windows(&self) -> Vec<DayWindow> {
        self.windows.lock().unwrap().clone()
    }
}

#[async_trait]
impl TicketSource for ScriptedSource {
    fn source_name(&self) -> &str {
        "scripted"
    }

    async fn fetch_day(&self, window: &DayWindow) -> Result<Value> {
        self.windows.lock().unwrap().push(*window);
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Status(status, reason, body)) => Err(ExportError::HttpStatus {
                status,
                reason: reason.to_string(),
                body,
            }),
            Some(Reply::Malformed) | None => {
                let err = serde_json::from_str::<Value>("<html>").unwrap_err();
                Err(ExportError::JsonError(err))
            }
        }
    }
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 2025-10-06 至 2025-10-27（UTC），输出写入 `dir`
#[allow(dead_code)]
pub fn october_config(dir: &Path) -> Config {
    Config::new()
        .with_endpoint("http://127.0.0.1:9/api")
        .with_api_key("test-key")
        .with_output_path(dir.join("exported_tickets.json"))
        .with_timezone(Some(Tz::UTC))
}

#[allow(dead_code)]
pub fn ticket(n: usize) -> Value {
    json!({
        "ticket_id": format!("HD-{}", n),
        "email_subject": format!("Ticket number {}", n),
        "status": "Open",
    })
}

/// 捕获日志记录，按线程区分，避免并行测试互相干扰
struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, log::Level, String)>>,
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        self.records
            .lock()
            .unwrap()
            .push((thread::current().id(), record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

/// 安装捕获日志器；`#[tokio::test]` 默认在当前线程运行，日志都落在测试线程上
#[allow(dead_code)]
pub fn capture_logs() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
    let me = thread::current().id();
    LOGGER.records.lock().unwrap().retain(|(id, _, _)| *id != me);
}

/// 当前线程捕获到的指定级别日志
#[allow(dead_code)]
pub fn logged(level: log::Level) -> Vec<String> {
    let me = thread::current().id();
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(id, lvl, _)| *id == me && *lvl == level)
        .map(|(_, _, msg)| msg.clone())
        .collect()
}
