use chrono::NaiveDate;
use chrono_tz::Tz;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{ExportError, Result};

pub const DEFAULT_OUTPUT_FILE: &str = "exported_tickets.json";
pub const DEFAULT_LOG_FILE: &str = "ticket_export.log";
pub const DEFAULT_MODULE: &str = "Helpdesk";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// 默认导出区间：2025-10-06 至 2025-10-27（含首尾）
pub const DEFAULT_START_DATE: (i32, u32, u32) = (2025, 10, 6);
pub const DEFAULT_END_DATE: (i32, u32, u32) = (2025, 10, 27);

pub struct Config {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub endpoint: String,
    pub api_key: String,
    pub module: String,
    pub output_path: PathBuf,
    pub log_path: PathBuf,
    pub timeout: Duration,
    /// None 表示使用本机时区
    pub timezone: Option<Tz>,
}

impl Config {
    pub fn new() -> Self {
        let (sy, sm, sd) = DEFAULT_START_DATE;
        let (ey, em, ed) = DEFAULT_END_DATE;
        Self {
            start_date: NaiveDate::from_ymd_opt(sy, sm, sd).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(ey, em, ed).unwrap_or_default(),
            endpoint: String::new(),
            api_key: String::new(),
            module: DEFAULT_MODULE.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            timezone: None,
        }
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = api_key.to_string();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timezone(mut self, timezone: Option<Tz>) -> Self {
        self.timezone = timezone;
        self
    }

    /// 解析 IANA 时区名称，例如 "Asia/Shanghai"
    pub fn parse_timezone(name: &str) -> Result<Tz> {
        name.parse::<Tz>()
            .map_err(|e| ExportError::ConfigError(format!("Invalid timezone '{}': {}", name, e)))
    }

    /// 在发出第一个请求之前检查配置
    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(ExportError::ConfigError(format!(
                "Start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }

        if self.endpoint.trim().is_empty() {
            return Err("API endpoint is not set".into());
        }
        reqwest::Url::parse(&self.endpoint).map_err(|e| {
            ExportError::ConfigError(format!("Invalid API endpoint '{}': {}", self.endpoint, e))
        })?;

        if self.api_key.trim().is_empty() {
            return Err("API key is not set".into());
        }

        if self.output_path.as_os_str().is_empty() {
            return Err("Output path is empty".into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config::new()
            .with_endpoint("https://helpdesk.example.com/api/tickets")
            .with_api_key("secret")
    }

    #[test]
    fn defaults_cover_october_range() {
        let config = Config::new();
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2025, 10, 6).unwrap());
        assert_eq!(config.end_date, NaiveDate::from_ymd_opt(2025, 10, 27).unwrap());
        assert_eq!(config.output_path, PathBuf::from("exported_tickets.json"));
        assert_eq!(config.module, "Helpdesk");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.timezone.is_none());
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_credentials() {
        let config = Config::new().with_endpoint("https://helpdesk.example.com/api");
        assert!(config.validate().is_err());

        let config = Config::new().with_api_key("secret");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_endpoint() {
        let config = valid().with_endpoint("not a url");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid API endpoint"));
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let start = NaiveDate::from_ymd_opt(2025, 10, 27).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        let err = valid().with_date_range(start, end).validate().unwrap_err();
        assert!(err.to_string().contains("after end date"));
    }

    #[test]
    fn single_day_range_is_valid() {
        let day = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        assert!(valid().with_date_range(day, day).validate().is_ok());
    }

    #[test]
    fn parse_timezone_names() {
        assert_eq!(Config::parse_timezone("UTC").unwrap(), Tz::UTC);
        assert_eq!(
            Config::parse_timezone("Asia/Shanghai").unwrap(),
            chrono_tz::Asia::Shanghai
        );
        assert!(Config::parse_timezone("Mars/Olympus").is_err());
    }
}
