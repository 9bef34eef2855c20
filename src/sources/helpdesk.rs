use crate::config::Config;
use crate::errors::{ExportError, Result};
use crate::models::ticket::{DayWindow, TicketQuery};
use crate::sources::base::TicketSource;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;

/// 工单系统 HTTP 接口客户端
pub struct HelpdeskClient {
    client: Client,
    endpoint: String,
    api_key: String,
    module: String,
}

impl HelpdeskClient {
    /// 根据配置创建客户端，超时由 reqwest 负责
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ExportError::RequestError)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            module: config.module.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TicketSource for HelpdeskClient {
    fn source_name(&self) -> &str {
        &self.module
    }

    async fn fetch_day(&self, window: &DayWindow) -> Result<Value> {
        let query = TicketQuery::for_window(&self.api_key, &self.module, window);
        debug!("POST {} for {} ({} to {})", self.endpoint, window.date, window.start_ms, window.end_ms);

        let response = self.client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // 错误响应体读取失败不影响后续流程
            let body = match response.text().await {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!("Could not read error response body for {}–{}: {}",
                          window.start_ms, window.end_ms, e);
                    None
                }
            };
            // reqwest 不暴露服务端原始的 reason phrase，这里使用状态码的标准描述
            return Err(ExportError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            });
        }

        let text = response.text().await?;
        let json: Value = serde_json::from_str(&text)?;
        Ok(json)
    }
}
