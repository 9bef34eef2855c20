use crate::errors::Result;
use crate::models::ticket::DayWindow;
use async_trait::async_trait;
use serde_json::Value;

/// 按天获取工单响应的数据源
#[async_trait]
pub trait TicketSource {
    /// 日志中使用的名称
    fn source_name(&self) -> &str;

    /// 获取某一天窗口的原始 JSON，这里不检查其结构
    async fn fetch_day(&self, window: &DayWindow) -> Result<Value>;
}
