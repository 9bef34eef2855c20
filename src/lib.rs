// 公开导出的模块，供外部使用
pub mod models;
pub mod errors;
pub mod config;
pub mod sources;
pub mod services;
pub mod util;
pub mod logging;

// 重新导出常用类型，方便使用
pub use models::ticket::{DateRange, DayStatus, DayWindow, ExportReport, TicketQuery};
pub use config::Config;
pub use sources::{HelpdeskClient, TicketSource};
pub use services::export_service::ExportService;
pub use errors::{Result, ExportError};
