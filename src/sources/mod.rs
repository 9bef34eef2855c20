pub mod base;
pub mod helpdesk;

pub use base::TicketSource;
pub use helpdesk::HelpdeskClient;
