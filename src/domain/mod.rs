pub mod alert;
pub mod errors;
pub mod inhibit;
pub mod message;
pub mod ports;

// Re-export the domain boundary types and ports.
pub use alert::{Alert, Company, SessionDetails};
pub use errors::{AlertError, NotifyError};
pub use inhibit::{InhibitDecision, InhibitKey, InhibitTable};
pub use message::format_alert;
pub use ports::{Clock, Notifier};
