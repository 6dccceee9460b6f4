// Use cases layer: application workflows for the alert relay.

pub mod inhibitor;
pub mod notify;
pub mod relay;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod test_support;

pub use inhibitor::Inhibitor;
pub use notify::notification_worker;
pub use relay::{AlertOutcome, AlertRelay, RelaySettings};
pub use scheduler::{daily_clear_task, next_occurrence};
