use std::fmt;

// Reasons an inbound alert is rejected before any dedup bookkeeping.
#[derive(Debug, PartialEq, Eq)]
pub enum AlertError {
    InvalidJson,
    NotAnObject,
    MissingEvent,
    MissingSession,
}

impl fmt::Display for AlertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertError::InvalidJson => write!(f, "body is not valid json"),
            AlertError::NotAnObject => write!(f, "body is not a json object"),
            AlertError::MissingEvent => write!(f, "missing \"Event\" field"),
            AlertError::MissingSession => write!(f, "missing \"Session\" field"),
        }
    }
}

impl std::error::Error for AlertError {}

// Failures of a single outbound chat notification.
#[derive(Debug)]
pub enum NotifyError {
    Transport(String),
    Upstream { status: u16, body: Option<String> },
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::Transport(err) => write!(f, "webhook transport error: {err}"),
            NotifyError::Upstream { status, body } => {
                if let Some(body) = body {
                    write!(f, "webhook upstream error {status}: {body}")
                } else {
                    write!(f, "webhook upstream error {status}")
                }
            }
        }
    }
}

impl std::error::Error for NotifyError {}
