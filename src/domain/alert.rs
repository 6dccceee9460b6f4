use serde_json::{Map, Value};

use crate::domain::errors::AlertError;
use crate::domain::inhibit::InhibitKey;

// Customer attribution of a remote session, used as half of the dedup key.
// Sessions with no company code share the dedicated `Unattributed` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Company {
    Named(String),
    Unattributed,
}

impl Company {
    // Absent, null and blank values all normalize to the sentinel.
    pub fn from_field(value: Option<&Value>) -> Self {
        match value.and_then(render_value) {
            Some(name) if !name.trim().is_empty() => Company::Named(name),
            _ => Company::Unattributed,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Company::Named(name) => Some(name),
            Company::Unattributed => None,
        }
    }
}

// Session identity fields read from the `Session` object of a trigger payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionDetails {
    pub name: Option<String>,
    pub code: Option<String>,
    pub session_type: Option<String>,
    pub guest_user: Option<String>,
    pub guest_os: Option<String>,
}

// Validated alert: the two required top-level fields were present and truthy.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub session: SessionDetails,
    pub company: Company,
    pub event_data: Option<String>,
}

impl Alert {
    pub fn from_slice(body: &[u8]) -> Result<Self, AlertError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| AlertError::InvalidJson)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, AlertError> {
        let body = value.as_object().ok_or(AlertError::NotAnObject)?;

        let event = body
            .get("Event")
            .filter(|event| is_truthy(event))
            .ok_or(AlertError::MissingEvent)?;
        let session = body
            .get("Session")
            .filter(|session| is_truthy(session))
            .ok_or(AlertError::MissingSession)?;

        // A truthy but non-object `Session` still passes; its fields render blank.
        let empty = Map::new();
        let fields = session.as_object().unwrap_or(&empty);
        let field = |key: &str| fields.get(key).and_then(render_value);

        Ok(Self {
            session: SessionDetails {
                name: field("Name"),
                code: field("Code"),
                session_type: field("SessionType"),
                guest_user: field("GuestLoggedOnUserName"),
                guest_os: field("GuestOperatingSystemName"),
            },
            company: Company::from_field(fields.get("CustomProperty1")),
            event_data: event
                .as_object()
                .and_then(|event| event.get("Data"))
                .and_then(render_value),
        })
    }

    pub fn session_name(&self) -> &str {
        self.session.name.as_deref().unwrap_or_default()
    }

    pub fn inhibit_key(&self) -> InhibitKey {
        InhibitKey::new(self.company.clone(), self.session_name())
    }
}

// JSON truthiness as the trigger sender understands it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Strings pass through verbatim; other non-null values use their JSON text.
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
