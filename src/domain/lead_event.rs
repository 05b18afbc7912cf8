use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Activity recorded against a lead by staff or by automation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LeadEvent {
    pub id: i32,
    pub lead_id: i32,
    pub author_email: String,
    pub event_type: LeadEventType,
    pub event_data: Value,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum LeadEventType {
    Comment,
    Call,
    Email,
    Status,
    Payment,
    Document,
    Other(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewLeadEvent {
    pub lead_id: i32,
    pub author_email: String,
    pub event_type: LeadEventType,
    pub event_data: Value,
}

impl NewLeadEvent {
    pub fn new(
        lead_id: i32,
        author_email: impl Into<String>,
        event_type: LeadEventType,
        event_data: Value,
    ) -> Self {
        Self {
            lead_id,
            author_email: author_email.into(),
            event_type,
            event_data,
        }
    }
}

impl Display for LeadEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadEventType::Comment => write!(f, "Comment"),
            LeadEventType::Call => write!(f, "Call"),
            LeadEventType::Email => write!(f, "Email"),
            LeadEventType::Status => write!(f, "Status"),
            LeadEventType::Payment => write!(f, "Payment"),
            LeadEventType::Document => write!(f, "Document"),
            LeadEventType::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for LeadEventType {
    fn from(s: &str) -> Self {
        match s {
            "Comment" => LeadEventType::Comment,
            "Call" => LeadEventType::Call,
            "Email" => LeadEventType::Email,
            "Status" => LeadEventType::Status,
            "Payment" => LeadEventType::Payment,
            "Document" => LeadEventType::Document,
            _ => LeadEventType::Other(s.to_string()),
        }
    }
}

impl From<String> for LeadEventType {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}
