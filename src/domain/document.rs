use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::PublicId;

/// Kinds of generated artifacts stored for leads and jobs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum DocumentKind {
    Quote,
    Compliance,
    Handover,
    PurchaseOrder,
    Other(String),
}

impl Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Quote => write!(f, "Quote"),
            DocumentKind::Compliance => write!(f, "Compliance"),
            DocumentKind::Handover => write!(f, "Handover"),
            DocumentKind::PurchaseOrder => write!(f, "PurchaseOrder"),
            DocumentKind::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for DocumentKind {
    fn from(s: &str) -> Self {
        match s {
            "Quote" => DocumentKind::Quote,
            "Compliance" => DocumentKind::Compliance,
            "Handover" => DocumentKind::Handover,
            "PurchaseOrder" => DocumentKind::PurchaseOrder,
            _ => DocumentKind::Other(s.to_string()),
        }
    }
}

impl From<String> for DocumentKind {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// Rendered HTML document kept for compliance and handover packs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: i32,
    pub public_id: PublicId,
    pub lead_id: Option<i32>,
    pub job_id: Option<i32>,
    pub kind: DocumentKind,
    pub title: String,
    pub body_html: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewDocument {
    pub public_id: PublicId,
    pub lead_id: Option<i32>,
    pub job_id: Option<i32>,
    pub kind: DocumentKind,
    pub title: String,
    pub body_html: String,
}

impl NewDocument {
    pub fn for_lead(lead_id: i32, kind: DocumentKind, title: String, body_html: String) -> Self {
        Self {
            public_id: PublicId::new(),
            lead_id: Some(lead_id),
            job_id: None,
            kind,
            title,
            body_html,
        }
    }

    pub fn for_job(job_id: i32, kind: DocumentKind, title: String, body_html: String) -> Self {
        Self {
            public_id: PublicId::new(),
            lead_id: None,
            job_id: Some(job_id),
            kind,
            title,
            body_html,
        }
    }
}
