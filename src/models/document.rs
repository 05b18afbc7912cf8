//! Diesel models for generated documents.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::document::{Document as DomainDocument, NewDocument as DomainNewDocument};
use crate::domain::types::{PublicId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::documents)]
pub struct Document {
    pub id: i32,
    pub public_id: String,
    pub lead_id: Option<i32>,
    pub job_id: Option<i32>,
    pub kind: String,
    pub title: String,
    pub body_html: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::documents)]
pub struct NewDocument<'a> {
    pub public_id: String,
    pub lead_id: Option<i32>,
    pub job_id: Option<i32>,
    pub kind: String,
    pub title: &'a str,
    pub body_html: &'a str,
}

impl TryFrom<Document> for DomainDocument {
    type Error = TypeConstraintError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document.id,
            public_id: document.public_id.parse::<PublicId>()?,
            lead_id: document.lead_id,
            job_id: document.job_id,
            kind: document.kind.into(),
            title: document.title,
            body_html: document.body_html,
            created_at: document.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewDocument> for NewDocument<'a> {
    fn from(document: &'a DomainNewDocument) -> Self {
        Self {
            public_id: document.public_id.to_string(),
            lead_id: document.lead_id,
            job_id: document.job_id,
            kind: document.kind.to_string(),
            title: document.title.as_str(),
            body_html: document.body_html.as_str(),
        }
    }
}
