//! Diesel models for the email outbox.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::notification::{
    EmailNotification as DomainNotification, NewEmailNotification as DomainNewNotification,
    NotificationStatus,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::email_outbox)]
pub struct EmailNotification {
    pub id: i32,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub created_at: NaiveDateTime,
    pub sent_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::email_outbox)]
pub struct NewEmailNotification<'a> {
    pub recipient: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
    pub status: String,
}

impl TryFrom<EmailNotification> for DomainNotification {
    type Error = TypeConstraintError;

    fn try_from(notification: EmailNotification) -> Result<Self, Self::Error> {
        Ok(Self {
            id: notification.id,
            recipient: notification.recipient,
            subject: notification.subject,
            body: notification.body,
            status: notification.status.parse::<NotificationStatus>()?,
            attempts: notification.attempts,
            last_error: notification.last_error,
            created_at: notification.created_at,
            sent_at: notification.sent_at,
        })
    }
}

impl<'a> From<&'a DomainNewNotification> for NewEmailNotification<'a> {
    fn from(notification: &'a DomainNewNotification) -> Self {
        Self {
            recipient: notification.recipient.as_str(),
            subject: notification.subject.as_str(),
            body: notification.body.as_str(),
            status: NotificationStatus::Pending.to_string(),
        }
    }
}
