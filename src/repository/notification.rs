//! Repository implementation for the email outbox.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::notification::{
    EmailNotification, NewEmailNotification, NotificationStatus,
};
use crate::models::notification::{
    EmailNotification as DbNotification, NewEmailNotification as DbNewNotification,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, NotificationReader, NotificationWriter};

impl NotificationReader for DieselRepository {
    fn list_pending_notifications(
        &self,
        limit: usize,
    ) -> RepositoryResult<Vec<EmailNotification>> {
        use crate::schema::email_outbox;

        let mut conn = self.conn()?;
        email_outbox::table
            .filter(email_outbox::status.eq(NotificationStatus::Pending.to_string()))
            .order(email_outbox::created_at.asc())
            .limit(limit as i64)
            .load::<DbNotification>(&mut conn)?
            .into_iter()
            .map(|notification| {
                EmailNotification::try_from(notification).map_err(RepositoryError::from)
            })
            .collect()
    }
}

impl NotificationWriter for DieselRepository {
    fn enqueue_notification(
        &self,
        notification: &NewEmailNotification,
    ) -> RepositoryResult<EmailNotification> {
        use crate::schema::email_outbox;

        let mut conn = self.conn()?;
        let db_new: DbNewNotification = notification.into();
        let created = diesel::insert_into(email_outbox::table)
            .values(&db_new)
            .get_result::<DbNotification>(&mut conn)?;

        EmailNotification::try_from(created).map_err(RepositoryError::from)
    }

    fn mark_notification_sent(&self, id: i32) -> RepositoryResult<()> {
        use crate::schema::email_outbox;

        let mut conn = self.conn()?;
        diesel::update(email_outbox::table.find(id))
            .set((
                email_outbox::status.eq(NotificationStatus::Sent.to_string()),
                email_outbox::attempts.eq(email_outbox::attempts + 1),
                email_outbox::sent_at.eq(Some(Utc::now().naive_utc())),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    fn mark_notification_failed(&self, id: i32, error: &str) -> RepositoryResult<()> {
        use crate::schema::email_outbox;

        let mut conn = self.conn()?;
        diesel::update(email_outbox::table.find(id))
            .set((
                email_outbox::status.eq(NotificationStatus::Failed.to_string()),
                email_outbox::attempts.eq(email_outbox::attempts + 1),
                email_outbox::last_error.eq(Some(error)),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
