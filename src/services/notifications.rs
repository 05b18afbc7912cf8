//! Outbox delivery used by the `send_notifications` worker binary.

use std::time::Duration;

use serde_json::json;

use crate::repository::{NotificationReader, NotificationWriter};
use crate::services::ServiceResult;

const DELIVERY_BATCH: usize = 50;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers pending outbox rows to the HTTP mail relay.
///
/// Each row is posted individually; a failing row is marked failed with its
/// error and does not stop the batch. Returns `(sent, failed)` counts.
pub fn deliver_pending<R>(repo: &R, relay_url: &str) -> ServiceResult<(usize, usize)>
where
    R: NotificationReader + NotificationWriter + ?Sized,
{
    let pending = repo.list_pending_notifications(DELIVERY_BATCH)?;
    if pending.is_empty() {
        return Ok((0, 0));
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|err| {
            crate::services::ServiceError::Internal(format!("cannot build HTTP client: {err}"))
        })?;

    let mut sent = 0;
    let mut failed = 0;

    for notification in pending {
        let payload = json!({
            "to": notification.recipient,
            "subject": notification.subject,
            "body": notification.body,
        });

        let outcome = client
            .post(relay_url)
            .json(&payload)
            .send()
            .and_then(|response| response.error_for_status());

        match outcome {
            Ok(_) => {
                repo.mark_notification_sent(notification.id)?;
                sent += 1;
            }
            Err(err) => {
                log::error!(
                    "Failed to deliver notification {} to {}: {err}",
                    notification.id,
                    notification.recipient
                );
                repo.mark_notification_failed(notification.id, &err.to_string())?;
                failed += 1;
            }
        }
    }

    Ok((sent, failed))
}
