//! Daily upcoming-walk reminder sweep.
//!
//! Once a day at a fixed UTC hour, every booking still in the `booked`
//! state whose walk falls on the current calendar day gets an `upcoming`
//! notification and a best-effort reminder email. The sweep is
//! idempotent per (recipient, walk): a reminder that already exists is
//! never duplicated, so re-runs after a restart are safe.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use waggytail_core::notifications::KIND_UPCOMING;
use waggytail_core::schedule::day_bounds;
use waggytail_db::models::notification::CreateNotification;
use waggytail_db::repositories::{BookedWalkRepo, NotificationRepo};
use waggytail_events::{Mailer, OutboundEmail};

/// Run the reminder sweep loop.
///
/// Sleeps until the next occurrence of `hour_utc`, runs one sweep, and
/// repeats. Exits when `cancel` is triggered.
pub async fn run(pool: PgPool, mailer: Arc<Mailer>, hour_utc: u32, cancel: CancellationToken) {
    tracing::info!(hour_utc, "Upcoming-walk reminder job started");

    loop {
        let wait = until_next_run(Utc::now(), hour_utc);
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Upcoming-walk reminder job stopping");
                break;
            }
            _ = tokio::time::sleep(wait) => {
                match sweep(&pool, &mailer).await {
                    Ok(sent) => {
                        if sent > 0 {
                            tracing::info!(sent, "Upcoming-walk reminders sent");
                        } else {
                            tracing::debug!("Upcoming-walk sweep: nothing to remind");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Upcoming-walk sweep failed");
                    }
                }
            }
        }
    }
}

/// One sweep over today's still-booked reservations. Returns how many
/// reminders were created.
pub async fn sweep(pool: &PgPool, mailer: &Mailer) -> Result<u64, sqlx::Error> {
    let today = Utc::now().date_naive();
    let (start, end) = day_bounds(today);

    let bookings = BookedWalkRepo::list_booked_in_range(pool, start, end).await?;

    let mut sent = 0u64;
    for booking in &bookings {
        let (Some(user_id), Some(walk_id)) = (booking.user_id, booking.walk_id) else {
            continue;
        };

        // Idempotency key: (recipient, kind=upcoming, walk).
        if NotificationRepo::upcoming_exists(pool, user_id, walk_id).await? {
            continue;
        }

        let location = booking.location.as_deref().unwrap_or("the meeting point");
        NotificationRepo::create(
            pool,
            &CreateNotification::targeted(
                user_id,
                KIND_UPCOMING,
                format!(
                    "Reminder: you have a walk today at {location} ({})",
                    booking.date.format("%H:%M")
                ),
            )
            .with_walk(walk_id),
        )
        .await?;

        if let (Some(email), Some(name)) = (&booking.user_email, &booking.user_name) {
            mailer
                .send(OutboundEmail::upcoming_reminder(
                    email,
                    name,
                    location,
                    &booking.date.format("%Y-%m-%d %H:%M").to_string(),
                ))
                .await;
        }

        sent += 1;
    }

    Ok(sent)
}

/// Time until the next occurrence of `hour_utc:00:00`.
fn until_next_run(now: DateTime<Utc>, hour_utc: u32) -> Duration {
    let today_run = now
        .date_naive()
        .and_hms_opt(hour_utc, 0, 0)
        .expect("hour_utc is validated to 0..=23")
        .and_utc();

    let next = if now < today_run {
        today_run
    } else {
        today_run + chrono::Duration::days(1)
    };

    (next - now).to_std().unwrap_or(Duration::ZERO)
}
