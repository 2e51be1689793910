//! Background task that periodically completes elapsed reservations.
//!
//! Runs in a tokio::spawn loop; every `check_interval_secs` confirmed
//! reservations whose `end_time` has passed are marked `completed`.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::Duration;
use tracing::{info, warn};

use super::booking::BookingService;
use crate::shared::shutdown::ShutdownSignal;

/// Start the reservation completion background task.
pub fn start_reservation_completion_task(
    booking: Arc<BookingService>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            "📅 Reservation completion task started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs.max(1)));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match booking.complete_elapsed(Utc::now()).await {
                        Ok(0) => {}
                        Ok(count) => info!(count, "Completed elapsed reservations"),
                        Err(e) => warn!(error = %e, "Reservation completion check error"),
                    }
                }
                _ = shutdown.wait() => {
                    info!("📅 Reservation completion task shutting down");
                    break;
                }
            }
        }

        info!("📅 Reservation completion task stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::NewReservation;
    use crate::domain::{EventType, RepositoryProvider, ReservationStatus, SpaceRepository};
    use crate::infrastructure::database::repositories::fixtures::space;
    use crate::infrastructure::database::test_database;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    #[tokio::test]
    async fn completes_on_first_tick_and_stops_on_shutdown() {
        let repos = Arc::new(SeaOrmRepositoryProvider::new(test_database().await));
        let mut studio = space("S1", "host-1");
        studio.instant_book = true;
        repos.spaces().save(studio).await.unwrap();
        let booking = Arc::new(BookingService::new(repos.clone(), 10));

        let end = Utc::now() - chrono::Duration::hours(1);
        let r = booking
            .create_reservation(
                "guest-1",
                NewReservation {
                    space_id: "S1".into(),
                    start_time: end - chrono::Duration::hours(2),
                    end_time: end,
                    event_type: EventType::Meeting,
                    guest_count: 2,
                    event_details: None,
                    instant_book: false,
                },
            )
            .await
            .unwrap();

        let shutdown = ShutdownSignal::new();
        let handle = start_reservation_completion_task(booking, shutdown.clone(), 3600);

        let mut status = ReservationStatus::Confirmed;
        for _ in 0..50 {
            status = repos.reservations().find_by_id(&r.id).await.unwrap().unwrap().status;
            if status == ReservationStatus::Completed {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(status, ReservationStatus::Completed);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
