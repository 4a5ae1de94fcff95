use log::debug;
use sqlx::prelude::FromRow;

use crate::{
    models::{Event, EventId, EventView, GamerId, NewEvent},
    PGPool,
};

#[derive(FromRow)]
struct EventAttendanceRow {
    #[sqlx(flatten)]
    event: Event,
    attendee_count: i64,
    joined: bool,
}

impl From<EventAttendanceRow> for EventView {
    fn from(row: EventAttendanceRow) -> Self {
        EventView {
            event: row.event,
            attendee_count: usize::try_from(row.attendee_count).unwrap_or_default(),
            joined: row.joined,
        }
    }
}

pub async fn create(event: NewEvent, pool: &PGPool) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "INSERT INTO events (game_id, organizer_id, description, date, time)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, game_id, organizer_id, description, date, time",
    )
    .bind(event.game_id)
    .bind(event.organizer_id)
    .bind(event.description)
    .bind(event.date)
    .bind(event.time)
    .fetch_one(pool)
    .await
}

// /events/{id}
pub async fn get_by_id(id: EventId, pool: &PGPool) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "SELECT id, game_id, organizer_id, description, date, time FROM events WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Counts and the viewer flag come from the same grouped scan, so they
/// always agree with each other.
pub async fn get_all_for_viewer(
    viewer: GamerId,
    pool: &PGPool,
) -> Result<Vec<EventView>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EventAttendanceRow>(
        "SELECT e.id, e.game_id, e.organizer_id, e.description, e.date, e.time,
            COUNT(a.gamer_id) AS attendee_count,
            COALESCE(BOOL_OR(a.gamer_id = $1), FALSE) AS joined
        FROM events e
        LEFT JOIN event_attendees a ON a.event_id = e.id
        GROUP BY e.id
        ORDER BY e.id",
    )
    .bind(viewer)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(EventView::from).collect())
}

/// Memberships go first, in the same transaction, so no attendee row
/// outlives its event even on a schema without `ON DELETE CASCADE`.
pub async fn delete(id: EventId, pool: &PGPool) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let memberships = sqlx::query("DELETE FROM event_attendees WHERE event_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let events = sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    debug!(
        "deleted event {} with {} memberships",
        id,
        memberships.rows_affected()
    );
    Ok(events.rows_affected() > 0)
}
