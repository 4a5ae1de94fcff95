use log::debug;

use crate::{
    models::{EventId, GamerId, Membership},
    PGPool,
};

/// Relies on the `(event_id, gamer_id)` primary key: concurrent duplicate
/// joins collapse into one row.
pub async fn add(membership: Membership, pool: &PGPool) -> Result<bool, sqlx::Error> {
    let Membership { event_id, gamer_id } = membership;
    let res = sqlx::query(
        "INSERT INTO event_attendees (event_id, gamer_id)
        VALUES ($1, $2)
        ON CONFLICT (event_id, gamer_id) DO NOTHING",
    )
    .bind(event_id)
    .bind(gamer_id)
    .execute(pool)
    .await?;
    debug!("membership ({}, {}) inserted: {}", event_id, gamer_id, res.rows_affected());
    Ok(res.rows_affected() > 0)
}

pub async fn remove(membership: Membership, pool: &PGPool) -> Result<bool, sqlx::Error> {
    let Membership { event_id, gamer_id } = membership;
    let res = sqlx::query("DELETE FROM event_attendees WHERE event_id = $1 AND gamer_id = $2")
        .bind(event_id)
        .bind(gamer_id)
        .execute(pool)
        .await?;
    debug!("membership ({}, {}) removed: {}", event_id, gamer_id, res.rows_affected());
    Ok(res.rows_affected() > 0)
}

pub async fn of_event(event_id: EventId, pool: &PGPool) -> Result<Vec<GamerId>, sqlx::Error> {
    sqlx::query_scalar::<_, GamerId>(
        "SELECT gamer_id FROM event_attendees WHERE event_id = $1 ORDER BY gamer_id",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await
}
