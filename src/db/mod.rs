pub mod attendee;
pub mod event;
pub mod gamer;
pub mod report;
pub mod schema;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use log::{info, warn};
use sqlx::postgres::PgPoolOptions;

use crate::{
    config::AppConfig,
    errors::ServiceError,
    models::{
        Event, EventId, EventView, Game, GameId, Gamer, GamerId, Membership, NewEvent,
        ReportBasis, ReportRow,
    },
    PGPool,
};

pub async fn init_db_pool(config: &AppConfig) -> Result<PGPool, sqlx::Error> {
    warn!("connecting to database (max {} connections)", config.db_max_connections);
    let pool: PGPool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(&config.database_url)
        .await?;
    info!("{}", "Connect with postgresql".to_string());
    Ok(pool)
}

/// Storage operations the service layer relies on.
///
/// Membership changes must be atomic per row: `add_membership` on a pair
/// that already exists is a no-op, never a duplicate.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_event(&self, id: EventId) -> Result<Option<Event>, ServiceError>;

    async fn create_event(&self, event: NewEvent) -> Result<Event, ServiceError>;

    /// Deletes the event together with its memberships. Returns `false` if
    /// there was nothing to delete.
    async fn delete_event(&self, id: EventId) -> Result<bool, ServiceError>;

    async fn get_game(&self, id: GameId) -> Result<Option<Game>, ServiceError>;

    async fn get_gamer(&self, id: GamerId) -> Result<Option<Gamer>, ServiceError>;

    /// Returns whether a new row was written.
    async fn add_membership(&self, event_id: EventId, gamer_id: GamerId)
        -> Result<bool, ServiceError>;

    /// Returns whether a row was removed.
    async fn remove_membership(
        &self,
        event_id: EventId,
        gamer_id: GamerId,
    ) -> Result<bool, ServiceError>;

    async fn attendees(&self, event_id: EventId) -> Result<Vec<GamerId>, ServiceError>;

    /// Every event with its attendee count and whether `viewer` attends,
    /// read as one snapshot, ascending by id.
    async fn list_event_views(&self, viewer: GamerId) -> Result<Vec<EventView>, ServiceError>;

    async fn report_rows(&self, basis: ReportBasis) -> Result<Vec<ReportRow>, ServiceError>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: PGPool,
}

impl PgStore {
    pub fn new(pool: PGPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), ServiceError> {
        schema::ensure(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn get_event(&self, id: EventId) -> Result<Option<Event>, ServiceError> {
        Ok(event::get_by_id(id, &self.pool).await?)
    }

    async fn create_event(&self, new_event: NewEvent) -> Result<Event, ServiceError> {
        Ok(event::create(new_event, &self.pool).await?)
    }

    async fn delete_event(&self, id: EventId) -> Result<bool, ServiceError> {
        Ok(event::delete(id, &self.pool).await?)
    }

    async fn get_game(&self, id: GameId) -> Result<Option<Game>, ServiceError> {
        Ok(gamer::get_game(id, &self.pool).await?)
    }

    async fn get_gamer(&self, id: GamerId) -> Result<Option<Gamer>, ServiceError> {
        Ok(gamer::get_by_id(id, &self.pool).await?)
    }

    async fn add_membership(
        &self,
        event_id: EventId,
        gamer_id: GamerId,
    ) -> Result<bool, ServiceError> {
        Ok(attendee::add(Membership { event_id, gamer_id }, &self.pool).await?)
    }

    async fn remove_membership(
        &self,
        event_id: EventId,
        gamer_id: GamerId,
    ) -> Result<bool, ServiceError> {
        Ok(attendee::remove(Membership { event_id, gamer_id }, &self.pool).await?)
    }

    async fn attendees(&self, event_id: EventId) -> Result<Vec<GamerId>, ServiceError> {
        Ok(attendee::of_event(event_id, &self.pool).await?)
    }

    async fn list_event_views(&self, viewer: GamerId) -> Result<Vec<EventView>, ServiceError> {
        Ok(event::get_all_for_viewer(viewer, &self.pool).await?)
    }

    async fn report_rows(&self, basis: ReportBasis) -> Result<Vec<ReportRow>, ServiceError> {
        Ok(report::rows(basis, &self.pool).await?)
    }
}
