use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Store;
use crate::{
    errors::ServiceError,
    models::{
        Event, EventId, EventView, Game, GameId, Gamer, GamerId, Membership, NewEvent,
        ReportBasis, ReportRow,
    },
};

#[derive(Default)]
struct Tables {
    gamers: BTreeMap<GamerId, Gamer>,
    games: BTreeMap<GameId, Game>,
    events: BTreeMap<EventId, Event>,
    attendees: BTreeSet<Membership>,
    next_event_id: i64,
}

/// In-process `Store` used by the test suite.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_gamer(&self, id: i64, first_name: &str, last_name: &str) -> GamerId {
        let id = GamerId(id);
        self.tables.write().await.gamers.insert(
            id,
            Gamer {
                id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            },
        );
        id
    }

    pub async fn add_game(&self, id: i64, title: &str, owner: GamerId) -> GameId {
        let id = GameId(id);
        self.tables.write().await.games.insert(
            id,
            Game {
                id,
                title: title.to_string(),
                gamer_id: owner,
            },
        );
        id
    }

    /// Makes every subsequent call fail as if the database were down.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn membership_count(&self) -> usize {
        self.tables.read().await.attendees.len()
    }

    fn check_online(&self) -> Result<(), ServiceError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(ServiceError::Unavailable)
        } else {
            Ok(())
        }
    }
}

fn full_name(tables: &Tables, id: GamerId) -> String {
    tables
        .gamers
        .get(&id)
        .map(Gamer::full_name)
        .unwrap_or_default()
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_event(&self, id: EventId) -> Result<Option<Event>, ServiceError> {
        self.check_online()?;
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn create_event(&self, new_event: NewEvent) -> Result<Event, ServiceError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        tables.next_event_id += 1;
        let event = Event {
            id: EventId(tables.next_event_id),
            game_id: new_event.game_id,
            organizer_id: new_event.organizer_id,
            description: new_event.description,
            date: new_event.date,
            time: new_event.time,
        };
        tables.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn delete_event(&self, id: EventId) -> Result<bool, ServiceError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        tables.attendees.retain(|membership| membership.event_id != id);
        Ok(tables.events.remove(&id).is_some())
    }

    async fn get_game(&self, id: GameId) -> Result<Option<Game>, ServiceError> {
        self.check_online()?;
        Ok(self.tables.read().await.games.get(&id).cloned())
    }

    async fn get_gamer(&self, id: GamerId) -> Result<Option<Gamer>, ServiceError> {
        self.check_online()?;
        Ok(self.tables.read().await.gamers.get(&id).cloned())
    }

    async fn add_membership(
        &self,
        event_id: EventId,
        gamer_id: GamerId,
    ) -> Result<bool, ServiceError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        if !tables.events.contains_key(&event_id) || !tables.gamers.contains_key(&gamer_id) {
            return Err(ServiceError::NotFound);
        }
        Ok(tables.attendees.insert(Membership { event_id, gamer_id }))
    }

    async fn remove_membership(
        &self,
        event_id: EventId,
        gamer_id: GamerId,
    ) -> Result<bool, ServiceError> {
        self.check_online()?;
        Ok(self
            .tables
            .write()
            .await
            .attendees
            .remove(&Membership { event_id, gamer_id }))
    }

    async fn attendees(&self, event_id: EventId) -> Result<Vec<GamerId>, ServiceError> {
        self.check_online()?;
        Ok(self
            .tables
            .read()
            .await
            .attendees
            .iter()
            .filter(|membership| membership.event_id == event_id)
            .map(|membership| membership.gamer_id)
            .collect())
    }

    async fn list_event_views(&self, viewer: GamerId) -> Result<Vec<EventView>, ServiceError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .events
            .values()
            .map(|event| {
                let members: Vec<GamerId> = tables
                    .attendees
                    .iter()
                    .filter(|membership| membership.event_id == event.id)
                    .map(|membership| membership.gamer_id)
                    .collect();
                EventView {
                    event: event.clone(),
                    attendee_count: members.len(),
                    joined: members.contains(&viewer),
                }
            })
            .collect())
    }

    async fn report_rows(&self, basis: ReportBasis) -> Result<Vec<ReportRow>, ServiceError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        let mut pairs: Vec<(GamerId, &Event)> = Vec::new();
        for event in tables.events.values() {
            match basis {
                ReportBasis::GameOwner => {
                    if let Some(game) = tables.games.get(&event.game_id) {
                        pairs.push((game.gamer_id, event));
                    }
                }
                ReportBasis::Organizer => pairs.push((event.organizer_id, event)),
                ReportBasis::Attendee => pairs.extend(
                    tables
                        .attendees
                        .iter()
                        .filter(|membership| membership.event_id == event.id)
                        .map(|membership| (membership.gamer_id, event)),
                ),
            }
        }
        pairs.sort_by_key(|(_, event)| (event.date, event.time, event.id));
        Ok(pairs
            .into_iter()
            .filter(|(gamer_id, _)| tables.gamers.contains_key(gamer_id))
            .map(|(gamer_id, event)| ReportRow {
                gamer_id,
                full_name: full_name(&tables, gamer_id),
                description: event.description.clone(),
                date: event.date,
                time: event.time,
            })
            .collect())
    }
}
