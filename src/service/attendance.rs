use std::collections::HashSet;

use chrono::Local;
use log::info;

use crate::{
    db::Store,
    dto::NewEventDto,
    errors::ServiceError,
    models::{Event, EventId, EventView, GamerId, NewEvent},
};

/// Attendance figures are derived from the attendee set handed in, never
/// cached on the event. `joined` answers for `viewer` only.
pub fn annotate(event: Event, attendees: &HashSet<GamerId>, viewer: GamerId) -> EventView {
    EventView {
        event,
        attendee_count: attendees.len(),
        joined: attendees.contains(&viewer),
    }
}

async fn require_event(store: &dyn Store, event_id: EventId) -> Result<Event, ServiceError> {
    store.get_event(event_id).await?.ok_or(ServiceError::NotFound)
}

pub async fn join(store: &dyn Store, event_id: EventId, gamer_id: GamerId) -> Result<(), ServiceError> {
    require_event(store, event_id).await?;
    if store.get_gamer(gamer_id).await?.is_none() {
        return Err(ServiceError::NotFound);
    }
    if store.add_membership(event_id, gamer_id).await? {
        info!("gamer {} joined event {}", gamer_id, event_id);
    } else {
        info!("gamer {} already attends event {}", gamer_id, event_id);
    }
    Ok(())
}

pub async fn leave(store: &dyn Store, event_id: EventId, gamer_id: GamerId) -> Result<(), ServiceError> {
    require_event(store, event_id).await?;
    if store.remove_membership(event_id, gamer_id).await? {
        info!("gamer {} left event {}", gamer_id, event_id);
    }
    Ok(())
}

/// One store read: counts and flags come from a single snapshot.
pub async fn list_with_aggregates(
    store: &dyn Store,
    viewer: GamerId,
) -> Result<Vec<EventView>, ServiceError> {
    store.list_event_views(viewer).await
}

pub async fn get_one(
    store: &dyn Store,
    event_id: EventId,
    viewer: GamerId,
) -> Result<EventView, ServiceError> {
    let event = require_event(store, event_id).await?;
    let attendees: HashSet<GamerId> = store.attendees(event_id).await?.into_iter().collect();
    Ok(annotate(event, &attendees, viewer))
}

pub async fn attendees(store: &dyn Store, event_id: EventId) -> Result<Vec<GamerId>, ServiceError> {
    require_event(store, event_id).await?;
    store.attendees(event_id).await
}

/// The organizer is recorded on the event but does not join it.
pub async fn create(
    store: &dyn Store,
    organizer: GamerId,
    dto: NewEventDto,
) -> Result<EventView, ServiceError> {
    let description = dto.description.trim();
    if description.is_empty() {
        return Err(ServiceError::Invalid);
    }
    if store.get_game(dto.game_id).await?.is_none() {
        return Err(ServiceError::NotFound);
    }
    let event = store
        .create_event(NewEvent {
            game_id: dto.game_id,
            organizer_id: organizer,
            description: description.to_string(),
            date: dto.date.unwrap_or_else(|| Local::now().date_naive()),
            time: dto.time,
        })
        .await?;
    info!("gamer {} created event {}", organizer, event.id);
    Ok(annotate(event, &HashSet::new(), organizer))
}

pub async fn delete(store: &dyn Store, event_id: EventId, requester: GamerId) -> Result<(), ServiceError> {
    let event = require_event(store, event_id).await?;
    if event.organizer_id != requester {
        return Err(ServiceError::Forbidden);
    }
    if !store.delete_event(event_id).await? {
        return Err(ServiceError::NotFound);
    }
    info!("gamer {} deleted event {}", requester, event_id);
    Ok(())
}
