use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

#[derive(
    Debug, Display, From, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct EventId(pub i64);

#[derive(
    Debug, Display, From, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct GamerId(pub i64);

#[derive(
    Debug, Display, From, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct GameId(pub i64);

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Gamer {
    pub id: GamerId,
    pub first_name: String,
    pub last_name: String,
}

impl Gamer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub gamer_id: GamerId,
}

/// A scheduled play session. Attendance is not part of the record; see [`EventView`].
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub game_id: GameId,
    pub organizer_id: GamerId,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Fields of an event that does not have an id yet.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub game_id: GameId,
    pub organizer_id: GamerId,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// One row of the event/gamer bridge table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRow)]
pub struct Membership {
    pub event_id: EventId,
    pub gamer_id: GamerId,
}

/// An event as seen by one gamer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub attendee_count: usize,
    pub joined: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ReportRow {
    pub gamer_id: GamerId,
    pub full_name: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserEventGroup {
    pub gamer_id: GamerId,
    pub full_name: String,
    pub events: Vec<EventSummary>,
}

/// Which relation ties a gamer to the events listed under them in the report.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ReportBasis {
    /// Events played with games the gamer owns.
    #[default]
    #[display(fmt = "game_owner")]
    GameOwner,
    #[display(fmt = "organizer")]
    Organizer,
    #[display(fmt = "attendee")]
    Attendee,
}

impl FromStr for ReportBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "game_owner" => Ok(ReportBasis::GameOwner),
            "organizer" => Ok(ReportBasis::Organizer),
            "attendee" => Ok(ReportBasis::Attendee),
            other => Err(format!("unknown report basis '{other}'")),
        }
    }
}

impl TryFrom<String> for ReportBasis {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
