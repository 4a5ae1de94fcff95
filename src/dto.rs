use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{GameId, GamerId, ReportBasis};

#[derive(Debug, Deserialize, Clone)]
pub struct NewEventDto {
    pub game_id: GameId,
    pub description: String,
    /// Defaults to today when omitted.
    pub date: Option<NaiveDate>,
    pub time: NaiveTime,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct ReportQuery {
    pub basis: Option<ReportBasis>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub gamer_id: GamerId,
    pub exp: usize,
}

impl Claims {
    pub fn new(gamer_id: GamerId, exp: usize) -> Self {
        Self { gamer_id, exp }
    }
}
