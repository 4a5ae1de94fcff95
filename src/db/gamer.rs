use crate::{
    models::{Game, GameId, Gamer, GamerId},
    PGPool,
};

pub async fn get_by_id(id: GamerId, pool: &PGPool) -> Result<Option<Gamer>, sqlx::Error> {
    sqlx::query_as::<_, Gamer>("SELECT id, first_name, last_name FROM gamers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_game(id: GameId, pool: &PGPool) -> Result<Option<Game>, sqlx::Error> {
    sqlx::query_as::<_, Game>("SELECT id, title, gamer_id FROM games WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
