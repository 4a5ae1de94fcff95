use log::info;

use crate::PGPool;

const STATEMENTS: [&str; 5] = [
    r#"
CREATE TABLE IF NOT EXISTS gamers (
    id BIGSERIAL PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    bio TEXT NOT NULL DEFAULT ''
)"#,
    r#"
CREATE TABLE IF NOT EXISTS games (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    maker TEXT NOT NULL DEFAULT '',
    number_of_players INTEGER NOT NULL DEFAULT 1,
    skill_level INTEGER NOT NULL DEFAULT 1,
    gamer_id BIGINT NOT NULL REFERENCES gamers (id) ON DELETE CASCADE
)"#,
    r#"
CREATE TABLE IF NOT EXISTS events (
    id BIGSERIAL PRIMARY KEY,
    game_id BIGINT NOT NULL REFERENCES games (id) ON DELETE CASCADE,
    organizer_id BIGINT NOT NULL REFERENCES gamers (id) ON DELETE CASCADE,
    description TEXT NOT NULL,
    date DATE NOT NULL DEFAULT CURRENT_DATE,
    time TIME NOT NULL
)"#,
    r#"
CREATE TABLE IF NOT EXISTS event_attendees (
    event_id BIGINT NOT NULL REFERENCES events (id) ON DELETE CASCADE,
    gamer_id BIGINT NOT NULL REFERENCES gamers (id) ON DELETE CASCADE,
    PRIMARY KEY (event_id, gamer_id)
)"#,
    "CREATE INDEX IF NOT EXISTS event_attendees_gamer_idx ON event_attendees (gamer_id)",
];

pub async fn ensure(pool: &PGPool) -> Result<(), sqlx::Error> {
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("database schema is up to date");
    Ok(())
}
