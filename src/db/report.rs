use crate::{
    models::{ReportBasis, ReportRow},
    PGPool,
};

const ORDERING: &str = "ORDER BY e.date, e.time, e.id";

fn query_for(basis: ReportBasis) -> String {
    let joins = match basis {
        ReportBasis::GameOwner => {
            "JOIN games g ON g.gamer_id = gm.id
            JOIN events e ON e.game_id = g.id"
        }
        ReportBasis::Organizer => "JOIN events e ON e.organizer_id = gm.id",
        ReportBasis::Attendee => {
            "JOIN event_attendees a ON a.gamer_id = gm.id
            JOIN events e ON e.id = a.event_id"
        }
    };
    format!(
        "SELECT
            gm.id AS gamer_id,
            gm.first_name || ' ' || gm.last_name AS full_name,
            e.description AS description,
            e.date AS date,
            e.time AS time
        FROM gamers gm
        {joins}
        {ORDERING}"
    )
}

pub async fn rows(basis: ReportBasis, pool: &PGPool) -> Result<Vec<ReportRow>, sqlx::Error> {
    let sql = query_for(basis);
    sqlx::query_as::<_, ReportRow>(&sql).fetch_all(pool).await
}
