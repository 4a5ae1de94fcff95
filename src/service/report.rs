use std::collections::HashMap;

use log::debug;

use crate::{
    db::Store,
    errors::ServiceError,
    models::{EventSummary, GamerId, ReportBasis, ReportRow, UserEventGroup},
};

/// Groups joined rows by gamer in a single pass.
///
/// Groups appear in the order of each gamer's first row and events keep
/// their row order. The first full name seen for a gamer is the one kept.
pub fn flatten(rows: Vec<ReportRow>) -> Vec<UserEventGroup> {
    let mut groups: Vec<UserEventGroup> = Vec::new();
    let mut index: HashMap<GamerId, usize> = HashMap::new();

    for row in rows {
        let summary = EventSummary {
            description: row.description,
            date: row.date,
            time: row.time,
        };
        match index.get(&row.gamer_id) {
            Some(&position) => groups[position].events.push(summary),
            None => {
                index.insert(row.gamer_id, groups.len());
                groups.push(UserEventGroup {
                    gamer_id: row.gamer_id,
                    full_name: row.full_name,
                    events: vec![summary],
                });
            }
        }
    }
    groups
}

pub async fn build_user_event_report(
    store: &dyn Store,
    basis: ReportBasis,
) -> Result<Vec<UserEventGroup>, ServiceError> {
    let rows = store.report_rows(basis).await?;
    debug!("report by {} flattening {} rows", basis, rows.len());
    Ok(flatten(rows))
}
