use super::models::{Column, EventRecord};
use crate::utils::time::today_key;
use chrono::NaiveDate;
use tracing::debug;

/// Pick today's event from the feed.
///
/// Rows are matched on the exact `M/D/YYYY` date. When several rows share
/// today's date the last one in feed order wins, since later rows are the
/// more recent edits.
pub fn select_today(records: &[EventRecord], today: NaiveDate) -> Option<&EventRecord> {
    let key = today_key(today);
    let mut matches = records
        .iter()
        .filter(|record| record.get(Column::Date).map(str::trim) == Some(key.as_str()));

    let selected = matches.next_back();
    debug!(
        "Rows matching {}: {}",
        key,
        if selected.is_some() { matches.count() + 1 } else { 0 }
    );
    selected
}
