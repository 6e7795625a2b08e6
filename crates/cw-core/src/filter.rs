//! CME event filtering for the detection panel.

use cw_common::{CmeEvent, EventStatus};

/// Status filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Match any status.
    #[default]
    All,
    /// Match one specific status.
    Only(EventStatus),
}

impl StatusFilter {
    fn matches(&self, status: EventStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == *wanted,
        }
    }
}

/// Filter events, preserving input order.
///
/// A match requires the status test AND a case-insensitive substring match
/// of `search` against the event's id, class, or magnitude. An empty
/// `search` matches all.
pub fn filter_events<'a>(
    events: &'a [CmeEvent],
    search: &str,
    status: StatusFilter,
) -> Vec<&'a CmeEvent> {
    let needle = search.to_lowercase();
    events
        .iter()
        .filter(|event| {
            let matches_search = needle.is_empty()
                || event.id.to_lowercase().contains(&needle)
                || event.class.to_lowercase().contains(&needle)
                || event.magnitude.to_lowercase().contains(&needle);
            status.matches(event.status) && matches_search
        })
        .collect()
}
