use tracing::debug;

use crate::common::types::{DateInterval, ListingRecord, QueryFilter, SortDirection};

/// Compact numeric form of a date: every non-digit is dropped and the rest
/// read as an integer. `"2024.05.01"` becomes `20240501` and
/// `"2024.05.01 19:30"` becomes `202405011930`; anything that does not yield
/// a number becomes `0`.
pub fn date_to_number(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Inclusive interval intersection: true when the runs share at least one day.
pub fn is_date_overlapping(query: DateInterval, record: DateInterval) -> bool {
    record.start_num <= query.end_num && record.end_num >= query.start_num
}

/// Empty or whitespace-only search text matches everything; otherwise a
/// case-insensitive substring test against the title.
pub fn matches_search(title: &str, search_text: &str) -> bool {
    let needle = search_text.trim();
    if needle.is_empty() {
        return true;
    }
    title.to_lowercase().contains(&needle.to_lowercase())
}

/// Narrows records to the filter's window and search text, then orders them
/// by start date. Equal start dates keep their incoming order.
pub fn apply(records: Vec<ListingRecord>, filter: &QueryFilter) -> Vec<ListingRecord> {
    let before = records.len();
    let mut kept: Vec<ListingRecord> = records
        .into_iter()
        .filter(|r| {
            let run = DateInterval::new(r.start_num(), r.end_num());
            is_date_overlapping(filter.interval, run) && matches_search(&r.title, &filter.search_text)
        })
        .collect();

    // `sort_by_key` is stable; `Reverse` keeps ties in incoming order too.
    match filter.sort_direction {
        SortDirection::Asc => kept.sort_by_key(|r| r.start_num()),
        SortDirection::Desc => kept.sort_by_key(|r| std::cmp::Reverse(r.start_num())),
    }

    debug!(before, after = kept.len(), "Applied overlap and search filter");
    kept
}
