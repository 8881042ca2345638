use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::common::error::ShowMapError;
use crate::pipeline::filter::date_to_number;

/// Longest query window the listing screen allows, in days.
pub const MAX_WINDOW_DAYS: i64 = 7;

/// One performance as listed by the registry.
///
/// Dates keep the registry's own text (`2024.05.01`); use [`ListingRecord::start_num`]
/// and [`ListingRecord::end_num`] for comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: String,
    pub title: String,
    pub venue_name: String,
    /// Registry area label, e.g. "서울특별시".
    pub area: String,
    pub start_date: String,
    pub end_date: String,
    pub poster_url: Option<String>,
    pub genre: String,
    pub status: String,
}

impl ListingRecord {
    pub fn start_num(&self) -> u64 {
        date_to_number(&self.start_date)
    }

    pub fn end_num(&self) -> u64 {
        date_to_number(&self.end_date)
    }
}

/// A ticket vendor entry on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketLink {
    pub name: String,
    pub url: String,
}

/// Full record returned by the registry detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub listing: ListingRecord,
    /// Registry facility id (`mt10id`), used to look up the street address.
    pub facility_id: Option<String>,
    pub cast: String,
    pub price_guidance: String,
    pub service_hours: String,
    pub ticketing_links: Vec<TicketLink>,
}

/// Inclusive date range in compact `YYYYMMDD` numeric form.
///
/// `start_num <= end_num` is not enforced; malformed input is carried as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    pub start_num: u64,
    pub end_num: u64,
}

impl DateInterval {
    pub fn new(start_num: u64, end_num: u64) -> Self {
        Self { start_num, end_num }
    }

    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(
            date_to_number(&start.format("%Y%m%d").to_string()),
            date_to_number(&end.format("%Y%m%d").to_string()),
        )
    }

    /// Window from `start` to `end`, with `end` pulled back to at most
    /// [`MAX_WINDOW_DAYS`] after `start`.
    pub fn clamp_week(start: NaiveDate, end: NaiveDate) -> Self {
        let latest = start + Duration::days(MAX_WINDOW_DAYS);
        Self::from_dates(start, end.min(latest))
    }

    pub fn start_param(&self) -> String {
        format!("{:08}", self.start_num)
    }

    pub fn end_param(&self) -> String {
        format!("{:08}", self.end_num)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ShowMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            other => Err(ShowMapError::Config(format!("unknown sort direction '{other}'"))),
        }
    }
}

/// Configuration for one listing query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub category_code: String,
    pub region_code: String,
    pub search_text: String,
    pub interval: DateInterval,
    pub sort_direction: SortDirection,
}

impl QueryFilter {
    /// The listing screen's starting state: musicals, all regions, the week
    /// starting `today`, ascending.
    pub fn default_window(today: NaiveDate) -> Self {
        Self {
            category_code: crate::common::constants::DEFAULT_CATEGORY_CODE.to_string(),
            region_code: String::new(),
            search_text: String::new(),
            interval: DateInterval::from_dates(today, today + Duration::days(MAX_WINDOW_DAYS)),
            sort_direction: SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where a venue is, as shown on the detail screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedVenue {
    pub coordinate: Option<GeoPoint>,
    pub display_address: String,
}

impl ResolvedVenue {
    /// Embeddable map link for the web detail view. Prefers the coordinate,
    /// falls back to an address search; `None` for the not-found sentinel.
    pub fn map_url(&self) -> Option<String> {
        if let Some(point) = self.coordinate {
            return Some(format!(
                "https://maps.google.com/maps?q={},{}&z=15&output=embed",
                point.latitude, point.longitude
            ));
        }
        if self.display_address == crate::common::constants::ADDRESS_NOT_FOUND {
            return None;
        }
        let mut url = reqwest::Url::parse("https://maps.google.com/maps").ok()?;
        url.query_pairs_mut()
            .append_pair("q", &self.display_address)
            .append_pair("output", "embed");
        Some(url.to_string())
    }
}

/// One page of listing results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_interval_from_dates() {
        let interval = DateInterval::from_dates(date(2024, 5, 1), date(2024, 5, 8));
        assert_eq!(interval, DateInterval::new(20240501, 20240508));
        assert_eq!(interval.start_param(), "20240501");
    }

    #[test]
    fn test_unknown_start_is_zero_padded() {
        let interval = DateInterval::new(0, 20240508);
        assert_eq!(interval.start_param(), "00000000");
        assert_eq!(interval.end_param(), "20240508");
    }

    #[test]
    fn test_clamp_week_caps_end() {
        let interval = DateInterval::clamp_week(date(2024, 12, 28), date(2025, 1, 20));
        assert_eq!(interval, DateInterval::new(20241228, 20250104));

        let short = DateInterval::clamp_week(date(2024, 5, 1), date(2024, 5, 3));
        assert_eq!(short, DateInterval::new(20240501, 20240503));
    }

    #[test]
    fn test_default_window() {
        let filter = QueryFilter::default_window(date(2024, 5, 1));
        assert_eq!(filter.category_code, "GGGA");
        assert_eq!(filter.interval, DateInterval::new(20240501, 20240508));
        assert_eq!(filter.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_map_url_prefers_coordinate() {
        let venue = ResolvedVenue {
            coordinate: Some(GeoPoint { latitude: 37.5, longitude: 127.0 }),
            display_address: "서울 강남구".to_string(),
        };
        assert_eq!(
            venue.map_url().unwrap(),
            "https://maps.google.com/maps?q=37.5,127&z=15&output=embed"
        );
    }

    #[test]
    fn test_map_url_for_sentinel_is_none() {
        let venue = ResolvedVenue {
            coordinate: None,
            display_address: crate::common::constants::ADDRESS_NOT_FOUND.to_string(),
        };
        assert!(venue.map_url().is_none());
    }
}
