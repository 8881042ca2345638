use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::app::ports::{GeocoderPort, ReverseAddress};
use crate::common::constants::ADDRESS_NOT_FOUND;
use crate::common::types::{GeoPoint, ListingRecord, ResolvedVenue};
use crate::pipeline::venue::locale::{needs_localization, strip_country_prefix, tidy, transliterate};

/// What the detail screen knows about a venue before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VenueQuery {
    pub venue_name: String,
    /// Registry area label, e.g. "서울특별시".
    pub area: String,
    /// Street address from the registry facility record, when one was found.
    pub address: Option<String>,
}

impl VenueQuery {
    pub fn from_listing(listing: &ListingRecord, address: Option<String>) -> Self {
        Self {
            venue_name: listing.venue_name.trim().to_string(),
            area: listing.area.trim().to_string(),
            address: address.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()),
        }
    }

    /// Forward-geocoding query: the registry address if known, otherwise
    /// "area venue".
    pub fn search_text(&self) -> Option<String> {
        if let Some(address) = &self.address {
            return Some(address.clone());
        }
        let text = tidy(&format!("{} {}", self.area, self.venue_name));
        (!text.is_empty()).then_some(text)
    }
}

/// Turns a venue into a coordinate and a display address.
///
/// Forward geocoding runs first and its point is the only input to reverse
/// geocoding. Every failure degrades to a fallback; resolution never errors.
pub struct VenueResolver {
    geocoder: Option<Arc<dyn GeocoderPort>>,
}

impl VenueResolver {
    pub fn new(geocoder: Arc<dyn GeocoderPort>) -> Self {
        Self { geocoder: Some(geocoder) }
    }

    /// A resolver that only composes fallbacks from registry data.
    pub fn offline() -> Self {
        Self { geocoder: None }
    }

    #[instrument(skip(self), fields(venue = %query.venue_name))]
    pub async fn resolve(&self, query: &VenueQuery) -> ResolvedVenue {
        let coordinate = match &self.geocoder {
            Some(geocoder) => locate(geocoder.as_ref(), query).await,
            None => None,
        };

        let reverse = match (&self.geocoder, coordinate) {
            (Some(geocoder), Some(point)) => describe(geocoder.as_ref(), point).await,
            _ => None,
        };

        let display_address = compose_display_address(reverse.as_ref(), query);
        info!(found = coordinate.is_some(), address = %display_address, "Resolved venue");
        ResolvedVenue { coordinate, display_address }
    }
}

/// Stage one: free text to the first matching coordinate.
async fn locate(geocoder: &dyn GeocoderPort, query: &VenueQuery) -> Option<GeoPoint> {
    let text = query.search_text()?;
    match geocoder.forward(&text).await {
        Ok(points) => {
            let first = points.into_iter().next();
            if first.is_none() {
                debug!("No forward geocode match for '{}'", text);
            }
            first
        }
        Err(e) => {
            warn!("Forward geocode failed for '{}': {}", text, e);
            None
        }
    }
}

/// Stage two: coordinate to the first reverse-geocoded address.
async fn describe(geocoder: &dyn GeocoderPort, point: GeoPoint) -> Option<ReverseAddress> {
    match geocoder.reverse(point).await {
        Ok(addresses) => addresses.into_iter().next(),
        Err(e) => {
            warn!("Reverse geocode failed at {:?}: {}", point, e);
            None
        }
    }
}

fn join_parts(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Picks the display address, in order of preference: the reverse-geocoded
/// address when already Korean; its transliteration plus venue and postal
/// code; area plus venue and postal code; the venue name; the not-found
/// sentinel. Never returns an empty string.
pub fn compose_display_address(reverse: Option<&ReverseAddress>, query: &VenueQuery) -> String {
    let formatted = reverse.map(|r| strip_country_prefix(&r.formatted)).unwrap_or("");
    let postal = reverse
        .and_then(|r| r.postal_code.as_deref())
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| format!("({code})"))
        .unwrap_or_default();

    if !needs_localization(formatted) {
        let address = tidy(formatted);
        if !address.is_empty() {
            return address;
        }
    }

    let localized = transliterate(formatted);
    if localized.chars().count() > 2 {
        debug!("Using transliterated address '{}'", localized);
        return join_parts(&[localized.as_str(), query.venue_name.as_str(), postal.as_str()]);
    }

    if !query.area.trim().is_empty() {
        return join_parts(&[query.area.as_str(), query.venue_name.as_str(), postal.as_str()]);
    }

    let venue = query.venue_name.trim();
    if !venue.is_empty() {
        return venue.to_string();
    }

    ADDRESS_NOT_FOUND.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(venue: &str, area: &str) -> VenueQuery {
        VenueQuery { venue_name: venue.into(), area: area.into(), address: None }
    }

    fn reverse(formatted: &str, postal: Option<&str>) -> ReverseAddress {
        ReverseAddress { formatted: formatted.into(), postal_code: postal.map(String::from) }
    }

    #[test]
    fn test_korean_address_is_used_as_is() {
        let r = reverse("대한민국 서울특별시 서초구 남부순환로 2406", Some("06757"));
        assert_eq!(
            compose_display_address(Some(&r), &query("예술의전당", "서울특별시")),
            "서울특별시 서초구 남부순환로 2406"
        );
    }

    #[test]
    fn test_transliterated_address_gets_venue_and_postal() {
        let r = reverse("Republic of Korea Gangnam District 123", Some("06164"));
        assert_eq!(
            compose_display_address(Some(&r), &query("LG아트센터", "서울특별시")),
            "강남구 123 LG아트센터 (06164)"
        );
    }

    #[test]
    fn test_blank_postal_code_is_left_out() {
        let r = reverse("Republic of Korea Gangnam District 123", Some("  "));
        assert_eq!(
            compose_display_address(Some(&r), &query("LG아트센터", "서울특별시")),
            "강남구 123 LG아트센터"
        );
        let r = reverse("Unknown Road 7", Some(""));
        assert_eq!(
            compose_display_address(Some(&r), &query("소극장 산울림", "서울특별시")),
            "서울특별시 소극장 산울림"
        );
    }

    #[test]
    fn test_untranslatable_falls_back_to_area_and_venue() {
        let r = reverse("Unknown Road 7", Some("12345"));
        assert_eq!(
            compose_display_address(Some(&r), &query("소극장 산울림", "서울특별시")),
            "서울특별시 소극장 산울림 (12345)"
        );
    }

    #[test]
    fn test_no_reverse_result_uses_area() {
        assert_eq!(
            compose_display_address(None, &query("부산문화회관", "부산광역시")),
            "부산광역시 부산문화회관"
        );
    }

    #[test]
    fn test_venue_name_alone() {
        assert_eq!(compose_display_address(None, &query("부산문화회관", "")), "부산문화회관");
    }

    #[test]
    fn test_sentinel_when_everything_is_missing() {
        assert_eq!(compose_display_address(None, &VenueQuery::default()), ADDRESS_NOT_FOUND);
        let r = reverse("", None);
        assert_eq!(compose_display_address(Some(&r), &VenueQuery::default()), ADDRESS_NOT_FOUND);
        let r = reverse("Republic of Korea", None);
        assert_eq!(compose_display_address(Some(&r), &query(" ", " ")), ADDRESS_NOT_FOUND);
    }

    #[test]
    fn test_search_text_prefers_registry_address() {
        let mut q = query("예술의전당", "서울특별시");
        assert_eq!(q.search_text().as_deref(), Some("서울특별시 예술의전당"));
        q.address = Some("서울특별시 서초구 남부순환로 2406".into());
        assert_eq!(q.search_text().as_deref(), Some("서울특별시 서초구 남부순환로 2406"));
        assert_eq!(VenueQuery::default().search_text(), None);
    }
}
