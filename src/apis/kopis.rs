use std::sync::Arc;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::app::ports::HttpClientPort;
use crate::common::constants::{KOPIS_BASE_URL, REGISTRY_ROWS};
use crate::common::error::{Result, ShowMapError};
use crate::common::types::{DateInterval, DetailRecord, ListingRecord, QueryFilter, TicketLink};
use crate::parser::{markup, OneOrMany};

/// Parameters for one registry listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub category_code: String,
    pub region_code: String,
    pub search_text: String,
    pub page: u32,
    pub interval: DateInterval,
}

impl ListingQuery {
    pub fn from_filter(filter: &QueryFilter, page: u32) -> Self {
        Self {
            category_code: filter.category_code.clone(),
            region_code: filter.region_code.clone(),
            search_text: filter.search_text.clone(),
            page: page.max(1),
            interval: filter.interval,
        }
    }
}

// Raw registry shapes. Every leaf is optional: the registry omits empty
// fields and sends self-closing tags for others.

#[derive(Debug, Deserialize)]
struct RawDocument<T> {
    dbs: Option<RawItems<T>>,
}

#[derive(Debug, Deserialize)]
struct RawItems<T> {
    db: Option<OneOrMany<T>>,
}

impl<T> RawDocument<T> {
    fn into_items(self) -> Vec<T> {
        self.dbs
            .and_then(|dbs| dbs.db)
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct RawPerformance {
    mt20id: Option<String>,
    prfnm: Option<String>,
    fcltynm: Option<String>,
    area: Option<String>,
    prfpdfrom: Option<String>,
    prfpdto: Option<String>,
    poster: Option<String>,
    genrenm: Option<String>,
    prfstate: Option<String>,
    // Detail-only fields
    mt10id: Option<String>,
    prfcast: Option<String>,
    pcseguidance: Option<String>,
    dtguidance: Option<String>,
    relates: Option<RawRelates>,
}

#[derive(Debug, Deserialize)]
struct RawRelates {
    relate: Option<OneOrMany<RawRelate>>,
}

#[derive(Debug, Deserialize)]
struct RawRelate {
    relatenm: Option<String>,
    relateurl: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFacility {
    adres: Option<String>,
}

fn text(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl From<RawPerformance> for ListingRecord {
    fn from(raw: RawPerformance) -> Self {
        ListingRecord {
            id: text(raw.mt20id),
            title: text(raw.prfnm),
            venue_name: text(raw.fcltynm),
            area: text(raw.area),
            start_date: text(raw.prfpdfrom),
            end_date: text(raw.prfpdto),
            poster_url: non_empty(raw.poster),
            genre: text(raw.genrenm),
            status: text(raw.prfstate),
        }
    }
}

impl From<RawPerformance> for DetailRecord {
    fn from(mut raw: RawPerformance) -> Self {
        let ticketing_links = raw
            .relates
            .take()
            .and_then(|r| r.relate)
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|relate| {
                let url = non_empty(relate.relateurl)?;
                Some(TicketLink { name: text(relate.relatenm), url })
            })
            .collect();
        let facility_id = non_empty(raw.mt10id.take());
        let cast = text(raw.prfcast.take());
        let price_guidance = text(raw.pcseguidance.take());
        let service_hours = text(raw.dtguidance.take());

        DetailRecord {
            listing: ListingRecord::from(raw),
            facility_id,
            cast,
            price_guidance,
            service_hours,
            ticketing_links,
        }
    }
}

/// Decodes a listing response. An empty `<dbs>` yields no records.
pub fn decode_listings(xml: &str) -> Result<Vec<ListingRecord>> {
    let doc: RawDocument<RawPerformance> = serde_json::from_value(markup::to_value(xml)?)?;
    Ok(doc.into_items().into_iter().map(ListingRecord::from).collect())
}

/// Decodes a detail response; only the first `<db>` is meaningful.
pub fn decode_detail(xml: &str) -> Result<Option<DetailRecord>> {
    let doc: RawDocument<RawPerformance> = serde_json::from_value(markup::to_value(xml)?)?;
    Ok(doc.into_items().into_iter().next().map(DetailRecord::from))
}

/// Decodes a facility response down to its street address.
pub fn decode_facility_address(xml: &str) -> Result<Option<String>> {
    let doc: RawDocument<RawFacility> = serde_json::from_value(markup::to_value(xml)?)?;
    Ok(doc.into_items().into_iter().next().and_then(|f| non_empty(f.adres)))
}

/// Client for the KOPIS performing-arts registry.
///
/// All public fetches swallow failures: callers see an empty list or `None`,
/// and the cause is logged.
pub struct KopisClient {
    http: Arc<dyn HttpClientPort>,
    base_url: String,
    api_key: Option<String>,
    rows: u32,
}

impl KopisClient {
    pub fn new(http: Arc<dyn HttpClientPort>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: KOPIS_BASE_URL.to_string(),
            api_key,
            rows: REGISTRY_ROWS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    #[instrument(skip(self), fields(page = query.page))]
    pub async fn fetch_listings(&self, query: &ListingQuery) -> Vec<ListingRecord> {
        match self.try_fetch_listings(query).await {
            Ok(records) => {
                info!("Fetched {} listings from registry", records.len());
                records
            }
            Err(e) => {
                warn!("Listing fetch failed, returning no results: {}", e);
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch_detail(&self, id: &str) -> Option<DetailRecord> {
        match self.try_fetch_detail(id).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!("Detail fetch failed for {}: {}", id, e);
                None
            }
        }
    }

    /// Street address of a registry facility (`mt10id`).
    #[instrument(skip(self))]
    pub async fn fetch_venue_address(&self, facility_id: &str) -> Option<String> {
        match self.try_fetch_venue_address(facility_id).await {
            Ok(address) => address,
            Err(e) => {
                warn!("Facility lookup failed for {}: {}", facility_id, e);
                None
            }
        }
    }

    async fn try_fetch_listings(&self, query: &ListingQuery) -> Result<Vec<ListingRecord>> {
        let Some(key) = self.api_key.as_deref() else {
            debug!("No registry credential configured");
            return Ok(Vec::new());
        };

        let page = query.page.max(1).to_string();
        let rows = self.rows.to_string();
        let start = query.interval.start_param();
        let end = query.interval.end_param();
        let mut params: Vec<(&str, &str)> = vec![
            ("service", key),
            ("stdate", start.as_str()),
            ("eddate", end.as_str()),
            ("rows", rows.as_str()),
            ("cpage", page.as_str()),
        ];
        if !query.category_code.is_empty() {
            params.push(("shcate", query.category_code.as_str()));
        }
        if !query.search_text.trim().is_empty() {
            params.push(("shnm", query.search_text.trim()));
        }
        if !query.region_code.is_empty() {
            params.push(("signgucode", query.region_code.as_str()));
        }

        let url = self.endpoint(&["pblprfr"], &params)?;
        let body = self.get_text(url).await?;
        decode_listings(&body)
    }

    async fn try_fetch_detail(&self, id: &str) -> Result<Option<DetailRecord>> {
        let Some(key) = self.api_key.as_deref() else {
            debug!("No registry credential configured");
            return Ok(None);
        };
        let url = self.endpoint(&["pblprfr", id], &[("service", key)])?;
        let body = self.get_text(url).await?;
        decode_detail(&body)
    }

    async fn try_fetch_venue_address(&self, facility_id: &str) -> Result<Option<String>> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(None);
        };
        let url = self.endpoint(&["prfplc", facility_id], &[("service", key)])?;
        let body = self.get_text(url).await?;
        decode_facility_address(&body)
    }

    fn endpoint(&self, segments: &[&str], params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ShowMapError::Config(format!("invalid registry url '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ShowMapError::Config(format!("registry url '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().extend_pairs(params.iter());
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        let resp = self.http.get(url.as_str(), &[]).await?;
        if !resp.is_success() {
            return Err(ShowMapError::Api {
                message: format!("registry returned HTTP {}", resp.status),
            });
        }
        Ok(resp.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ITEM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dbs>
  <db>
    <mt20id>PF132236</mt20id>
    <prfnm>레미제라블</prfnm>
    <prfpdfrom>2024.05.01</prfpdfrom>
    <prfpdto>2024.06.30</prfpdto>
    <fcltynm>블루스퀘어 신한카드홀</fcltynm>
    <poster>http://www.kopis.or.kr/upload/pfmPoster/PF_PF132236.gif</poster>
    <area>서울특별시</area>
    <genrenm>뮤지컬</genrenm>
    <openrun>N</openrun>
    <prfstate>공연중</prfstate>
  </db>
</dbs>"#;

    #[test]
    fn test_decode_single_item() {
        let records = decode_listings(ONE_ITEM).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, "PF132236");
        assert_eq!(r.title, "레미제라블");
        assert_eq!(r.venue_name, "블루스퀘어 신한카드홀");
        assert_eq!(r.area, "서울특별시");
        assert_eq!(r.start_num(), 20240501);
        assert_eq!(r.end_num(), 20240630);
        assert_eq!(r.genre, "뮤지컬");
        assert_eq!(r.status, "공연중");
        assert!(r.poster_url.as_deref().unwrap().ends_with(".gif"));
    }

    #[test]
    fn test_decode_empty_root() {
        assert!(decode_listings("<dbs></dbs>").unwrap().is_empty());
        assert!(decode_listings("<dbs/>").unwrap().is_empty());
    }

    #[test]
    fn test_decode_missing_fields_default() {
        let records = decode_listings("<dbs><db><mt20id>PF1</mt20id><poster/></db></dbs>").unwrap();
        assert_eq!(records[0].title, "");
        assert_eq!(records[0].poster_url, None);
        assert_eq!(records[0].start_num(), 0);
    }

    #[test]
    fn test_decode_detail_with_single_relate() {
        let xml = r#"<dbs><db>
            <mt20id>PF1</mt20id><prfnm>햄릿</prfnm><mt10id>FC001</mt10id>
            <prfcast>배우 A, 배우 B</prfcast><pcseguidance>R석 50,000원</pcseguidance>
            <dtguidance>화요일 ~ 금요일(20:00)</dtguidance>
            <relates><relate><relatenm>인터파크</relatenm><relateurl>https://tickets.example/1</relateurl></relate></relates>
        </db></dbs>"#;
        let detail = decode_detail(xml).unwrap().unwrap();
        assert_eq!(detail.listing.title, "햄릿");
        assert_eq!(detail.facility_id.as_deref(), Some("FC001"));
        assert_eq!(detail.cast, "배우 A, 배우 B");
        assert_eq!(detail.price_guidance, "R석 50,000원");
        assert_eq!(detail.service_hours, "화요일 ~ 금요일(20:00)");
        assert_eq!(
            detail.ticketing_links,
            vec![TicketLink { name: "인터파크".into(), url: "https://tickets.example/1".into() }]
        );
    }

    #[test]
    fn test_decode_detail_without_relates() {
        let detail = decode_detail("<dbs><db><mt20id>PF1</mt20id><relates/></db></dbs>")
            .unwrap()
            .unwrap();
        assert!(detail.ticketing_links.is_empty());
        assert!(decode_detail("<dbs/>").unwrap().is_none());
    }

    #[test]
    fn test_decode_facility_address() {
        let xml = "<dbs><db><fcltynm>예술의전당</fcltynm><adres>서울특별시 서초구 남부순환로 2406</adres><la>37.47</la><lo>127.01</lo></db></dbs>";
        assert_eq!(
            decode_facility_address(xml).unwrap().as_deref(),
            Some("서울특별시 서초구 남부순환로 2406")
        );
    }

    #[test]
    fn test_query_page_is_clamped() {
        let filter = QueryFilter::default_window(chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(ListingQuery::from_filter(&filter, 0).page, 1);
        assert_eq!(ListingQuery::from_filter(&filter, 3).page, 3);
    }
}
