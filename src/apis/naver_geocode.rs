use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::app::ports::{GeocoderPort, HttpClientPort, ReverseAddress};
use crate::common::constants::NAVER_MAPS_BASE_URL;
use crate::common::error::{Result, ShowMapError};
use crate::common::types::GeoPoint;

const KEY_ID_HEADER: &str = "X-NCP-APIGW-API-KEY-ID";
const KEY_HEADER: &str = "X-NCP-APIGW-API-KEY";

// Forward geocoding response (`/map-geocode/v2/geocode`).

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    addresses: Vec<GeocodeAddress>,
}

#[derive(Debug, Deserialize)]
struct GeocodeAddress {
    x: String,
    y: String,
}

// Reverse geocoding response (`/map-reversegeocode/v2/gc`).

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    status: ReverseStatus,
    #[serde(default)]
    results: Vec<ReverseResult>,
}

#[derive(Debug, Deserialize)]
struct ReverseStatus {
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResult {
    name: String,
    region: Region,
    land: Option<Land>,
}

#[derive(Debug, Default, Deserialize)]
struct Region {
    #[serde(default)]
    area1: Area,
    #[serde(default)]
    area2: Area,
    #[serde(default)]
    area3: Area,
    #[serde(default)]
    area4: Area,
}

#[derive(Debug, Default, Deserialize)]
struct Area {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct Land {
    #[serde(default)]
    name: String,
    #[serde(default)]
    number1: String,
    #[serde(default)]
    number2: String,
    addition0: Option<Addition>,
    addition1: Option<Addition>,
    addition2: Option<Addition>,
    addition3: Option<Addition>,
    addition4: Option<Addition>,
}

#[derive(Debug, Deserialize)]
struct Addition {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    value: String,
}

impl Land {
    fn number(&self) -> Option<String> {
        match (self.number1.trim(), self.number2.trim()) {
            ("", _) => None,
            (main, "") => Some(main.to_string()),
            (main, sub) => Some(format!("{main}-{sub}")),
        }
    }

    fn zipcode(&self) -> Option<String> {
        [&self.addition0, &self.addition1, &self.addition2, &self.addition3, &self.addition4]
            .into_iter()
            .flatten()
            .find(|a| a.kind == "zipcode" && !a.value.trim().is_empty())
            .map(|a| a.value.trim().to_string())
    }
}

impl ReverseResult {
    /// Road addresses read "시 구 도로명 번호"; lot addresses keep every
    /// administrative level down to the village.
    fn to_address(&self) -> ReverseAddress {
        let areas: Vec<&Area> = if self.name == "roadaddr" {
            vec![&self.region.area1, &self.region.area2]
        } else {
            vec![&self.region.area1, &self.region.area2, &self.region.area3, &self.region.area4]
        };
        let mut parts: Vec<String> = areas
            .iter()
            .map(|a| a.name.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(land) = &self.land {
            if !land.name.trim().is_empty() {
                parts.push(land.name.trim().to_string());
            }
            if let Some(number) = land.number() {
                parts.push(number);
            }
        }
        ReverseAddress {
            formatted: parts.join(" "),
            postal_code: self.land.as_ref().and_then(Land::zipcode),
        }
    }
}

pub fn decode_forward(body: &str) -> Result<Vec<GeoPoint>> {
    let resp: GeocodeResponse = serde_json::from_str(body)?;
    Ok(resp
        .addresses
        .iter()
        .filter_map(|a| {
            Some(GeoPoint {
                latitude: a.y.trim().parse().ok()?,
                longitude: a.x.trim().parse().ok()?,
            })
        })
        .collect())
}

pub fn decode_reverse(body: &str) -> Result<Vec<ReverseAddress>> {
    let resp: ReverseResponse = serde_json::from_str(body)?;
    match resp.status.code {
        0 => Ok(resp
            .results
            .iter()
            .map(ReverseResult::to_address)
            .filter(|a| !a.formatted.is_empty())
            .collect()),
        // 3: no result for the coordinate
        3 => Ok(Vec::new()),
        code => Err(ShowMapError::Geocode {
            message: format!("reverse geocode status {}: {}", code, resp.status.message),
        }),
    }
}

/// Naver Cloud Maps geocoding.
pub struct NaverGeocoder {
    http: Arc<dyn HttpClientPort>,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl NaverGeocoder {
    pub fn new(http: Arc<dyn HttpClientPort>, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            http,
            base_url: NAVER_MAPS_BASE_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let base = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        Url::parse_with_params(&base, params)
            .map_err(|e| ShowMapError::Config(format!("invalid geocoder url '{}': {}", base, e)))
    }

    async fn get_json(&self, url: Url) -> Result<String> {
        let headers = [
            (KEY_ID_HEADER, self.client_id.as_str()),
            (KEY_HEADER, self.client_secret.as_str()),
        ];
        let resp = self.http.get(url.as_str(), &headers).await?;
        if !resp.is_success() {
            return Err(ShowMapError::Geocode {
                message: format!("geocoder returned HTTP {}", resp.status),
            });
        }
        Ok(resp.text())
    }
}

#[async_trait]
impl GeocoderPort for NaverGeocoder {
    #[instrument(skip(self))]
    async fn forward(&self, query: &str) -> Result<Vec<GeoPoint>> {
        let url = self.url("/map-geocode/v2/geocode", &[("query", query)])?;
        let points = decode_forward(&self.get_json(url).await?)?;
        debug!("Forward geocode returned {} candidates", points.len());
        Ok(points)
    }

    #[instrument(skip(self))]
    async fn reverse(&self, point: GeoPoint) -> Result<Vec<ReverseAddress>> {
        let coords = format!("{},{}", point.longitude, point.latitude);
        let url = self.url(
            "/map-reversegeocode/v2/gc",
            &[("coords", coords.as_str()), ("output", "json"), ("orders", "roadaddr,addr")],
        )?;
        let addresses = decode_reverse(&self.get_json(url).await?)?;
        debug!("Reverse geocode returned {} candidates", addresses.len());
        Ok(addresses)
    }
}
