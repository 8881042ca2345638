use async_trait::async_trait;

use crate::common::error::Result;
use crate::common::types::GeoPoint;

// Outbound ports: everything the pipeline needs from the network.

#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// First-match-wins geocoding: callers only ever look at the head of each list.
#[async_trait]
pub trait GeocoderPort: Send + Sync {
    /// Free text to candidate coordinates, best match first.
    async fn forward(&self, query: &str) -> Result<Vec<GeoPoint>>;

    /// Coordinate to candidate postal addresses, best match first.
    async fn reverse(&self, point: GeoPoint) -> Result<Vec<ReverseAddress>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReverseAddress {
    pub formatted: String,
    pub postal_code: Option<String>,
}
