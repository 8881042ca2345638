#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use show_map::app::ports::{GeocoderPort, HttpClientPort, HttpGetResult, ReverseAddress};
use show_map::{GeoPoint, Result, ShowMapError};

/// Serves canned responses in order and remembers every requested url.
#[derive(Default)]
pub struct FakeHttp {
    responses: Mutex<VecDeque<Result<HttpGetResult>>>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeHttp {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_xml(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpGetResult {
            status,
            bytes: body.as_bytes().to_vec(),
        }));
    }

    pub fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ShowMapError::Api { message: message.to_string() }));
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClientPort for FakeHttp {
    async fn get(&self, url: &str, _headers: &[(&str, &str)]) -> Result<HttpGetResult> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ShowMapError::Api { message: "no canned response".to_string() }))
    }
}

/// Geocoder with fixed answers for both directions.
pub struct FakeGeocoder {
    pub forward: std::result::Result<Vec<GeoPoint>, String>,
    pub reverse: std::result::Result<Vec<ReverseAddress>, String>,
    pub forward_queries: Mutex<Vec<String>>,
    pub reverse_calls: Mutex<usize>,
}

impl FakeGeocoder {
    pub fn new(
        forward: std::result::Result<Vec<GeoPoint>, String>,
        reverse: std::result::Result<Vec<ReverseAddress>, String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            forward,
            reverse,
            forward_queries: Mutex::new(Vec::new()),
            reverse_calls: Mutex::new(0),
        })
    }
}

#[async_trait]
impl GeocoderPort for FakeGeocoder {
    async fn forward(&self, query: &str) -> Result<Vec<GeoPoint>> {
        self.forward_queries.lock().unwrap().push(query.to_string());
        self.forward.clone().map_err(|message| ShowMapError::Geocode { message })
    }

    async fn reverse(&self, _point: GeoPoint) -> Result<Vec<ReverseAddress>> {
        *self.reverse_calls.lock().unwrap() += 1;
        self.reverse.clone().map_err(|message| ShowMapError::Geocode { message })
    }
}

pub fn performance_xml(id: &str, title: &str, from: &str, to: &str) -> String {
    format!(
        "<db><mt20id>{id}</mt20id><prfnm>{title}</prfnm><prfpdfrom>{from}</prfpdfrom>\
         <prfpdto>{to}</prfpdto><fcltynm>블루스퀘어</fcltynm><poster/><area>서울특별시</area>\
         <genrenm>뮤지컬</genrenm><prfstate>공연중</prfstate></db>"
    )
}

pub fn listing_document(items: &[String]) -> String {
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?><dbs>{}</dbs>", items.concat())
}
