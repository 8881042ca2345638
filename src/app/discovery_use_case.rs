use std::sync::Arc;

use tracing::{info, instrument};

use crate::apis::kopis::{KopisClient, ListingQuery};
use crate::common::constants::PAGE_SIZE;
use crate::common::types::{ListingRecord, Page, QueryFilter};
use crate::pipeline::{filter, paginate};

/// Use case behind the listing screen: fetch, filter and sort, paginate.
pub struct DiscoveryUseCase {
    registry: Arc<KopisClient>,
    page_size: usize,
}

impl DiscoveryUseCase {
    pub fn new(registry: Arc<KopisClient>) -> Self {
        Self { registry, page_size: PAGE_SIZE }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// One screen page of results.
    ///
    /// Each screen page maps onto the registry page of the same number; the
    /// lookahead runs over that batch after filtering, so `has_next` never
    /// costs a second request.
    #[instrument(skip(self, query_filter))]
    pub async fn browse(&self, query_filter: &QueryFilter, page: i64) -> Page<ListingRecord> {
        let page = paginate::clamp_page(page);
        let raw = self
            .registry
            .fetch_listings(&ListingQuery::from_filter(query_filter, page))
            .await;
        let sorted = filter::apply(raw, query_filter);
        let result = paginate::paginate(&sorted, self.page_size, 1);
        info!(items = result.items.len(), has_next = result.has_next, "Browse page ready");
        result
    }
}
