use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::apis::kopis::KopisClient;
use crate::common::types::{DetailRecord, ListingRecord, ResolvedVenue};
use crate::pipeline::venue::{VenueQuery, VenueResolver};

/// Everything the detail screen renders for one performance.
#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub listing: ListingRecord,
    pub detail: Option<DetailRecord>,
    pub venue: ResolvedVenue,
}

/// Use case behind the detail screen. Runs the full chain on every open;
/// nothing is cached between calls.
pub struct VenueUseCase {
    registry: Arc<KopisClient>,
    resolver: VenueResolver,
}

impl VenueUseCase {
    pub fn new(registry: Arc<KopisClient>, resolver: VenueResolver) -> Self {
        Self { registry, resolver }
    }

    /// Opens a listing the user picked from the list.
    #[instrument(skip(self, listing), fields(id = %listing.id))]
    pub async fn open(&self, listing: &ListingRecord) -> DetailView {
        let detail = self.registry.fetch_detail(&listing.id).await;
        self.resolve_with(listing.clone(), detail).await
    }

    /// Opens a performance by registry id alone. `None` when the registry
    /// does not know the id.
    #[instrument(skip(self))]
    pub async fn open_by_id(&self, id: &str) -> Option<DetailView> {
        let detail = self.registry.fetch_detail(id).await?;
        let listing = detail.listing.clone();
        Some(self.resolve_with(listing, Some(detail)).await)
    }

    async fn resolve_with(&self, listing: ListingRecord, detail: Option<DetailRecord>) -> DetailView {
        let facility_id = detail.as_ref().and_then(|d| d.facility_id.as_deref());
        let address = match facility_id {
            Some(id) => self.registry.fetch_venue_address(id).await,
            None => None,
        };
        let venue = self.resolver.resolve(&VenueQuery::from_listing(&listing, address)).await;
        DetailView { listing, detail, venue }
    }
}
