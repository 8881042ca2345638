//! Performance discovery and venue resolution over the KOPIS registry.
//!
//! The listing path is `apis::kopis` → `pipeline::filter` →
//! `pipeline::paginate`, wired together by `app::discovery_use_case`. The
//! detail path resolves a venue through `pipeline::venue`, wired by
//! `app::venue_use_case`.

pub mod apis;
pub mod app;
pub mod common;
pub mod config;
pub mod infra;
pub mod logging;
pub mod parser;
pub mod pipeline;

pub use common::error::{Result, ShowMapError};
pub use common::types::{
    DateInterval, DetailRecord, GeoPoint, ListingRecord, Page, QueryFilter, ResolvedVenue,
    SortDirection, TicketLink,
};
