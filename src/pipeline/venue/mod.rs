//! Venue resolution: forward geocode, reverse geocode, then a locale
//! fallback chain that always ends in something displayable.

pub mod locale;
pub mod place_names;
pub mod resolver;

pub use resolver::{compose_display_address, VenueQuery, VenueResolver};
