//! Decoding helpers for registry payloads.
//!
//! The registry answers in XML. [`markup::to_value`] turns a document into a
//! `serde_json::Value` tree so the typed records in `apis::kopis` can be read
//! with plain serde; [`one_or_many::OneOrMany`] absorbs the resulting
//! "single child becomes an object" quirk.

pub mod markup;
pub mod one_or_many;

pub use markup::to_value;
pub use one_or_many::OneOrMany;
