//! Tweet entity as decoded from the page payload.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::date;
use crate::models::location::{Coordinates, Geo, Place};

/// One result entity. Passive data; every field is optional in the
/// payload, so the whole struct deserializes with defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tweet {
    pub id: u64,
    pub user_id: u64,
    pub full_text: String,
    pub retweet_count: u64,
    pub favorite_count: u64,
    pub reply_count: u64,
    pub quote_count: u64,
    /// Deprecated upstream, but still the field the exporter reads.
    pub geo: Option<Geo>,
    pub coordinates: Option<Coordinates>,
    pub place: Option<Place>,
    pub lang: String,
    pub source: String,
    #[serde(deserialize_with = "date::ruby_date_opt")]
    pub created_at: Option<DateTime<Utc>>,
}
