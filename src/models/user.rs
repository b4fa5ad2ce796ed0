//! Author entity as decoded from the page payload.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::date;

/// One author entity, keyed by stringified numeric id in the payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub screen_name: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub followers_count: u64,
    pub friends_count: u64,
    pub listed_count: u64,
    pub favourites_count: u64,
    pub statuses_count: u64,
    pub media_count: u64,
    pub verified: bool,
    #[serde(deserialize_with = "date::ruby_date_opt")]
    pub created_at: Option<DateTime<Utc>>,
}
