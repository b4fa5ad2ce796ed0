//! Flattening of a decoded page into export-ready records.

use chrono::{DateTime, Utc};

use crate::models::{Adaptive, LatLong};

/// One exported row: a tweet joined with its author, no back-reference
/// to the page it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: u64,
    pub username: String,
    pub created_at: Option<DateTime<Utc>>,
    pub full_text: String,
    pub retweet_count: u64,
    pub favorite_count: u64,
    pub reply_count: u64,
    pub quote_count: u64,
    pub geo: Option<LatLong>,
    pub lang: String,
    pub source: String,
}

impl Record {
    /// Project a page into records, newest first.
    ///
    /// Iteration order comes from [`Adaptive::ordered_tweet_ids`]. The
    /// author is looked up by the tweet's stringified numeric user id;
    /// a missing author yields empty author fields rather than an error.
    pub fn from_adaptive(page: &Adaptive) -> Vec<Record> {
        page.ordered_tweet_ids()
            .iter()
            .map(|id| {
                let tweet = page
                    .global_objects
                    .tweets
                    .get(id)
                    .cloned()
                    .unwrap_or_default();
                let user = page
                    .global_objects
                    .users
                    .get(&tweet.user_id.to_string())
                    .cloned()
                    .unwrap_or_default();

                Record {
                    id: tweet.id,
                    username: user.screen_name,
                    created_at: tweet.created_at,
                    full_text: tweet.full_text,
                    retweet_count: tweet.retweet_count,
                    favorite_count: tweet.favorite_count,
                    reply_count: tweet.reply_count,
                    quote_count: tweet.quote_count,
                    geo: tweet.geo.map(|g| g.coordinates),
                    lang: tweet.lang,
                    source: tweet.source,
                }
            })
            .collect()
    }
}
