//! Scripted in-memory [`SearchApi`] implementation for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, ErrorItem, ErrorResponse, SearchApi, SearchOptions};
use crate::models::{
    Adaptive, AddEntries, Content, ContentTweet, Cursor, Entry, Instruction, Item, ItemContent,
    Operation, Timeline, Tweet,
};

/// Replays queued responses and counts calls. Once a queue is down to
/// its last response, that response repeats for every further call.
#[derive(Debug, Default)]
pub struct MockApi {
    max_retry_attempts: u32,
    activations: Mutex<VecDeque<Result<String, ApiError>>>,
    pages: Mutex<VecDeque<Result<Adaptive, ApiError>>>,
    activate_calls: AtomicU32,
    search_calls: AtomicU32,
    requests: Mutex<Vec<SearchOptions>>,
}

impl MockApi {
    pub fn new(max_retry_attempts: u32) -> Self {
        Self {
            max_retry_attempts,
            ..Default::default()
        }
    }

    /// Queue the result of the next activation call.
    pub fn queue_activation(&self, result: Result<String, ApiError>) {
        self.activations.lock().unwrap().push_back(result);
    }

    /// Queue the result of the next search call.
    pub fn queue_page(&self, result: Result<Adaptive, ApiError>) {
        self.pages.lock().unwrap().push_back(result);
    }

    pub fn activate_calls(&self) -> u32 {
        self.activate_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> u32 {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Options of every search call, in call order.
    pub fn requests(&self) -> Vec<SearchOptions> {
        self.requests.lock().unwrap().clone()
    }

    fn next<T: Clone>(queue: &Mutex<VecDeque<T>>) -> Option<T> {
        let mut queue = queue.lock().unwrap();
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl SearchApi for MockApi {
    async fn activate_guest_token(&self) -> Result<String, ApiError> {
        self.activate_calls.fetch_add(1, Ordering::SeqCst);
        Self::next(&self.activations).unwrap_or_else(|| Ok(String::new()))
    }

    async fn search(&self, opts: &SearchOptions) -> Result<Adaptive, ApiError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(opts.clone());
        Self::next(&self.pages).unwrap_or_else(|| Ok(Adaptive::default()))
    }

    fn max_retry_attempts(&self) -> u32 {
        self.max_retry_attempts
    }
}

/// The upstream rejection used throughout the tests.
pub fn forbidden() -> ApiError {
    ApiError::Upstream(ErrorResponse {
        errors: vec![ErrorItem {
            code: 200,
            message: "forbidden".to_string(),
        }],
    })
}

/// Build a page holding the given tweet ids and, optionally, a bottom
/// cursor entry.
pub fn page_with_tweets(ids: &[&str], cursor: Option<&str>) -> Adaptive {
    let mut page = Adaptive::default();
    let mut entries = Vec::new();

    for id in ids {
        page.global_objects.tweets.insert(
            (*id).to_string(),
            Tweet {
                id: id.parse().unwrap_or_default(),
                ..Default::default()
            },
        );

        entries.push(Entry {
            entry_id: format!("sq-I-t-{}", id),
            sort_index: (*id).to_string(),
            content: Content {
                item: Item {
                    content: ItemContent {
                        tweet: ContentTweet {
                            id: (*id).to_string(),
                            display_type: "Tweet".to_string(),
                        },
                    },
                },
                ..Default::default()
            },
        });
    }

    if let Some(value) = cursor {
        entries.push(Entry {
            entry_id: "sq-cursor-bottom".to_string(),
            content: Content {
                operation: Operation {
                    cursor: Cursor {
                        value: value.to_string(),
                        cursor_type: "Bottom".to_string(),
                    },
                },
                ..Default::default()
            },
            ..Default::default()
        });
    }

    page.timeline = Timeline {
        instructions: vec![Instruction {
            add_entries: AddEntries { entries },
            ..Default::default()
        }],
        ..Default::default()
    };

    page
}
