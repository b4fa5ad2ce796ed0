//! The paginated traversal engine.
//!
//! One producer task walks the cursor chain page by page and emits each
//! outcome into a channel; the consumer (the CSV pipeline) runs
//! concurrently. Traversal state never leaves the task, so the channel
//! is the only thing producer and consumer share.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{SearchApi, SearchError};
use crate::models::{Adaptive, Query};

/// Parameters for one traversal.
///
/// `guest_token` and `cursor` are normally left empty; pre-supplying
/// them resumes an earlier traversal.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub query: Query,
    pub guest_token: String,
    pub cursor: String,
    pub top: bool,
}

/// Outcome of one attempt cycle: a decoded page, or the terminal error
/// that ended the traversal.
pub type SearchResult = Result<Adaptive, SearchError>;

/// Walk the full result set for `opts.query`, emitting pages in fetch
/// order.
///
/// The traversal runs in its own task with at most one outstanding fetch;
/// each page is available to the receiver as soon as it is decoded. The
/// channel closes exactly once, after the terminal element: either the
/// page whose tweet map is empty (normal end of data) or an error.
/// Dropping the receiver stops the traversal at its next emission.
///
/// An upstream error response is retried by discarding the guest token
/// and re-activating, up to [`SearchApi::max_retry_attempts`] times;
/// a successful page resets the budget. Transport failures and
/// activation failures are never retried.
pub fn search_all<A: SearchApi>(api: Arc<A>, opts: SearchOptions) -> mpsc::Receiver<SearchResult> {
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let mut opts = opts;
        let mut attempts: u32 = 0;

        loop {
            if opts.guest_token.is_empty() {
                match api.activate_guest_token().await {
                    Ok(token) => opts.guest_token = token,
                    Err(err) => {
                        let _ = tx.send(Err(SearchError::GuestToken(err))).await;
                        return;
                    }
                }
            }

            match api.search(&opts).await {
                Ok(page) => {
                    let exhausted = page.global_objects.tweets.is_empty();
                    let next_cursor = page.find_cursor();

                    if tx.send(Ok(page)).await.is_err() {
                        debug!("receiver dropped, stopping traversal");
                        return;
                    }

                    if exhausted {
                        return;
                    }

                    match next_cursor {
                        Some(cursor) => {
                            opts.cursor = cursor;
                            attempts = 0;
                        }
                        None => {
                            let _ = tx.send(Err(SearchError::CursorNotFound)).await;
                            return;
                        }
                    }
                }
                Err(err) if err.is_retryable() && api.max_retry_attempts() != 0 => {
                    if attempts >= api.max_retry_attempts() {
                        let _ = tx.send(Err(SearchError::RetryLimitExceeded(err))).await;
                        return;
                    }

                    warn!(attempt = attempts + 1, error = %err, "search rejected, refreshing guest token");
                    opts.guest_token.clear();
                    attempts += 1;
                }
                Err(err) => {
                    let _ = tx.send(Err(SearchError::Search(err))).await;
                    return;
                }
            }
        }
    });

    rx
}
