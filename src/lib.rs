//! # Warbler
//!
//! A CLI tool that searches a microblogging service's undocumented web
//! search endpoint and streams matching posts to a CSV file.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Query encoding and the decoded page payload (tweets, users, timeline)
//! - [`api`]: HTTP transport, guest-token handling and the paginated traversal engine
//! - [`export`]: Record projection and the streaming CSV sink
//! - [`config`]: Configuration management
//!
//! The traversal engine produces pages into a channel while the CSV sink
//! consumes them concurrently, so the full result set is never buffered
//! in memory.

pub mod api;
pub mod config;
pub mod export;
pub mod models;

// Re-export commonly used types
pub use api::{ApiError, Client, SearchApi, SearchError, SearchOptions};
pub use models::{Adaptive, Query};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
