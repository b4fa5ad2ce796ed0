//! Data models: the structured search query and the decoded page payload.

mod adaptive;
pub mod date;
mod location;
mod query;
mod tweet;
mod user;

pub use adaptive::{
    Adaptive, AddEntries, Content, ContentTweet, Cursor, Entry, GlobalObjects, Instruction, Item,
    ItemContent, Operation, ReplaceEntry, Timeline,
};
pub use location::{BoundingBox, Coordinates, Geo, LatLong, LongLat, Place};
pub use query::Query;
pub use tweet::Tweet;
pub use user::User;
