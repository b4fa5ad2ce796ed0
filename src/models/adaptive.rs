//! The decoded search-page payload.
//!
//! The endpoint returns two id-keyed entity maps under `globalObjects`
//! plus a `timeline.instructions` list that carries ordering and the
//! pagination cursor. Everything is loosely typed upstream, so every
//! struct here deserializes with defaults.

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::tweet::Tweet;
use crate::models::user::User;

/// Entry id marking the element that carries the bottom pagination cursor.
const CURSOR_BOTTOM_ENTRY_ID: &str = "sq-cursor-bottom";

/// Entry id prefix of entries that reference a tweet.
const TWEET_ENTRY_ID_PREFIX: &str = "sq-I-t-";

/// Display type of primary results (as opposed to replies, ads and
/// aggregates).
const TWEET_DISPLAY_TYPE: &str = "Tweet";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlobalObjects {
    pub tweets: HashMap<String, Tweet>,
    pub users: HashMap<String, User>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cursor {
    pub value: String,
    pub cursor_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Operation {
    pub cursor: Cursor,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentTweet {
    pub id: String,
    pub display_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemContent {
    pub tweet: ContentTweet,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Item {
    pub content: ItemContent,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Content {
    pub operation: Operation,
    pub item: Item,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entry {
    pub entry_id: String,
    pub sort_index: String,
    pub content: Content,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AddEntries {
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReplaceEntry {
    pub entry_id_to_replace: String,
    pub entry: Entry,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Instruction {
    pub add_entries: AddEntries,
    pub replace_entry: ReplaceEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Timeline {
    pub id: String,
    pub instructions: Vec<Instruction>,
}

/// One decoded page of search results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Adaptive {
    pub global_objects: GlobalObjects,
    pub timeline: Timeline,
}

impl Adaptive {
    /// Extract the bottom pagination cursor.
    ///
    /// Instructions are scanned in document order; within each one the
    /// replace-entry is checked before its add-entries. `None` means the
    /// page carries no cursor at all, which the traversal treats as a
    /// protocol violation on a non-empty page.
    pub fn find_cursor(&self) -> Option<String> {
        for instruction in &self.timeline.instructions {
            if instruction.replace_entry.entry_id_to_replace == CURSOR_BOTTOM_ENTRY_ID {
                return Some(
                    instruction
                        .replace_entry
                        .entry
                        .content
                        .operation
                        .cursor
                        .value
                        .clone(),
                );
            }

            for entry in &instruction.add_entries.entries {
                if entry.entry_id == CURSOR_BOTTOM_ENTRY_ID {
                    return Some(entry.content.operation.cursor.value.clone());
                }
            }
        }

        None
    }

    /// Tweet ids of the first instruction's entries, newest first.
    ///
    /// Entries must reference a tweet by id prefix, carry a non-empty
    /// nested tweet id and be a primary result; everything else (cursors,
    /// replies, ads, aggregates) is dropped. Order is a descending
    /// lexicographic sort on `sortIndex`. A page without instructions
    /// yields no ids; that is not an error.
    pub fn ordered_tweet_ids(&self) -> Vec<String> {
        let Some(first) = self.timeline.instructions.first() else {
            return Vec::new();
        };

        let mut entries: Vec<&Entry> = first
            .add_entries
            .entries
            .iter()
            .filter(|e| {
                e.entry_id.starts_with(TWEET_ENTRY_ID_PREFIX)
                    && !e.content.item.content.tweet.id.is_empty()
                    && e.content.item.content.tweet.display_type == TWEET_DISPLAY_TYPE
            })
            .collect();

        entries.sort_by(|a, b| b.sort_index.cmp(&a.sort_index));

        entries
            .into_iter()
            .map(|e| e.content.item.content.tweet.id.clone())
            .collect()
    }
}
