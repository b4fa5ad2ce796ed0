//! Record projection and the streaming CSV sink.

mod csv;
mod record;

pub use csv::{spawn_csv_export, ExportError};
pub use record::Record;
