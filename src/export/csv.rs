//! Streaming CSV sink for projected records.

use std::io::Write;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::export::record::Record;
use crate::models::date;

const HEADER: [&str; 12] = [
    "id",
    "username",
    "created_at",
    "full_text",
    "retweet_count",
    "favorite_count",
    "reply_count",
    "quote_count",
    "latitude",
    "longitude",
    "lang",
    "source",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv write error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One serialized CSV row. Field order defines the column order.
#[derive(Debug, Serialize)]
struct Row {
    id: u64,
    username: String,
    created_at: String,
    full_text: String,
    retweet_count: u64,
    favorite_count: u64,
    reply_count: u64,
    quote_count: u64,
    latitude: Option<f64>,
    longitude: Option<f64>,
    lang: String,
    source: String,
}

impl From<&Record> for Row {
    fn from(record: &Record) -> Self {
        let (latitude, longitude) = match record.geo {
            Some(geo) => (Some(geo.latitude()), Some(geo.longitude())),
            None => (None, None),
        };

        Self {
            id: record.id,
            username: record.username.clone(),
            created_at: record
                .created_at
                .as_ref()
                .map(date::iso8601)
                .unwrap_or_default(),
            full_text: record.full_text.clone(),
            retweet_count: record.retweet_count,
            favorite_count: record.favorite_count,
            reply_count: record.reply_count,
            quote_count: record.quote_count,
            latitude,
            longitude,
            lang: record.lang.clone(),
            source: record.source.clone(),
        }
    }
}

/// Spawn the consumer half of the export pipeline.
///
/// Writes the header immediately, then one row per record per batch as
/// batches arrive, flushing the sink after each batch so output is
/// visible while the traversal is still running. The returned handle
/// resolves once the input channel closes and the sink is flushed.
pub fn spawn_csv_export<W>(
    sink: W,
    mut batches: mpsc::Receiver<Vec<Record>>,
) -> JoinHandle<Result<(), ExportError>>
where
    W: Write + Send + 'static,
{
    tokio::spawn(async move {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);

        writer.write_record(HEADER)?;
        writer.flush()?;

        while let Some(batch) = batches.recv().await {
            for record in &batch {
                writer.serialize(Row::from(record))?;
            }

            writer.flush()?;
            debug!(rows = batch.len(), "wrote batch");
        }

        Ok(())
    })
}
