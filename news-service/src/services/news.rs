use anyhow::Context;
use std::sync::Arc;

use crate::models::NewsEntry;
use crate::services::NewsStore;

/// Key of the Redis list holding every entry, newest first.
pub const NEWS_KEY: &str = "devops_news";

/// Reads and writes the feed through a [`NewsStore`], owning the JSON
/// encoding of stored records.
#[derive(Clone)]
pub struct NewsFeed {
    store: Arc<dyn NewsStore>,
}

impl NewsFeed {
    pub fn new(store: Arc<dyn NewsStore>) -> Self {
        Self { store }
    }

    pub async fn ping(&self) -> Result<(), anyhow::Error> {
        self.store.ping().await
    }

    /// All entries, newest first. One undecodable record fails the whole read.
    pub async fn list(&self) -> Result<Vec<NewsEntry>, anyhow::Error> {
        let records = self.store.range_all(NEWS_KEY).await?;

        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_str::<NewsEntry>(record)
                    .with_context(|| format!("Corrupt news record at index {}", index))
            })
            .collect()
    }

    pub async fn publish(&self, entry: &NewsEntry) -> Result<(), anyhow::Error> {
        let record = serde_json::to_string(entry).context("Failed to encode news entry")?;
        self.store.push_front(NEWS_KEY, record).await?;

        metrics::counter!("news_entries_created_total").increment(1);
        Ok(())
    }
}
