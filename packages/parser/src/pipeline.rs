use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::{info, instrument};

use crate::entity::page;
use crate::extract::extract_metadata;
use crate::fetch::{FetchError, PageFetcher};
use crate::store;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to store page: {0}")]
    Database(#[from] DbErr),
}

/// Fetch a document, extract its metadata and store it as a page.
///
/// Shared by the direct `/parse` endpoint and the queue worker.
pub struct Pipeline {
    fetcher: Arc<dyn PageFetcher>,
    db: DatabaseConnection,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn PageFetcher>, db: DatabaseConnection) -> Self {
        Self { fetcher, db }
    }

    #[instrument(skip(self))]
    pub async fn run(&self, url: &str) -> Result<page::Model, PipelineError> {
        let html = self.fetcher.fetch(url).await?;
        let metadata = extract_metadata(&html);
        let page = store::save_page(&self.db, metadata).await?;

        info!(page_id = page.id, name = %page.name, "Page parsed and stored");
        Ok(page)
    }
}
