use crate::cache::ServingsCache;
use crate::client::CronometerClient;
use crate::config::SourceConfig;
use crate::errors::FetchError;
use crate::models::DailyRow;
use crate::report::{self, DEFAULT_ROLLING_WINDOW};
use async_trait::async_trait;
use chrono::{Duration, Local};
use std::path::PathBuf;
use std::sync::Arc;

/// Produces the daily calorie rows, from wherever they come.
#[async_trait]
pub trait DailySource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<DailyRow>, FetchError>;
}

/// Remote variant: pulls the trailing `fetch_days` of servings through the
/// same-day cache, then aggregates.
pub struct CronometerSource {
    client: CronometerClient,
    fetch_days: i64,
}

impl CronometerSource {
    pub fn new(client: CronometerClient, fetch_days: i64) -> Self {
        Self { client, fetch_days }
    }
}

#[async_trait]
impl DailySource for CronometerSource {
    async fn fetch(&self) -> Result<Vec<DailyRow>, FetchError> {
        let end = Local::now().date_naive();
        let start = end - Duration::days(self.fetch_days - 1);
        let servings = self.client.get_servings(start, end).await?;
        Ok(report::daily_rows(&servings, DEFAULT_ROLLING_WINDOW))
    }
}

/// File-based variant: re-reads the exported CSV on every fetch.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DailySource for CsvSource {
    async fn fetch(&self) -> Result<Vec<DailyRow>, FetchError> {
        report::rows_from_csv(&self.path, DEFAULT_ROLLING_WINDOW).await
    }
}

/// Builds the source the configuration asks for.
pub fn daily_source(config: &SourceConfig) -> Result<Arc<dyn DailySource>, FetchError> {
    match config {
        SourceConfig::Csv { path } => Ok(Arc::new(CsvSource::new(path.clone()))),
        SourceConfig::Cronometer {
            base_url,
            credentials,
            cache_path,
            fetch_days,
        } => {
            let client = CronometerClient::new(
                base_url.clone(),
                credentials.clone(),
                ServingsCache::new(cache_path.clone()),
            )?;
            Ok(Arc::new(CronometerSource::new(client, *fetch_days)))
        }
    }
}
