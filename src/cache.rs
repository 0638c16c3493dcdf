use crate::errors::FetchError;
use crate::models::{CacheFile, Serving};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Single-file servings cache. An entry is fresh only on the calendar day it
/// was written; anything older is treated as a miss and overwritten by the
/// next store. There is no locking, so concurrent processes race on the file.
#[derive(Debug, Clone)]
pub struct ServingsCache {
    path: PathBuf,
}

impl ServingsCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached servings when the entry was written on `today`.
    /// A missing file is a miss; a file that no longer parses is an error
    /// (delete the cache file to recover).
    pub async fn load_fresh(&self, today: NaiveDate) -> Result<Option<Vec<Serving>>, FetchError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let cached: CacheFile = serde_json::from_slice(&bytes)?;
        if cached.date == today {
            Ok(Some(cached.servings))
        } else {
            Ok(None)
        }
    }

    /// Overwrites the cache with `servings`, tagged with `today`.
    pub async fn store(&self, today: NaiveDate, servings: &[Serving]) -> Result<(), FetchError> {
        let entry = CacheFile {
            date: today,
            servings: servings.to_vec(),
        };
        let payload = serde_json::to_vec(&entry)?;
        fs::write(&self.path, payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrient;
    use chrono::Duration;
    use std::collections::BTreeMap;

    fn unique_cache_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "calorie_cache_{tag}_{}_{}.json",
            std::process::id(),
            nanos
        ));
        path
    }

    fn sample_servings() -> Vec<Serving> {
        let mut nutrients = BTreeMap::new();
        nutrients.insert(
            "Energy".to_string(),
            Nutrient {
                amount: Some(512.5),
                unit: Some("kcal".to_string()),
            },
        );
        vec![Serving {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            nutrients,
        }]
    }

    #[tokio::test]
    async fn round_trip_same_day_returns_identical_servings() {
        let cache = ServingsCache::new(unique_cache_path("round_trip"));
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let servings = sample_servings();

        cache.store(today, &servings).await.unwrap();
        let loaded = cache.load_fresh(today).await.unwrap();

        assert_eq!(loaded, Some(servings));
        let _ = std::fs::remove_file(cache.path());
    }

    #[tokio::test]
    async fn entry_from_yesterday_is_a_miss() {
        let cache = ServingsCache::new(unique_cache_path("stale"));
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        cache
            .store(today - Duration::days(1), &sample_servings())
            .await
            .unwrap();

        let loaded = cache.load_fresh(today).await.unwrap();
        assert_eq!(loaded, None);
        let _ = std::fs::remove_file(cache.path());
    }

    #[tokio::test]
    async fn missing_file_is_a_miss() {
        let cache = ServingsCache::new(unique_cache_path("missing"));
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(cache.load_fresh(today).await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let path = unique_cache_path("corrupt");
        std::fs::write(&path, b"not json at all").unwrap();
        let cache = ServingsCache::new(path);
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let result = cache.load_fresh(today).await;
        assert!(matches!(result, Err(FetchError::Json(_))));
        let _ = std::fs::remove_file(cache.path());
    }
}
