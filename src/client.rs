use crate::cache::ServingsCache;
use crate::config::Credentials;
use crate::errors::FetchError;
use crate::models::Serving;
use chrono::{Local, NaiveDate};
use reqwest::Client;
use tracing::info;

/// Client for the nutrition service. Keeps the login session in a cookie
/// jar and routes every servings request through the same-day cache.
pub struct CronometerClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
    cache: ServingsCache,
}

impl CronometerClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        cache: ServingsCache,
    ) -> Result<Self, FetchError> {
        let http = Client::builder().cookie_store(true).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            credentials,
            cache,
        })
    }

    /// Posts the form-encoded credentials. The session cookie lands in the
    /// client's jar; there is no retry or token refresh.
    async fn login(&self) -> Result<(), FetchError> {
        let response = self
            .http
            .post(format!("{}/login", self.base_url))
            .form(&[
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Upstream(response.status()));
        }
        Ok(())
    }

    /// Returns the serving records for `[start, end]`, fetching at most once
    /// per calendar day. On a same-day cache hit the stored servings are
    /// returned unconditionally; the cache is keyed by day only, so a changed
    /// range does not invalidate it until the next day.
    pub async fn get_servings(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Serving>, FetchError> {
        let today = Local::now().date_naive();
        if let Some(servings) = self.cache.load_fresh(today).await? {
            info!("cache hit: {} servings", servings.len());
            return Ok(servings);
        }

        self.login().await?;

        let response = self
            .http
            .get(format!("{}/api/v2/reports/servings", self.base_url))
            .query(&[("date_range", format!("{start},{end}"))])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Upstream(response.status()));
        }
        let servings: Vec<Serving> = response.json().await?;

        self.cache.store(today, &servings).await?;
        info!("fetched {} servings for {start}..{end}", servings.len());
        Ok(servings)
    }
}
