//! TheCocktailDB over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use super::DrinkSource;
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::query::FilterKey;
use crate::catalog::record::DrinkRecord;
use crate::config::Config;

pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(config: &Config) -> CatalogResult<Self> {
        Self::with_base_url(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cocktail-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base: directory_url(base_url)?,
        })
    }

    /// GET `endpoint` and return whatever sits under `drinks`.
    async fn fetch(&self, endpoint: &str, query: &[(&str, &str)]) -> CatalogResult<Vec<DrinkRecord>> {
        let url = self.base.join(endpoint)?;
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, endpoint, "Drink API returned an error status");
            return Err(CatalogError::Transport(format!("HTTP {status} from {endpoint}")));
        }

        let body = response.bytes().await?;
        let drinks = parse_drinks(&body)?;
        debug!(endpoint, count = drinks.len(), "Fetched drinks");
        Ok(drinks)
    }
}

#[async_trait]
impl DrinkSource for HttpSource {
    fn name(&self) -> &'static str {
        "thecocktaildb"
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str) -> CatalogResult<Vec<DrinkRecord>> {
        self.fetch("search.php", &[("s", term)]).await
    }

    #[instrument(skip(self))]
    async fn filter(&self, key: FilterKey, value: &str) -> CatalogResult<Vec<DrinkRecord>> {
        self.fetch("filter.php", &[(key.param(), value)]).await
    }

    #[instrument(skip(self))]
    async fn lookup(&self, id: &str) -> CatalogResult<Option<DrinkRecord>> {
        Ok(self.fetch("lookup.php", &[("i", id)]).await?.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn random(&self) -> CatalogResult<Option<DrinkRecord>> {
        Ok(self.fetch("random.php", &[]).await?.into_iter().next())
    }
}

/// Endpoints are joined relative to the base, so it has to end in `/`.
fn directory_url(base_url: &str) -> CatalogResult<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// A missing, null or non-array `drinks` field means zero results. The API
/// answers some misses with `"drinks": "no data found"`.
fn parse_drinks(body: &[u8]) -> CatalogResult<Vec<DrinkRecord>> {
    let envelope: Value =
        serde_json::from_slice(body).map_err(|e| CatalogError::Parse(e.to_string()))?;

    match envelope.get("drinks") {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| {
                DrinkRecord::deserialize(item).map_err(|e| CatalogError::Parse(e.to_string()))
            })
            .collect(),
        _ => Ok(Vec::new()),
    }
}
