//! Drink data sources: the seam between the session and the remote API.

pub mod web;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use super::error::CatalogResult;
use super::query::FilterKey;
use super::record::DrinkRecord;

pub use web::HttpSource;

#[async_trait]
pub trait DrinkSource: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Full records whose name matches `term`.
    async fn search(&self, term: &str) -> CatalogResult<Vec<DrinkRecord>>;

    /// Abbreviated records (id, name, thumbnail) matching a filter.
    async fn filter(&self, key: FilterKey, value: &str) -> CatalogResult<Vec<DrinkRecord>>;

    /// The full record for `id`, or `None` when the API has no such drink.
    async fn lookup(&self, id: &str) -> CatalogResult<Option<DrinkRecord>>;

    /// One random full record.
    async fn random(&self) -> CatalogResult<Option<DrinkRecord>>;
}
