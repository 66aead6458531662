//! Detail expansion: abbreviated filter results → full records.
//!
//! At most `cap` ids are looked up. Lookups run concurrently and are awaited
//! jointly; results keep the input order whatever order they settle in.
//! Failed or empty lookups are dropped and counted, never retried.

use futures::future::join_all;
use tracing::{debug, instrument};

use super::record::DrinkRecord;
use super::sources::DrinkSource;

#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub records: Vec<DrinkRecord>,
    /// Lookups actually issued (`min(listed, cap)`).
    pub requested: usize,
    /// Lookups that failed or came back empty.
    pub dropped: usize,
}

#[instrument(skip(source, listed), fields(source = source.name(), listed = listed.len()))]
pub async fn expand_details(source: &dyn DrinkSource, listed: &[DrinkRecord], cap: usize) -> Expansion {
    let ids: Vec<&str> = listed.iter().take(cap).map(|d| d.id.as_str()).collect();

    let settled = join_all(ids.iter().map(|id| source.lookup(id))).await;

    let mut records = Vec::with_capacity(ids.len());
    let mut dropped = 0;
    for (id, outcome) in ids.iter().zip(settled) {
        match outcome {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {
                dropped += 1;
                debug!(id, "Lookup returned no drink");
            }
            Err(e) => {
                dropped += 1;
                debug!(id, error = %e, "Lookup failed");
            }
        }
    }

    Expansion {
        records,
        requested: ids.len(),
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::query::FilterKey;
    use crate::catalog::sources::fake::{abbreviated_record, FakeSource};
    use std::time::Duration;

    fn listed(ids: &[&str]) -> Vec<DrinkRecord> {
        ids.iter().map(|id| abbreviated_record(id)).collect()
    }

    #[tokio::test]
    async fn order_follows_input_not_completion() {
        let source = FakeSource::new()
            .with_filter(FilterKey::Category, "Cocktail", &["1", "2", "3"])
            .with_lookup_delay("1", Duration::from_millis(40))
            .with_lookup_delay("2", Duration::from_millis(20));

        let expansion = expand_details(&source, &listed(&["1", "2", "3"]), 12).await;
        let ids: Vec<_> = expansion.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert!(expansion.records.iter().all(DrinkRecord::is_full));
    }

    #[tokio::test]
    async fn lookups_are_capped() {
        let ids: Vec<String> = (0..30).map(|i| i.to_string()).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let source = FakeSource::new().with_filter(FilterKey::Glass, "Highball", &id_refs);

        let expansion = expand_details(&source, &listed(&id_refs), 12).await;
        assert_eq!(source.calls.lookups(), 12);
        assert_eq!(expansion.requested, 12);
        assert_eq!(expansion.records.len(), 12);
        assert_eq!(expansion.records[0].id, "0");
        assert_eq!(expansion.records[11].id, "11");
    }

    #[tokio::test]
    async fn failures_and_misses_are_dropped_and_counted() {
        let source = FakeSource::new()
            .with_filter(FilterKey::Alcohol, "Alcoholic", &["a", "b", "c", "d"])
            .with_failing_lookup("b")
            .without_detail("d");

        let expansion = expand_details(&source, &listed(&["a", "b", "c", "d"]), 12).await;
        let ids: Vec<_> = expansion.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(expansion.dropped, 2);
        assert_eq!(expansion.requested, 4);
    }
}
