//! Scriptable in-process source for session tests.

use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use super::DrinkSource;
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::query::FilterKey;
use crate::catalog::record::DrinkRecord;

pub fn full_record(id: &str, name: &str) -> DrinkRecord {
    serde_json::from_value(json!({
        "idDrink": id,
        "strDrink": name,
        "strDrinkThumb": format!("https://img.example/{id}.jpg"),
        "strCategory": "Cocktail",
        "strAlcoholic": "Alcoholic",
        "strGlass": "Cocktail glass",
        "strInstructions": "Shake with ice.",
        "strIngredient1": "Gin",
        "strMeasure1": "2 oz"
    }))
    .unwrap()
}

pub fn abbreviated_record(id: &str) -> DrinkRecord {
    serde_json::from_value(json!({
        "idDrink": id,
        "strDrink": format!("Drink {id}"),
        "strDrinkThumb": format!("https://img.example/{id}.jpg")
    }))
    .unwrap()
}

/// Holds a search open until the test releases it.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct Calls {
    pub search: AtomicUsize,
    pub filter: AtomicUsize,
    pub lookup: AtomicUsize,
    pub random: AtomicUsize,
}

impl Calls {
    pub fn lookups(&self) -> usize {
        self.lookup.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.search.load(Ordering::SeqCst)
            + self.filter.load(Ordering::SeqCst)
            + self.lookup.load(Ordering::SeqCst)
            + self.random.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct FakeSource {
    searches: HashMap<String, Vec<DrinkRecord>>,
    filters: HashMap<(FilterKey, String), Vec<DrinkRecord>>,
    details: HashMap<String, DrinkRecord>,
    lookup_delays: HashMap<String, Duration>,
    failing_lookups: HashSet<String>,
    random: Option<DrinkRecord>,
    offline: bool,
    gates: HashMap<String, Arc<Gate>>,
    pub calls: Calls,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: &str, records: Vec<DrinkRecord>) -> Self {
        for record in &records {
            self.details.insert(record.id.clone(), record.clone());
        }
        self.searches.insert(term.to_string(), records);
        self
    }

    /// Registers abbreviated filter results plus a full record per id.
    pub fn with_filter(mut self, key: FilterKey, value: &str, ids: &[&str]) -> Self {
        let listed = ids.iter().map(|id| abbreviated_record(id)).collect();
        for id in ids {
            self.details
                .insert(id.to_string(), full_record(id, &format!("Drink {id}")));
        }
        self.filters.insert((key, value.to_string()), listed);
        self
    }

    pub fn with_detail(mut self, record: DrinkRecord) -> Self {
        self.details.insert(record.id.clone(), record);
        self
    }

    pub fn without_detail(mut self, id: &str) -> Self {
        self.details.remove(id);
        self
    }

    pub fn with_failing_lookup(mut self, id: &str) -> Self {
        self.failing_lookups.insert(id.to_string());
        self
    }

    pub fn with_lookup_delay(mut self, id: &str, delay: Duration) -> Self {
        self.lookup_delays.insert(id.to_string(), delay);
        self
    }

    pub fn with_random(mut self, record: DrinkRecord) -> Self {
        self.random = Some(record);
        self
    }

    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn gated(mut self, term: &str, gate: Arc<Gate>) -> Self {
        self.gates.insert(term.to_string(), gate);
        self
    }

    fn check_online(&self) -> CatalogResult<()> {
        if self.offline {
            Err(CatalogError::Transport("network unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DrinkSource for FakeSource {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn search(&self, term: &str) -> CatalogResult<Vec<DrinkRecord>> {
        self.calls.search.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = self.gates.get(term) {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.check_online()?;
        Ok(self.searches.get(term).cloned().unwrap_or_default())
    }

    async fn filter(&self, key: FilterKey, value: &str) -> CatalogResult<Vec<DrinkRecord>> {
        self.calls.filter.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        Ok(self
            .filters
            .get(&(key, value.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn lookup(&self, id: &str) -> CatalogResult<Option<DrinkRecord>> {
        self.calls.lookup.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.lookup_delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        self.check_online()?;
        if self.failing_lookups.contains(id) {
            return Err(CatalogError::Transport(format!("lookup {id} failed")));
        }
        Ok(self.details.get(id).cloned())
    }

    async fn random(&self) -> CatalogResult<Option<DrinkRecord>> {
        self.calls.random.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        Ok(self.random.clone())
    }
}
