//! The catalog session: owns the working set, the favorites set and the theme,
//! turns queries into working sets and produces view snapshots.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use super::error::{CatalogError, CatalogResult};
use super::expansion::expand_details;
use super::query::{FilterKey, QuerySpec};
use super::record::DrinkRecord;
use super::sources::DrinkSource;
use super::types::{QueryOutcome, QueryStatus};
use super::view::{DetailView, DrinkDetail, GridView};
use crate::config::{Config, ConfigError};
use crate::storage::{Favorites, KeyValueStore, ThemePreference};

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub expansion_cap: usize,
    pub recent_capacity: NonZeroUsize,
    pub default_search: String,
    pub image_base_url: Url,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> CatalogResult<Self> {
        config.validate()?;
        let recent_capacity = NonZeroUsize::new(config.recent_capacity).ok_or_else(|| {
            ConfigError::InvalidValue {
                key: "recent_capacity".into(),
                reason: "must be at least 1".into(),
            }
        })?;
        Ok(Self {
            expansion_cap: config.expansion_cap,
            recent_capacity,
            default_search: config.default_search.clone(),
            image_base_url: Url::parse(&config.image_base_url)?,
        })
    }
}

struct SessionState {
    /// Replaced wholesale by each completed query, never edited in place.
    working_set: Arc<Vec<DrinkRecord>>,
    status: QueryStatus,
    /// Full records seen in earlier queries and lookups.
    recent: LruCache<String, DrinkRecord>,
}

pub struct CatalogSession {
    id: Uuid,
    settings: SessionSettings,
    source: Arc<dyn DrinkSource>,
    store: Arc<dyn KeyValueStore>,
    generation: AtomicU64,
    state: RwLock<SessionState>,
    favorites: Mutex<Favorites>,
    theme: Mutex<ThemePreference>,
}

impl CatalogSession {
    /// Build a session, loading favorites and theme from `store`.
    pub fn new(
        settings: SessionSettings,
        source: Arc<dyn DrinkSource>,
        store: Arc<dyn KeyValueStore>,
    ) -> CatalogResult<Self> {
        let favorites = Favorites::load(store.as_ref())?;
        let theme = ThemePreference::load(store.as_ref())?;
        let id = Uuid::new_v4();

        info!(
            session = %id,
            source = source.name(),
            store = store.name(),
            favorites = favorites.len(),
            %theme,
            "Session state loaded"
        );

        Ok(Self {
            id,
            state: RwLock::new(SessionState {
                working_set: Arc::new(Vec::new()),
                status: QueryStatus::Idle,
                recent: LruCache::new(settings.recent_capacity),
            }),
            settings,
            source,
            store,
            generation: AtomicU64::new(0),
            favorites: Mutex::new(favorites),
            theme: Mutex::new(theme),
        })
    }

    /// Load persisted state and run the default search.
    pub async fn start(
        config: &Config,
        source: Arc<dyn DrinkSource>,
        store: Arc<dyn KeyValueStore>,
    ) -> CatalogResult<Self> {
        let session = Self::new(SessionSettings::from_config(config)?, source, store)?;
        session.reset_to_default().await;
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /* ---------- queries ---------- */

    /// Run `spec` and replace the working set with its result.
    ///
    /// Never fails: a failed primary call empties the working set and records
    /// the message in the status. If another query starts before this one
    /// finishes, this result is discarded.
    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn run_query(&self, spec: QuerySpec) -> QueryOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            if self.is_current(generation) {
                state.status = QueryStatus::Loading {
                    generation,
                    spec: spec.clone(),
                };
            }
        }
        debug!(%spec, generation, "Query started");

        let fetched = self.fetch(&spec).await;

        let mut state = self.state.write().await;
        if !self.is_current(generation) {
            debug!(generation, "Discarding superseded query result");
            return QueryOutcome::Superseded { generation };
        }

        match fetched {
            Ok((records, dropped)) => {
                for record in records.iter().filter(|r| r.is_full()) {
                    state.recent.put(record.id.clone(), record.clone());
                }
                let records = Arc::new(records);
                state.working_set = Arc::clone(&records);
                state.status = QueryStatus::Ready {
                    generation,
                    count: records.len(),
                    dropped,
                };
                info!(%spec, count = records.len(), dropped, "Query completed");
                QueryOutcome::Completed {
                    generation,
                    records,
                    dropped,
                }
            }
            Err(err) => {
                warn!(%spec, error = %err, "Query failed");
                let message = err.display_message();
                state.working_set = Arc::new(Vec::new());
                state.status = QueryStatus::Failed {
                    generation,
                    message: message.clone(),
                };
                QueryOutcome::Failed {
                    generation,
                    message,
                }
            }
        }
    }

    /// The filter dropdown's `all` option.
    pub async fn reset_to_default(&self) -> QueryOutcome {
        let spec = QuerySpec::search(self.settings.default_search.clone());
        self.run_query(spec).await
    }

    /// Run the query selected by a filter dropdown value; `None` when the
    /// value is not recognised.
    pub async fn apply_filter(&self, value: &str) -> Option<QueryOutcome> {
        let spec = QuerySpec::from_filter_value(value, &self.settings.default_search)?;
        Some(self.run_query(spec).await)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn fetch(&self, spec: &QuerySpec) -> CatalogResult<(Vec<DrinkRecord>, usize)> {
        match spec {
            QuerySpec::Search { term } => Ok((self.source.search(term).await?, 0)),
            QuerySpec::Random => {
                let record = self
                    .source
                    .random()
                    .await?
                    .ok_or_else(|| CatalogError::NotFound("random".to_string()))?;
                Ok((vec![record], 0))
            }
            QuerySpec::FilterByAlcohol { value } => {
                self.fetch_expanded(FilterKey::Alcohol, value.api_value()).await
            }
            QuerySpec::FilterByCategory { value } => {
                self.fetch_expanded(FilterKey::Category, value).await
            }
            QuerySpec::FilterByGlass { value } => self.fetch_expanded(FilterKey::Glass, value).await,
        }
    }

    async fn fetch_expanded(&self, key: FilterKey, value: &str) -> CatalogResult<(Vec<DrinkRecord>, usize)> {
        let listed = self.source.filter(key, value).await?;
        let expansion = expand_details(self.source.as_ref(), &listed, self.settings.expansion_cap).await;
        if expansion.dropped > 0 {
            warn!(
                dropped = expansion.dropped,
                requested = expansion.requested,
                "Some drinks could not be expanded"
            );
        }
        Ok((expansion.records, expansion.dropped))
    }

    /* ---------- details ---------- */

    /// Resolve a full record: working set, recent records and favorites
    /// first, the network only on a miss.
    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn lookup_detail(&self, id: &str) -> CatalogResult<DrinkRecord> {
        if let Some(record) = self.cached(id).await {
            debug!(id, "Detail served from session cache");
            return Ok(record);
        }

        let record = self
            .source
            .lookup(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        self.remember(&record).await;
        Ok(record)
    }

    async fn cached(&self, id: &str) -> Option<DrinkRecord> {
        {
            let mut state = self.state.write().await;
            if let Some(record) = state.working_set.iter().find(|r| r.id == id && r.is_full()) {
                return Some(record.clone());
            }
            if let Some(record) = state.recent.get(id) {
                return Some(record.clone());
            }
        }
        self.favorites.lock().await.get(id).cloned()
    }

    async fn remember(&self, record: &DrinkRecord) {
        if record.is_full() {
            self.state
                .write()
                .await
                .recent
                .put(record.id.clone(), record.clone());
        }
    }

    /// Detail snapshot for `id`, or `NotAvailable` when it cannot be resolved.
    pub async fn detail(&self, id: &str) -> DetailView {
        match self.lookup_detail(id).await {
            Ok(record) => self.detail_view(&record).await,
            Err(err) => {
                warn!(id, error = %err, "Detail not available");
                DetailView::NotAvailable {
                    message: err.display_message(),
                }
            }
        }
    }

    /// Pick a random drink and present its details.
    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn show_random(&self) -> DetailView {
        let err = match self.source.random().await {
            Ok(Some(record)) => {
                self.remember(&record).await;
                return self.detail_view(&record).await;
            }
            Ok(None) => CatalogError::NotFound("random".to_string()),
            Err(err) => err,
        };
        warn!(error = %err, "Random drink not available");
        DetailView::NotAvailable {
            message: err.display_message(),
        }
    }

    async fn detail_view(&self, record: &DrinkRecord) -> DetailView {
        let is_favorite = self.is_favorite(&record.id).await;
        DetailView::Ready {
            detail: DrinkDetail::from_record(record, is_favorite, &self.settings.image_base_url),
        }
    }

    /* ---------- favorites ---------- */

    /// Add `id` to favorites if absent, remove it if present, and persist the
    /// full set. Returns the set after the change.
    ///
    /// The in-memory set only changes if the write succeeds. Membership is
    /// checked again after resolving the record, so two overlapping toggles
    /// of the same id cancel out.
    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn toggle_favorite(&self, id: &str) -> CatalogResult<Vec<DrinkRecord>> {
        {
            let mut favorites = self.favorites.lock().await;
            if let Some(result) = self.remove_favorite(&mut favorites, id) {
                return result;
            }
        }

        let record = self.lookup_detail(id).await?;

        let mut favorites = self.favorites.lock().await;
        if let Some(result) = self.remove_favorite(&mut favorites, id) {
            return result;
        }
        favorites.insert(record);
        if let Err(err) = favorites.persist(self.store.as_ref()) {
            favorites.remove(id);
            return Err(err.into());
        }
        info!(id, total = favorites.len(), "Added favorite");
        Ok(favorites.records().to_vec())
    }

    /// `None` when `id` is not a favorite.
    fn remove_favorite(
        &self,
        favorites: &mut Favorites,
        id: &str,
    ) -> Option<CatalogResult<Vec<DrinkRecord>>> {
        let (index, record) = favorites.remove(id)?;
        if let Err(err) = favorites.persist(self.store.as_ref()) {
            favorites.restore(index, record);
            return Some(Err(err.into()));
        }
        info!(id, total = favorites.len(), "Removed favorite");
        Some(Ok(favorites.records().to_vec()))
    }

    pub async fn favorites(&self) -> Vec<DrinkRecord> {
        self.favorites.lock().await.records().to_vec()
    }

    pub async fn is_favorite(&self, id: &str) -> bool {
        self.favorites.lock().await.contains(id)
    }

    /* ---------- theme ---------- */

    pub async fn current_theme(&self) -> ThemePreference {
        *self.theme.lock().await
    }

    pub async fn apply_theme(&self, preference: ThemePreference) -> CatalogResult<ThemePreference> {
        let mut theme = self.theme.lock().await;
        preference.save(self.store.as_ref())?;
        *theme = preference;
        debug!(%preference, "Theme applied");
        Ok(preference)
    }

    pub async fn toggle_theme(&self) -> CatalogResult<ThemePreference> {
        let mut theme = self.theme.lock().await;
        let next = theme.toggled();
        next.save(self.store.as_ref())?;
        *theme = next;
        debug!(theme = %next, "Theme toggled");
        Ok(next)
    }

    /* ---------- snapshots ---------- */

    pub async fn working_set(&self) -> Arc<Vec<DrinkRecord>> {
        Arc::clone(&self.state.read().await.working_set)
    }

    pub async fn status(&self) -> QueryStatus {
        self.state.read().await.status.clone()
    }

    pub async fn grid(&self) -> GridView {
        let (status, working_set) = {
            let state = self.state.read().await;
            (state.status.clone(), Arc::clone(&state.working_set))
        };
        let favorites = self.favorites.lock().await;
        GridView::build(&status, &working_set, &favorites)
    }
}
