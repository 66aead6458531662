use std::sync::Arc;

use tauri::{command, State};
use tracing::info;

use crate::catalog::{
    CatalogSession, DetailView, DrinkCard, GridView, HttpSource, QuerySpec, ThemeView,
};
use crate::config::Config;
use crate::storage::{FileStore, ThemePreference};

/// Resolve config, open the data directory and start a session.
pub async fn bootstrap() -> anyhow::Result<Arc<CatalogSession>> {
    let config = Config::load()?;
    let store = FileStore::open(config.data_dir()?)?;
    let source = HttpSource::new(&config)?;
    info!(api = %config.api_base_url, data = %store.dir().display(), "Starting catalog session");

    let session = CatalogSession::start(&config, Arc::new(source), Arc::new(store)).await?;
    Ok(Arc::new(session))
}

/* ---------- 1.  QUERIES ---------- */

#[command]
pub async fn run_query(spec: QuerySpec, session: State<'_, Arc<CatalogSession>>) -> Result<GridView, String> {
    session.run_query(spec).await;
    Ok(session.grid().await)
}

#[command]
pub async fn apply_filter(value: String, session: State<'_, Arc<CatalogSession>>) -> Result<GridView, String> {
    session
        .apply_filter(&value)
        .await
        .ok_or_else(|| format!("Unknown filter: {value}"))?;
    Ok(session.grid().await)
}

#[command]
pub async fn grid(session: State<'_, Arc<CatalogSession>>) -> Result<GridView, String> {
    Ok(session.grid().await)
}

/* ---------- 2.  DETAILS ---------- */

#[command]
pub async fn lookup_detail(id: String, session: State<'_, Arc<CatalogSession>>) -> Result<DetailView, String> {
    Ok(session.detail(&id).await)
}

#[command]
pub async fn show_random(session: State<'_, Arc<CatalogSession>>) -> Result<DetailView, String> {
    Ok(session.show_random().await)
}

/* ---------- 3.  FAVORITES ---------- */

#[command]
pub async fn toggle_favorite(id: String, session: State<'_, Arc<CatalogSession>>) -> Result<Vec<DrinkCard>, String> {
    let records = session
        .toggle_favorite(&id)
        .await
        .map_err(|e| e.display_message())?;
    Ok(records.iter().map(|r| DrinkCard::from_record(r, true)).collect())
}

#[command]
pub async fn favorites(session: State<'_, Arc<CatalogSession>>) -> Result<Vec<DrinkCard>, String> {
    let records = session.favorites().await;
    Ok(records.iter().map(|r| DrinkCard::from_record(r, true)).collect())
}

/* ---------- 4.  THEME ---------- */

#[command]
pub async fn current_theme(session: State<'_, Arc<CatalogSession>>) -> Result<ThemeView, String> {
    Ok(session.current_theme().await.into())
}

#[command]
pub async fn apply_theme(
    theme: ThemePreference,
    session: State<'_, Arc<CatalogSession>>,
) -> Result<ThemeView, String> {
    session
        .apply_theme(theme)
        .await
        .map(ThemeView::from)
        .map_err(|e| e.to_string())
}

#[command]
pub async fn toggle_theme(session: State<'_, Arc<CatalogSession>>) -> Result<ThemeView, String> {
    session
        .toggle_theme()
        .await
        .map(ThemeView::from)
        .map_err(|e| e.to_string())
}
