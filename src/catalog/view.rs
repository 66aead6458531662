//! Render-ready snapshots handed to the presentation layer.

use serde::Serialize;
use url::Url;

use super::record::DrinkRecord;
use super::types::QueryStatus;
use crate::storage::{Favorites, ThemePreference};

pub const NO_DRINKS_MESSAGE: &str = "No drinks found";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkCard {
    pub id: String,
    pub name: String,
    pub thumbnail_url: Option<String>,
    pub alcoholic_status: Option<String>,
    pub is_favorite: bool,
}

impl DrinkCard {
    pub fn from_record(record: &DrinkRecord, is_favorite: bool) -> Self {
        Self {
            id: record.id.clone(),
            name: record.display_name().to_string(),
            thumbnail_url: record.thumbnail.clone(),
            alcoholic_status: record.alcoholic.clone(),
            is_favorite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    pub name: String,
    pub measure: Option<String>,
    pub thumbnail_url: Option<String>,
    /// `"<measure> <name>"` as listed in the detail view.
    pub line: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkDetail {
    pub id: String,
    pub name: String,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
    pub alcoholic_status: Option<String>,
    pub glass: Option<String>,
    pub instructions: Option<String>,
    pub ingredients: Vec<IngredientLine>,
    pub is_favorite: bool,
}

impl DrinkDetail {
    pub fn from_record(record: &DrinkRecord, is_favorite: bool, images: &Url) -> Self {
        let ingredients = record
            .ingredients()
            .into_iter()
            .map(|ingredient| IngredientLine {
                thumbnail_url: ingredient_thumbnail(images, &ingredient.name),
                line: ingredient.line(),
                name: ingredient.name,
                measure: ingredient.measure,
            })
            .collect();

        Self {
            id: record.id.clone(),
            name: record.display_name().to_string(),
            thumbnail_url: record.thumbnail.clone(),
            category: record.category.clone(),
            alcoholic_status: record.alcoholic.clone(),
            glass: record.glass.clone(),
            instructions: record.instructions.clone(),
            ingredients,
            is_favorite,
        }
    }
}

/// `<images>/ingredients/<name>-Small.png`, percent-encoded.
pub fn ingredient_thumbnail(images: &Url, name: &str) -> Option<String> {
    let mut url = images.clone();
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments
            .pop_if_empty()
            .push("ingredients")
            .push(&format!("{name}-Small.png"));
    }
    Some(url.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum GridView {
    Idle,
    Loading,
    Empty { message: String },
    Error { message: String },
    Ready { cards: Vec<DrinkCard> },
}

impl GridView {
    pub fn build(status: &QueryStatus, working_set: &[DrinkRecord], favorites: &Favorites) -> Self {
        match status {
            QueryStatus::Idle => GridView::Idle,
            QueryStatus::Loading { .. } => GridView::Loading,
            QueryStatus::Failed { message, .. } => GridView::Error {
                message: message.clone(),
            },
            QueryStatus::Ready { .. } if working_set.is_empty() => GridView::Empty {
                message: NO_DRINKS_MESSAGE.to_string(),
            },
            QueryStatus::Ready { .. } => GridView::Ready {
                cards: working_set
                    .iter()
                    .map(|r| DrinkCard::from_record(r, favorites.contains(&r.id)))
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DetailView {
    Loading,
    NotAvailable { message: String },
    Ready { detail: DrinkDetail },
}

/// Current theme plus the caption for the toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeView {
    pub theme: ThemePreference,
    pub label: &'static str,
}

impl From<ThemePreference> for ThemeView {
    fn from(theme: ThemePreference) -> Self {
        Self {
            theme,
            label: theme.label(),
        }
    }
}
