//! Drink records as served by TheCocktailDB.
//!
//! Field names follow the upstream JSON so that persisted favorites keep the
//! exact shape the API returned. Fields the catalog does not interpret are
//! carried in `extra` untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Upstream records number their ingredient/measure pairs 1 through 15.
pub const MAX_INGREDIENTS: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkRecord {
    #[serde(rename = "idDrink")]
    pub id: String,
    #[serde(rename = "strDrink", default)]
    pub name: Option<String>,
    #[serde(rename = "strDrinkThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "strAlcoholic", default, skip_serializing_if = "Option::is_none")]
    pub alcoholic: Option<String>,
    #[serde(rename = "strGlass", default, skip_serializing_if = "Option::is_none")]
    pub glass: Option<String>,
    #[serde(rename = "strInstructions", default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub measure: Option<String>,
}

impl Ingredient {
    /// `"<measure> <name>"`, or just the name when no measure is given.
    pub fn line(&self) -> String {
        format!("{} {}", self.measure.as_deref().unwrap_or(""), self.name)
            .trim()
            .to_string()
    }
}

impl DrinkRecord {
    /// Filter endpoints only return id, name and thumbnail. Anything carrying
    /// detail fields came from search, lookup or random.
    pub fn is_full(&self) -> bool {
        self.category.is_some()
            || self.alcoholic.is_some()
            || self.glass.is_some()
            || self.instructions.is_some()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed drink")
    }

    /// Ingredient/measure pairs in upstream order, skipping empty slots.
    pub fn ingredients(&self) -> Vec<Ingredient> {
        (1..=MAX_INGREDIENTS)
            .filter_map(|i| {
                let name = self.extra_text(&format!("strIngredient{i}"))?;
                let measure = self
                    .extra_text(&format!("strMeasure{i}"))
                    .map(str::to_string);
                Some(Ingredient {
                    name: name.to_string(),
                    measure,
                })
            })
            .collect()
    }

    fn extra_text(&self, key: &str) -> Option<&str> {
        self.extra
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
