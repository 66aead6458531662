//! Query descriptions: what to ask the drink API for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which filter endpoint parameter a filter query uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Alcohol,
    Category,
    Glass,
}

impl FilterKey {
    /// Query-string parameter name on `filter.php`.
    pub fn param(self) -> &'static str {
        match self {
            FilterKey::Alcohol => "a",
            FilterKey::Category => "c",
            FilterKey::Glass => "g",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlcoholFilter {
    Alcoholic,
    NonAlcoholic,
    Optional,
}

impl AlcoholFilter {
    /// Value understood by the upstream `filter.php?a=` endpoint.
    pub fn api_value(self) -> &'static str {
        match self {
            AlcoholFilter::Alcoholic => "Alcoholic",
            AlcoholFilter::NonAlcoholic => "Non_Alcoholic",
            AlcoholFilter::Optional => "Optional_alcohol",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum QuerySpec {
    Search { term: String },
    FilterByAlcohol { value: AlcoholFilter },
    FilterByCategory { value: String },
    FilterByGlass { value: String },
    Random,
}

impl QuerySpec {
    pub fn search(term: impl Into<String>) -> Self {
        QuerySpec::Search { term: term.into() }
    }

    pub fn category(value: impl Into<String>) -> Self {
        QuerySpec::FilterByCategory {
            value: value.into(),
        }
    }

    pub fn glass(value: impl Into<String>) -> Self {
        QuerySpec::FilterByGlass {
            value: value.into(),
        }
    }

    /// Filter queries return abbreviated records and need detail expansion.
    pub fn is_filter(&self) -> bool {
        self.filter_params().is_some()
    }

    /// Endpoint parameter and value for filter kinds.
    pub fn filter_params(&self) -> Option<(FilterKey, &str)> {
        match self {
            QuerySpec::FilterByAlcohol { value } => Some((FilterKey::Alcohol, value.api_value())),
            QuerySpec::FilterByCategory { value } => Some((FilterKey::Category, value.as_str())),
            QuerySpec::FilterByGlass { value } => Some((FilterKey::Glass, value.as_str())),
            QuerySpec::Search { .. } | QuerySpec::Random => None,
        }
    }

    /// Parse a value from the filter dropdown.
    ///
    /// `all` resets to a search for `default_term`; `category-<x>` and
    /// `glass-<x>` select those filters. Unknown values yield `None`.
    pub fn from_filter_value(value: &str, default_term: &str) -> Option<Self> {
        match value {
            "all" => return Some(Self::search(default_term)),
            "alcoholic" | "Alcoholic" => {
                return Some(QuerySpec::FilterByAlcohol {
                    value: AlcoholFilter::Alcoholic,
                })
            }
            "Non_Alcoholic" | "non_alcoholic" => {
                return Some(QuerySpec::FilterByAlcohol {
                    value: AlcoholFilter::NonAlcoholic,
                })
            }
            "Optional_Alcohol" | "optional" => {
                return Some(QuerySpec::FilterByAlcohol {
                    value: AlcoholFilter::Optional,
                })
            }
            _ => {}
        }

        if let Some(category) = value.strip_prefix("category-") {
            return (!category.is_empty()).then(|| Self::category(category));
        }
        if let Some(glass) = value.strip_prefix("glass-") {
            return (!glass.is_empty()).then(|| Self::glass(glass));
        }
        None
    }
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuerySpec::Search { term } => write!(f, "search({term:?})"),
            QuerySpec::FilterByAlcohol { value } => write!(f, "filterByAlcohol({})", value.api_value()),
            QuerySpec::FilterByCategory { value } => write!(f, "filterByCategory({value:?})"),
            QuerySpec::FilterByGlass { value } => write!(f, "filterByGlass({value:?})"),
            QuerySpec::Random => write!(f, "random"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropdown_values_map_to_queries() {
        assert_eq!(
            QuerySpec::from_filter_value("all", "Shake"),
            Some(QuerySpec::search("Shake"))
        );
        assert_eq!(
            QuerySpec::from_filter_value("Non_Alcoholic", "Shake"),
            Some(QuerySpec::FilterByAlcohol {
                value: AlcoholFilter::NonAlcoholic
            })
        );
        assert_eq!(
            QuerySpec::from_filter_value("category-Ordinary Drink", "Shake"),
            Some(QuerySpec::category("Ordinary Drink"))
        );
        assert_eq!(
            QuerySpec::from_filter_value("glass-Highball glass", "Shake"),
            Some(QuerySpec::glass("Highball glass"))
        );
        assert_eq!(QuerySpec::from_filter_value("glass-", "Shake"), None);
        assert_eq!(QuerySpec::from_filter_value("vodka", "Shake"), None);
    }

    #[test]
    fn only_filter_kinds_need_expansion() {
        assert!(QuerySpec::category("Cocktail").is_filter());
        assert!(!QuerySpec::search("margarita").is_filter());
        assert!(!QuerySpec::Random.is_filter());
        assert_eq!(
            QuerySpec::FilterByAlcohol {
                value: AlcoholFilter::Optional
            }
            .filter_params(),
            Some((FilterKey::Alcohol, "Optional_alcohol"))
        );
    }

    #[test]
    fn wire_shape_is_tagged_by_kind() {
        let spec: QuerySpec =
            serde_json::from_str(r#"{"kind":"filterByAlcohol","value":"non_alcoholic"}"#).unwrap();
        assert_eq!(
            spec,
            QuerySpec::FilterByAlcohol {
                value: AlcoholFilter::NonAlcoholic
            }
        );
        let random: QuerySpec = serde_json::from_str(r#"{"kind":"random"}"#).unwrap();
        assert_eq!(random, QuerySpec::Random);
    }
}
