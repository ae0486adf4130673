use crate::category::normalize_category_key;
use crate::non_empty;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use url::Url;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Preferences {
    #[serde(default)]
    pub alcohol_free: bool,
    #[serde(default)]
    pub fragrance_free: bool,
    #[serde(default)]
    pub non_comedogenic: bool,
}

impl Preferences {
    fn pairs(&self) -> [(&'static str, bool); 3] {
        [
            ("alcohol_free", self.alcohol_free),
            ("fragrance_free", self.fragrance_free),
            ("non_comedogenic", self.non_comedogenic),
        ]
    }
}

/// Query shape sent to the listing endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// One category and one brand, every preference flag spelled out.
    Single,
    /// Repeated `brand`/`category` params, only set flags sent.
    #[default]
    Multi,
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multi" => Ok(Self::Multi),
            other => Err(format!("Unknown filter mode {other}")),
        }
    }
}

/// State of the filter inputs at the moment the filter is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub search_text: String,
    pub category: String,
    pub brand: String,
    pub checked_brands: Vec<String>,
    pub checked_categories: Vec<String>,
    pub preferences: Preferences,
    pub page_url: Option<Url>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub preferences: Preferences,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery(pub Vec<(&'static str, String)>);

impl ProductQuery {
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl FilterForm {
    fn url_category(&self) -> Option<String> {
        self.page_url
            .as_ref()?
            .query_pairs()
            .find(|(k, _)| k == "category")
            .map(|(_, v)| normalize_category_key(v))
            .filter(|c| !c.is_empty())
    }

    /// The category input wins over checked categories; the page URL's
    /// `category` parameter is used only when no category is selected at all.
    pub fn criteria(&self) -> FilterCriteria {
        let mut categories: Vec<String> = non_empty(&self.category)
            .into_iter()
            .chain(self.checked_categories.iter().filter_map(non_empty))
            .map(normalize_category_key)
            .unique()
            .collect();
        if categories.is_empty() {
            categories.extend(self.url_category());
        }
        let brands = non_empty(&self.brand)
            .into_iter()
            .chain(self.checked_brands.iter().filter_map(non_empty))
            .unique()
            .collect();
        FilterCriteria {
            query: self.search_text.trim().to_string(),
            brands,
            categories,
            preferences: self.preferences,
        }
    }
}

impl FilterCriteria {
    pub fn to_query(&self, mode: FilterMode) -> ProductQuery {
        let mut pairs = vec![("q", self.query.clone())];
        match mode {
            FilterMode::Single => {
                pairs.push(("category", self.categories.first().cloned().unwrap_or_default()));
                pairs.push(("brand", self.brands.first().cloned().unwrap_or_default()));
                pairs.extend(
                    self.preferences
                        .pairs()
                        .into_iter()
                        .map(|(k, v)| (k, v.to_string())),
                );
            }
            FilterMode::Multi => {
                pairs.extend(self.brands.iter().map(|b| ("brand", b.clone())));
                pairs.extend(self.categories.iter().map(|c| ("category", c.clone())));
                pairs.extend(
                    self.preferences
                        .pairs()
                        .into_iter()
                        .filter(|(_, v)| *v)
                        .map(|(k, _)| (k, "true".to_string())),
                );
            }
        }
        ProductQuery(pairs)
    }
}
