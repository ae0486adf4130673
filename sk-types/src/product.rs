use crate::null_as_default;
use derive_more::Display;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub const INGREDIENT_ELLIPSIS: &str = " dll";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nama: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kategori: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kandungan: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub manfaat: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alcohol_free: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fragrance_free: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub non_comedogenic: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Product>,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Badge {
    #[display("Alcohol-Free")]
    AlcoholFree,
    #[display("Fragrance-Free")]
    FragranceFree,
    #[display("Non-Comedogenic")]
    NonComedogenic,
}

impl Badge {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::AlcoholFree => "badge-alcohol-free",
            Self::FragranceFree => "badge-fragrance-free",
            Self::NonComedogenic => "badge-non-comedogenic",
        }
    }
}

impl Product {
    /// Falls back to `default` when the backend has no usable image.
    pub fn image_source<'a>(&'a self, default: &'a str) -> &'a str {
        match self.image_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => default,
        }
    }

    pub fn badges(&self) -> Vec<Badge> {
        [
            (self.alcohol_free, Badge::AlcoholFree),
            (self.fragrance_free, Badge::FragranceFree),
            (self.non_comedogenic, Badge::NonComedogenic),
        ]
        .into_iter()
        .filter_map(|(set, badge)| set.then_some(badge))
        .collect()
    }

    pub fn ingredient_preview(&self, max_tokens: usize) -> String {
        ingredient_preview(&self.kandungan, max_tokens)
    }
}

/// Keeps the first `max_tokens` comma separated ingredients.
///
/// Every comma starts a token, empty ones included. When there are more
/// than `max_tokens`, the rest are replaced by [`INGREDIENT_ELLIPSIS`] and
/// cannot be recovered from the result. Empty tokens are left out of the
/// output.
pub fn ingredient_preview(text: &str, max_tokens: usize) -> String {
    let tokens: Vec<&str> = text.split(',').map(str::trim).collect();
    let shown = tokens
        .iter()
        .take(max_tokens)
        .filter(|t| !t.is_empty())
        .join(", ");
    if tokens.len() <= max_tokens {
        shown
    } else {
        format!("{shown}{INGREDIENT_ELLIPSIS}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_ingredient_list_is_kept() {
        assert_eq!(
            ingredient_preview(" Niacinamide,Zinc PCA , Panthenol ", 4),
            "Niacinamide, Zinc PCA, Panthenol"
        );
        assert_eq!(ingredient_preview("Aqua, Glycerin, Urea, Ceramide", 4), "Aqua, Glycerin, Urea, Ceramide");
        assert_eq!(ingredient_preview("", 4), "");
    }

    #[test]
    fn long_ingredient_list_is_truncated() {
        let text = "Aqua, Glycerin, Niacinamide, Allantoin, Centella Asiatica, Madecassoside";
        let preview = ingredient_preview(text, 4);
        assert_eq!(preview, "Aqua, Glycerin, Niacinamide, Allantoin dll");
        assert!(!preview.contains("Centella"));
        assert!(!preview.contains("Madecassoside"));
    }

    #[test]
    fn empty_ingredients_still_count() {
        assert_eq!(
            ingredient_preview("Aqua,,Glycerin,Urea,Ceramide", 4),
            "Aqua, Glycerin, Urea dll"
        );
        assert_eq!(ingredient_preview("Aqua, ,Glycerin", 4), "Aqua, Glycerin");
    }

    #[test]
    fn blank_image_uses_default() {
        let mut p = Product::default();
        assert_eq!(p.image_source("/static/Images/default.jpg"), "/static/Images/default.jpg");
        p.image_url = Some("   ".to_string());
        assert_eq!(p.image_source("/static/Images/default.jpg"), "/static/Images/default.jpg");
        p.image_url = Some("/static/images/serum/a.jpg".to_string());
        assert_eq!(p.image_source("/static/Images/default.jpg"), "/static/images/serum/a.jpg");
    }

    #[test]
    fn badges_follow_flags() {
        let p = Product {
            alcohol_free: true,
            non_comedogenic: true,
            ..Default::default()
        };
        assert_eq!(p.badges(), vec![Badge::AlcoholFree, Badge::NonComedogenic]);
    }

    #[test]
    fn decodes_backend_row() {
        let list: ProductList = serde_json::from_str(
            r#"{"items":[{"nama":"Gentle Wash","brand":"Acme","kategori":"facialwash",
                "kandungan":null,"alcohol_free":true,"fragrance_free":false,
                "image_url":"","note":["extra"]}],"count":1}"#,
        )
        .expect("valid product list");
        assert_eq!(list.count, Some(1));
        let p = &list.items[0];
        assert_eq!(p.nama, "Gentle Wash");
        assert_eq!(p.kandungan, "");
        assert_eq!(p.manfaat, "");
        assert!(p.alcohol_free);
        assert!(!p.non_comedogenic);
    }
}
