use serde::{Deserialize, Deserializer};

pub mod category;
pub mod chat;
pub mod filter;
pub mod product;
pub mod recommendation;

pub use category::{category_label, normalize_category_key, Category};
pub use chat::{format_message, ChatReply, ChatRequest, Span};
pub use filter::{FilterCriteria, FilterForm, FilterMode, Preferences, ProductQuery};
pub use product::{ingredient_preview, Badge, Product, ProductList};
pub use recommendation::{derive_notes, Note, RecommendationForm, RecommendationRequest};

/// Backend rows come from spreadsheets, so absent and `null` cells are both common.
pub fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(de).map(Option::unwrap_or_default)
}

pub(crate) fn non_empty<S: AsRef<str>>(s: S) -> Option<String> {
    let s = s.as_ref().trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
