use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[display("Facial Wash")]
    FacialWash,
    #[display("Toner")]
    Toner,
    #[display("Serum")]
    Serum,
    #[display("Moisturizer")]
    Moisturizer,
    #[display("Sunscreen")]
    Sunscreen,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::FacialWash,
        Self::Toner,
        Self::Serum,
        Self::Moisturizer,
        Self::Sunscreen,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::FacialWash => "facialwash",
            Self::Toner => "toner",
            Self::Serum => "serum",
            Self::Moisturizer => "moisturizer",
            Self::Sunscreen => "sunscreen",
        }
    }

    /// Accepts keys and labels in any casing, e.g. `Facial Wash`, `facial_wash`.
    pub fn from_key<S: AsRef<str>>(s: S) -> Option<Self> {
        let key = normalize_category_key(s).replace('_', "");
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| format!("Unknown category {s}"))
    }
}

/// Lower-cases and strips every whitespace character: `"Facial Wash"` becomes `"facialwash"`.
pub fn normalize_category_key<S: AsRef<str>>(s: S) -> String {
    s.as_ref()
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Display label for a backend category key. Only exact keys are mapped;
/// anything else is returned unchanged.
pub fn category_label(key: &str) -> Cow<'_, str> {
    match Category::ALL.into_iter().find(|c| c.key() == key) {
        Some(c) => Cow::Owned(c.to_string()),
        None => Cow::Borrowed(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_url_category() {
        assert_eq!(normalize_category_key("Facial Wash"), "facialwash");
        assert_eq!(normalize_category_key("  SUN\tscreen "), "sunscreen");
        assert_eq!(normalize_category_key(""), "");
    }

    #[test]
    fn maps_keys_to_labels() {
        assert_eq!(category_label("facialwash"), "Facial Wash");
        assert_eq!(category_label("facial_wash"), "facial_wash");
        assert_eq!(category_label("SERUM"), "SERUM");
        assert_eq!(category_label("moisturizer"), "Moisturizer");
        assert_eq!(category_label("essence"), "essence");
    }

    #[test]
    fn parses_category() {
        assert_eq!("Serum".parse::<Category>(), Ok(Category::Serum));
        assert!("lip balm".parse::<Category>().is_err());
    }
}
