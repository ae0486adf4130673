use crate::category::normalize_category_key;
use crate::filter::Preferences;
use crate::product::Product;
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub category: String,
    pub jenis_kulit: String,
    pub masalah_kulit: String,
    pub preferences: Preferences,
}

/// Recommendation form fields as submitted; checkboxes are present only when checked.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationForm {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub jenis_kulit: Option<String>,
    #[serde(default)]
    pub masalah_kulit: Option<String>,
    #[serde(default, rename = "prefAlcoholFree")]
    pub pref_alcohol_free: Option<String>,
    #[serde(default, rename = "prefFragranceFree")]
    pub pref_fragrance_free: Option<String>,
    #[serde(default, rename = "prefNonComedogenic")]
    pub pref_non_comedogenic: Option<String>,
}

impl From<RecommendationForm> for RecommendationRequest {
    fn from(f: RecommendationForm) -> RecommendationRequest {
        RecommendationRequest {
            category: normalize_category_key(f.category.unwrap_or_default()),
            jenis_kulit: f.jenis_kulit.unwrap_or_default().trim().to_string(),
            masalah_kulit: f.masalah_kulit.unwrap_or_default().trim().to_string(),
            preferences: Preferences {
                alcohol_free: f.pref_alcohol_free.is_some(),
                fragrance_free: f.pref_fragrance_free.is_some(),
                non_comedogenic: f.pref_non_comedogenic.is_some(),
            },
        }
    }
}

/// Warning derived on the client from a product's care flags.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Note {
    #[display("Produk ini mengandung alcohol. Sebaiknya dihindari jika kulitmu mudah iritasi atau sangat sensitif.")]
    Alcohol,
    #[display("Produk ini mengandung fragrance. Jika kulitmu sangat sensitif, lebih baik berhati-hati.")]
    Fragrance,
    #[display("Produk ini berpotensi menyumbat pori-pori (comedogenic). Tidak disarankan untuk kulit berminyak atau acne-prone.")]
    Comedogenic,
}

/// Always in alcohol, fragrance, comedogenic order.
pub fn derive_notes(p: &Product) -> Vec<Note> {
    [
        (p.alcohol_free, Note::Alcohol),
        (p.fragrance_free, Note::Fragrance),
        (p.non_comedogenic, Note::Comedogenic),
    ]
    .into_iter()
    .filter_map(|(safe, note)| (!safe).then_some(note))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(alcohol_free: bool, fragrance_free: bool, non_comedogenic: bool) -> Product {
        Product {
            alcohol_free,
            fragrance_free,
            non_comedogenic,
            ..Default::default()
        }
    }

    #[test]
    fn notes_follow_each_flag_independently() {
        for bits in 0..8u8 {
            let (a, f, c) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            let notes = derive_notes(&product(a, f, c));
            assert_eq!(notes.contains(&Note::Alcohol), !a);
            assert_eq!(notes.contains(&Note::Fragrance), !f);
            assert_eq!(notes.contains(&Note::Comedogenic), !c);
            assert!(notes.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn alcohol_note_mentions_alcohol() {
        let notes = derive_notes(&product(false, true, true));
        assert_eq!(notes.len(), 1);
        assert!(notes[0].to_string().contains("alcohol"));
    }

    #[test]
    fn form_is_serialized_with_nested_preferences() {
        let form: RecommendationForm = serde_json::from_value(serde_json::json!({
            "category": "Serum",
            "jenis_kulit": "oily",
            "masalah_kulit": "acne",
            "prefAlcoholFree": "on",
            "prefNonComedogenic": "on",
        }))
        .expect("valid form");
        let body = serde_json::to_value(RecommendationRequest::from(form)).expect("serializable");
        assert_eq!(
            body,
            serde_json::json!({
                "category": "serum",
                "jenis_kulit": "oily",
                "masalah_kulit": "acne",
                "preferences": {
                    "alcohol_free": true,
                    "fragrance_free": false,
                    "non_comedogenic": true,
                }
            })
        );
    }
}
