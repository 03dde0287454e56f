//! Shared types for brandkb-core.
//!
//! These types are used by the store, the cache snapshot and the remote
//! document payloads. JSON field names are camelCase.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Brand Tone
// ─────────────────────────────────────────────────────────────────────────────

/// Brand voice selected during the configuration step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandTone {
    Professional,
    Humorous,
    Inspiring,
    Casual,
}

impl BrandTone {
    /// All tones, in the order they are offered
    pub const ALL: [BrandTone; 4] = [
        BrandTone::Professional,
        BrandTone::Humorous,
        BrandTone::Inspiring,
        BrandTone::Casual,
    ];

    /// Convert from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "professional" => Some(Self::Professional),
            "humorous" => Some(Self::Humorous),
            "inspiring" => Some(Self::Inspiring),
            "casual" => Some(Self::Casual),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Humorous => "humorous",
            Self::Inspiring => "inspiring",
            Self::Casual => "casual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Humorous => "Humorous",
            Self::Inspiring => "Inspiring",
            Self::Casual => "Casual",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Professional => "Authoritative and trustworthy communication style",
            Self::Humorous => "Light-hearted and entertaining approach",
            Self::Inspiring => "Motivational and empowering voice",
            Self::Casual => {
                "A relaxed and engaging style, perfect for friendly and approachable campaigns"
            }
        }
    }

    /// Example phrasings for ad copy written in this tone
    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            Self::Professional => &[
                "Expert insights",
                "Data-driven results",
                "Industry-leading solutions",
            ],
            Self::Humorous => &["Witty headlines", "Playful messaging", "Relatable content"],
            Self::Inspiring => &[
                "Transformative stories",
                "Aspirational goals",
                "Life-changing results",
            ],
            Self::Casual => &[
                "Friendly conversations",
                "Easy-going tone",
                "Relatable stories",
            ],
        }
    }
}

impl std::fmt::Display for BrandTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Analysis & Records
// ─────────────────────────────────────────────────────────────────────────────

/// A product extracted from the brand's catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
}

/// Output of the catalog analysis step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub main_keywords: Vec<String>,
}

/// One saved knowledge-base snapshot, identified by its timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KnowledgeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub main_keywords: Vec<String>,
    pub brand_tone: BrandTone,
    pub timestamp: String,
}

impl KnowledgeRecord {
    /// Build a record from an analysis result, a tone and a timestamp.
    ///
    /// Categories are de-duplicated keeping first occurrence.
    pub fn new(
        analysis: AnalysisResult,
        brand_tone: BrandTone,
        timestamp: impl Into<String>,
    ) -> Self {
        let mut categories: Vec<String> = Vec::with_capacity(analysis.categories.len());
        for category in analysis.categories {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        Self {
            brand_name: analysis.brand_name,
            products: analysis.products,
            categories,
            main_keywords: analysis.main_keywords,
            brand_tone,
            timestamp: timestamp.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_tone_round_trip_strings() {
        for tone in BrandTone::ALL {
            assert_eq!(BrandTone::from_str(tone.as_str()), Some(tone));
        }
        assert_eq!(BrandTone::from_str(" Casual "), Some(BrandTone::Casual));
        assert_eq!(BrandTone::from_str("sarcastic"), None);
    }

    #[test]
    fn test_record_json_shape() {
        let record = KnowledgeRecord {
            brand_name: None,
            products: vec![Product {
                id: "p1".to_string(),
                name: "Trail Shoe".to_string(),
                category: "Footwear".to_string(),
            }],
            categories: vec!["Footwear".to_string()],
            main_keywords: vec!["outdoor".to_string()],
            brand_tone: BrandTone::Inspiring,
            timestamp: "2024-05-01T10:00:00.000Z".to_string(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["brandTone"], "inspiring");
        assert_eq!(value["mainKeywords"][0], "outdoor");
        assert!(value.get("brandName").is_none());
    }

    #[test]
    fn test_record_rejects_unknown_tone() {
        let json = r#"{"products":[],"categories":[],"mainKeywords":[],"brandTone":"angry","timestamp":"t1"}"#;
        assert!(serde_json::from_str::<KnowledgeRecord>(json).is_err());
    }

    #[test]
    fn test_new_dedupes_categories() {
        let analysis = AnalysisResult {
            categories: vec!["A".into(), "B".into(), "A".into()],
            ..Default::default()
        };
        let record = KnowledgeRecord::new(analysis, BrandTone::Casual, "t1");
        assert_eq!(record.categories, vec!["A".to_string(), "B".to_string()]);
    }
}
