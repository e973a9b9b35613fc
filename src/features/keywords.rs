// keywords.rs
use crate::scraper::description::{DescriptionOutcome, EXTRACTION_ERROR, NO_DESCRIPTION_FOUND};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordCategory {
    Luxury,
    Renovation,
    View,
    Outdoor,
    Modern,
    Location,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 6] = [
        KeywordCategory::Luxury,
        KeywordCategory::Renovation,
        KeywordCategory::View,
        KeywordCategory::Outdoor,
        KeywordCategory::Modern,
        KeywordCategory::Location,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            KeywordCategory::Luxury => "has_luxury_keywords",
            KeywordCategory::Renovation => "has_renovation_keywords",
            KeywordCategory::View => "has_view_keywords",
            KeywordCategory::Outdoor => "has_outdoor_keywords",
            KeywordCategory::Modern => "has_modern_keywords",
            KeywordCategory::Location => "has_location_keywords",
        }
    }

    /// Lowercase substrings; any one of them sets the flag.
    pub fn lexicon(self) -> &'static [&'static str] {
        match self {
            KeywordCategory::Luxury => &[
                "luxury",
                "luxurious",
                "high-end",
                "premium",
                "upscale",
                "elegant",
                "sophisticated",
                "custom",
                "designer",
            ],
            KeywordCategory::Renovation => &[
                "renovated",
                "updated",
                "remodeled",
                "new",
                "fresh",
                "modern",
                "contemporary",
                "upgraded",
            ],
            KeywordCategory::View => &[
                "view",
                "views",
                "overlook",
                "scenic",
                "panoramic",
                "mountain",
                "ocean",
                "city lights",
            ],
            KeywordCategory::Outdoor => &[
                "yard",
                "garden",
                "patio",
                "deck",
                "pool",
                "outdoor",
                "landscaped",
                "backyard",
            ],
            KeywordCategory::Modern => &[
                "smart home",
                "stainless steel",
                "granite",
                "hardwood",
                "marble",
                "quartz",
                "tile",
            ],
            KeywordCategory::Location => &[
                "walking distance",
                "close to",
                "near",
                "convenient",
                "accessible",
                "commute",
                "downtown",
            ],
        }
    }
}

/// Boolean keyword indicators for one description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordFeatures {
    pub luxury: bool,
    pub renovation: bool,
    pub view: bool,
    pub outdoor: bool,
    pub modern: bool,
    pub location: bool,
}

impl KeywordFeatures {
    /// Empty text and the extraction sentinels yield all-false flags.
    pub fn from_text(description: &str) -> Self {
        if description.is_empty()
            || description == NO_DESCRIPTION_FOUND
            || description == EXTRACTION_ERROR
        {
            return Self::default();
        }

        let lower = description.to_lowercase();
        let hit = |category: KeywordCategory| {
            category
                .lexicon()
                .iter()
                .any(|keyword| lower.contains(keyword))
        };

        Self {
            luxury: hit(KeywordCategory::Luxury),
            renovation: hit(KeywordCategory::Renovation),
            view: hit(KeywordCategory::View),
            outdoor: hit(KeywordCategory::Outdoor),
            modern: hit(KeywordCategory::Modern),
            location: hit(KeywordCategory::Location),
        }
    }

    pub fn from_outcome(outcome: &DescriptionOutcome) -> Self {
        outcome.text().map(Self::from_text).unwrap_or_default()
    }

    pub fn get(&self, category: KeywordCategory) -> bool {
        match category {
            KeywordCategory::Luxury => self.luxury,
            KeywordCategory::Renovation => self.renovation,
            KeywordCategory::View => self.view,
            KeywordCategory::Outdoor => self.outdoor,
            KeywordCategory::Modern => self.modern,
            KeywordCategory::Location => self.location,
        }
    }

    /// 0/1 flag as written to the dataset.
    pub fn flag(&self, category: KeywordCategory) -> u8 {
        u8::from(self.get(category))
    }
}
