//! Data Model: Weather, UserProfile, OutfitHistoryEntry, GenerationRequest
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::WardrobeItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Temperature in °F
    pub temperature: f64,
    /// Free-text condition (ex: "sunny", "light rain")
    #[serde(default)]
    pub condition: String,
    /// Precipitation chance in percent
    #[serde(default)]
    pub precipitation: f64,
}

impl Weather {
    pub fn new(temperature: f64, condition: impl Into<String>) -> Self {
        Self {
            temperature,
            condition: condition.into(),
            precipitation: 0.0,
        }
    }

    pub fn with_precipitation(mut self, precipitation: f64) -> Self {
        self.precipitation = precipitation;
        self
    }

    pub fn is_cold(&self) -> bool {
        self.temperature < 50.0
    }

    pub fn is_hot(&self) -> bool {
        self.temperature >= 80.0
    }

    pub fn is_wet(&self) -> bool {
        let condition = self.condition.to_lowercase();
        self.precipitation >= 50.0
            || ["rain", "drizzle", "shower", "storm", "snow", "sleet"]
                .iter()
                .any(|k| condition.contains(k))
    }
}

impl Default for Weather {
    fn default() -> Self {
        Self::new(70.0, "clear")
    }
}

/// Personal attributes and preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Body type (ex: "pear", "apple", "rectangle")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,

    /// Skin undertone (ex: "warm", "cool", "neutral")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_tone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(default)]
    pub preferred_colors: Vec<String>,

    #[serde(default)]
    pub disliked_colors: Vec<String>,

    #[serde(default)]
    pub preferred_materials: Vec<String>,

    #[serde(default)]
    pub avoided_materials: Vec<String>,

    #[serde(default)]
    pub preferred_fits: Vec<String>,

    #[serde(default)]
    pub preferred_brands: Vec<String>,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_body_type(mut self, body_type: impl Into<String>) -> Self {
        self.body_type = Some(body_type.into());
        self
    }

    pub fn with_skin_tone(mut self, skin_tone: impl Into<String>) -> Self {
        self.skin_tone = Some(skin_tone.into());
        self
    }

    pub fn prefers_colors(mut self, colors: &[&str]) -> Self {
        self.preferred_colors = colors.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn dislikes_colors(mut self, colors: &[&str]) -> Self {
        self.disliked_colors = colors.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn avoids_materials(mut self, materials: &[&str]) -> Self {
        self.avoided_materials = materials.iter().map(|m| m.to_string()).collect();
        self
    }
}

/// A past outfit, used as a diversity signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitHistoryEntry {
    #[serde(rename = "itemIds")]
    pub item_ids: Vec<String>,
    #[serde(rename = "wornAt")]
    pub worn_at: DateTime<Utc>,
}

/// Raw request fields for one outfit generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub occasion: String,

    pub weather: Weather,

    /// Empty when the wardrobe comes from a store
    #[serde(default)]
    pub wardrobe: Vec<WardrobeItem>,

    #[serde(rename = "userProfile", default)]
    pub user_profile: UserProfile,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,

    #[serde(rename = "baseItemId", default, skip_serializing_if = "Option::is_none")]
    pub base_item_id: Option<String>,

    #[serde(rename = "outfitHistory", default)]
    pub outfit_history: Vec<OutfitHistoryEntry>,

    /// Seed for the selection jitter; random when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Reference time for recency checks; now when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<DateTime<Utc>>,
}

impl GenerationRequest {
    pub fn new(occasion: impl Into<String>, weather: Weather, wardrobe: Vec<WardrobeItem>) -> Self {
        Self {
            occasion: occasion.into(),
            weather,
            wardrobe,
            user_profile: UserProfile::default(),
            style: None,
            mood: None,
            base_item_id: None,
            outfit_history: Vec::new(),
            seed: None,
            now: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    pub fn with_base_item(mut self, id: impl Into<String>) -> Self {
        self.base_item_id = Some(id.into());
        self
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.user_profile = profile;
        self
    }

    pub fn with_history(mut self, history: Vec<OutfitHistoryEntry>) -> Self {
        self.outfit_history = history;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_bands() {
        assert!(Weather::new(35.0, "clear").is_cold());
        assert!(Weather::new(92.0, "sunny").is_hot());
        assert!(Weather::new(60.0, "light rain").is_wet());
        assert!(Weather::new(60.0, "cloudy").with_precipitation(80.0).is_wet());
        assert!(!Weather::new(60.0, "cloudy").is_wet());
    }

    #[test]
    fn test_request_defaults_from_json() {
        let json = r#"{
            "occasion": "casual",
            "weather": { "temperature": 72 },
            "wardrobe": []
        }"#;
        let request: GenerationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.occasion, "casual");
        assert!(request.base_item_id.is_none());
        assert!(request.outfit_history.is_empty());
        assert_eq!(request.weather.precipitation, 0.0);
    }
}
