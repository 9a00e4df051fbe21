//! Personal guidance: body type fits, skin tone colors, gender matching

use serde::{Deserialize, Serialize};
use wardrobe_core::text::{matches_any, normalize_key};
use wardrobe_core::WardrobeItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTypeRule {
    pub key: String,
    #[serde(default)]
    pub flattering_fits: Vec<String>,
    #[serde(default)]
    pub discouraged_fits: Vec<String>,
}

impl BodyTypeRule {
    fn new(key: &str, flattering: &[&str], discouraged: &[&str]) -> Self {
        Self {
            key: normalize_key(key),
            flattering_fits: flattering.iter().map(|f| f.to_string()).collect(),
            discouraged_fits: discouraged.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Checks the fit descriptor, then the item text
    pub fn discourages(&self, item: &WardrobeItem) -> bool {
        let fit = item.fit.as_deref().unwrap_or_default();
        matches_any(fit, &self.discouraged_fits) || matches_any(&item.search_text(), &self.discouraged_fits)
    }

    pub fn flatters(&self, item: &WardrobeItem) -> bool {
        let fit = item.fit.as_deref().unwrap_or_default();
        matches_any(fit, &self.flattering_fits)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinToneRule {
    pub key: String,
    #[serde(default)]
    pub flattering_colors: Vec<String>,
    #[serde(default)]
    pub unflattering_colors: Vec<String>,
}

impl SkinToneRule {
    fn new(key: &str, flattering: &[&str], unflattering: &[&str]) -> Self {
        Self {
            key: normalize_key(key),
            flattering_colors: flattering.iter().map(|c| c.to_string()).collect(),
            unflattering_colors: unflattering.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn unflattering(&self, color: &str) -> bool {
        matches_any(color, &self.unflattering_colors)
    }

    pub fn flattering(&self, color: &str) -> bool {
        matches_any(color, &self.flattering_colors)
    }
}

pub fn body_type_rules() -> Vec<BodyTypeRule> {
    vec![
        BodyTypeRule::new("apple", &["a-line", "straight", "wrap", "empire"], &["bodycon", "cropped"]),
        BodyTypeRule::new("pear", &["a-line", "bootcut", "wide-leg", "structured"], &["skinny", "pencil"]),
        BodyTypeRule::new("hourglass", &["fitted", "wrap", "tailored", "high-waisted"], &["boxy", "oversized"]),
        BodyTypeRule::new("rectangle", &["peplum", "belted", "layered", "ruffled"], &["boxy", "shift"]),
        BodyTypeRule::new("inverted-triangle", &["wide-leg", "a-line", "v-neck"], &["puff-sleeve", "padded"]),
        BodyTypeRule::new("petite", &["cropped", "fitted", "high-waisted"], &["oversized", "maxi"]),
    ]
}

pub fn skin_tone_rules() -> Vec<SkinToneRule> {
    vec![
        SkinToneRule::new("warm", &["olive", "rust", "mustard", "cream", "coral", "camel"], &["icy blue", "fuchsia", "silver"]),
        SkinToneRule::new("cool", &["navy", "emerald", "lavender", "cobalt", "gray"], &["orange", "mustard", "rust"]),
        SkinToneRule::new("neutral", &["navy", "teal", "blush", "white", "gray"], &[]),
        SkinToneRule::new("olive", &["burgundy", "teal", "gold", "olive"], &["neon yellow", "pastel yellow"]),
    ]
}

/// Canonical gender key: "men", "women" or "unisex"
pub fn normalize_gender(raw: &str) -> Option<&'static str> {
    match normalize_key(raw).as_str() {
        "male" | "man" | "men" | "mens" | "men's" | "m" => Some("men"),
        "female" | "woman" | "women" | "womens" | "women's" | "f" => Some("women"),
        "unisex" | "any" | "all" | "neutral" | "non-binary" | "nonbinary" => Some("unisex"),
        _ => None,
    }
}

/// True when an item's gender target conflicts with the user's
pub fn gender_conflict(item_gender: Option<&str>, user_gender: Option<&str>) -> bool {
    match (item_gender.and_then(normalize_gender), user_gender.and_then(normalize_gender)) {
        (Some("unisex"), _) | (_, Some("unisex")) => false,
        (Some(item), Some(user)) => item != user,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_conflict() {
        assert!(gender_conflict(Some("Women"), Some("male")));
        assert!(!gender_conflict(Some("unisex"), Some("male")));
        assert!(!gender_conflict(None, Some("female")));
        assert!(!gender_conflict(Some("men"), None));
    }

    #[test]
    fn test_body_type_fit() {
        let rules = body_type_rules();
        let petite = rules.iter().find(|r| r.key == "petite").unwrap();
        let item = WardrobeItem::new("1", "sweater", "Knit").with_fit("Oversized");
        assert!(petite.discourages(&item));
        let fitted = WardrobeItem::new("2", "shirt", "Shirt").with_fit("fitted");
        assert!(!petite.discourages(&fitted));
        assert!(petite.flatters(&fitted));
    }

    #[test]
    fn test_skin_tone_colors() {
        let rules = skin_tone_rules();
        let cool = rules.iter().find(|r| r.key == "cool").unwrap();
        assert!(cool.unflattering("burnt orange"));
        assert!(!cool.unflattering("navy"));
    }
}
