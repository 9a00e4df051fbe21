//! Wardrobe items and their structural category.
//!
//! Items arrive pre-tagged (color, material, style and occasion tags). The
//! only derived attributes are the [`Category`], classified from the free-text
//! item type (then the name), and the [`SleeveLength`] used by layering rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::text::contains_keyword;

/// A single wardrobe item, read-only to the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardrobeItem {
    /// Stable item identifier
    pub id: String,

    /// Free-text item type (ex: "dress shirt", "sneakers")
    #[serde(rename = "type")]
    pub item_type: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Primary color
    #[serde(default)]
    pub color: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    /// Style tags (ex: "formal", "streetwear")
    #[serde(default)]
    pub style: Vec<String>,

    /// Occasion tags (ex: "business", "wedding-guest")
    #[serde(default)]
    pub occasion: Vec<String>,

    #[serde(rename = "wearCount", default)]
    pub wear_count: u32,

    #[serde(rename = "lastWorn", default, skip_serializing_if = "Option::is_none")]
    pub last_worn: Option<DateTime<Utc>>,

    /// User affinity, 0.0 to 1.0
    #[serde(default)]
    pub favorite_score: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Fit descriptor (ex: "slim", "relaxed", "oversized")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<String>,

    /// Target gender ("men", "women", "unisex")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Explicit sleeve length ("short", "long", "sleeveless")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleeve_length: Option<String>,
}

impl WardrobeItem {
    pub fn new(id: impl Into<String>, item_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            item_type: item_type.into(),
            name: name.into(),
            color: String::new(),
            material: None,
            style: Vec::new(),
            occasion: Vec::new(),
            wear_count: 0,
            last_worn: None,
            favorite_score: 0.0,
            brand: None,
            fit: None,
            gender: None,
            sleeve_length: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_styles<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.style = styles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_occasions<I, S>(mut self, occasions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.occasion = occasions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_wear(mut self, wear_count: u32, last_worn: Option<DateTime<Utc>>) -> Self {
        self.wear_count = wear_count;
        self.last_worn = last_worn;
        self
    }

    pub fn with_favorite(mut self, score: f64) -> Self {
        self.favorite_score = score;
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_fit(mut self, fit: impl Into<String>) -> Self {
        self.fit = Some(fit.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_sleeve(mut self, sleeve: impl Into<String>) -> Self {
        self.sleeve_length = Some(sleeve.into());
        self
    }

    /// Lowercased "type name" text used for keyword matching
    pub fn search_text(&self) -> String {
        format!("{} {}", self.item_type, self.name)
            .to_lowercase()
            .replace('_', " ")
    }

    /// Structural category, classified from the type then the name
    pub fn category(&self) -> Category {
        match Category::classify(&self.item_type) {
            Category::Other => Category::classify(&self.name),
            category => category,
        }
    }

    pub fn color_lower(&self) -> String {
        self.color.trim().to_lowercase()
    }

    pub fn material_lower(&self) -> Option<String> {
        self.material.as_ref().map(|m| m.trim().to_lowercase())
    }

    pub fn has_style(&self, style: &str) -> bool {
        self.style.iter().any(|s| s.eq_ignore_ascii_case(style))
    }

    /// True when the item carries an occasion tag matching one of the keys
    pub fn tagged_for(&self, keys: &[&str]) -> bool {
        self.occasion.iter().any(|tag| {
            let tag = crate::text::normalize_key(tag);
            keys.iter().any(|k| tag == *k)
        })
    }

    /// Button-up shirts (dress shirts, oxfords, button-downs)
    pub fn is_button_up(&self) -> bool {
        let text = self.search_text();
        self.category() == Category::Top
            && ["button-up", "button up", "button-down", "button down", "dress shirt", "oxford"]
                .iter()
                .any(|k| contains_keyword(&text, k))
    }

    /// Pullover or cardigan sweaters; sweater vests are reported separately
    pub fn is_sweater(&self) -> bool {
        let text = self.search_text();
        ["sweater", "pullover", "jumper", "cardigan", "knit"]
            .iter()
            .any(|k| contains_keyword(&text, k))
    }

    pub fn is_vest(&self) -> bool {
        contains_keyword(&self.search_text(), "vest")
    }

    /// Explicit sleeve length, otherwise inferred from the description
    pub fn sleeve(&self) -> SleeveLength {
        if let Some(explicit) = self.sleeve_length.as_deref().and_then(SleeveLength::parse) {
            return explicit;
        }

        let text = self.search_text();
        if text.contains("short sleeve") || text.contains("short-sleeve") {
            SleeveLength::Short
        } else if text.contains("sleeveless") || contains_keyword(&text, "tank") || self.is_vest() {
            SleeveLength::Sleeveless
        } else if text.contains("long sleeve") || text.contains("long-sleeve") {
            SleeveLength::Long
        } else if contains_keyword(&text, "t-shirt") || contains_keyword(&text, "tee") || contains_keyword(&text, "polo") {
            SleeveLength::Short
        } else {
            // shirts and sweaters default to long sleeves
            SleeveLength::Long
        }
    }
}

/// Structural category of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Top,
    Bottom,
    Shoes,
    /// Dresses, jumpsuits, rompers; covers Top and Bottom
    OnePiece,
    /// Sweaters, cardigans, vests, hoodies
    Layer,
    /// Jackets, coats, blazers
    Outerwear,
    Accessory,
    Other,
}

const ONE_PIECE_EXCLUSIONS: &[&str] = &[
    "dress shirt", "dress pants", "dress trousers", "dress shoe", "dress boot", "dress sock",
];

const CLASSIFICATION: &[(Category, &[&str])] = &[
    (Category::OnePiece, &["dress", "gown", "jumpsuit", "romper", "overalls", "playsuit"]),
    (
        Category::Shoes,
        &[
            "shoe", "sneaker", "boot", "loafer", "heels", "pump", "sandal", "flip flop",
            "flip-flop", "slipper", "trainer", "mule", "brogue", "ballet flat", "espadrille",
            "cleat", "oxfords",
        ],
    ),
    (
        Category::Outerwear,
        &[
            "jacket", "coat", "blazer", "parka", "trench", "windbreaker", "puffer", "anorak",
            "raincoat", "overcoat", "peacoat", "sport coat", "tuxedo jacket",
        ],
    ),
    (
        Category::Layer,
        &[
            "sweater", "cardigan", "vest", "hoodie", "sweatshirt", "pullover", "jumper", "fleece",
            "waistcoat", "shrug",
        ],
    ),
    (
        Category::Bottom,
        &[
            "pants", "trousers", "jeans", "shorts", "skirt", "chinos", "leggings", "joggers",
            "slacks", "sweatpants", "culottes", "cargo",
        ],
    ),
    (
        Category::Top,
        &[
            "shirt", "t-shirt", "tee", "blouse", "polo", "tank", "top", "camisole", "henley",
            "button-up", "button-down", "tunic", "jersey", "turtleneck", "oxford", "bodysuit",
        ],
    ),
    (
        Category::Accessory,
        &[
            "belt", "watch", "tie", "scarf", "hat", "cap", "bag", "necklace", "earring",
            "bracelet", "sunglasses", "jewelry", "purse", "clutch", "glove", "beanie", "bow tie",
            "pocket square", "backpack", "tote", "ring", "cufflink", "headband",
        ],
    ),
];

impl Category {
    /// Classify free text into a category
    pub fn classify(text: &str) -> Category {
        let text = text.to_lowercase().replace('_', " ");
        for (category, keywords) in CLASSIFICATION {
            if *category == Category::OnePiece
                && ONE_PIECE_EXCLUSIONS.iter().any(|e| text.contains(e))
            {
                continue;
            }
            if keywords.iter().any(|k| contains_keyword(&text, k)) {
                return *category;
            }
        }
        Category::Other
    }

    /// Top, Bottom and Shoes (plus the one-piece that stands in for two of them)
    pub fn is_essential(&self) -> bool {
        matches!(self, Category::Top | Category::Bottom | Category::Shoes | Category::OnePiece)
    }

    /// Items worn over a top
    pub fn is_layering(&self) -> bool {
        matches!(self, Category::Layer | Category::Outerwear)
    }

    /// Categories this item counts toward for structural coverage
    pub fn covers(&self) -> &'static [Category] {
        match self {
            Category::OnePiece => &[Category::OnePiece, Category::Top, Category::Bottom],
            Category::Top => &[Category::Top],
            Category::Bottom => &[Category::Bottom],
            Category::Shoes => &[Category::Shoes],
            Category::Layer => &[Category::Layer],
            Category::Outerwear => &[Category::Outerwear],
            Category::Accessory => &[Category::Accessory],
            Category::Other => &[Category::Other],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Shoes => "shoes",
            Category::OnePiece => "one_piece",
            Category::Layer => "layer",
            Category::Outerwear => "outerwear",
            Category::Accessory => "accessory",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleeveLength {
    Sleeveless,
    Short,
    Long,
}

impl SleeveLength {
    pub fn parse(raw: &str) -> Option<Self> {
        match crate::text::normalize_key(raw).as_str() {
            "short" | "short-sleeve" | "short-sleeved" => Some(SleeveLength::Short),
            "long" | "long-sleeve" | "long-sleeved" => Some(SleeveLength::Long),
            "sleeveless" | "none" => Some(SleeveLength::Sleeveless),
            _ => None,
        }
    }
}
