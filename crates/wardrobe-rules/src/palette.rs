//! Color theory tables: neutrals, shade families and clashing family pairs.
//!
//! Item colors are free text ("dark navy", "Burgundy"), so classification
//! goes word by word and the first recognised word wins.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wardrobe_core::text::contains_keyword;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTheory {
    /// Colors that pair with anything
    pub neutrals: Vec<String>,

    /// Shade → family (ex: "burgundy" → "red")
    pub families: BTreeMap<String, String>,

    /// Family pairs that clash
    pub clashes: Vec<(String, String)>,
}

/// How a single color reads in an outfit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorClass {
    Neutral,
    Accent(String),
    Unknown,
}

impl ColorTheory {
    pub fn builtin() -> Self {
        let neutrals = [
            "black", "white", "gray", "grey", "navy", "beige", "tan", "khaki", "cream", "ivory",
            "brown", "charcoal", "denim", "camel", "taupe", "oatmeal", "nude", "silver",
        ];

        let families: &[(&str, &[&str])] = &[
            ("red", &["red", "burgundy", "maroon", "wine", "crimson", "scarlet", "cherry"]),
            ("pink", &["pink", "blush", "rose", "fuchsia", "magenta", "salmon"]),
            ("orange", &["orange", "coral", "peach", "rust", "terracotta", "tangerine"]),
            ("yellow", &["yellow", "mustard", "gold", "lemon"]),
            ("green", &["green", "olive", "forest", "emerald", "mint", "sage", "lime", "kelly"]),
            ("blue", &["blue", "cobalt", "royal", "sky", "teal", "turquoise", "aqua", "chambray"]),
            ("purple", &["purple", "lavender", "lilac", "violet", "plum", "mauve"]),
        ];

        let clashes = [
            ("red", "green"),
            ("red", "pink"),
            ("red", "orange"),
            ("orange", "pink"),
            ("orange", "purple"),
            ("yellow", "purple"),
        ];

        Self {
            neutrals: neutrals.iter().map(|n| n.to_string()).collect(),
            families: families
                .iter()
                .flat_map(|(family, shades)| shades.iter().map(move |s| (s.to_string(), family.to_string())))
                .collect(),
            clashes: clashes
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        }
    }

    pub fn classify(&self, color: &str) -> ColorClass {
        let color = color.trim().to_lowercase();
        if color.is_empty() {
            return ColorClass::Unknown;
        }

        for word in color.split(|c: char| c.is_whitespace() || c == '-' || c == '/') {
            if self.neutrals.iter().any(|n| n == word) {
                return ColorClass::Neutral;
            }
            if let Some(family) = self.families.get(word) {
                return ColorClass::Accent(family.clone());
            }
        }
        ColorClass::Unknown
    }

    pub fn is_neutral(&self, color: &str) -> bool {
        self.classify(color) == ColorClass::Neutral
    }

    /// Accent family, if the color reads as one
    pub fn family(&self, color: &str) -> Option<String> {
        match self.classify(color) {
            ColorClass::Accent(family) => Some(family),
            _ => None,
        }
    }

    /// True when the two colors belong to a clashing family pair
    pub fn clashes(&self, a: &str, b: &str) -> bool {
        match (self.family(a), self.family(b)) {
            (Some(fa), Some(fb)) if fa != fb => self
                .clashes
                .iter()
                .any(|(x, y)| (*x == fa && *y == fb) || (*x == fb && *y == fa)),
            _ => false,
        }
    }

    /// Color sits in a palette, by exact keyword or by shared family
    pub fn in_palette(&self, color: &str, palette: &[String]) -> bool {
        if palette.is_empty() || self.is_neutral(color) {
            return true;
        }
        if palette.iter().any(|p| contains_keyword(color, p)) {
            return true;
        }
        match self.family(color) {
            Some(family) => palette.iter().any(|p| self.family(p).as_deref() == Some(family.as_str())),
            None => true,
        }
    }
}

impl Default for ColorTheory {
    fn default() -> Self {
        Self::builtin()
    }
}
