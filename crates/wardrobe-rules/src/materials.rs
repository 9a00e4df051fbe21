//! Material table: weight classes and texture conflicts

use serde::{Deserialize, Serialize};
use wardrobe_core::text::contains_keyword;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialTable {
    pub heavy: Vec<String>,
    pub light: Vec<String>,
    /// Material pairs whose textures fight each other
    pub conflicts: Vec<(String, String)>,
}

impl MaterialTable {
    pub fn builtin() -> Self {
        let heavy = [
            "wool", "fleece", "cashmere", "down", "velvet", "corduroy", "tweed", "flannel",
            "shearling", "sherpa",
        ];
        let light = ["linen", "seersucker", "chiffon", "mesh", "voile", "gauze"];
        let conflicts = [
            ("silk", "fleece"),
            ("satin", "fleece"),
            ("satin", "denim"),
            ("sequin", "fleece"),
            ("velvet", "denim"),
            ("linen", "velvet"),
            ("leather", "suede"),
            ("chiffon", "tweed"),
        ];

        Self {
            heavy: heavy.iter().map(|m| m.to_string()).collect(),
            light: light.iter().map(|m| m.to_string()).collect(),
            conflicts: conflicts
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        }
    }

    pub fn is_heavy(&self, material: &str) -> bool {
        self.heavy.iter().any(|m| contains_keyword(material, m))
    }

    pub fn is_light(&self, material: &str) -> bool {
        self.light.iter().any(|m| contains_keyword(material, m))
    }

    pub fn conflict(&self, a: &str, b: &str) -> bool {
        self.conflicts.iter().any(|(x, y)| {
            (contains_keyword(a, x) && contains_keyword(b, y))
                || (contains_keyword(a, y) && contains_keyword(b, x))
        })
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::builtin()
    }
}
