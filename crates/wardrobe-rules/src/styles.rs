//! Style and mood rows

use wardrobe_core::{MoodRule, StyleRule};

pub fn style_rules() -> Vec<StyleRule> {
    vec![
        StyleRule::new("classic")
            .aliases(&["timeless", "traditional"])
            .compatible(&["minimalist", "preppy", "business", "formal", "elegant"])
            .incompatible(&["grunge", "athleisure", "streetwear"])
            .palette(&["navy", "white", "black", "gray", "beige", "camel", "burgundy"])
            .forbids(&["graphic", "distressed"]),
        StyleRule::new("minimalist")
            .aliases(&["minimal", "clean"])
            .compatible(&["classic", "modern", "scandinavian", "business"])
            .incompatible(&["bohemian", "maximalist", "grunge"])
            .palette(&["black", "white", "gray", "beige", "navy", "cream"])
            .forbids(&["sequin", "fringe", "logo"]),
        StyleRule::new("streetwear")
            .aliases(&["street", "urban", "hypebeast"])
            .compatible(&["athleisure", "casual", "edgy", "sporty"])
            .incompatible(&["formal", "preppy", "romantic"])
            .palette(&["black", "white", "gray", "olive", "red", "orange"])
            .forbids(&["tuxedo", "gown"]),
        StyleRule::new("bohemian")
            .aliases(&["boho", "hippie"])
            .compatible(&["romantic", "vintage", "casual"])
            .incompatible(&["minimalist", "business", "formal"])
            .palette(&["rust", "mustard", "olive", "cream", "brown", "terracotta", "teal"])
            .forbids(&["tuxedo"]),
        StyleRule::new("preppy")
            .aliases(&["ivy league", "collegiate"])
            .compatible(&["classic", "business", "casual"])
            .incompatible(&["grunge", "streetwear", "edgy"])
            .palette(&["navy", "white", "khaki", "pink", "green", "red"])
            .forbids(&["distressed", "ripped"]),
        StyleRule::new("athleisure")
            .aliases(&["sporty chic"])
            .compatible(&["sporty", "streetwear", "casual"])
            .incompatible(&["formal", "business", "classic"])
            .palette(&["black", "gray", "white", "navy"])
            .forbids(&["silk", "tweed", "tuxedo"]),
        StyleRule::new("sporty")
            .aliases(&["athletic", "active"])
            .compatible(&["athleisure", "streetwear", "casual"])
            .incompatible(&["formal", "romantic", "business"])
            .palette(&["black", "white", "gray", "blue", "red"])
            .forbids(&["heels", "silk"]),
        StyleRule::new("business")
            .aliases(&["professional", "corporate", "office"])
            .compatible(&["classic", "minimalist", "formal", "preppy"])
            .incompatible(&["grunge", "streetwear", "athleisure", "bohemian", "sporty"])
            .palette(&["navy", "gray", "charcoal", "black", "white", "light blue", "burgundy"])
            .forbids(&["graphic", "ripped", "distressed"]),
        StyleRule::new("formal")
            .aliases(&["elegant", "dressy", "sophisticated"])
            .compatible(&["classic", "business", "minimalist", "romantic"])
            .incompatible(&["streetwear", "athleisure", "grunge", "sporty"])
            .palette(&["black", "navy", "white", "charcoal", "burgundy", "emerald", "gold"])
            .forbids(&["graphic", "distressed", "hoodie"]),
        StyleRule::new("casual")
            .aliases(&["relaxed", "laid back", "everyday"])
            .compatible(&["streetwear", "preppy", "bohemian", "sporty", "athleisure", "minimalist"])
            .incompatible(&["formal"]),
        StyleRule::new("romantic")
            .aliases(&["feminine", "soft"])
            .compatible(&["bohemian", "vintage", "formal", "classic"])
            .incompatible(&["grunge", "streetwear", "sporty"])
            .palette(&["blush", "pink", "lavender", "cream", "white", "rose"])
            .forbids(&["cargo"]),
        StyleRule::new("edgy")
            .aliases(&["grunge", "punk", "rock"])
            .compatible(&["streetwear", "vintage"])
            .incompatible(&["preppy", "romantic", "classic"])
            .palette(&["black", "gray", "burgundy", "olive", "charcoal"])
            .forbids(&["pastel"]),
        StyleRule::new("vintage")
            .aliases(&["retro", "thrifted"])
            .compatible(&["bohemian", "romantic", "classic", "edgy"])
            .incompatible(&["athleisure"])
            .palette(&["mustard", "brown", "cream", "burgundy", "olive", "rust"]),
    ]
}

pub fn mood_rules() -> Vec<MoodRule> {
    vec![
        MoodRule::new("confident")
            .aliases(&["powerful", "bold"])
            .colors(&["red", "black", "white", "cobalt", "emerald"], &["beige", "pastel"]),
        MoodRule::new("relaxed")
            .aliases(&["calm", "chill", "comfortable"])
            .colors(&["blue", "gray", "beige", "sage", "white"], &["neon"])
            .avoids(&["stiletto", "corset"]),
        MoodRule::new("playful")
            .aliases(&["fun", "cheerful", "happy"])
            .colors(&["yellow", "pink", "orange", "turquoise", "coral"], &["charcoal"]),
        MoodRule::new("romantic")
            .aliases(&["flirty", "dreamy"])
            .colors(&["pink", "red", "blush", "lavender", "cream"], &["neon", "olive"])
            .avoids(&["cargo", "combat"]),
        MoodRule::new("professional")
            .aliases(&["focused", "serious"])
            .colors(&["navy", "gray", "charcoal", "white", "black"], &["neon", "hot pink"])
            .avoids(&["graphic", "ripped"]),
        MoodRule::new("cozy")
            .aliases(&["comfy", "snug"])
            .colors(&["cream", "brown", "camel", "burgundy", "oatmeal"], &["neon"])
            .avoids(&["sheer", "mesh", "stiletto"]),
        MoodRule::new("energetic")
            .aliases(&["energized", "vibrant"])
            .colors(&["red", "orange", "yellow", "cobalt", "lime"], &["beige", "taupe"]),
        MoodRule::new("mysterious")
            .aliases(&["moody", "dark"])
            .colors(&["black", "charcoal", "burgundy", "plum", "navy"], &["neon", "pastel", "yellow"]),
        MoodRule::new("somber")
            .aliases(&["subdued", "mourning"])
            .colors(&["black", "navy", "charcoal", "gray"], &["neon", "yellow", "orange", "hot pink"])
            .avoids(&["sequin", "graphic"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_rows_do_not_contradict_themselves() {
        for rule in style_rules() {
            for style in &rule.compatible_styles {
                assert!(
                    !rule.incompatible_styles.contains(style),
                    "{} lists {} as both compatible and incompatible",
                    rule.key,
                    style
                );
            }
        }
    }

    #[test]
    fn test_mood_avoided_color() {
        let moods = mood_rules();
        let somber = moods.iter().find(|m| m.key == "somber").unwrap();
        assert!(somber.avoids_color("neon yellow"));
        assert!(somber.prefers_color("charcoal"));
        assert!(!somber.avoids_color("navy"));
    }
}
