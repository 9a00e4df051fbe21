//! Occasion rows
//!
//! Each row names its forbidden keywords (with the hard subset that survives
//! relaxed filtering), an optional allow-list for core items, and any
//! categories required beyond top/bottom/shoes.

use wardrobe_core::{Category, OccasionCategory as Kind, OccasionRule};

const LOUNGE: &[&str] = &["pajama", "pyjama", "sleepwear", "robe", "slipper", "loungewear", "onesie"];
const SWIM: &[&str] = &["swimsuit", "bikini", "swim trunks", "swimwear", "board shorts"];
const GYM_ONLY: &[&str] = &[
    "gym shorts", "sports bra", "running shorts", "track pants", "sweatpants", "athletic",
    "compression",
];
const FORMAL_ONLY: &[&str] = &[
    "blazer", "suit", "tuxedo", "gown", "dress shirt", "dress pants", "dress shoes", "heels",
    "loafer", "tie", "cufflink", "slacks", "oxfords",
];
const CASUAL_WEAR: &[&str] = &[
    "t-shirt", "tee", "hoodie", "sweatshirt", "shorts", "tank", "flip flop", "sandal",
    "sneaker", "jeans", "leggings", "joggers", "crop top", "graphic", "cargo",
];
const ATHLETIC_GEAR: &[&str] = &[
    "athletic", "running", "gym", "workout", "sports", "jersey", "leggings", "joggers", "track",
    "training", "sneaker", "trainer", "performance", "yoga", "shorts", "tank", "hoodie",
    "sweatpants", "sweatshirt", "t-shirt", "tee", "sports bra", "moisture-wicking", "dri-fit",
];

fn join(parts: &[&[&'static str]]) -> Vec<&'static str> {
    parts.iter().flat_map(|p| p.iter().copied()).collect()
}

fn athletic(key: &str, aliases: &[&str]) -> OccasionRule {
    let hard = join(&[FORMAL_ONLY, &["jeans", "gown", "sequin", "stiletto"]]);
    OccasionRule::new(key, Kind::Athletic, 1)
        .aliases(aliases)
        .forbids(&["boot", "silk", "satin", "wool", "denim", "leather", "sandal", "flip flop", "chinos"], &hard)
        .allows(ATHLETIC_GEAR)
}

fn business(key: &str, aliases: &[&str], formality: u8) -> OccasionRule {
    let hard = join(&[LOUNGE, SWIM, GYM_ONLY, &["flip flop", "sneaker", "t-shirt", "tank", "crop top"]]);
    OccasionRule::new(key, Kind::Formal, formality)
        .aliases(aliases)
        .forbids(CASUAL_WEAR, &hard)
        .prefers(&[Category::Outerwear, Category::Accessory])
}

fn formal_event(key: &str, aliases: &[&str], formality: u8) -> OccasionRule {
    let hard = join(&[LOUNGE, SWIM, GYM_ONLY, &["hoodie", "flip flop", "sneaker", "t-shirt", "jeans"]]);
    OccasionRule::new(key, Kind::Formal, formality)
        .aliases(aliases)
        .forbids(&join(&[CASUAL_WEAR, &["denim", "polo", "fleece"]]), &hard)
        .prefers(&[Category::Outerwear, Category::Accessory])
}

fn social(key: &str, aliases: &[&str], formality: u8) -> OccasionRule {
    let hard = join(&[LOUNGE, GYM_ONLY]);
    OccasionRule::new(key, Kind::Social, formality)
        .aliases(aliases)
        .forbids(&["sweatpants", "flip flop", "gym", "workout", "hoodie"], &hard)
        .prefers(&[Category::Accessory])
}

fn travel(key: &str, aliases: &[&str], soft: &[&str]) -> OccasionRule {
    OccasionRule::new(key, Kind::Travel, 2)
        .aliases(aliases)
        .forbids(soft, &["gown", "tuxedo", "stiletto"])
        .prefers(&[Category::Layer, Category::Accessory])
}

/// Built-in occasion table; `default` must stay present
pub fn occasion_rules() -> Vec<OccasionRule> {
    vec![
        OccasionRule::new("default", Kind::Default, 2).forbids(&[], LOUNGE),
        OccasionRule::new("casual", Kind::Casual, 2)
            .aliases(&["everyday", "weekend", "errands", "casual outing", "hangout"])
            .forbids(&["tuxedo", "gown", "sequin"], &join(&[LOUNGE, SWIM])),
        business("business", &["work", "office", "business formal", "meeting"], 4),
        business("interview", &["job interview"], 5),
        OccasionRule::new("business-casual", Kind::Social, 3)
            .aliases(&["smart casual", "casual friday"])
            .forbids(
                &["hoodie", "sweatpants", "tank", "graphic", "athletic", "leggings", "shorts"],
                &join(&[LOUNGE, SWIM, &["flip flop"]]),
            )
            .prefers(&[Category::Layer]),
        business("conference", &["networking", "work event", "presentation"], 4),
        formal_event("wedding-guest", &["wedding", "wedding reception"], 4),
        formal_event("gala", &["black tie", "formal", "formal event", "opera"], 5)
            .allows(&join(&[
                FORMAL_ONLY,
                &["dress", "gown", "silk", "satin", "velvet", "blouse", "shirt", "trousers", "skirt", "jumpsuit", "pumps"],
            ])),
        formal_event("cocktail", &["cocktail party", "reception"], 4),
        formal_event("funeral", &["memorial", "wake"], 4),
        formal_event("graduation", &["commencement", "award ceremony"], 4),
        OccasionRule::new("church", Kind::Social, 3)
            .aliases(&["religious service", "worship", "temple", "mosque"])
            .forbids(&["shorts", "tank", "crop top", "flip flop", "graphic"], &join(&[LOUNGE, SWIM, GYM_ONLY])),
        athletic("athletic", &["sport", "sports", "exercise"]),
        athletic("gym", &["workout", "training", "weight training", "crossfit"]),
        athletic("running", &["run", "jog", "jogging", "marathon"]),
        athletic("yoga", &["pilates", "stretching"]),
        OccasionRule::new("hiking", Kind::Athletic, 2)
            .aliases(&["hike", "trail", "trekking", "camping"])
            .forbids(
                &["silk", "satin", "blazer", "dress shirt", "slacks"],
                &["heels", "gown", "dress shoes", "loafer", "flip flop", "stiletto"],
            )
            .prefers(&[Category::Layer, Category::Outerwear]),
        OccasionRule::new("beach", Kind::Casual, 1)
            .aliases(&["pool", "pool party", "lake", "boardwalk"])
            .forbids(
                &["wool", "boot", "blazer", "turtleneck", "coat", "heels", "tie"],
                &["suit", "tuxedo", "dress shoes", "overcoat"],
            ),
        social("date-night", &["date", "dinner date", "romantic dinner"], 3),
        social("dinner", &["dinner party", "restaurant"], 3),
        social("party", &["house party", "birthday", "celebration"], 3),
        social("brunch", &["lunch", "coffee"], 2),
        social("concert", &["festival", "music festival", "gig", "show"], 2),
        social("night-out", &["club", "clubbing", "bar", "night on the town"], 3),
        travel("travel", &["trip", "vacation", "sightseeing"], &["heels", "suit", "tie"]),
        travel("airport", &["flight", "air travel", "plane"], &["heels", "suit", "tie", "belt", "lace-up boot"]),
        travel("road-trip", &["drive", "car trip"], &["heels", "suit", "tie", "gown"]),
        OccasionRule::new("rainy-day", Kind::WeatherDriven, 2)
            .aliases(&["rainy", "rain", "storm"])
            .requires(&[Category::Outerwear])
            .forbids(&["canvas", "sandal", "flip flop", "silk", "espadrille"], &["suede"]),
        OccasionRule::new("snow-day", Kind::WeatherDriven, 2)
            .aliases(&["snow", "winter", "ski trip", "ski"])
            .requires(&[Category::Outerwear])
            .forbids(&["linen", "canvas", "mesh", "espadrille"], &["sandal", "flip flop", "shorts"]),
        OccasionRule::new("loungewear", Kind::Casual, 1)
            .aliases(&["stay home", "home", "lounge", "relaxing"])
            .forbids(&["heels", "blazer", "dress shoes", "tie"], &["tuxedo", "gown"]),
        OccasionRule::new("school", Kind::Casual, 2)
            .aliases(&["class", "campus", "college", "university"])
            .forbids(&["gown", "tuxedo", "heels"], &join(&[LOUNGE, SWIM])),
        OccasionRule::new("picnic", Kind::Casual, 2)
            .aliases(&["park", "outdoor lunch", "bbq", "barbecue"])
            .forbids(&["heels", "suit", "tuxedo", "gown", "silk"], &join(&[LOUNGE])),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use wardrobe_core::WardrobeItem;

    #[test]
    fn test_occasion_keys_are_unique() {
        let rules = occasion_rules();
        let mut seen = HashSet::new();
        for rule in &rules {
            for key in rule.keys() {
                assert!(seen.insert(key.to_string()), "duplicate occasion key: {}", key);
            }
        }
        assert!(rules.len() >= 30);
    }

    #[test]
    fn test_business_forbids_casual_wear() {
        let rules = occasion_rules();
        let business = rules.iter().find(|r| r.key == "business").unwrap();
        let sneakers = WardrobeItem::new("s", "sneakers", "White Sneakers");
        let tee = WardrobeItem::new("t", "t-shirt", "Crew Tee");
        let shirt = WardrobeItem::new("d", "dress shirt", "Oxford");

        assert!(business.hard_forbidden_hit(&sneakers).is_some());
        assert!(business.forbidden_hit(&tee).is_some());
        assert!(business.forbidden_hit(&shirt).is_none());
    }

    #[test]
    fn test_athletic_rejects_formal_pieces() {
        let rules = occasion_rules();
        let athletic = rules.iter().find(|r| r.key == "athletic").unwrap();
        let blazer = WardrobeItem::new("b", "blazer", "Navy Blazer");
        let shoes = WardrobeItem::new("d", "dress shoes", "Oxfords");
        assert!(athletic.hard_forbidden_hit(&blazer).is_some());
        assert!(athletic.hard_forbidden_hit(&shoes).is_some());
        assert!(!athletic.allow_listed(&blazer));
    }
}
