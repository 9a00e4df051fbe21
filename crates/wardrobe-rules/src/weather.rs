//! Temperature bands and weather-condition rows
//!
//! Bands are half-open `[min, max)` ranges in °F and must tile the whole
//! temperature line; the outer bands use very wide bounds.

use wardrobe_core::{ConditionRule, LayeringRule};

const WARM_WEATHER_GEAR: &[&str] = &[
    "parka", "puffer", "overcoat", "wool coat", "down jacket", "thermal", "turtleneck", "fleece",
    "beanie", "gloves",
];

pub fn layering_rules() -> Vec<LayeringRule> {
    let mut hot_forbidden = WARM_WEATHER_GEAR.to_vec();
    hot_forbidden.extend(["sweater", "hoodie", "sweatshirt", "cardigan", "knit", "scarf"]);

    vec![
        LayeringRule::new("freezing", -200.0, 32.0)
            .layers(2, 4)
            .requires_outerwear()
            .forbids(&["shorts", "tank", "sandal", "flip flop", "sleeveless", "crop top", "swim"])
            .materials(&["wool", "cashmere", "down", "fleece", "shearling"], &["linen", "seersucker", "mesh", "chiffon"]),
        LayeringRule::new("cold", 32.0, 45.0)
            .layers(1, 3)
            .requires_outerwear()
            .forbids(&["shorts", "tank", "sandal", "flip flop", "sleeveless", "crop top"])
            .materials(&["wool", "fleece", "flannel", "corduroy", "cashmere"], &["linen", "seersucker", "mesh"]),
        LayeringRule::new("cool", 45.0, 60.0)
            .layers(1, 2)
            .forbids(&["flip flop", "tank"])
            .materials(&["cotton", "denim", "wool", "knit"], &["linen", "seersucker"]),
        LayeringRule::new("mild", 60.0, 75.0)
            .layers(0, 2)
            .forbids(&["parka", "puffer", "down jacket", "thermal"])
            .materials(&["cotton", "denim", "chambray"], &["shearling"]),
        LayeringRule::new("warm", 75.0, 85.0)
            .layers(0, 1)
            .forbids(WARM_WEATHER_GEAR)
            .materials(&["cotton", "linen", "chambray"], &["wool", "fleece", "cashmere", "velvet", "corduroy"]),
        LayeringRule::new("hot", 85.0, 200.0)
            .layers(0, 1)
            .forbids(&hot_forbidden)
            .materials(&["linen", "cotton", "seersucker", "mesh"], &["wool", "fleece", "cashmere", "velvet", "corduroy", "leather", "tweed"]),
    ]
}

pub fn condition_rules() -> Vec<ConditionRule> {
    vec![
        ConditionRule::new("rain", &["rain", "drizzle", "shower", "storm", "thunder"])
            .above_precipitation(60.0)
            .forbids(&["suede"])
            .discourages(&["suede", "silk", "satin", "canvas"]),
        ConditionRule::new("snow", &["snow", "sleet", "blizzard", "flurr"])
            .forbids(&["sandal", "flip flop", "espadrille"])
            .discourages(&["canvas", "linen", "mesh", "suede"]),
        ConditionRule::new("wind", &["wind", "gust", "breez"])
            .discourages(&["chiffon"]),
    ]
}
