//! Generation invariants over random wardrobes

use std::collections::HashSet;

use proptest::prelude::*;
use wardrobe_core::{Category, GeneratedOutfit, GenerationRequest, WardrobeItem, Weather};
use wardrobe_pipeline::{OutfitGenerator, PipelineConfig};
use wardrobe_rules::RuleTables;

const CATALOG: &[(&str, &str)] = &[
    ("t-shirt", "Crew Tee"),
    ("shirt", "Camp Shirt"),
    ("polo", "Pique Polo"),
    ("blouse", "Silk Blouse"),
    ("jeans", "Straight Jeans"),
    ("chinos", "Chinos"),
    ("skirt", "Midi Skirt"),
    ("sneakers", "Canvas Sneakers"),
    ("boots", "Chelsea Boots"),
    ("loafers", "Suede Loafers"),
    ("dress", "Wrap Dress"),
    ("cardigan", "Cardigan"),
    ("jacket", "Denim Jacket"),
    ("belt", "Leather Belt"),
    ("watch", "Field Watch"),
    ("scarf", "Light Scarf"),
];

const COLORS: &[&str] = &["white", "black", "navy", "red", "green", "blue", "pink", "olive", "beige", "mustard"];

fn wardrobe() -> impl Strategy<Value = Vec<WardrobeItem>> {
    prop::collection::vec((0..CATALOG.len(), 0..COLORS.len(), 0u32..20, 0.0f64..1.0), 0..10).prop_map(|extras| {
        let mut items = vec![
            WardrobeItem::new("core-top", "t-shirt", "Basic Tee").with_color("white"),
            WardrobeItem::new("core-bottom", "jeans", "Basic Jeans").with_color("denim"),
            WardrobeItem::new("core-shoes", "sneakers", "Basic Sneakers").with_color("white"),
        ];
        for (idx, (kind, color, wear, favorite)) in extras.into_iter().enumerate() {
            let (item_type, name) = CATALOG[kind];
            items.push(
                WardrobeItem::new(format!("item-{}", idx), item_type, name)
                    .with_color(COLORS[color])
                    .with_wear(wear, None)
                    .with_favorite(favorite),
            );
        }
        items
    })
}

fn generate(request: &GenerationRequest) -> GeneratedOutfit {
    OutfitGenerator::new(RuleTables::shared(), PipelineConfig::default())
        .unwrap()
        .generate(request)
}

fn covers_core(outfit: &GeneratedOutfit) -> bool {
    let categories: HashSet<Category> = outfit.categories().into_iter().collect();
    let top_and_bottom = categories.contains(&Category::OnePiece)
        || (categories.contains(&Category::Top) && categories.contains(&Category::Bottom));
    top_and_bottom && categories.contains(&Category::Shoes)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_no_duplicate_ids(items in wardrobe(), seed in any::<u64>(), temp in 20.0f64..100.0) {
        let outfit = generate(&GenerationRequest::new("casual", Weather::new(temp, "clear"), items).with_seed(seed));
        let unique: HashSet<&String> = outfit.item_ids.iter().collect();
        prop_assert_eq!(unique.len(), outfit.item_ids.len());
        prop_assert_eq!(outfit.items.len(), outfit.item_ids.len());
    }

    #[test]
    fn test_required_categories_covered(items in wardrobe(), seed in any::<u64>(), temp in 60.0f64..75.0) {
        let outfit = generate(&GenerationRequest::new("casual", Weather::new(temp, "clear"), items).with_seed(seed));
        prop_assert!(covers_core(&outfit), "categories: {:?}", outfit.categories());
    }

    #[test]
    fn test_seeds_do_not_change_coverage(items in wardrobe(), a in any::<u64>(), b in any::<u64>()) {
        let base = GenerationRequest::new("casual", Weather::new(68.0, "clear"), items);
        let first = generate(&base.clone().with_seed(a));
        let second = generate(&base.with_seed(b));
        prop_assert!(covers_core(&first));
        prop_assert!(covers_core(&second));
    }

    #[test]
    fn test_base_item_kept_or_reported(items in wardrobe(), pick in any::<prop::sample::Index>(), seed in any::<u64>()) {
        let base_id = items[pick.index(items.len())].id.clone();
        let outfit = generate(
            &GenerationRequest::new("casual", Weather::new(70.0, "clear"), items)
                .with_base_item(base_id.clone())
                .with_seed(seed),
        );
        prop_assert!(outfit.has_item(&base_id) || outfit.metadata.base_item_dropped.is_some());
    }

    #[test]
    fn test_validation_is_pure(items in wardrobe(), temp in 20.0f64..100.0) {
        let generator = OutfitGenerator::new(RuleTables::shared(), PipelineConfig::default()).unwrap();
        let request = GenerationRequest::new("business", Weather::new(temp, "light rain"), items).with_seed(1);
        let first = generator.validate_items(&request).unwrap();
        let second = generator.validate_items(&request).unwrap();
        prop_assert_eq!(first, second);
    }
}
