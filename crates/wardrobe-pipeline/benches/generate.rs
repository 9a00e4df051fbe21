//! Generation benchmarks
//!
//! Full pipeline per request, across wardrobe sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use wardrobe_core::{GenerationRequest, WardrobeItem, Weather};
use wardrobe_pipeline::{OutfitGenerator, PipelineConfig};
use wardrobe_rules::RuleTables;

const TYPES: &[&str] = &[
    "dress shirt", "t-shirt", "polo", "chinos", "jeans", "dress pants", "loafers", "sneakers", "boots",
    "blazer", "cardigan", "coat", "belt", "watch", "scarf",
];
const COLORS: &[&str] = &["white", "navy", "black", "gray", "red", "olive", "brown"];

fn wardrobe(size: usize) -> Vec<WardrobeItem> {
    (0..size)
        .map(|i| {
            let item_type = TYPES[i % TYPES.len()];
            WardrobeItem::new(format!("item-{}", i), item_type, item_type)
                .with_color(COLORS[i % COLORS.len()])
                .with_wear((i % 9) as u32, None)
        })
        .collect()
}

fn bench_generate(c: &mut Criterion) {
    let generator = OutfitGenerator::new(RuleTables::shared(), PipelineConfig::default()).unwrap();
    let mut group = c.benchmark_group("generate");

    for size in [15, 60, 240] {
        let request = GenerationRequest::new("business casual", Weather::new(55.0, "cloudy"), wardrobe(size)).with_seed(11);
        group.bench_with_input(BenchmarkId::from_parameter(size), &request, |b, request| {
            b.iter(|| generator.generate(request))
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let generator = OutfitGenerator::new(RuleTables::shared(), PipelineConfig::default()).unwrap();
    let request = GenerationRequest::new("business", Weather::new(40.0, "rain"), wardrobe(6)).with_seed(3);

    c.bench_function("validate_items", |b| b.iter(|| generator.validate_items(&request)));
}

criterion_group!(benches, bench_generate, bench_validate);
criterion_main!(benches);
