use criterion::{black_box, criterion_group, criterion_main, Criterion};
use menu_core::catalog::{CategoryCode, IngredientSource, SelectedIngredient, UnitCode};
use menu_core::margin::MarginEngine;

fn ingredients(count: usize) -> Vec<SelectedIngredient> {
    (0..count)
        .map(|index| SelectedIngredient {
            id: index as i64 + 1,
            name: format!("ingredient-{index}"),
            amount: 1.0,
            unit_code: UnitCode(1),
            price: 100 + index as i64 * 37,
            category_code: CategoryCode(10),
            supplier: None,
            source: IngredientSource::Saved,
            base_quantity: 1.0,
            unit_price: 100,
            template_recipe_id: None,
        })
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let engine = MarginEngine::default();
    let lines = ingredients(32);
    c.bench_function("margin_evaluate_32_lines", |b| {
        b.iter(|| engine.evaluate(black_box(12000), black_box(&lines)))
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
