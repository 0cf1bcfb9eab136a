use menu_core::catalog::{CategoryCode, IngredientSource, SelectedIngredient, UnitCode};
use menu_core::config::MarginConfig;
use menu_core::margin::{
    contribution_profit, cost_ratio, total_cost, GradeBands, MarginEngine, MarginGrade,
    MarginStrategy,
};

fn line(price: i64) -> SelectedIngredient {
    SelectedIngredient {
        id: 1,
        name: "ingredient".into(),
        amount: 1.0,
        unit_code: UnitCode(1),
        price,
        category_code: CategoryCode(10),
        supplier: None,
        source: IngredientSource::Saved,
        base_quantity: 1.0,
        unit_price: price,
        template_recipe_id: None,
    }
}

#[test]
fn cost_figures_round_trip() {
    for (price, cost) in [(5000_i64, 2000_i64), (1000, 999), (4500, 0), (100, 100)] {
        assert_eq!(cost_ratio(price, cost), Some(cost as f64 / price as f64));
        assert_eq!(contribution_profit(price, cost), price - cost);
    }
}

#[test]
fn total_cost_sums_line_prices() {
    let ingredients = vec![line(800), line(1200), line(0)];
    assert_eq!(total_cost(&ingredients), 2000);
    assert_eq!(total_cost(&[]), 0);
}

#[test]
fn report_matches_the_latte_fixture() {
    let engine = MarginEngine::default();
    let report = engine.evaluate(5000, &[line(800), line(1200)]);
    assert_eq!(report.total_cost, 2000);
    assert_eq!(report.cost_ratio, Some(0.4));
    assert_eq!(report.contribution_profit, 3000);
    assert_eq!(report.margin_ratio, 60.0);
    assert_eq!(report.grade, MarginGrade::Safe);
    assert_eq!(report.recommended_price, None);
}

#[test]
fn low_margin_menus_get_a_recommendation() {
    let engine = MarginEngine::default();
    // 4200 cost on a 5000 price: 16% margin, Danger band.
    let report = engine.evaluate_cost(5000, 4200);
    assert_eq!(report.grade, MarginGrade::Danger);
    let recommended = report.recommended_price.expect("price suggested");
    assert!(recommended > 5000);
    // 4200 / 0.7 = 6000 exactly.
    assert_eq!(recommended, 6000);
    let message = report.recommended_message.expect("message present");
    assert!(message.contains("6000"));
}

#[test]
fn grade_labels_and_messages_are_stable() {
    assert_eq!(MarginGrade::Safe.label(), "Safe");
    assert_eq!(MarginGrade::Mid.label(), "Stable");
    assert_eq!(MarginGrade::Warning.label(), "Warning");
    assert_eq!(MarginGrade::Danger.label(), "Danger");
    assert!(MarginGrade::Danger.message().contains("Raise the price"));
}

#[test]
fn custom_bands_from_config_shift_grades() {
    let config = MarginConfig {
        bands: GradeBands {
            safe_min: 70.0,
            mid_min: 60.0,
            warning_min: 50.0,
        },
        ..MarginConfig::default()
    };
    let engine = MarginEngine::from_config(&config);
    // 60% margin is Safe with default bands, Mid with the stricter ones.
    let report = engine.evaluate_cost(5000, 2000);
    assert_eq!(report.grade, MarginGrade::Mid);
}

struct FixedRatio(f64);

impl MarginStrategy for FixedRatio {
    fn margin_ratio(&self, _price: i64, _total_cost: i64) -> f64 {
        self.0
    }

    fn recommend(&self, _price: i64, _total_cost: i64, _grade: MarginGrade) -> Option<(i64, String)> {
        None
    }
}

#[test]
fn margin_ratio_formula_is_pluggable() {
    let engine = MarginEngine::new(GradeBands::default(), Box::new(FixedRatio(12.5)));
    let report = engine.evaluate_cost(5000, 100);
    assert_eq!(report.margin_ratio, 12.5);
    assert_eq!(report.grade, MarginGrade::Danger);
    // Cost figures stay independent of the strategy.
    assert_eq!(report.contribution_profit, 4900);
}
