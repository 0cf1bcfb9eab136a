//! Margin classification engine.
//!
//! Pure computations over a menu's selling price and ingredient costs.
//! The menu list, menu detail, and badge components all call the same
//! [`MarginEngine`] so thresholds can never diverge between screens.
//!
//! The margin-ratio formula itself is a pluggable [`MarginStrategy`]; the
//! shipped default treats contribution profit as a percentage of the
//! selling price.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::catalog::SelectedIngredient;
use crate::config::MarginConfig;

/// Sum of ingredient line costs, in won.
pub fn total_cost(ingredients: &[SelectedIngredient]) -> i64 {
    ingredients.iter().map(|line| line.price).sum()
}

/// Ingredient cost as a fraction of selling price. `None` when the price is
/// zero, where the ratio is undefined; callers must guard before display.
pub fn cost_ratio(price: i64, total_cost: i64) -> Option<f64> {
    if price == 0 {
        None
    } else {
        Some(total_cost as f64 / price as f64)
    }
}

/// Selling price minus ingredient cost. Excludes labor and overhead.
pub fn contribution_profit(price: i64, total_cost: i64) -> i64 {
    price - total_cost
}

/// Four-level risk classification, `Safe` best, `Danger` worst.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum MarginGrade {
    Safe,
    Mid,
    Warning,
    Danger,
}

impl MarginGrade {
    /// Fixed badge label rendered verbatim by the UI.
    pub fn label(self) -> &'static str {
        match self {
            MarginGrade::Safe => "Safe",
            MarginGrade::Mid => "Stable",
            MarginGrade::Warning => "Warning",
            MarginGrade::Danger => "Danger",
        }
    }

    /// Fixed advisory message rendered verbatim by the UI.
    pub fn message(self) -> &'static str {
        match self {
            MarginGrade::Safe => "Margin is healthy. Keep the current price.",
            MarginGrade::Mid => "Margin is acceptable. Keep an eye on ingredient costs.",
            MarginGrade::Warning => "Margin is tight. Review ingredient costs or the price.",
            MarginGrade::Danger => "Margin is too low. Raise the price or cut costs.",
        }
    }

    /// Grades that already look favorable get no price recommendation.
    pub fn is_favorable(self) -> bool {
        matches!(self, MarginGrade::Safe | MarginGrade::Mid)
    }
}

/// Ordered margin-percentage bands mapping a ratio to a grade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GradeBands {
    /// Margin percentage at or above which a menu is `Safe`.
    pub safe_min: f64,
    /// At or above: `Mid`. Below `warning_min`: `Danger`.
    pub mid_min: f64,
    pub warning_min: f64,
}

static DEFAULT_BANDS: Lazy<GradeBands> = Lazy::new(|| GradeBands {
    safe_min: 40.0,
    mid_min: 30.0,
    warning_min: 20.0,
});

impl GradeBands {
    pub fn grade(&self, margin_ratio: f64) -> MarginGrade {
        if margin_ratio >= self.safe_min {
            MarginGrade::Safe
        } else if margin_ratio >= self.mid_min {
            MarginGrade::Mid
        } else if margin_ratio >= self.warning_min {
            MarginGrade::Warning
        } else {
            MarginGrade::Danger
        }
    }
}

impl Default for GradeBands {
    fn default() -> Self {
        *DEFAULT_BANDS
    }
}

/// Pluggable margin-ratio and recommended-price formula.
///
/// The sample data the app ships with does not pin down a single formula,
/// so the engine treats it as an extension point rather than hard-coding
/// one interpretation.
pub trait MarginStrategy: Send + Sync {
    /// Margin percentage used for grading.
    fn margin_ratio(&self, price: i64, total_cost: i64) -> f64;

    /// Optional suggested price plus advisory message. Expected to be
    /// `None` when the grade is already favorable.
    fn recommend(&self, price: i64, total_cost: i64, grade: MarginGrade) -> Option<(i64, String)>;
}

/// Default strategy: margin ratio is contribution profit as a percentage of
/// selling price. Recommendations target a configured margin and round the
/// suggested price up to a configured unit.
#[derive(Debug, Clone)]
pub struct ContributionMarginStrategy {
    pub target_margin_pct: f64,
    pub price_rounding_unit: i64,
}

impl Default for ContributionMarginStrategy {
    fn default() -> Self {
        Self {
            target_margin_pct: 30.0,
            price_rounding_unit: 100,
        }
    }
}

impl ContributionMarginStrategy {
    fn round_up(&self, price: f64) -> i64 {
        let unit = self.price_rounding_unit.max(1);
        let raw = price.round() as i64;
        ((raw + unit - 1) / unit) * unit
    }
}

impl MarginStrategy for ContributionMarginStrategy {
    fn margin_ratio(&self, price: i64, total_cost: i64) -> f64 {
        if price == 0 {
            return 0.0;
        }
        contribution_profit(price, total_cost) as f64 / price as f64 * 100.0
    }

    fn recommend(&self, _price: i64, total_cost: i64, grade: MarginGrade) -> Option<(i64, String)> {
        if grade.is_favorable() {
            return None;
        }
        let target = self.target_margin_pct.clamp(0.0, 95.0);
        let suggested = self.round_up(total_cost as f64 / (1.0 - target / 100.0));
        let message = format!(
            "Cost ratio is high. Consider raising the price to {} won.",
            suggested
        );
        Some((suggested, message))
    }
}

/// Everything a screen needs to render a menu's profitability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarginReport {
    pub total_cost: i64,
    /// `None` when the selling price is zero.
    pub cost_ratio: Option<f64>,
    pub margin_ratio: f64,
    pub contribution_profit: i64,
    pub grade: MarginGrade,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_message: Option<String>,
}

/// The single shared classification entry point.
pub struct MarginEngine {
    bands: GradeBands,
    strategy: Box<dyn MarginStrategy>,
}

impl MarginEngine {
    pub fn new(bands: GradeBands, strategy: Box<dyn MarginStrategy>) -> Self {
        Self { bands, strategy }
    }

    /// Engine configured from [`MarginConfig`] with the default strategy.
    pub fn from_config(config: &MarginConfig) -> Self {
        Self::new(
            config.bands,
            Box::new(ContributionMarginStrategy {
                target_margin_pct: config.target_margin_pct,
                price_rounding_unit: config.price_rounding_unit,
            }),
        )
    }

    pub fn evaluate(&self, price: i64, ingredients: &[SelectedIngredient]) -> MarginReport {
        let total = total_cost(ingredients);
        self.evaluate_cost(price, total)
    }

    /// Same computation for callers that already hold a cost figure.
    pub fn evaluate_cost(&self, price: i64, total_cost: i64) -> MarginReport {
        let margin_ratio = self.strategy.margin_ratio(price, total_cost);
        let grade = self.bands.grade(margin_ratio);
        let (recommended_price, recommended_message) =
            match self.strategy.recommend(price, total_cost, grade) {
                Some((suggested, message)) => (Some(suggested), Some(message)),
                None => (None, None),
            };
        MarginReport {
            total_cost,
            cost_ratio: cost_ratio(price, total_cost),
            margin_ratio,
            contribution_profit: contribution_profit(price, total_cost),
            grade,
            recommended_price,
            recommended_message,
        }
    }
}

impl Default for MarginEngine {
    fn default() -> Self {
        Self::new(
            GradeBands::default(),
            Box::new(ContributionMarginStrategy::default()),
        )
    }
}
