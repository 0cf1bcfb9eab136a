use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric category code understood by the backing store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CategoryCode(pub i32);

/// Numeric measurement-unit code understood by the backing store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UnitCode(pub i32);

/// Where an ingredient line item originated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IngredientSource {
    /// Free-text entry with no catalog match; created server-side on submit.
    New,
    /// Pre-filled from a template recipe.
    Template,
    /// Selected from the existing catalog.
    Saved,
}

/// One ingredient entry within a menu, carrying its own cost/amount/unit.
///
/// `id == 0` is the sentinel for "not yet persisted": such a line must be
/// submitted as a creation request with its name/unit/price/category, while
/// `id > 0` lines are submitted as references into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedIngredient {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub unit_code: UnitCode,
    /// Line cost in won.
    pub price: i64,
    pub category_code: CategoryCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub source: IngredientSource,
    pub base_quantity: f64,
    pub unit_price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_recipe_id: Option<i64>,
}

impl SelectedIngredient {
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    /// Drops an empty or whitespace-only supplier before submission.
    pub fn normalize_supplier(&mut self) {
        if let Some(supplier) = &self.supplier {
            if supplier.trim().is_empty() {
                self.supplier = None;
            }
        }
    }
}

/// Persisted ingredient catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogIngredient {
    pub id: i64,
    pub name: String,
    pub category_code: CategoryCode,
    pub unit_code: UnitCode,
    /// Price of one base quantity, in won.
    pub price: i64,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CatalogIngredient {
    /// Price per single unit, derived from the base quantity.
    pub fn unit_price(&self) -> i64 {
        if self.amount > 0.0 {
            (self.price as f64 / self.amount).round() as i64
        } else {
            self.price
        }
    }
}

/// Request to create a brand-new catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewIngredient {
    pub name: String,
    pub category_code: CategoryCode,
    pub unit_code: UnitCode,
    pub price: i64,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

impl NewIngredient {
    /// Normalizes free-text fields before the request leaves the core.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        if let Some(supplier) = &self.supplier {
            let trimmed = supplier.trim();
            self.supplier = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            };
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i64, supplier: Option<&str>) -> SelectedIngredient {
        SelectedIngredient {
            id,
            name: "Milk".into(),
            amount: 1.0,
            unit_code: UnitCode(1),
            price: 800,
            category_code: CategoryCode(10),
            supplier: supplier.map(Into::into),
            source: IngredientSource::New,
            base_quantity: 1.0,
            unit_price: 800,
            template_recipe_id: None,
        }
    }

    #[test]
    fn zero_id_marks_new_lines() {
        assert!(line(0, None).is_new());
        assert!(!line(3, None).is_new());
    }

    #[test]
    fn empty_supplier_is_normalized_to_none() {
        let mut item = line(0, Some("  "));
        item.normalize_supplier();
        assert_eq!(item.supplier, None);

        let mut kept = line(0, Some("Seoul Dairy"));
        kept.normalize_supplier();
        assert_eq!(kept.supplier.as_deref(), Some("Seoul Dairy"));
    }

    #[test]
    fn new_ingredient_normalization_trims_fields() {
        let req = NewIngredient {
            name: " Oat Milk ".into(),
            category_code: CategoryCode(10),
            unit_code: UnitCode(1),
            price: 1200,
            amount: 1.0,
            supplier: Some("".into()),
        }
        .normalized();
        assert_eq!(req.name, "Oat Milk");
        assert_eq!(req.supplier, None);
    }
}
