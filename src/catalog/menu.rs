use serde::{Deserialize, Serialize};

use super::ingredient::{CategoryCode, SelectedIngredient};

/// Mutable, in-progress menu registration. One draft exists per wizard
/// session; each step fills in the fields it collected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuDraft {
    pub name: String,
    pub price: i64,
    pub category: String,
    pub work_time_secs: u32,
    #[serde(default)]
    pub ingredients: Vec<SelectedIngredient>,
    #[serde(default)]
    pub is_template_applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_code: Option<CategoryCode>,
}

impl MenuDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: 0,
            category: String::new(),
            work_time_secs: 0,
            ingredients: Vec::new(),
            is_template_applied: false,
            template_id: None,
            category_code: None,
        }
    }

    /// Freezes the draft into an immutable registration snapshot.
    pub fn freeze(&self) -> RegisteredMenu {
        RegisteredMenu {
            name: self.name.clone(),
            price: self.price,
            category: self.category.clone(),
            work_time_secs: self.work_time_secs,
            ingredients: self.ingredients.clone(),
            category_code: self.category_code.unwrap_or(CategoryCode(0)),
        }
    }
}

/// Immutable snapshot of a completed draft, queued for batch submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisteredMenu {
    pub name: String,
    pub price: i64,
    pub category: String,
    pub work_time_secs: u32,
    pub ingredients: Vec<SelectedIngredient>,
    pub category_code: CategoryCode,
}
