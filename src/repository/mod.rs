//! Boundary traits for the backing stores the core consumes.
//!
//! Real deployments put network-backed implementations behind these traits;
//! the crate ships deterministic in-memory versions in [`memory`] that the
//! tests and demos inject explicitly (no process-wide singletons).

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogIngredient, CategoryCode, NewIngredient, UnitCode};
use crate::errors::ServiceResult;

/// Reference to an ingredient that already exists in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExistingRecipeRef {
    pub id: i64,
    pub amount: f64,
    pub unit_code: UnitCode,
    pub price: i64,
}

/// Creation request for an ingredient the catalog has never seen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRecipeRequest {
    pub name: String,
    pub category_code: CategoryCode,
    pub unit_code: UnitCode,
    pub price: i64,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

/// Payload for one `create_menu` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateMenuRequest {
    pub category_code: CategoryCode,
    pub menu_name: String,
    pub selling_price: i64,
    pub work_time_secs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<ExistingRecipeRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_recipes: Option<Vec<NewRecipeRequest>>,
}

/// One row of an ingredient search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientSuggestion {
    pub id: i64,
    pub name: String,
    pub unit_code: UnitCode,
    pub price: i64,
    pub category_code: CategoryCode,
}

/// Menu store boundary. One call per queued menu during batch submission.
pub trait MenuRepository: Send + Sync {
    fn create_menu(&self, request: CreateMenuRequest) -> ServiceResult<()>;
}

/// Ingredient catalog boundary. Duplicate-name rejection is authoritative
/// on this side, not merely advisory in the UI.
pub trait IngredientRepository: Send + Sync {
    fn check_duplicate(&self, name: &str) -> ServiceResult<()>;
    fn create_ingredient(&self, request: NewIngredient) -> ServiceResult<CatalogIngredient>;
    fn find_by_id(&self, id: i64) -> Option<CatalogIngredient>;
    fn find_by_name(&self, name: &str) -> Option<CatalogIngredient>;
}

/// Suggestion search boundary. Query debouncing happens upstream; the core
/// only consumes the finite per-query result list.
pub trait SearchRepository: Send + Sync {
    fn search_ingredients(&self, query: &str) -> Vec<IngredientSuggestion>;
}
