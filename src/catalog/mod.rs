//! Menu and ingredient domain models shared by the registration flow and
//! the margin engine.

pub mod ingredient;
pub mod menu;

pub use ingredient::{
    CatalogIngredient, CategoryCode, IngredientSource, NewIngredient, SelectedIngredient, UnitCode,
};
pub use menu::{MenuDraft, RegisteredMenu};
