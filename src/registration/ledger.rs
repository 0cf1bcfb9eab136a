use crate::catalog::{
    CatalogIngredient, CategoryCode, IngredientSource, NewIngredient, SelectedIngredient, UnitCode,
};
use crate::errors::{ServiceError, ServiceResult};
use crate::repository::{IngredientRepository, IngredientSuggestion, SearchRepository};

/// What the user picked on the ingredient step.
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientPick {
    /// An existing catalog entry, selected from search results.
    Saved { id: i64, amount: f64 },
    /// A catalog entry reached through a template recipe link.
    Template {
        id: i64,
        amount: f64,
        template_recipe_id: i64,
    },
    /// Free text with no catalog match; every field is caller-supplied.
    Free {
        name: String,
        amount: f64,
        unit_code: UnitCode,
        price: i64,
        category_code: CategoryCode,
        supplier: Option<String>,
    },
}

/// Resolves ingredient picks against the catalog and owns uniqueness
/// checking for brand-new entries.
///
/// For `Saved` and `Template` picks the catalog record is authoritative:
/// price, unit, and category come from the stored entry, not caller input.
/// (The standalone ingredient-edit flow can change them; the add flow
/// cannot.)
pub struct IngredientLedger<'a> {
    ingredients: &'a dyn IngredientRepository,
    search: &'a dyn SearchRepository,
}

impl<'a> IngredientLedger<'a> {
    pub fn new(
        ingredients: &'a dyn IngredientRepository,
        search: &'a dyn SearchRepository,
    ) -> Self {
        Self {
            ingredients,
            search,
        }
    }

    /// Turns a pick into a line item ready for the draft's ingredient list.
    pub fn resolve(&self, pick: IngredientPick) -> ServiceResult<SelectedIngredient> {
        match pick {
            IngredientPick::Saved { id, amount } => {
                let entry = self.require(id)?;
                Ok(Self::from_catalog(entry, amount, IngredientSource::Saved, None))
            }
            IngredientPick::Template {
                id,
                amount,
                template_recipe_id,
            } => {
                let entry = self.require(id)?;
                Ok(Self::from_catalog(
                    entry,
                    amount,
                    IngredientSource::Template,
                    Some(template_recipe_id),
                ))
            }
            IngredientPick::Free {
                name,
                amount,
                unit_code,
                price,
                category_code,
                supplier,
            } => {
                let mut item = SelectedIngredient {
                    id: 0,
                    name: name.trim().to_string(),
                    amount,
                    unit_code,
                    price,
                    category_code,
                    supplier,
                    source: IngredientSource::New,
                    base_quantity: amount,
                    unit_price: if amount > 0.0 {
                        (price as f64 / amount).round() as i64
                    } else {
                        price
                    },
                    template_recipe_id: None,
                };
                item.normalize_supplier();
                Ok(item)
            }
        }
    }

    /// Fails with [`ServiceError::DuplicateName`] when the catalog already
    /// holds an entry with the same name.
    pub fn check_duplicate(&self, name: &str) -> ServiceResult<()> {
        self.ingredients.check_duplicate(name)
    }

    /// Creates a new catalog entry. The duplicate check always runs first;
    /// on a hit, creation is aborted and the duplicate error is returned so
    /// the caller can redirect the user to the existing entry.
    pub fn create_and_persist(&self, request: NewIngredient) -> ServiceResult<CatalogIngredient> {
        let request = request.normalized();
        if let Err(err) = self.check_duplicate(&request.name) {
            tracing::info!(name = %request.name, "duplicate ingredient, redirecting");
            return Err(err);
        }
        let entry = self.ingredients.create_ingredient(request)?;
        tracing::info!(id = entry.id, name = %entry.name, "ingredient persisted");
        Ok(entry)
    }

    /// Passthrough to the search boundary; debouncing happens upstream.
    pub fn search(&self, query: &str) -> Vec<IngredientSuggestion> {
        self.search.search_ingredients(query)
    }

    fn require(&self, id: i64) -> ServiceResult<CatalogIngredient> {
        self.ingredients
            .find_by_id(id)
            .ok_or_else(|| ServiceError::NotFound(format!("ingredient #{id}")))
    }

    fn from_catalog(
        entry: CatalogIngredient,
        amount: f64,
        source: IngredientSource,
        template_recipe_id: Option<i64>,
    ) -> SelectedIngredient {
        let unit_price = entry.unit_price();
        SelectedIngredient {
            id: entry.id,
            name: entry.name,
            amount,
            unit_code: entry.unit_code,
            price: entry.price,
            category_code: entry.category_code,
            supplier: entry.supplier,
            source,
            base_quantity: entry.amount,
            unit_price,
            template_recipe_id,
        }
    }
}
