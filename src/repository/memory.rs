//! Deterministic in-memory repository implementations used by tests and
//! local demos.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::catalog::{CatalogIngredient, NewIngredient};
use crate::errors::{ServiceError, ServiceResult};

use super::{
    CreateMenuRequest, IngredientRepository, IngredientSuggestion, MenuRepository,
    SearchRepository,
};

fn normalized(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Default)]
struct CatalogInner {
    entries: Vec<CatalogIngredient>,
    next_id: i64,
}

/// In-memory ingredient catalog backing both the ingredient and the search
/// repository boundaries. Ids are allocated sequentially starting at 1 so
/// the `0` sentinel never collides with a persisted entry.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: Mutex<CatalogInner>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the catalog with existing entries, assigning ids in order.
    pub fn with_entries(seed: Vec<NewIngredient>) -> Self {
        let catalog = Self::new();
        for request in seed {
            // Seeding bypasses the duplicate guard on purpose.
            catalog.insert(request.normalized());
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, CatalogInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert(&self, request: NewIngredient) -> CatalogIngredient {
        let mut inner = self.lock();
        inner.next_id += 1;
        let entry = CatalogIngredient {
            id: inner.next_id,
            name: request.name,
            category_code: request.category_code,
            unit_code: request.unit_code,
            price: request.price,
            amount: request.amount,
            supplier: request.supplier,
            created_at: Utc::now(),
        };
        inner.entries.push(entry.clone());
        entry
    }
}

impl IngredientRepository for InMemoryCatalog {
    fn check_duplicate(&self, name: &str) -> ServiceResult<()> {
        let candidate = normalized(name);
        let inner = self.lock();
        if inner
            .entries
            .iter()
            .any(|entry| normalized(&entry.name) == candidate)
        {
            Err(ServiceError::DuplicateName(name.trim().to_string()))
        } else {
            Ok(())
        }
    }

    fn create_ingredient(&self, request: NewIngredient) -> ServiceResult<CatalogIngredient> {
        let request = request.normalized();
        self.check_duplicate(&request.name)?;
        tracing::debug!(name = %request.name, "creating catalog ingredient");
        Ok(self.insert(request))
    }

    fn find_by_id(&self, id: i64) -> Option<CatalogIngredient> {
        self.lock().entries.iter().find(|entry| entry.id == id).cloned()
    }

    fn find_by_name(&self, name: &str) -> Option<CatalogIngredient> {
        let candidate = normalized(name);
        self.lock()
            .entries
            .iter()
            .find(|entry| normalized(&entry.name) == candidate)
            .cloned()
    }
}

impl SearchRepository for InMemoryCatalog {
    fn search_ingredients(&self, query: &str) -> Vec<IngredientSuggestion> {
        let needle = normalized(query);
        if needle.is_empty() {
            return Vec::new();
        }
        let inner = self.lock();
        let mut scored: Vec<(f64, IngredientSuggestion)> = inner
            .entries
            .iter()
            .filter_map(|entry| {
                let haystack = normalized(&entry.name);
                // Substring hits rank above fuzzy matches.
                let score = if haystack.contains(&needle) {
                    2.0
                } else {
                    strsim::jaro_winkler(&haystack, &needle)
                };
                if score < 0.7 {
                    return None;
                }
                Some((
                    score,
                    IngredientSuggestion {
                        id: entry.id,
                        name: entry.name.clone(),
                        unit_code: entry.unit_code,
                        price: entry.price,
                        category_code: entry.category_code,
                    },
                ))
            })
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(_, suggestion)| suggestion).collect()
    }
}

/// Failure script for [`InMemoryMenuStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureRule {
    /// Fail the nth `create_menu` call (1-based).
    OnCall(usize),
    /// Fail whenever the named menu is submitted.
    OnMenuName(String),
}

#[derive(Debug, Default)]
struct MenuStoreInner {
    created: Vec<CreateMenuRequest>,
    calls: usize,
    failure: Option<FailureRule>,
}

/// In-memory menu store that records every `create_menu` call and supports
/// scripted failures for exercising stop-on-first-error behavior.
#[derive(Debug, Default)]
pub struct InMemoryMenuStore {
    inner: Mutex<MenuStoreInner>,
}

impl InMemoryMenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(rule: FailureRule) -> Self {
        let store = Self::new();
        store.lock().failure = Some(rule);
        store
    }

    pub fn set_failure(&self, rule: Option<FailureRule>) {
        self.lock().failure = rule;
    }

    /// Number of `create_menu` calls received, including failed ones.
    pub fn call_count(&self) -> usize {
        self.lock().calls
    }

    /// Snapshot of the successfully committed requests, in order.
    pub fn created(&self) -> Vec<CreateMenuRequest> {
        self.lock().created.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MenuStoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MenuRepository for InMemoryMenuStore {
    fn create_menu(&self, request: CreateMenuRequest) -> ServiceResult<()> {
        let mut inner = self.lock();
        inner.calls += 1;
        let rejected = match &inner.failure {
            Some(FailureRule::OnCall(n)) => inner.calls == *n,
            Some(FailureRule::OnMenuName(name)) => request.menu_name == *name,
            None => false,
        };
        if rejected {
            return Err(ServiceError::Submission(format!(
                "menu `{}` rejected by store",
                request.menu_name
            )));
        }
        inner.created.push(request);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryCode, UnitCode};

    fn milk() -> NewIngredient {
        NewIngredient {
            name: "우유".into(),
            category_code: CategoryCode(10),
            unit_code: UnitCode(1),
            price: 800,
            amount: 1.0,
            supplier: None,
        }
    }

    #[test]
    fn ids_start_at_one() {
        let catalog = InMemoryCatalog::new();
        let entry = catalog.create_ingredient(milk()).unwrap();
        assert_eq!(entry.id, 1);
    }

    #[test]
    fn duplicate_check_is_case_and_whitespace_insensitive() {
        let catalog = InMemoryCatalog::with_entries(vec![NewIngredient {
            name: "Espresso Beans".into(),
            ..milk()
        }]);
        let err = catalog.check_duplicate(" espresso beans ").unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn search_ranks_substring_hits_first() {
        let catalog = InMemoryCatalog::with_entries(vec![
            NewIngredient {
                name: "Whole Milk".into(),
                ..milk()
            },
            NewIngredient {
                name: "Milo Powder".into(),
                ..milk()
            },
        ]);
        let hits = catalog.search_ingredients("milk");
        assert!(!hits.is_empty());
        assert_eq!(hits[0].name, "Whole Milk");
    }

    #[test]
    fn search_with_blank_query_is_empty() {
        let catalog = InMemoryCatalog::with_entries(vec![milk()]);
        assert!(catalog.search_ingredients("  ").is_empty());
    }
}
