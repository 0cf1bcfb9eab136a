use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::RegisteredMenu;
use crate::errors::{ServiceError, ServiceResult};
use crate::repository::{CreateMenuRequest, ExistingRecipeRef, MenuRepository, NewRecipeRequest};

/// Cooperative cancellation flag checked between queued submissions.
///
/// Cancelling never rolls back menus that were already committed; it only
/// prevents further `create_menu` calls.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Failure of one queued submission, with enough context for "menu #2 of 3
/// failed" style reporting.
#[derive(Debug, Error)]
#[error("menu #{number} of {total} (`{menu_name}`) failed: {source}")]
pub struct SubmitError {
    /// 1-based position in the submission queue.
    pub number: usize,
    pub total: usize,
    pub menu_name: String,
    #[source]
    pub source: ServiceError,
}

/// Submits a finalized queue to the menu store, one menu at a time, in
/// insertion order, stopping at the first failure.
pub struct BatchCoordinator;

impl BatchCoordinator {
    /// Submits every queued menu. Returns `Ok(())` only when all menus were
    /// accepted; on failure, menus submitted earlier stay committed (there
    /// is no compensating transaction).
    pub fn submit_all(
        repo: &dyn MenuRepository,
        queue: Vec<RegisteredMenu>,
        cancel: &CancelToken,
    ) -> Result<(), SubmitError> {
        let total = queue.len();
        for (index, menu) in queue.into_iter().enumerate() {
            let number = index + 1;
            if cancel.is_cancelled() {
                tracing::warn!(number, total, "batch submission cancelled");
                return Err(SubmitError {
                    number,
                    total,
                    menu_name: menu.name,
                    source: ServiceError::Cancelled,
                });
            }
            tracing::info!(number, total, menu = %menu.name, "submitting menu");
            if let Err(source) = Self::submit_one(repo, &menu) {
                tracing::warn!(number, total, menu = %menu.name, %source, "submission failed");
                return Err(SubmitError {
                    number,
                    total,
                    menu_name: menu.name,
                    source,
                });
            }
        }
        tracing::info!(total, "batch submission complete");
        Ok(())
    }

    fn submit_one(repo: &dyn MenuRepository, menu: &RegisteredMenu) -> ServiceResult<()> {
        let (recipes, new_recipes) = Self::partition(menu);
        repo.create_menu(CreateMenuRequest {
            category_code: menu.category_code,
            menu_name: menu.name.clone(),
            selling_price: menu.price,
            work_time_secs: menu.work_time_secs,
            recipes: if recipes.is_empty() {
                None
            } else {
                Some(recipes)
            },
            new_recipes: if new_recipes.is_empty() {
                None
            } else {
                Some(new_recipes)
            },
        })
    }

    /// Splits a menu's line items into catalog references (`id > 0`) and
    /// creation requests (`id == 0`). Every line lands in exactly one of
    /// the two partitions.
    pub fn partition(menu: &RegisteredMenu) -> (Vec<ExistingRecipeRef>, Vec<NewRecipeRequest>) {
        let mut existing = Vec::new();
        let mut created = Vec::new();
        for line in &menu.ingredients {
            if line.is_new() {
                let mut line = line.clone();
                line.normalize_supplier();
                created.push(NewRecipeRequest {
                    name: line.name,
                    category_code: line.category_code,
                    unit_code: line.unit_code,
                    price: line.price,
                    amount: line.amount,
                    supplier: line.supplier,
                });
            } else {
                existing.push(ExistingRecipeRef {
                    id: line.id,
                    amount: line.amount,
                    unit_code: line.unit_code,
                    price: line.price,
                });
            }
        }
        (existing, created)
    }
}
