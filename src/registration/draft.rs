use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{CategoryCode, MenuDraft, RegisteredMenu, SelectedIngredient};
use crate::errors::{ServiceError, ServiceResult};

/// Wizard progress for the active draft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DraftStage {
    #[default]
    Empty,
    Named,
    Detailed,
    IngredientsAdded,
}

impl DraftStage {
    fn label(self) -> &'static str {
        match self {
            DraftStage::Empty => "empty",
            DraftStage::Named => "named",
            DraftStage::Detailed => "detailed",
            DraftStage::IngredientsAdded => "ingredients-added",
        }
    }
}

/// Owns the single in-progress draft and the queue of finalized menus for
/// one registration session.
///
/// All mutation goes through the named transitions below, so out-of-order
/// wizard callbacks surface as [`ServiceError::InvalidTransition`] instead
/// of being silently tolerated.
#[derive(Debug)]
pub struct DraftSession {
    id: Uuid,
    draft: Option<MenuDraft>,
    stage: DraftStage,
    queue: Vec<RegisteredMenu>,
}

impl DraftSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            draft: None,
            stage: DraftStage::Empty,
            queue: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn stage(&self) -> DraftStage {
        self.stage
    }

    pub fn active_draft(&self) -> Option<&MenuDraft> {
        self.draft.as_ref()
    }

    pub fn queue(&self) -> &[RegisteredMenu] {
        &self.queue
    }

    /// Begins a new draft. Any in-flight draft is overwritten, never merged.
    pub fn start_new_menu(
        &mut self,
        name: impl Into<String>,
        is_template_applied: bool,
        template_price: Option<i64>,
        template_id: Option<i64>,
        category_code: Option<CategoryCode>,
    ) {
        let name = name.into();
        if self.draft.is_some() {
            tracing::warn!(session = %self.id, "overwriting in-flight draft");
        }
        let mut draft = MenuDraft::new(name);
        draft.is_template_applied = is_template_applied;
        draft.template_id = template_id;
        draft.category_code = category_code;
        if is_template_applied {
            if let Some(price) = template_price {
                draft.price = price;
            }
        }
        tracing::info!(session = %self.id, menu = %draft.name, "draft started");
        self.draft = Some(draft);
        self.stage = DraftStage::Named;
    }

    /// Records price, category, and preparation time.
    ///
    /// A call with no active draft is a silent no-op: step screens can fire
    /// stale callbacks after the draft was finalized or cancelled.
    pub fn update_detail(
        &mut self,
        price: i64,
        category: impl Into<String>,
        work_time_secs: u32,
    ) -> ServiceResult<()> {
        let Some(draft) = self.draft.as_mut() else {
            tracing::debug!(session = %self.id, "update_detail with no active draft; ignoring");
            return Ok(());
        };
        if self.stage != DraftStage::Named && self.stage != DraftStage::Detailed {
            return Err(self.transition_error("update_detail"));
        }
        draft.price = price;
        draft.category = category.into();
        draft.work_time_secs = work_time_secs;
        self.stage = DraftStage::Detailed;
        Ok(())
    }

    /// Replaces the draft's full ingredient list. The wizard ingredient step
    /// always submits its complete edited list, so this is not additive.
    pub fn add_ingredients(&mut self, ingredients: Vec<SelectedIngredient>) -> ServiceResult<()> {
        if self.stage != DraftStage::Detailed && self.stage != DraftStage::IngredientsAdded {
            return Err(self.transition_error("add_ingredients"));
        }
        let Some(draft) = self.draft.as_mut() else {
            return Err(self.transition_error("add_ingredients"));
        };
        let mut ingredients = ingredients;
        for line in &mut ingredients {
            line.normalize_supplier();
        }
        draft.ingredients = ingredients;
        self.stage = DraftStage::IngredientsAdded;
        Ok(())
    }

    /// Freezes the draft into a [`RegisteredMenu`], appends it to the queue,
    /// and resets the session so another menu can be drafted.
    pub fn finalize(&mut self) -> ServiceResult<RegisteredMenu> {
        if self.stage != DraftStage::IngredientsAdded {
            return Err(self.transition_error("finalize"));
        }
        let Some(draft) = self.draft.take() else {
            return Err(self.transition_error("finalize"));
        };
        let menu = draft.freeze();
        tracing::info!(
            session = %self.id,
            menu = %menu.name,
            queued = self.queue.len() + 1,
            "draft finalized"
        );
        self.queue.push(menu.clone());
        self.stage = DraftStage::Empty;
        Ok(menu)
    }

    /// Hands the finalized queue to the coordinator, leaving the session
    /// queue empty.
    pub fn take_queue(&mut self) -> Vec<RegisteredMenu> {
        std::mem::take(&mut self.queue)
    }

    /// Empties both the active draft and the queue. Idempotent.
    pub fn clear_all(&mut self) {
        self.draft = None;
        self.stage = DraftStage::Empty;
        self.queue.clear();
    }

    fn transition_error(&self, operation: &str) -> ServiceError {
        ServiceError::InvalidTransition(format!(
            "`{}` is not allowed while the draft is {}",
            operation,
            self.stage.label()
        ))
    }
}

impl Default for DraftSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{IngredientSource, UnitCode};

    fn line(id: i64, price: i64) -> SelectedIngredient {
        SelectedIngredient {
            id,
            name: format!("ingredient-{id}"),
            amount: 1.0,
            unit_code: UnitCode(1),
            price,
            category_code: CategoryCode(10),
            supplier: None,
            source: if id == 0 {
                IngredientSource::New
            } else {
                IngredientSource::Saved
            },
            base_quantity: 1.0,
            unit_price: price,
            template_recipe_id: None,
        }
    }

    #[test]
    fn full_wizard_pass_queues_one_menu() {
        let mut session = DraftSession::new();
        session.start_new_menu("Latte", false, None, None, Some(CategoryCode(2)));
        session.update_detail(5000, "Coffee", 180).unwrap();
        session.add_ingredients(vec![line(3, 800), line(0, 1200)]).unwrap();
        let menu = session.finalize().unwrap();
        assert_eq!(menu.name, "Latte");
        assert_eq!(menu.ingredients.len(), 2);
        assert_eq!(session.stage(), DraftStage::Empty);
        assert!(session.active_draft().is_none());
        assert_eq!(session.queue().len(), 1);
    }

    #[test]
    fn template_seeds_price() {
        let mut session = DraftSession::new();
        session.start_new_menu("Set Menu", true, Some(9000), Some(7), None);
        let draft = session.active_draft().unwrap();
        assert_eq!(draft.price, 9000);
        assert_eq!(draft.template_id, Some(7));
        assert!(draft.is_template_applied);
    }

    #[test]
    fn update_detail_without_draft_is_silent() {
        let mut session = DraftSession::new();
        assert!(session.update_detail(1000, "Tea", 60).is_ok());
        assert_eq!(session.stage(), DraftStage::Empty);
    }

    #[test]
    fn ingredients_before_detail_are_rejected() {
        let mut session = DraftSession::new();
        session.start_new_menu("Latte", false, None, None, None);
        let err = session.add_ingredients(vec![line(0, 500)]).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidTransition(_)));
    }

    #[test]
    fn finalize_requires_ingredients() {
        let mut session = DraftSession::new();
        session.start_new_menu("Latte", false, None, None, None);
        session.update_detail(5000, "Coffee", 180).unwrap();
        assert!(session.finalize().is_err());
    }

    #[test]
    fn starting_again_overwrites_the_draft() {
        let mut session = DraftSession::new();
        session.start_new_menu("First", false, None, None, None);
        session.update_detail(1000, "A", 60).unwrap();
        session.start_new_menu("Second", false, None, None, None);
        assert_eq!(session.active_draft().unwrap().name, "Second");
        assert_eq!(session.stage(), DraftStage::Named);
        assert_eq!(session.active_draft().unwrap().price, 0);
    }

    #[test]
    fn ingredient_list_is_replaced_not_appended() {
        let mut session = DraftSession::new();
        session.start_new_menu("Latte", false, None, None, None);
        session.update_detail(5000, "Coffee", 180).unwrap();
        session.add_ingredients(vec![line(1, 100), line(2, 200)]).unwrap();
        session.add_ingredients(vec![line(3, 300)]).unwrap();
        assert_eq!(session.active_draft().unwrap().ingredients.len(), 1);
    }

    #[test]
    fn clear_all_is_idempotent() {
        let mut session = DraftSession::new();
        session.start_new_menu("Latte", false, None, None, None);
        session.update_detail(5000, "Coffee", 180).unwrap();
        session.add_ingredients(vec![line(0, 500)]).unwrap();
        session.finalize().unwrap();

        session.clear_all();
        let after_once = (session.stage(), session.queue().len());
        session.clear_all();
        let after_twice = (session.stage(), session.queue().len());
        assert_eq!(after_once, (DraftStage::Empty, 0));
        assert_eq!(after_once, after_twice);
    }
}
