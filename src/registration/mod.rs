//! Menu registration flow: wizard draft state machine, ingredient
//! resolution, and batch submission.

pub mod coordinator;
pub mod draft;
pub mod ledger;

pub use coordinator::{BatchCoordinator, CancelToken, SubmitError};
pub use draft::{DraftSession, DraftStage};
pub use ledger::{IngredientLedger, IngredientPick};
