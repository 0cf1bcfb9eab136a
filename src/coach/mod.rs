//! Weekly-strategy lifecycle for the AI coach.
//!
//! Strategies move `NotStarted → InProgress → Completed`; `Completed` is
//! terminal. Transitions require the caller's type tag to match the stored
//! strategy, mirroring the server-side contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ServiceError, ServiceResult};

/// Strategy type tag; the wire format uses upper snake case strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyKind {
    Danger,
    HighMargin,
    Caution,
}

impl StrategyKind {
    pub fn as_tag(self) -> &'static str {
        match self {
            StrategyKind::Danger => "DANGER",
            StrategyKind::HighMargin => "HIGH_MARGIN",
            StrategyKind::Caution => "CAUTION",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StrategyStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// One coached strategy for the week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyStrategy {
    pub id: Uuid,
    pub kind: StrategyKind,
    pub title: String,
    /// Phrase shown to the user when the strategy completes.
    pub completion_phrase: String,
    pub status: StrategyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeeklyStrategy {
    pub fn new(
        kind: StrategyKind,
        title: impl Into<String>,
        completion_phrase: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            completion_phrase: completion_phrase.into(),
            status: StrategyStatus::NotStarted,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// In-memory collection of the week's strategies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyBook {
    #[serde(default)]
    pub strategies: Vec<WeeklyStrategy>,
}

impl StrategyBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, strategy: WeeklyStrategy) -> Uuid {
        let id = strategy.id;
        self.strategies.push(strategy);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&WeeklyStrategy> {
        self.strategies.iter().find(|strategy| strategy.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut WeeklyStrategy> {
        self.strategies.iter_mut().find(|strategy| strategy.id == id)
    }
}

pub struct StrategyService;

impl StrategyService {
    /// `NotStarted → InProgress`. The kind tag must match the stored
    /// strategy.
    pub fn start(book: &mut StrategyBook, id: Uuid, kind: StrategyKind) -> ServiceResult<()> {
        let strategy = Self::require(book, id, kind)?;
        match strategy.status {
            StrategyStatus::NotStarted => {
                strategy.status = StrategyStatus::InProgress;
                strategy.touch();
                tracing::info!(%id, kind = kind.as_tag(), "strategy started");
                Ok(())
            }
            StrategyStatus::InProgress => Err(ServiceError::InvalidTransition(
                "strategy is already in progress".into(),
            )),
            StrategyStatus::Completed => Err(ServiceError::InvalidTransition(
                "strategy is already completed".into(),
            )),
        }
    }

    /// `InProgress → Completed`; returns the completion phrase.
    pub fn complete(
        book: &mut StrategyBook,
        id: Uuid,
        kind: StrategyKind,
    ) -> ServiceResult<String> {
        let strategy = Self::require(book, id, kind)?;
        match strategy.status {
            StrategyStatus::InProgress => {
                strategy.status = StrategyStatus::Completed;
                strategy.touch();
                tracing::info!(%id, kind = kind.as_tag(), "strategy completed");
                Ok(strategy.completion_phrase.clone())
            }
            StrategyStatus::NotStarted => Err(ServiceError::InvalidTransition(
                "strategy has not been started".into(),
            )),
            StrategyStatus::Completed => Err(ServiceError::InvalidTransition(
                "strategy is already completed".into(),
            )),
        }
    }

    fn require(
        book: &mut StrategyBook,
        id: Uuid,
        kind: StrategyKind,
    ) -> ServiceResult<&mut WeeklyStrategy> {
        let strategy = book
            .get_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("strategy {id}")))?;
        if strategy.kind != kind {
            return Err(ServiceError::TypeMismatch {
                expected: strategy.kind.as_tag().to_string(),
                requested: kind.as_tag().to_string(),
            });
        }
        Ok(strategy)
    }
}
