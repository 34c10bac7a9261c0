use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionPhase {
    /// No question has been presented yet.
    #[default]
    Idle,
    /// Accepting assignments and timer ticks.
    Active,
    /// Verdict produced; terminal for this question instance.
    Submitted,
}

/// Mutable state of the question currently on screen.
///
/// Mutated only through [`crate::engine::QuestionEngine`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    pub(crate) slots: Vec<Option<String>>,
    pub(crate) pool: Vec<String>,
    pub(crate) time_remaining: u32,
    pub(crate) time_limit: u32,
    pub(crate) phase: InteractionPhase,
}

impl InteractionState {
    #[must_use]
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// Words not yet placed, in display order.
    #[must_use]
    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    #[must_use]
    pub fn phase(&self) -> InteractionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == InteractionPhase::Active
    }

    #[must_use]
    pub fn all_filled(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
