//! Scenario state machine
//!
//! A scenario moves `Pending -> Running -> {Passed, Failed}`. Transitions
//! are driven solely by the settlement of the current step's future; the two
//! terminal states admit no further transitions and there are no retries.

/// Lifecycle state of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioState {
    Pending,
    Running,
    Passed,
    Failed,
}

impl ScenarioState {
    /// Whether the scenario has settled
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScenarioState::Passed | ScenarioState::Failed)
    }

    /// Whether `next` is a legal successor of `self`
    pub fn can_transition_to(&self, next: ScenarioState) -> bool {
        matches!(
            (self, next),
            (ScenarioState::Pending, ScenarioState::Running)
                | (ScenarioState::Running, ScenarioState::Passed)
                | (ScenarioState::Running, ScenarioState::Failed)
        )
    }
}
