//! Contracts for the collaborators the editor hands work to.
//!
//! All calls are fire-and-forget: the editor never waits on, retries or
//! observes their outcome, so none of them return a result.

use crate::model::{MockId, MockPatch, NewMock, ScenarioId};
use std::fmt;

/// Destination of a view transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The scenario list, where every terminal editor action lands.
    Scenarios,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Scenarios => "scenarios",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requests view transitions.
pub trait Navigator {
    fn navigate(&self, target: View);
}

/// Stores and serves mocks grouped by scenario.
pub trait MockStore {
    /// Register a new mock under `scenario`.
    fn create_mock(&self, scenario: &ScenarioId, mock: NewMock);

    /// Patch an existing mock in place.
    fn update_mock(&self, scenario: &ScenarioId, mock_id: &MockId, patch: MockPatch);

    /// Remove a mock from a scenario.
    fn delete_mock(&self, scenario: &ScenarioId, mock_id: &MockId);

    /// Move a mock between scenarios, applying `patch` on the way.
    fn move_mock(&self, from: &ScenarioId, to: &ScenarioId, mock_id: &MockId, patch: MockPatch);
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn navigate(&self, target: View) {
        (**self).navigate(target)
    }
}

impl<T: MockStore + ?Sized> MockStore for &T {
    fn create_mock(&self, scenario: &ScenarioId, mock: NewMock) {
        (**self).create_mock(scenario, mock)
    }

    fn update_mock(&self, scenario: &ScenarioId, mock_id: &MockId, patch: MockPatch) {
        (**self).update_mock(scenario, mock_id, patch)
    }

    fn delete_mock(&self, scenario: &ScenarioId, mock_id: &MockId) {
        (**self).delete_mock(scenario, mock_id)
    }

    fn move_mock(&self, from: &ScenarioId, to: &ScenarioId, mock_id: &MockId, patch: MockPatch) {
        (**self).move_mock(from, to, mock_id, patch)
    }
}
