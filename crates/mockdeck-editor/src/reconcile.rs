//! Save reconciliation: turns a draft into exactly one mutation call.

use crate::collaborators::MockStore;
use crate::draft::Draft;
use crate::error::{EditorError, Result};
use crate::model::{Mock, MockId, MockPatch, NewMock, Request, ResponsePatch, ScenarioId};
use serde::{Deserialize, Serialize};

/// How a save treats an existing mock whose scenario was changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SavePolicy {
    /// Create a new mock in the selected scenario. The original mock stays
    /// where it was.
    #[default]
    Recreate,
    /// Move the original mock into the selected scenario.
    Move,
}

/// A mutation for the mock store.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationCall {
    Create {
        scenario: ScenarioId,
        mock: NewMock,
    },
    Update {
        scenario: ScenarioId,
        mock_id: MockId,
        patch: MockPatch,
    },
    Move {
        from: ScenarioId,
        to: ScenarioId,
        mock_id: MockId,
        patch: MockPatch,
    },
}

impl MutationCall {
    /// Scenario the mock ends up in.
    pub fn target_scenario(&self) -> &ScenarioId {
        match self {
            MutationCall::Create { scenario, .. } | MutationCall::Update { scenario, .. } => {
                scenario
            }
            MutationCall::Move { to, .. } => to,
        }
    }

    /// Hand the call to `store`.
    pub fn dispatch<S: MockStore + ?Sized>(self, store: &S) {
        match self {
            MutationCall::Create { scenario, mock } => store.create_mock(&scenario, mock),
            MutationCall::Update {
                scenario,
                mock_id,
                patch,
            } => store.update_mock(&scenario, &mock_id, patch),
            MutationCall::Move {
                from,
                to,
                mock_id,
                patch,
            } => store.move_mock(&from, &to, &mock_id, patch),
        }
    }
}

/// Decide which mutation a save of `draft` performs.
///
/// An existing mock that stays in its scenario is updated in place.
/// Everything else creates a new mock in the selected scenario, unless
/// `policy` is [`SavePolicy::Move`] and an existing mock changed away from
/// the scenario that holds it.
pub fn save(
    draft: &Draft,
    mock: Option<&Mock>,
    request: &Request,
    policy: SavePolicy,
) -> Result<MutationCall> {
    let selected = draft
        .selected_scenario
        .clone()
        .ok_or(EditorError::NoScenarioSelected)?;

    let response = ResponsePatch {
        status: draft.status,
        delay: draft.delay,
        body: draft.response_body.clone(),
    };

    if let (Some(mock), Some(original)) = (mock, draft.original_scenario()) {
        let patch = MockPatch {
            url: draft.url.clone(),
            headers: draft.headers.clone(),
            response: response.clone(),
        };

        if !draft.scenario_changed() {
            return Ok(MutationCall::Update {
                scenario: original.clone(),
                mock_id: mock.id.clone(),
                patch,
            });
        }

        // A mock no scenario holds has nothing to move from.
        if policy == SavePolicy::Move && draft.original_owns_mock() {
            return Ok(MutationCall::Move {
                from: original.clone(),
                to: selected,
                mock_id: mock.id.clone(),
                patch,
            });
        }
    }

    Ok(MutationCall::Create {
        scenario: selected,
        mock: NewMock {
            request_id: request.id.clone(),
            active: true,
            url: draft.url.clone(),
            method: request.method.clone(),
            headers: draft.headers.clone(),
            params: request.params.clone(),
            response,
        },
    })
}
