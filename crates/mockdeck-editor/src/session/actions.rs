//! Inputs to an edit session.

use crate::draft::Draft;
use crate::headers::HeaderPreset;
use crate::model::{Mock, Request, Scenario, ScenarioId};

/// Inputs an edit session derives its draft from. Refreshed by the caller
/// whenever upstream state changes.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorProps {
    pub request: Request,
    pub mock: Option<Mock>,
    pub scenarios: Vec<Scenario>,
}

impl EditorProps {
    pub fn new(request: Request, mock: Option<Mock>, scenarios: Vec<Scenario>) -> Self {
        Self {
            request,
            mock,
            scenarios,
        }
    }

    /// Fresh draft for these props.
    pub fn draft(&self) -> Draft {
        Draft::init(self.mock.as_ref(), &self.request, &self.scenarios)
    }
}

/// A single user edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    SelectScenario(ScenarioId),
    SetUrl(String),
    SetStatus(u16),
    SetDelay(u64),
    SetResponseBody(String),
    AddHeader,
    RemoveHeader(String),
    ChangeHeaderKey { old_key: String, new_key: String },
    ChangeHeaderValue { key: String, value: String },
    ApplyPreset(HeaderPreset),
}

impl EditAction {
    /// Apply this edit to `draft`.
    pub fn apply_to(self, draft: &mut Draft) {
        match self {
            EditAction::SelectScenario(id) => draft.select_scenario(id),
            EditAction::SetUrl(url) => draft.set_url(url),
            EditAction::SetStatus(status) => draft.set_status(status),
            EditAction::SetDelay(delay) => draft.set_delay(delay),
            EditAction::SetResponseBody(body) => draft.set_response_body(body),
            EditAction::AddHeader => draft.add_header(),
            EditAction::RemoveHeader(key) => draft.remove_header(&key),
            EditAction::ChangeHeaderKey { old_key, new_key } => {
                draft.change_header_key(&old_key, &new_key)
            }
            EditAction::ChangeHeaderValue { key, value } => {
                draft.change_header_value(&key, &value)
            }
            EditAction::ApplyPreset(kind) => draft.apply_preset(kind),
        }
    }
}
