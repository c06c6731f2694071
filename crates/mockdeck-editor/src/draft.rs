//! Editable draft derived from a request and its optional mock.

use crate::headers::{HeaderMap, HeaderPreset};
use crate::model::{Mock, Request, Scenario, ScenarioId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Editable state for one mock-editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub selected_scenario: Option<ScenarioId>,
    original_scenario: Option<ScenarioId>,
    #[serde(default)]
    owns_mock: bool,
    pub url: String,
    pub headers: HeaderMap,
    pub status: u16,
    /// Delay in milliseconds.
    pub delay: u64,
    pub response_body: String,
}

impl Draft {
    /// Derive a fresh draft from the current inputs.
    ///
    /// Each field comes from `mock` when the mock carries it and from
    /// `request` otherwise. The draft starts in the scenario that owns
    /// `mock`, or in the first scenario when there is no owner.
    pub fn init(mock: Option<&Mock>, request: &Request, scenarios: &[Scenario]) -> Self {
        let owner = resolve_scenario(mock, scenarios);
        let owns_mock = owner.is_some();
        let scenario = owner.or_else(|| scenarios.first().map(|s| s.id.clone()));

        let url = mock
            .and_then(|m| m.url.clone())
            .unwrap_or_else(|| request.url.clone());
        let headers = mock
            .and_then(|m| m.headers.clone())
            .unwrap_or_else(|| request.response.headers.clone());
        let status = mock
            .and_then(|m| m.response.status)
            .unwrap_or(request.response.status);
        let delay = mock
            .and_then(|m| m.response.delay)
            .unwrap_or(request.response.delay);
        let response_body = mock
            .and_then(|m| m.response.body.clone())
            .unwrap_or_else(|| request.response.body.clone());

        debug!(
            request = %request.id,
            mock = ?mock.map(|m| &m.id),
            scenario = ?scenario,
            "Initialized draft"
        );

        Self {
            selected_scenario: scenario.clone(),
            original_scenario: scenario,
            owns_mock,
            url,
            headers,
            status,
            delay,
            response_body,
        }
    }

    /// Scenario the mock lived in when the draft was created.
    pub fn original_scenario(&self) -> Option<&ScenarioId> {
        self.original_scenario.as_ref()
    }

    /// Whether the original scenario actually holds the mock, as opposed to
    /// being the first-scenario default.
    pub fn original_owns_mock(&self) -> bool {
        self.owns_mock
    }

    /// Whether the user picked a scenario other than the original one.
    pub fn scenario_changed(&self) -> bool {
        self.selected_scenario != self.original_scenario
    }

    pub fn select_scenario(&mut self, scenario: ScenarioId) {
        self.selected_scenario = Some(scenario);
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn set_delay(&mut self, delay: u64) {
        self.delay = delay;
    }

    pub fn set_response_body(&mut self, body: impl Into<String>) {
        self.response_body = body.into();
    }

    pub fn add_header(&mut self) {
        self.headers = self.headers.add_header();
    }

    pub fn remove_header(&mut self, key: &str) {
        self.headers = self.headers.remove_header(key);
    }

    pub fn change_header_key(&mut self, old_key: &str, new_key: &str) {
        self.headers = self.headers.change_key(old_key, new_key);
    }

    pub fn change_header_value(&mut self, key: &str, value: &str) {
        self.headers = self.headers.change_value(key, value);
    }

    pub fn apply_preset(&mut self, kind: HeaderPreset) {
        self.headers = self.headers.apply_preset(kind);
    }
}

/// Find the scenario that owns `mock`, matching on mock identity.
pub fn resolve_scenario(mock: Option<&Mock>, scenarios: &[Scenario]) -> Option<ScenarioId> {
    let mock = mock?;
    scenarios
        .iter()
        .find(|s| s.contains(&mock.id))
        .map(|s| s.id.clone())
}
