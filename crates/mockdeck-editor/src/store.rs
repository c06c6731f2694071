//! In-memory scenario store with JSON file persistence.

use crate::collaborators::MockStore;
use crate::error::Result;
use crate::model::{Mock, MockId, MockPatch, NewMock, Scenario, ScenarioId};
use parking_lot::RwLock;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Ordered list of scenarios, shared behind a lock.
///
/// Mutations addressed to an unknown scenario or mock are logged and
/// ignored; callers never observe their outcome.
#[derive(Debug, Default)]
pub struct ScenarioStore {
    scenarios: RwLock<Vec<Scenario>>,
}

impl ScenarioStore {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self {
            scenarios: RwLock::new(scenarios),
        }
    }

    /// Snapshot of every scenario.
    pub fn scenarios(&self) -> Vec<Scenario> {
        self.scenarios.read().clone()
    }

    pub fn scenario(&self, id: &ScenarioId) -> Option<Scenario> {
        self.scenarios.read().iter().find(|s| &s.id == id).cloned()
    }

    /// Find a mock by id in any scenario.
    pub fn find_mock(&self, mock_id: &MockId) -> Option<Mock> {
        self.scenarios
            .read()
            .iter()
            .find_map(|s| s.find(mock_id).cloned())
    }

    /// Add an empty scenario unless one with the same id exists.
    pub fn add_scenario(&self, scenario: Scenario) {
        let mut scenarios = self.scenarios.write();
        if scenarios.iter().any(|s| s.id == scenario.id) {
            debug!("Scenario {} already exists", scenario.id);
            return;
        }
        scenarios.push(scenario);
    }

    pub fn len(&self) -> usize {
        self.scenarios.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.read().is_empty()
    }

    /// Save scenarios to file (pretty JSON)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let scenarios = self.scenarios.read();
        let json = serde_json::to_string_pretty(&*scenarios)?;
        fs::write(path, json)?;
        info!("Saved {} scenarios to {:?}", scenarios.len(), path);
        Ok(())
    }

    /// Load scenarios from file, replacing the current contents. A missing
    /// file yields an empty store.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Scenario file {:?} does not exist, starting fresh", path);
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)?;
        let scenarios: Vec<Scenario> = serde_json::from_str(&json)?;
        info!("Loaded {} scenarios from {:?}", scenarios.len(), path);
        Ok(Self::new(scenarios))
    }
}

impl MockStore for ScenarioStore {
    fn create_mock(&self, scenario: &ScenarioId, mock: NewMock) {
        let mut scenarios = self.scenarios.write();
        let Some(target) = scenarios.iter_mut().find(|s| &s.id == scenario) else {
            warn!("Cannot create mock: scenario {} not found", scenario);
            return;
        };

        let id = MockId::new(uuid::Uuid::new_v4().to_string());
        info!("Created mock {} in scenario {}", id, scenario);
        target.mocked_requests.push(Mock::from_new(id, mock));
    }

    fn update_mock(&self, scenario: &ScenarioId, mock_id: &MockId, patch: MockPatch) {
        let mut scenarios = self.scenarios.write();
        let mock = scenarios
            .iter_mut()
            .find(|s| &s.id == scenario)
            .and_then(|s| s.mocked_requests.iter_mut().find(|m| &m.id == mock_id));

        match mock {
            Some(mock) => {
                mock.apply_patch(patch);
                info!("Updated mock {} in scenario {}", mock_id, scenario);
            }
            None => warn!(
                "Cannot update mock: {} not found in scenario {}",
                mock_id, scenario
            ),
        }
    }

    fn delete_mock(&self, scenario: &ScenarioId, mock_id: &MockId) {
        let mut scenarios = self.scenarios.write();
        let Some(target) = scenarios.iter_mut().find(|s| &s.id == scenario) else {
            warn!("Cannot delete mock: scenario {} not found", scenario);
            return;
        };

        let before = target.mocked_requests.len();
        target.mocked_requests.retain(|m| &m.id != mock_id);
        if target.mocked_requests.len() == before {
            warn!(
                "Cannot delete mock: {} not found in scenario {}",
                mock_id, scenario
            );
        } else {
            info!("Deleted mock {} from scenario {}", mock_id, scenario);
        }
    }

    fn move_mock(&self, from: &ScenarioId, to: &ScenarioId, mock_id: &MockId, patch: MockPatch) {
        let mut scenarios = self.scenarios.write();
        if !scenarios.iter().any(|s| &s.id == to) {
            warn!("Cannot move mock {}: scenario {} not found", mock_id, to);
            return;
        }

        let Some(source) = scenarios.iter_mut().find(|s| &s.id == from) else {
            warn!("Cannot move mock {}: scenario {} not found", mock_id, from);
            return;
        };
        let Some(index) = source.mocked_requests.iter().position(|m| &m.id == mock_id) else {
            warn!(
                "Cannot move mock: {} not found in scenario {}",
                mock_id, from
            );
            return;
        };

        let mut mock = source.mocked_requests.remove(index);
        mock.apply_patch(patch);

        if let Some(target) = scenarios.iter_mut().find(|s| &s.id == to) {
            target.mocked_requests.push(mock);
        }
        info!("Moved mock {} from scenario {} to {}", mock_id, from, to);
    }
}
