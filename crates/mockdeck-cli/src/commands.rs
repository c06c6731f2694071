//! Subcommand implementations.
//!
//! Each command runs a single edit session against the scenario file and
//! writes the file back after a mutation.

use crate::settings::Settings;
use crate::{DeleteArgs, EditArgs, TargetArgs};
use anyhow::{bail, Context};
use mockdeck_editor::{
    is_standard_response_header, EditAction, EditSession, EditorProps, Mock, MockId,
    MutationCall, Navigator, Request, SavePolicy, Scenario, ScenarioId, ScenarioStore, View,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Navigation has no screen to change in a one-shot CLI; it is only logged.
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, target: View) {
        debug!("Returning to {} view", target);
    }
}

/// The scenario file plus the settings that apply to it.
pub struct Workspace {
    store_path: PathBuf,
    store: ScenarioStore,
    policy: SavePolicy,
}

impl Workspace {
    pub fn open(
        store_path: &Path,
        settings: &Settings,
        policy: SavePolicy,
    ) -> anyhow::Result<Self> {
        let store = ScenarioStore::load_from_file(store_path).with_context(|| {
            format!("Failed to load scenarios from {}", store_path.display())
        })?;

        if store.is_empty() {
            if let Some(name) = &settings.default_scenario {
                info!("Scenario file is empty, creating scenario {}", name);
                store.add_scenario(Scenario::new(name.as_str()));
            }
        }

        Ok(Self {
            store_path: store_path.to_path_buf(),
            store,
            policy,
        })
    }

    /// Derived draft as pretty JSON.
    pub fn show(&self, target: &TargetArgs) -> anyhow::Result<String> {
        let props = self.props(target)?;
        Ok(serde_json::to_string_pretty(&props.draft())?)
    }

    /// Apply `args` to a fresh draft, save it and persist the store.
    pub fn edit(&self, args: &EditArgs) -> anyhow::Result<MutationCall> {
        let props = self.props(&args.target)?;
        let mut session = EditSession::new(props, self.policy, &self.store, LogNavigator);

        for action in self.actions(args)? {
            if let EditAction::SelectScenario(id) = &action {
                if self.store.scenario(id).is_none() {
                    bail!("Unknown scenario '{}'", id);
                }
            }
            session.apply(action)?;
        }

        for (name, value) in &args.headers {
            warn_if_nonstandard(name);
            let exists = session
                .draft()
                .is_some_and(|d| d.headers.contains_key(name));
            if !exists {
                session.apply(EditAction::AddHeader)?;
                session.apply(EditAction::ChangeHeaderKey {
                    old_key: String::new(),
                    new_key: name.clone(),
                })?;
            }
            session.apply(EditAction::ChangeHeaderValue {
                key: name.clone(),
                value: value.clone(),
            })?;
        }

        for name in &args.remove_headers {
            session.apply(EditAction::RemoveHeader(name.clone()))?;
        }

        // Last, so `--header` does not claim the blank row.
        if args.add_header {
            session.apply(EditAction::AddHeader)?;
        }

        let call = session.save()?;
        self.persist()?;
        Ok(call)
    }

    /// Delete an existing mock and persist the store.
    pub fn delete(&self, args: &DeleteArgs) -> anyhow::Result<()> {
        let target = TargetArgs {
            request: args.request.clone(),
            mock: Some(args.mock.clone()),
        };
        let props = self.props(&target)?;
        let mut session = EditSession::new(props, self.policy, &self.store, LogNavigator);
        session.delete()?;
        self.persist()
    }

    /// Edits that do not depend on the evolving header set, in option order.
    fn actions(&self, args: &EditArgs) -> anyhow::Result<Vec<EditAction>> {
        let mut actions = Vec::new();

        if let Some(scenario) = &args.scenario {
            actions.push(EditAction::SelectScenario(ScenarioId::new(scenario.as_str())));
        }
        if let Some(url) = &args.url {
            actions.push(EditAction::SetUrl(url.clone()));
        }
        if let Some(status) = args.status {
            actions.push(EditAction::SetStatus(status));
        }
        if let Some(delay) = args.delay {
            actions.push(EditAction::SetDelay(delay));
        }
        if let Some(body) = &args.body {
            actions.push(EditAction::SetResponseBody(body.clone()));
        }
        if let Some(path) = &args.body_file {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read body file {}", path.display()))?;
            actions.push(EditAction::SetResponseBody(body));
        }
        if let Some(preset) = args.preset {
            actions.push(EditAction::ApplyPreset(preset));
        }
        for (old_key, new_key) in &args.rename_headers {
            warn_if_nonstandard(new_key);
            actions.push(EditAction::ChangeHeaderKey {
                old_key: old_key.clone(),
                new_key: new_key.clone(),
            });
        }

        Ok(actions)
    }

    fn props(&self, target: &TargetArgs) -> anyhow::Result<EditorProps> {
        let request = load_request(&target.request)?;
        let mock = match &target.mock {
            Some(id) => Some(self.find_mock(id)?),
            None => None,
        };
        Ok(EditorProps::new(request, mock, self.store.scenarios()))
    }

    fn find_mock(&self, id: &str) -> anyhow::Result<Mock> {
        self.store
            .find_mock(&MockId::new(id))
            .with_context(|| format!("Mock '{}' not found in {}", id, self.store_path.display()))
    }

    fn persist(&self) -> anyhow::Result<()> {
        self.store
            .save_to_file(&self.store_path)
            .with_context(|| format!("Failed to write {}", self.store_path.display()))
    }
}

fn load_request(path: &Path) -> anyhow::Result<Request> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid request JSON in {}", path.display()))
}

fn warn_if_nonstandard(name: &str) {
    if !name.is_empty()
        && !name.to_ascii_lowercase().starts_with("x-")
        && !is_standard_response_header(name)
    {
        warn!("'{}' is not a standard response header", name);
    }
}

/// One-line summary of a dispatched mutation.
pub fn describe(call: &MutationCall) -> String {
    match call {
        MutationCall::Create { scenario, mock } => format!(
            "Created mock for {} {} in scenario {}",
            mock.method, mock.url, scenario
        ),
        MutationCall::Update {
            scenario, mock_id, ..
        } => format!("Updated mock {} in scenario {}", mock_id, scenario),
        MutationCall::Move {
            from, to, mock_id, ..
        } => format!("Moved mock {} from scenario {} to {}", mock_id, from, to),
    }
}
