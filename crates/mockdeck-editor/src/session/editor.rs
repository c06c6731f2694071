//! The edit session state machine.

use super::actions::{EditAction, EditorProps};
use crate::collaborators::{MockStore, Navigator, View};
use crate::draft::Draft;
use crate::error::{EditorError, Result};
use crate::reconcile::{self, MutationCall, SavePolicy};
use tracing::{debug, info};

/// Editing state for one intercepted request.
///
/// The draft is rebuilt from scratch whenever the props change and dropped
/// once a save, delete or cancel completes. Edits against a closed session
/// fail with [`EditorError::SessionClosed`].
pub struct EditSession<S, N> {
    props: EditorProps,
    draft: Option<Draft>,
    policy: SavePolicy,
    store: S,
    navigator: N,
}

impl<S: MockStore, N: Navigator> EditSession<S, N> {
    pub fn new(props: EditorProps, policy: SavePolicy, store: S, navigator: N) -> Self {
        let draft = props.draft();
        Self {
            props,
            draft: Some(draft),
            policy,
            store,
            navigator,
        }
    }

    pub fn props(&self) -> &EditorProps {
        &self.props
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn policy(&self) -> SavePolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Replace the props and rebuild the draft. Pending edits are discarded.
    pub fn set_props(&mut self, props: EditorProps) {
        if self.draft.is_some() {
            debug!(request = %props.request.id, "Props changed, discarding pending edits");
        }
        self.draft = Some(props.draft());
        self.props = props;
    }

    /// Apply one user edit to the draft.
    pub fn apply(&mut self, action: EditAction) -> Result<()> {
        let draft = self.draft.as_mut().ok_or(EditorError::SessionClosed)?;
        debug!(?action, "Applying edit");
        action.apply_to(draft);
        Ok(())
    }

    /// Persist the draft and return to the scenario list.
    ///
    /// Returns the mutation that was handed to the store.
    pub fn save(&mut self) -> Result<MutationCall> {
        let draft = self.draft.as_ref().ok_or(EditorError::SessionClosed)?;
        let call = reconcile::save(
            draft,
            self.props.mock.as_ref(),
            &self.props.request,
            self.policy,
        )?;

        match &call {
            MutationCall::Create { scenario, .. } => {
                info!("Creating mock for {} in scenario {}", self.props.request.id, scenario)
            }
            MutationCall::Update {
                scenario, mock_id, ..
            } => info!("Updating mock {} in scenario {}", mock_id, scenario),
            MutationCall::Move {
                from, to, mock_id, ..
            } => info!("Moving mock {} from scenario {} to {}", mock_id, from, to),
        }

        call.clone().dispatch(&self.store);
        self.close();
        Ok(call)
    }

    /// Delete the existing mock from its original scenario and return to the
    /// scenario list.
    pub fn delete(&mut self) -> Result<()> {
        let draft = self.draft.as_ref().ok_or(EditorError::SessionClosed)?;
        let mock = self.props.mock.as_ref().ok_or(EditorError::NotMocked)?;
        let scenario = draft.original_scenario().ok_or(EditorError::NotMocked)?;

        info!("Deleting mock {} from scenario {}", mock.id, scenario);
        self.store.delete_mock(scenario, &mock.id);
        self.close();
        Ok(())
    }

    /// Discard the draft and return to the scenario list.
    pub fn cancel(&mut self) {
        debug!(request = %self.props.request.id, "Edit cancelled");
        self.close();
    }

    fn close(&mut self) {
        self.draft = None;
        self.navigator.navigate(View::Scenarios);
    }
}
