//! Tests for edit sessions.
//!
//! Covers:
//! - Draft derivation and reinitialization on prop changes
//! - Save routing (update, create, move) and the mutation handed to the store
//! - Delete and cancel flows, including navigation
//! - Closed-session behavior

use super::*;
use crate::collaborators::{MockStore, Navigator, View};
use crate::error::EditorError;
use crate::headers::{HeaderMap, HeaderPreset};
use crate::model::{
    Mock, MockId, MockPatch, MockResponse, NewMock, ObservedResponse, Request, RequestId,
    Scenario, ScenarioId,
};
use crate::reconcile::{MutationCall, SavePolicy};
use crate::store::ScenarioStore;
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(ScenarioId, NewMock),
    Update(ScenarioId, MockId, MockPatch),
    Delete(ScenarioId, MockId),
    Move(ScenarioId, ScenarioId, MockId, MockPatch),
}

#[derive(Default)]
struct CallLog {
    calls: RefCell<Vec<Call>>,
    views: RefCell<Vec<View>>,
}

impl CallLog {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn views(&self) -> Vec<View> {
        self.views.borrow().clone()
    }
}

impl MockStore for CallLog {
    fn create_mock(&self, scenario: &ScenarioId, mock: NewMock) {
        self.calls
            .borrow_mut()
            .push(Call::Create(scenario.clone(), mock));
    }

    fn update_mock(&self, scenario: &ScenarioId, mock_id: &MockId, patch: MockPatch) {
        self.calls
            .borrow_mut()
            .push(Call::Update(scenario.clone(), mock_id.clone(), patch));
    }

    fn delete_mock(&self, scenario: &ScenarioId, mock_id: &MockId) {
        self.calls
            .borrow_mut()
            .push(Call::Delete(scenario.clone(), mock_id.clone()));
    }

    fn move_mock(&self, from: &ScenarioId, to: &ScenarioId, mock_id: &MockId, patch: MockPatch) {
        self.calls.borrow_mut().push(Call::Move(
            from.clone(),
            to.clone(),
            mock_id.clone(),
            patch,
        ));
    }
}

impl Navigator for CallLog {
    fn navigate(&self, target: View) {
        self.views.borrow_mut().push(target);
    }
}

fn request() -> Request {
    Request {
        id: RequestId::from("r1"),
        url: "/a".to_string(),
        method: "GET".to_string(),
        params: serde_json::json!({"q": "x"}),
        headers: HeaderMap::new(),
        response: ObservedResponse {
            status: 200,
            delay: 0,
            headers: HeaderMap::from_pairs([("content-type", "text/html")]),
            body: "{}".to_string(),
        },
    }
}

fn mock() -> Mock {
    Mock {
        id: MockId::from("m1"),
        request_id: Some(RequestId::from("r1")),
        active: true,
        url: Some("/a".to_string()),
        method: Some("GET".to_string()),
        headers: Some(HeaderMap::from_pairs([("x-mocked", "1")])),
        params: serde_json::Value::Null,
        response: MockResponse {
            status: Some(500),
            delay: Some(100),
            body: Some("boom".to_string()),
        },
    }
}

fn mocked_props() -> EditorProps {
    let mut sa = Scenario::new("sA");
    sa.mocked_requests.push(mock());
    EditorProps::new(request(), Some(mock()), vec![sa, Scenario::new("sB")])
}

fn session<'a>(props: EditorProps, log: &'a CallLog) -> EditSession<&'a CallLog, &'a CallLog> {
    EditSession::new(props, SavePolicy::Recreate, log, log)
}

#[test]
fn test_end_to_end_new_mock() {
    let log = CallLog::default();
    let props = EditorProps::new(request(), None, vec![Scenario::new("s1")]);
    let mut session = session(props, &log);

    let draft = session.draft().unwrap();
    assert_eq!(draft.selected_scenario, Some(ScenarioId::from("s1")));
    assert_eq!(draft.original_scenario(), Some(&ScenarioId::from("s1")));
    assert_eq!(draft.url, "/a");
    assert_eq!(draft.status, 200);
    assert_eq!(draft.delay, 0);
    assert_eq!(draft.response_body, "{}");

    let call = session.save().unwrap();
    assert_eq!(call.target_scenario(), &ScenarioId::from("s1"));

    let calls = log.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::Create(scenario, mock) => {
            assert_eq!(scenario, &ScenarioId::from("s1"));
            assert_eq!(mock.request_id, RequestId::from("r1"));
            assert!(mock.active);
            assert_eq!(mock.method, "GET");
            assert_eq!(mock.params, serde_json::json!({"q": "x"}));
            assert_eq!(mock.headers.get("content-type"), Some("text/html"));
        }
        other => panic!("expected create, got {other:?}"),
    }
    assert_eq!(log.views(), vec![View::Scenarios]);
    assert!(!session.is_open());
}

#[test]
fn test_save_in_same_scenario_updates() {
    let log = CallLog::default();
    let mut session = session(mocked_props(), &log);

    session.apply(EditAction::SetStatus(503)).unwrap();
    session.apply(EditAction::SetDelay(2_000)).unwrap();
    session
        .apply(EditAction::SetResponseBody("later".to_string()))
        .unwrap();
    session.apply(EditAction::SetUrl("/b".to_string())).unwrap();
    session.save().unwrap();

    assert_eq!(
        log.calls(),
        vec![Call::Update(
            ScenarioId::from("sA"),
            MockId::from("m1"),
            MockPatch {
                url: "/b".to_string(),
                headers: HeaderMap::from_pairs([("x-mocked", "1")]),
                response: crate::model::ResponsePatch {
                    status: 503,
                    delay: 2_000,
                    body: "later".to_string(),
                },
            }
        )]
    );
}

#[test]
fn test_save_in_other_scenario_creates_and_leaves_original() {
    let log = CallLog::default();
    let mut session = session(mocked_props(), &log);

    session
        .apply(EditAction::SelectScenario(ScenarioId::from("sB")))
        .unwrap();
    session.save().unwrap();

    let calls = log.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], Call::Create(s, _) if s == &ScenarioId::from("sB")));
}

#[test]
fn test_save_in_other_scenario_with_move_policy() {
    let log = CallLog::default();
    let mut session = EditSession::new(mocked_props(), SavePolicy::Move, &log, &log);

    session
        .apply(EditAction::SelectScenario(ScenarioId::from("sB")))
        .unwrap();
    session.save().unwrap();

    let calls = log.calls();
    assert!(matches!(
        &calls[..],
        [Call::Move(from, to, id, _)]
            if from == &ScenarioId::from("sA")
                && to == &ScenarioId::from("sB")
                && id == &MockId::from("m1")
    ));
}

#[test]
fn test_move_policy_creates_when_no_scenario_holds_the_mock() {
    let store = ScenarioStore::new(vec![Scenario::new("sA"), Scenario::new("sB")]);
    let log = CallLog::default();
    let props = EditorProps::new(
        request(),
        Some(mock()),
        vec![Scenario::new("sA"), Scenario::new("sB")],
    );
    let mut session = EditSession::new(props, SavePolicy::Move, &store, &log);

    session
        .apply(EditAction::SelectScenario(ScenarioId::from("sB")))
        .unwrap();
    let call = session.save().unwrap();

    assert!(matches!(
        call,
        MutationCall::Create { ref scenario, .. } if scenario == &ScenarioId::from("sB")
    ));
    let total: usize = store
        .scenarios()
        .iter()
        .map(|s| s.mocked_requests.len())
        .sum();
    assert_eq!(total, 1);
    let sb = store.scenario(&ScenarioId::from("sB")).unwrap();
    assert_eq!(sb.mocked_requests.len(), 1);
    assert_eq!(log.views(), vec![View::Scenarios]);
}

#[test]
fn test_save_without_scenarios_fails_without_navigating() {
    let log = CallLog::default();
    let mut session = session(EditorProps::new(request(), None, vec![]), &log);

    let err = session.save().unwrap_err();
    assert!(matches!(err, EditorError::NoScenarioSelected));
    assert!(log.calls().is_empty());
    assert!(log.views().is_empty());
    assert!(session.is_open());
}

#[test]
fn test_header_actions() {
    let log = CallLog::default();
    let props = EditorProps::new(request(), None, vec![Scenario::new("s1")]);
    let mut session = session(props, &log);

    session.apply(EditAction::AddHeader).unwrap();
    session
        .apply(EditAction::ChangeHeaderKey {
            old_key: String::new(),
            new_key: "x-api".to_string(),
        })
        .unwrap();
    session
        .apply(EditAction::ChangeHeaderValue {
            key: "x-api".to_string(),
            value: "v2".to_string(),
        })
        .unwrap();
    session
        .apply(EditAction::RemoveHeader("content-type".to_string()))
        .unwrap();

    let headers = &session.draft().unwrap().headers;
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec![("x-api", "v2")]);

    session
        .apply(EditAction::ApplyPreset(HeaderPreset::Xml))
        .unwrap();
    let headers = &session.draft().unwrap().headers;
    assert_eq!(headers.len(), 4);
    assert_eq!(headers.get("content-type"), Some("text/xml; charset=utf-8"));
    assert!(!headers.contains_key("x-api"));
}

#[test]
fn test_set_props_replaces_draft() {
    let log = CallLog::default();
    let mut session = session(mocked_props(), &log);
    session.apply(EditAction::SetStatus(201)).unwrap();

    let mut updated = mocked_props();
    updated.mock.as_mut().unwrap().response.status = Some(404);
    updated.scenarios[0].mocked_requests[0] = updated.mock.clone().unwrap();
    session.set_props(updated);

    let draft = session.draft().unwrap();
    assert_eq!(draft.status, 404);
    assert_eq!(draft.original_scenario(), Some(&ScenarioId::from("sA")));
}

#[test]
fn test_set_props_reopens_closed_session() {
    let log = CallLog::default();
    let mut session = session(mocked_props(), &log);
    session.cancel();
    assert!(!session.is_open());

    session.set_props(mocked_props());
    assert!(session.is_open());
    assert_eq!(session.draft(), Some(&mocked_props().draft()));
}

#[test]
fn test_delete_removes_from_original_scenario() {
    let log = CallLog::default();
    let mut session = session(mocked_props(), &log);

    session
        .apply(EditAction::SelectScenario(ScenarioId::from("sB")))
        .unwrap();
    session.delete().unwrap();

    assert_eq!(
        log.calls(),
        vec![Call::Delete(ScenarioId::from("sA"), MockId::from("m1"))]
    );
    assert_eq!(log.views(), vec![View::Scenarios]);
}

#[test]
fn test_delete_without_mock_is_rejected() {
    let log = CallLog::default();
    let props = EditorProps::new(request(), None, vec![Scenario::new("s1")]);
    let mut session = session(props, &log);

    let err = session.delete().unwrap_err();
    assert!(matches!(err, EditorError::NotMocked));
    assert!(log.calls().is_empty());
    assert!(log.views().is_empty());
}

#[test]
fn test_cancel_navigates_without_mutation() {
    let log = CallLog::default();
    let mut session = session(mocked_props(), &log);
    session.apply(EditAction::SetStatus(201)).unwrap();

    session.cancel();

    assert!(log.calls().is_empty());
    assert_eq!(log.views(), vec![View::Scenarios]);
}

#[test]
fn test_closed_session_rejects_edits() {
    let log = CallLog::default();
    let mut session = session(mocked_props(), &log);
    session.save().unwrap();

    assert!(matches!(
        session.apply(EditAction::AddHeader),
        Err(EditorError::SessionClosed)
    ));
    assert!(matches!(session.save(), Err(EditorError::SessionClosed)));
    assert!(matches!(session.delete(), Err(EditorError::SessionClosed)));
    assert_eq!(log.calls().len(), 1);
}

#[test]
fn test_session_against_scenario_store() {
    let store = ScenarioStore::new(vec![Scenario::new("sA"), Scenario::new("sB")]);
    let nav = CallLog::default();

    let props = EditorProps::new(request(), None, store.scenarios());
    let mut session = EditSession::new(props, SavePolicy::Recreate, &store, &nav);
    session
        .apply(EditAction::ApplyPreset(HeaderPreset::Json))
        .unwrap();
    session.save().unwrap();

    let saved = store.scenario(&ScenarioId::from("sA")).unwrap().mocked_requests;
    assert_eq!(saved.len(), 1);
    let saved = saved[0].clone();

    // Reopen on the saved mock, move it, and check the original is untouched.
    session.set_props(EditorProps::new(
        request(),
        Some(saved.clone()),
        store.scenarios(),
    ));
    assert_eq!(
        session.draft().unwrap().original_scenario(),
        Some(&ScenarioId::from("sA"))
    );
    session
        .apply(EditAction::SelectScenario(ScenarioId::from("sB")))
        .unwrap();
    session.save().unwrap();

    assert!(store.find_mock(&saved.id).is_some());
    assert_eq!(
        store
            .scenario(&ScenarioId::from("sB"))
            .unwrap()
            .mocked_requests
            .len(),
        1
    );
    assert_eq!(nav.views(), vec![View::Scenarios, View::Scenarios]);
}

#[tracing_test::traced_test]
#[test]
fn test_save_is_logged() {
    let log = CallLog::default();
    let mut session = session(mocked_props(), &log);
    session.save().unwrap();
    assert!(logs_contain("Updating mock m1 in scenario sA"));
}
