//! Mock editing core for Mockdeck.
//!
//! Given an intercepted request, and possibly a mock already saved for it,
//! this crate derives an editable [`Draft`], applies user edits, and decides
//! what a save means: update the existing mock, create a new one, or move it
//! into another scenario. Storage and navigation are left to collaborators
//! implementing [`MockStore`] and [`Navigator`].
//!
//! # Example
//!
//! ```
//! use mockdeck_editor::{
//!     EditAction, EditSession, EditorProps, HeaderPreset, Navigator, SavePolicy,
//!     Scenario, ScenarioStore, View,
//! };
//!
//! struct Quiet;
//! impl Navigator for Quiet {
//!     fn navigate(&self, _target: View) {}
//! }
//!
//! let request = serde_json::from_str(
//!     r#"{"id": "r1", "url": "/a", "method": "GET", "response": {"status": 200, "body": "{}"}}"#,
//! )
//! .unwrap();
//! let store = ScenarioStore::new(vec![Scenario::new("s1")]);
//! let props = EditorProps::new(request, None, store.scenarios());
//!
//! let mut session = EditSession::new(props, SavePolicy::default(), &store, Quiet);
//! session.apply(EditAction::ApplyPreset(HeaderPreset::Json)).unwrap();
//! session.save().unwrap();
//!
//! assert_eq!(store.scenarios()[0].mocked_requests.len(), 1);
//! ```

pub mod collaborators;
pub mod draft;
pub mod error;
pub mod headers;
pub mod model;
pub mod reconcile;
pub mod session;
pub mod store;

pub use collaborators::{MockStore, Navigator, View};
pub use draft::{resolve_scenario, Draft};
pub use error::{EditorError, Result};
pub use headers::{
    is_standard_response_header, suggest_header_names, HeaderMap, HeaderPreset,
    STANDARD_RESPONSE_HEADERS,
};
pub use model::{
    Mock, MockId, MockPatch, MockResponse, NewMock, ObservedResponse, Request, RequestId,
    ResponsePatch, Scenario, ScenarioId,
};
pub use reconcile::{save, MutationCall, SavePolicy};
pub use session::{EditAction, EditSession, EditorProps};
pub use store::ScenarioStore;
