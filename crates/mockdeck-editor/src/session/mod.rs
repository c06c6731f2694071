//! Edit sessions: one request, one draft, one terminal action.
//!
//! This module provides:
//! - `EditSession`: owns the inbound props and the current draft, routes user
//!   edits into the draft and hands save/delete/cancel to the collaborators
//! - `EditAction`: every user edit the session understands
//! - `EditorProps`: the externally supplied inputs a draft is derived from
//!
//! ## Module Structure
//!
//! - `actions`: edit actions and props
//! - `editor`: the `EditSession` state machine

mod actions;
mod editor;

#[cfg(test)]
mod tests;

pub use actions::{EditAction, EditorProps};
pub use editor::EditSession;
