//! Terminal front end for dicebag.
//!
//! The UI is a thin collaborator over [`dicebag_core::GroupStore`]: it keeps
//! its own view-local state ([`ViewState`]: selection, edit modes, drafts),
//! turns keys into store transitions, and renders whatever the store holds.
//! Nothing in this crate is persisted.

mod app;
mod input;
mod render;
mod theme;
mod view;

pub use app::{App, Status, StatusKind};
pub use input::{handle_events, handle_key};
pub use render::draw;
pub use view::{InputMode, ViewState};
