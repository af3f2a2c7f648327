//! Application state for the dicebag TUI.
//!
//! `App` pairs the persisted [`GroupStore`] with the view-local
//! [`ViewState`] and translates user intents into store transitions.

use tracing::{info, warn};

use dicebag_core::{GroupStore, KeyValueStore, RandomRoller};
use dicebag_types::{DieRoller, EditError, Group, Sides};

use crate::view::{InputMode, ViewState};

pub type DynGroupStore = GroupStore<Box<dyn KeyValueStore>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

pub struct App {
    store: DynGroupStore,
    roller: Box<dyn DieRoller>,
    view: ViewState,
    default_sides: Sides,
    status: Option<Status>,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(store: DynGroupStore) -> Self {
        let mut view = ViewState::default();
        view.clamp(store.groups());
        Self {
            store,
            roller: Box::new(RandomRoller),
            view,
            default_sides: Sides::D6,
            status: None,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn with_roller(mut self, roller: Box<dyn DieRoller>) -> Self {
        self.roller = roller;
        self
    }

    /// Side count the add-die prompt starts with.
    #[must_use]
    pub fn with_default_sides(mut self, sides: Sides) -> Self {
        self.default_sides = sides;
        self
    }

    #[must_use]
    pub fn store(&self) -> &DynGroupStore {
        &self.store
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        self.store.groups()
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub(crate) fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    #[must_use]
    pub fn input_mode(&self) -> &InputMode {
        self.view.mode()
    }

    #[must_use]
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn selected_group(&self) -> Option<&Group> {
        self.store.groups().get(self.view.selected_group())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select_next_group(&mut self) {
        let count = self.store.groups().len();
        self.view.select_next_group(count);
    }

    pub fn select_prev_group(&mut self) {
        self.view.select_prev_group();
    }

    pub fn select_next_die(&mut self) {
        let count = self.selected_group().map_or(0, |group| group.dice().len());
        self.view.select_next_die(count);
    }

    pub fn select_prev_die(&mut self) {
        self.view.select_prev_die();
    }

    // ------------------------------------------------------------------
    // Store transitions
    // ------------------------------------------------------------------

    pub fn add_group(&mut self) {
        self.store.add_group();
        self.view.select_last_group(self.store.groups().len());
        self.set_info("Added a group. Press a to add dice.");
        self.after_edit();
    }

    pub fn start_rename(&mut self) {
        let Some(name) = self.selected_group().map(|group| group.name().to_string()) else {
            self.set_info("No group yet. Press n to add one.");
            return;
        };
        self.view.begin_naming(&name);
    }

    pub fn start_add_die(&mut self) {
        if self.selected_group().is_none() {
            self.set_info("No group yet. Press n to add one.");
            return;
        }
        self.view.begin_adding_die(self.default_sides);
    }

    pub fn cancel_input(&mut self) {
        self.view.finish();
    }

    /// Commit the draft of the current input mode.
    pub fn commit_input(&mut self) {
        let group = self.view.selected_group();
        match self.view.finish() {
            InputMode::Normal => {}
            InputMode::Naming { draft } => {
                let result = self.store.rename_group(group, draft);
                self.finish_edit(result, "Renamed group");
            }
            InputMode::AddingDie { draft } => match Sides::parse(&draft) {
                Ok(sides) => {
                    let result = self.store.add_die(group, sides);
                    self.finish_edit(result, &format!("Added a {sides}"));
                }
                Err(err) => {
                    // Stay in the prompt so the draft can be fixed.
                    self.view.restore(InputMode::AddingDie { draft });
                    self.set_error(format!("Invalid side count: {err}"));
                }
            },
        }
    }

    pub fn roll_selected(&mut self) {
        let Some(group) = self.selected_group() else {
            self.set_info("No group yet. Press n to add one.");
            return;
        };
        if group.is_empty() {
            self.set_info("Add a die before rolling.");
            return;
        }

        let index = self.view.selected_group();
        let result = self.store.roll_group(index, self.roller.as_mut());
        let summary = self
            .selected_group()
            .and_then(Group::total)
            .map_or_else(|| "Rolled".to_string(), |total| format!("Rolled {total}"));
        info!(group = index, "Rolled group");
        self.finish_edit(result, &summary);
    }

    pub fn remove_selected_die(&mut self) {
        let has_die = self
            .selected_group()
            .is_some_and(|group| self.view.selected_die() < group.dice().len());
        if !has_die {
            self.set_info("No die selected.");
            return;
        }
        let result = self
            .store
            .remove_die(self.view.selected_group(), self.view.selected_die());
        self.finish_edit(result, "Removed die");
    }

    fn finish_edit(&mut self, result: Result<(), EditError>, success: &str) {
        match result {
            Ok(()) => self.set_info(success),
            Err(err) => {
                warn!("Edit rejected: {err}");
                self.set_error(err.to_string());
            }
        }
        self.after_edit();
    }

    fn after_edit(&mut self) {
        self.view.clamp(self.store.groups());
        if let Some(err) = self.store.take_save_error() {
            self.set_error(format!("Changes not saved: {err}"));
        }
    }

    fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }
}
