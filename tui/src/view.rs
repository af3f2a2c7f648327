//! View-local state: selection, edit modes and draft text.
//!
//! None of this is persisted. A draft only reaches the store when the user
//! commits it.

use std::mem;

use dicebag_types::{Group, Sides};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Editing the selected group's name.
    Naming { draft: String },
    /// Typing the side count of a new die for the selected group.
    AddingDie { draft: String },
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    selected_group: usize,
    selected_die: usize,
    mode: InputMode,
}

impl ViewState {
    #[must_use]
    pub fn selected_group(&self) -> usize {
        self.selected_group
    }

    #[must_use]
    pub fn selected_die(&self) -> usize {
        self.selected_die
    }

    #[must_use]
    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        match &self.mode {
            InputMode::Normal => None,
            InputMode::Naming { draft } | InputMode::AddingDie { draft } => Some(draft),
        }
    }

    pub fn begin_naming(&mut self, current: &str) {
        self.mode = InputMode::Naming {
            draft: current.to_string(),
        };
    }

    pub fn begin_adding_die(&mut self, default: Sides) {
        self.mode = InputMode::AddingDie {
            draft: default.get().to_string(),
        };
    }

    pub fn push_char(&mut self, c: char) {
        match &mut self.mode {
            InputMode::Normal => {}
            InputMode::Naming { draft } => draft.push(c),
            // Side counts are numeric; ignore anything else early.
            InputMode::AddingDie { draft } => {
                if c.is_ascii_digit() {
                    draft.push(c);
                }
            }
        }
    }

    pub fn pop_char(&mut self) {
        if let InputMode::Naming { draft } | InputMode::AddingDie { draft } = &mut self.mode {
            draft.pop();
        }
    }

    pub fn clear_draft(&mut self) {
        if let InputMode::Naming { draft } | InputMode::AddingDie { draft } = &mut self.mode {
            draft.clear();
        }
    }

    /// Re-enter a mode returned by [`ViewState::finish`].
    pub fn restore(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// Leave the current mode, returning it with its draft.
    pub fn finish(&mut self) -> InputMode {
        mem::take(&mut self.mode)
    }

    pub fn select_next_group(&mut self, group_count: usize) {
        if self.selected_group + 1 < group_count {
            self.selected_group += 1;
            self.selected_die = 0;
        }
    }

    pub fn select_prev_group(&mut self) {
        if self.selected_group > 0 {
            self.selected_group -= 1;
            self.selected_die = 0;
        }
    }

    pub fn select_last_group(&mut self, group_count: usize) {
        self.selected_group = group_count.saturating_sub(1);
        self.selected_die = 0;
    }

    pub fn select_next_die(&mut self, die_count: usize) {
        if self.selected_die + 1 < die_count {
            self.selected_die += 1;
        }
    }

    pub fn select_prev_die(&mut self) {
        self.selected_die = self.selected_die.saturating_sub(1);
    }

    /// Pull the selection back inside `groups` after a removal.
    pub fn clamp(&mut self, groups: &[Group]) {
        self.selected_group = self.selected_group.min(groups.len().saturating_sub(1));
        let die_count = groups
            .get(self.selected_group)
            .map_or(0, |group| group.dice().len());
        self.selected_die = self.selected_die.min(die_count.saturating_sub(1));
    }
}
