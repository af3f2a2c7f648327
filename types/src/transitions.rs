//! Pure state transitions over a [`Collection`].
//!
//! Every transition borrows the current collection and returns a new one.
//! The input is never modified, so callers can keep the old value around
//! and compare, or discard it.

use thiserror::Error;

use crate::{Collection, Die, DieRoller, Group, Sides};

/// Name given to groups created by [`add_group`].
pub const DEFAULT_GROUP_NAME: &str = "Unnamed group";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("group index {index} is out of range ({len} groups)")]
    GroupOutOfRange { index: usize, len: usize },
    #[error("die index {index} is out of range for group {group} ({len} dice)")]
    DieOutOfRange {
        group: usize,
        index: usize,
        len: usize,
    },
}

/// An edit expressed as data.
///
/// Rolling is not an `EditOp`: it draws randomness through [`roll_group`]
/// and lands here as a [`EditOp::ReplaceDice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    AddGroup { name: String },
    RenameGroup { group: usize, name: String },
    AddDie { group: usize, sides: Sides },
    RemoveDie { group: usize, die: usize },
    ReplaceDice { group: usize, dice: Vec<Die> },
}

impl EditOp {
    /// Short label used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            EditOp::AddGroup { .. } => "add_group",
            EditOp::RenameGroup { .. } => "rename_group",
            EditOp::AddDie { .. } => "add_die",
            EditOp::RemoveDie { .. } => "remove_die",
            EditOp::ReplaceDice { .. } => "replace_dice",
        }
    }
}

/// Applies an edit operation as a pure transform.
pub fn apply(collection: &Collection, op: EditOp) -> Result<Collection, EditError> {
    match op {
        EditOp::AddGroup { name } => Ok(add_named_group(collection, name)),
        EditOp::RenameGroup { group, name } => rename_group(collection, group, name),
        EditOp::AddDie { group, sides } => add_die(collection, group, sides),
        EditOp::RemoveDie { group, die } => remove_die(collection, group, die),
        EditOp::ReplaceDice { group, dice } => replace_dice(collection, group, dice),
    }
}

/// Append an empty group named [`DEFAULT_GROUP_NAME`].
#[must_use]
pub fn add_group(collection: &Collection) -> Collection {
    add_named_group(collection, DEFAULT_GROUP_NAME)
}

/// Append an empty group with the given name.
#[must_use]
pub fn add_named_group(collection: &Collection, name: impl Into<String>) -> Collection {
    let mut groups = collection.groups.clone();
    groups.push(Group::new(name));
    Collection { groups }
}

pub fn rename_group(
    collection: &Collection,
    group: usize,
    name: impl Into<String>,
) -> Result<Collection, EditError> {
    let name = name.into();
    update_group(collection, group, |target| target.name = name)
}

/// Append an unrolled die to the group at `group`.
pub fn add_die(
    collection: &Collection,
    group: usize,
    sides: Sides,
) -> Result<Collection, EditError> {
    update_group(collection, group, |target| target.dice.push(Die::new(sides)))
}

/// Remove the die at `die`; later dice shift down by one.
pub fn remove_die(
    collection: &Collection,
    group: usize,
    die: usize,
) -> Result<Collection, EditError> {
    let target = group_at(collection, group)?;
    if die >= target.dice.len() {
        return Err(EditError::DieOutOfRange {
            group,
            index: die,
            len: target.dice.len(),
        });
    }
    update_group(collection, group, |target| {
        target.dice.remove(die);
    })
}

pub fn replace_dice(
    collection: &Collection,
    group: usize,
    dice: Vec<Die>,
) -> Result<Collection, EditError> {
    update_group(collection, group, |target| target.dice = dice)
}

/// Roll every die, returning the new sequence. There is no partial roll.
#[must_use]
pub fn roll_group(dice: &[Die], mut roller: impl DieRoller) -> Vec<Die> {
    dice.iter().map(|die| die.rolled(&mut roller)).collect()
}

fn group_at(collection: &Collection, index: usize) -> Result<&Group, EditError> {
    collection
        .groups
        .get(index)
        .ok_or(EditError::GroupOutOfRange {
            index,
            len: collection.groups.len(),
        })
}

fn update_group(
    collection: &Collection,
    index: usize,
    edit: impl FnOnce(&mut Group),
) -> Result<Collection, EditError> {
    group_at(collection, index)?;
    let mut groups = collection.groups.clone();
    edit(&mut groups[index]);
    Ok(Collection { groups })
}
