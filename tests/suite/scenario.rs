//! End-to-end flows through the store, backed by real files.

use dicebag_core::RandomRoller;
use dicebag_types::DEFAULT_GROUP_NAME;

use crate::common::{ScriptedRoller, open_store, sides};

#[test]
fn build_roll_and_trim_a_group() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());
    assert!(store.groups().is_empty());

    store.add_group();
    assert_eq!(store.groups().len(), 1);
    assert_eq!(store.groups()[0].name(), DEFAULT_GROUP_NAME);
    assert!(store.groups()[0].dice().is_empty());

    store.add_die(0, sides(6)).unwrap();
    let die = store.groups()[0].dice()[0];
    assert_eq!(die.sides().get(), 6);
    assert_eq!(die.last_roll(), None);

    store.add_die(0, sides(20)).unwrap();
    assert_eq!(store.groups()[0].dice().len(), 2);

    store.roll_group(0, ScriptedRoller(vec![5, 18])).unwrap();
    assert_eq!(store.groups()[0].total(), Some(23));

    store.remove_die(0, 0).unwrap();
    let dice = store.groups()[0].dice();
    assert_eq!(dice.len(), 1);
    assert_eq!(dice[0].sides().get(), 20);
    assert_eq!(dice[0].last_roll(), Some(18));
}

#[test]
fn random_rolls_stay_in_range() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());
    store.add_group();
    for n in [2, 4, 6, 8, 10, 12, 20, 100] {
        store.add_die(0, sides(n)).unwrap();
    }

    for _ in 0..50 {
        store.roll_group(0, RandomRoller).unwrap();
        let group = &store.groups()[0];
        for die in group.dice() {
            let value = die.last_roll().expect("every die is rolled");
            assert!((1..=die.sides().get()).contains(&value));
        }
        let expected: u64 = group
            .dice()
            .iter()
            .filter_map(|d| d.last_roll())
            .map(u64::from)
            .sum();
        assert_eq!(group.total(), Some(expected));
    }
}

#[test]
fn adding_a_die_after_rolling_hides_the_total() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());
    store.add_group();
    store.add_die(0, sides(6)).unwrap();
    store.roll_group(0, ScriptedRoller(vec![3])).unwrap();
    assert_eq!(store.groups()[0].total(), Some(3));

    store.add_die(0, sides(4)).unwrap();
    assert_eq!(store.groups()[0].total(), None);

    store.roll_group(0, ScriptedRoller(vec![1, 4])).unwrap();
    assert_eq!(store.groups()[0].total(), Some(5));
}

#[test]
fn renaming_touches_only_one_group() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());
    store.add_group();
    store.add_group();
    store.add_die(0, sides(6)).unwrap();
    let before = store.collection().clone();

    store.rename_group(0, "Fate Dice").unwrap();

    let after = store.collection();
    assert_eq!(after.groups()[0].name(), "Fate Dice");
    assert_eq!(after.groups()[0].dice(), before.groups()[0].dice());
    assert_eq!(after.groups()[1], before.groups()[1]);
}
