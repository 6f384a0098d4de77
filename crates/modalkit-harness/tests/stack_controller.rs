#![forbid(unsafe_code)]

//! Integration tests: the authoritative stack and its transition table.

use modalkit_core::{ClosePolicy, OpenOptions, StackConfig, StackController, StackPhase};
use modalkit_harness::strategy::mutations;
use modalkit_harness::{DialogProps, Modal, ModelStack, Scenario, scripted};
use proptest::prelude::*;

fn titles(stack: &StackController<Modal, DialogProps>) -> Vec<Option<String>> {
    stack
        .snapshot()
        .iter()
        .map(|d| d.props().map(|p| p.title.clone()))
        .collect()
}

#[test]
fn open_replace_close_all_walkthrough() {
    let mut s = Scenario::immediate();

    s.open_titled("ModalX", "Hi");
    assert_eq!(s.stack_names(), ["ModalX"]);
    assert_eq!(titles(s.stack()), [Some("Hi".to_string())]);
    assert_eq!(s.render().open_name(), Some("ModalX"));

    s.replace("ModalY");
    assert_eq!(s.stack_names(), ["ModalY"]);
    assert_eq!(titles(s.stack()), [None::<String>]);

    s.close_all();
    assert!(s.stack_names().is_empty());
    assert_eq!(s.stack().phase(), StackPhase::Empty);
}

#[test]
fn close_on_single_entry_always_empties() {
    for amount in [0usize, 1, 2, 7, usize::MAX] {
        let mut s = Scenario::immediate();
        s.open("A");
        s.close_n(amount);
        assert!(s.stack().is_empty(), "amount {amount}");
    }
}

#[test]
fn clamp_policy_honours_zero_amount() {
    let mut s = Scenario::with_config(
        StackConfig::new().close_policy(ClosePolicy::Clamp),
        false,
    );
    s.open("A");
    s.close_n(0);
    assert_eq!(s.stack_names(), ["A"]);
    s.close_n(3);
    assert!(s.stack().is_empty());
}

#[test]
fn multi_entry_close_truncates_and_clamps() {
    let mut s = Scenario::immediate();
    for name in ["A", "B", "C", "D"] {
        s.open(name);
    }
    s.close_n(2);
    assert_eq!(s.stack_names(), ["A", "B"]);
    s.close_n(0);
    assert_eq!(s.stack_names(), ["A", "B"]);
    s.close_n(9);
    assert!(s.stack_names().is_empty());
}

#[test]
fn replace_on_empty_degrades_to_open() {
    let mut s = Scenario::immediate();
    s.replace("A");
    assert_eq!(s.stack_names(), ["A"]);
}

#[test]
fn cached_snapshot_is_never_mutated() {
    let mut s = Scenario::immediate();
    s.open("A");
    s.open("B");
    let cached = s.stack().snapshot();
    s.close_all();
    s.open("C");
    assert_eq!(cached.len(), 2);
    assert_eq!(s.stack().len(), 1);
}

#[test]
fn independent_controllers_do_not_share_state() {
    let first: StackController<Modal, DialogProps> = StackController::new();
    let second: StackController<Modal, DialogProps> = StackController::new();
    first.open(scripted("A"), None);
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

#[test]
fn content_can_open_through_a_cloned_handle() {
    let stack: StackController<Modal, DialogProps> = StackController::new();
    let handle = stack.clone();
    stack.open_with(
        scripted("A"),
        None,
        OpenOptions::new().on_transition_complete(move || {
            handle.open(scripted("B"), None);
        }),
    );
    let hook = stack.active().and_then(|d| d.on_transition_complete().cloned());
    hook.expect("hook registered")();
    assert_eq!(stack.len(), 2);
}

proptest! {
    #[test]
    fn length_follows_transition_table(actions in mutations(48)) {
        for policy in [ClosePolicy::CollapseSingle, ClosePolicy::Clamp] {
            let mut s = Scenario::with_config(StackConfig::new().close_policy(policy), false);
            let mut model = ModelStack::new(policy);
            for action in &actions {
                s.apply(action);
                model.apply(action);
                prop_assert_eq!(s.stack().len(), model.len);
                prop_assert_eq!(s.stack().phase(), StackPhase::from_len(model.len));
            }
        }
    }

    #[test]
    fn replace_keeps_depth_and_prefix(depth in 1usize..8) {
        let mut s = Scenario::immediate();
        for _ in 0..depth {
            s.open("A");
        }
        let before = s.stack().snapshot().ids();
        let new_id = s.open_with(
            "B",
            Some(DialogProps::titled("new")),
            OpenOptions::new().replace(true),
        );
        let after = s.stack().snapshot().ids();

        prop_assert_eq!(after.len(), depth);
        prop_assert_eq!(&after[..depth - 1], &before[..depth - 1]);
        prop_assert_eq!(after[depth - 1], new_id);
        let top = s.stack().active().expect("non-empty");
        prop_assert_eq!(top.props().map(|p| p.title.as_str()), Some("new"));
    }

    #[test]
    fn version_bumps_only_on_effective_change(actions in mutations(32)) {
        let s = &mut Scenario::immediate();
        for action in &actions {
            let before = s.stack().snapshot();
            s.apply(action);
            let after = s.stack().snapshot();
            if after.same_entries(&before) {
                prop_assert_eq!(after.version(), before.version());
            } else {
                prop_assert_eq!(after.version(), before.version() + 1);
            }
        }
    }
}
