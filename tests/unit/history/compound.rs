use super::*;
use crate::core::{EventClock, InputEvent};
use crate::history::classifier::CorrelationToken;
use crate::history::mutation::Mutation;

fn typed(offset: usize, text: &str, token: u64) -> ClassifiedMutation {
    ClassifiedMutation {
        mutation: Mutation::insert(offset, text),
        tag: Some(EditTag::DefaultTyped),
        token: CorrelationToken::Synthetic(token),
    }
}

fn backspace(offset: usize, text: &str, token: u64) -> ClassifiedMutation {
    ClassifiedMutation {
        mutation: Mutation::remove(offset, text),
        tag: Some(EditTag::DeletePrevious),
        token: CorrelationToken::Synthetic(token),
    }
}

#[test]
fn contiguous_typing_merges() {
    assert!(should_merge(&typed(1, "b", 2), &typed(0, "a", 1)));
    assert!(should_merge(&typed(3, "c", 2), &typed(1, "ab", 1)));
}

#[test]
fn typing_elsewhere_does_not_merge() {
    assert!(!should_merge(&typed(5, "b", 2), &typed(0, "a", 1)));
    // 在前一个字符之前输入
    assert!(!should_merge(&typed(0, "b", 2), &typed(0, "a", 1)));
}

#[test]
fn backward_delete_merges_only_when_contiguous() {
    // "abc"，光标在末尾连按两次退格
    assert!(should_merge(&backspace(1, "b", 2), &backspace(2, "c", 1)));
    assert!(!should_merge(&backspace(0, "a", 2), &backspace(2, "c", 1)));
}

#[test]
fn forward_direction_delete_does_not_merge() {
    // 同一位置反复删除（向前删除的形状）
    assert!(!should_merge(&backspace(2, "d", 2), &backspace(2, "c", 1)));
}

#[test]
fn tag_or_kind_mismatch_does_not_merge() {
    assert!(!should_merge(&backspace(0, "a", 2), &typed(0, "a", 1)));

    let mut untagged = typed(1, "b", 2);
    untagged.tag = None;
    assert!(!should_merge(&untagged, &typed(0, "a", 1)));

    let mut wrong_kind = typed(1, "b", 2);
    wrong_kind.mutation = Mutation::remove(1, "b");
    assert!(!should_merge(&wrong_kind, &typed(0, "a", 1)));
}

#[test]
fn same_token_always_merges() {
    let event = EventClock::new().stamp(InputEvent::Mouse { source: None });
    let token = CorrelationToken::Event(event.id);
    let a = ClassifiedMutation {
        mutation: Mutation::remove(0, "old"),
        tag: None,
        token,
    };
    let b = ClassifiedMutation {
        mutation: Mutation::insert(40, "new"),
        tag: None,
        token,
    };
    assert!(should_merge(&b, &a));
}

#[test]
fn state_transitions() {
    assert!(CompoundState::Open.can_undo());
    assert!(CompoundState::Redone.can_undo());
    assert!(!CompoundState::Undone.can_undo());
    assert!(CompoundState::Undone.can_redo());
    assert!(!CompoundState::Redone.can_redo());
    assert!(!CompoundState::Open.can_redo());
}
