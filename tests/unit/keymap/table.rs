use super::*;
use crate::core::Command;
use crate::keymap::HandlerRegistry;

#[test]
fn tier_parse_accepts_aliases() {
    assert_eq!(Tier::parse("focused"), Some(Tier::Focused));
    assert_eq!(Tier::parse(" Ancestor "), Some(Tier::AncestorOfFocused));
    assert_eq!(Tier::parse("when_in_focused_window"), Some(Tier::FocusedWindow));
    assert_eq!(Tier::parse("global"), None);
}

#[test]
fn key_table_falls_back_to_parent() {
    let mut parent = KeyTable::new();
    parent.bind(Chord::ctrl(KeyCode::Char('z')), "undo");
    let parent = Arc::new(parent);

    let mut child = KeyTable::with_parent(parent);
    child.bind(Chord::simple(KeyCode::Backspace), "delete-previous");

    assert_eq!(
        child.get(&Chord::ctrl(KeyCode::Char('z'))),
        Some(&BindingKey::from("undo"))
    );
    assert_eq!(
        child.get(&Chord::simple(KeyCode::Backspace)),
        Some(&BindingKey::from("delete-previous"))
    );
    assert_eq!(child.get(&Chord::simple(KeyCode::Delete)), None);
}

#[test]
fn child_binding_shadows_parent() {
    let mut parent = KeyTable::new();
    parent.bind(Chord::simple(KeyCode::Enter), "insert-break");
    let mut child = KeyTable::with_parent(Arc::new(parent));
    child.bind(Chord::simple(KeyCode::Enter), "notify-field-accept");

    assert_eq!(
        child.get(&Chord::simple(KeyCode::Enter)).map(BindingKey::as_str),
        Some("notify-field-accept")
    );
}

#[test]
fn typed_fallback_only_covers_printable_text_entry() {
    let mut table = KeyTable::new();
    table.set_typed_fallback(Some(BindingKey::from("default-action")));

    assert_eq!(
        table.get(&Chord::typed('x')).map(BindingKey::as_str),
        Some("default-action")
    );
    assert_eq!(table.get(&Chord::typed('\u{8}')), None);
    assert_eq!(table.get(&Chord::simple(KeyCode::Char('x'))), None);
}

#[test]
fn explicit_typed_binding_beats_fallback() {
    let mut table = KeyTable::new();
    table.set_typed_fallback(Some(BindingKey::from("default-action")));
    table.bind(Chord::typed('\t'), "insert-tab");
    table.bind(Chord::typed('q'), "quit-typed");

    assert_eq!(
        table.get(&Chord::typed('q')).map(BindingKey::as_str),
        Some("quit-typed")
    );
    assert_eq!(
        table.get(&Chord::typed('\t')).map(BindingKey::as_str),
        Some("insert-tab")
    );
}

#[test]
fn action_map_parent_chain() {
    let mut handlers = HandlerRegistry::new();
    let undo = handlers.register(Command::Undo);
    let redo = handlers.register(Command::Redo);

    let mut parent = ActionMap::new();
    parent.put("undo", undo);
    let mut child = ActionMap::with_parent(Arc::new(parent));
    child.put("redo", redo);

    assert_eq!(child.get(&BindingKey::from("undo")), Some(undo));
    assert_eq!(child.get(&BindingKey::from("redo")), Some(redo));
    assert_eq!(child.len(), 1);
}

#[test]
fn chords_for_lists_every_alias() {
    let mut table = KeyTable::new();
    table.bind(Chord::ctrl(KeyCode::Char('y')), "redo");
    table.bind(Chord::ctrl_shift(KeyCode::Char('z')), "redo");
    table.bind(Chord::ctrl(KeyCode::Char('z')), "undo");

    let mut chords = table.chords_for(&BindingKey::from("redo"));
    chords.sort_by_key(|c| c.to_string());
    assert_eq!(
        chords,
        vec![
            Chord::ctrl_shift(KeyCode::Char('z')),
            Chord::ctrl(KeyCode::Char('y')),
        ]
    );
}

#[test]
fn binding_table_bind_writes_both_maps() {
    let mut handlers = HandlerRegistry::new();
    let typed = handlers.register(Command::DefaultTyped);
    let mut table = BindingTable::new();
    table.bind(
        Tier::AncestorOfFocused,
        Chord::simple(KeyCode::F(2)),
        "rename",
        typed,
    );

    assert!(table.tier(Tier::Focused).is_empty());
    assert_eq!(
        table
            .tier(Tier::AncestorOfFocused)
            .get(&Chord::simple(KeyCode::F(2)))
            .and_then(|key| table.actions().get(key)),
        Some(typed)
    );
}
