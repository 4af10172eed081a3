use super::*;
use crate::core::{Chord, EventClock, InputEvent, KeyInput};
use crate::keymap::{HandlerRegistry, Tier, WidgetKind, WidgetTree};
use crossterm::event::{KeyCode, KeyModifiers};

struct Fixture {
    tree: WidgetTree,
    handlers: HandlerRegistry,
    field: WidgetId,
    other: WidgetId,
}

fn fixture() -> Fixture {
    let mut tree = WidgetTree::new();
    let mut handlers = HandlerRegistry::new();
    let window = tree.insert_root(WidgetKind::Window);
    let field = tree.insert_child(window, WidgetKind::Component).unwrap();
    let other = tree.insert_child(window, WidgetKind::Component).unwrap();

    let typed = handlers.register(Command::DefaultTyped);
    let delete = handlers.register(Command::DeletePrevious);
    let tab = handlers.register(Command::InsertTab);
    for id in [field, other] {
        let table = tree.bindings_mut(id).unwrap();
        table
            .tier_mut(Tier::Focused)
            .set_typed_fallback(Some("default-action".into()));
        table.actions_mut().put("default-action", typed);
        table.bind(
            Tier::Focused,
            Chord::simple(KeyCode::Backspace),
            "delete-previous",
            delete,
        );
        table.bind(Tier::Focused, Chord::simple(KeyCode::Tab), "insert-tab", tab);
    }

    Fixture {
        tree,
        handlers,
        field,
        other,
    }
}

#[test]
fn typed_key_through_alias_is_tagged_default_typed() {
    let f = fixture();
    let resolver = BindingResolver::new(&f.tree, &f.handlers);
    let mut clock = EventClock::new();
    let event = clock.stamp(InputEvent::Key(KeyInput::typed(f.field, 'a')));

    let mut classifier = EditClassifier::new(f.field);
    let classified = classifier.classify(
        Mutation::insert(0, "a"),
        Some(Ambient::new(&event, &resolver)),
    );
    assert_eq!(classified.tag, Some(EditTag::DefaultTyped));
    assert_eq!(classified.token, CorrelationToken::Event(event.id));
}

#[test]
fn backspace_is_tagged_delete_previous() {
    let f = fixture();
    let resolver = BindingResolver::new(&f.tree, &f.handlers);
    let mut clock = EventClock::new();
    let event = clock.stamp(InputEvent::Key(KeyInput::pressed(
        f.field,
        KeyCode::Backspace,
        KeyModifiers::NONE,
    )));

    let mut classifier = EditClassifier::new(f.field);
    let classified = classifier.classify(
        Mutation::remove(2, "c"),
        Some(Ambient::new(&event, &resolver)),
    );
    assert_eq!(classified.tag, Some(EditTag::DeletePrevious));
}

#[test]
fn other_commands_stay_untagged() {
    let f = fixture();
    let resolver = BindingResolver::new(&f.tree, &f.handlers);
    let mut clock = EventClock::new();
    let event = clock.stamp(InputEvent::Key(KeyInput::pressed(
        f.field,
        KeyCode::Tab,
        KeyModifiers::NONE,
    )));

    let mut classifier = EditClassifier::new(f.field);
    let classified = classifier.classify(
        Mutation::insert(0, "\t"),
        Some(Ambient::new(&event, &resolver)),
    );
    assert_eq!(classified.tag, None);
    assert_eq!(classified.token, CorrelationToken::Event(event.id));
}

#[test]
fn key_from_another_widget_is_not_tagged() {
    let f = fixture();
    let resolver = BindingResolver::new(&f.tree, &f.handlers);
    let mut clock = EventClock::new();
    let event = clock.stamp(InputEvent::Key(KeyInput::typed(f.other, 'a')));

    let mut classifier = EditClassifier::new(f.field);
    let classified = classifier.classify(
        Mutation::insert(0, "a"),
        Some(Ambient::new(&event, &resolver)),
    );
    assert_eq!(classified.tag, None);
}

#[test]
fn non_key_event_is_not_tagged_but_still_correlates() {
    let f = fixture();
    let resolver = BindingResolver::new(&f.tree, &f.handlers);
    let mut clock = EventClock::new();
    let event = clock.stamp(InputEvent::Mouse {
        source: Some(f.field),
    });

    let mut classifier = EditClassifier::new(f.field);
    let a = classifier.classify(Mutation::insert(0, "x"), Some(Ambient::new(&event, &resolver)));
    let b = classifier.classify(Mutation::insert(1, "y"), Some(Ambient::new(&event, &resolver)));
    assert_eq!(a.tag, None);
    assert_eq!(a.token, b.token);
}

#[test]
fn calls_without_ambient_event_get_distinct_tokens() {
    let f = fixture();
    let mut classifier = EditClassifier::new(f.field);
    let a = classifier.classify(Mutation::insert(0, "x"), None);
    let b = classifier.classify(Mutation::insert(1, "y"), None);
    assert_eq!(a.tag, None);
    assert_ne!(a.token, b.token);
    assert!(matches!(a.token, CorrelationToken::Synthetic(_)));
}

#[test]
fn nested_groups_share_outer_token() {
    let f = fixture();
    let mut classifier = EditClassifier::new(f.field);

    let outer = classifier.begin_group();
    let inner = classifier.begin_group();
    assert_eq!(outer, inner);

    let a = classifier.classify(Mutation::insert(0, "x"), None);
    assert!(classifier.end_group());
    let b = classifier.classify(Mutation::insert(5, "y"), None);
    assert!(classifier.end_group());
    assert!(!classifier.in_group());

    assert_eq!(a.token, outer);
    assert_eq!(b.token, outer);

    let c = classifier.classify(Mutation::insert(9, "z"), None);
    assert_ne!(c.token, outer);
    assert!(!classifier.end_group());
}

#[test]
fn without_tag_clears_classification() {
    let f = fixture();
    let resolver = BindingResolver::new(&f.tree, &f.handlers);
    let mut clock = EventClock::new();
    let event = clock.stamp(InputEvent::Key(KeyInput::pressed(
        f.field,
        KeyCode::Backspace,
        KeyModifiers::NONE,
    )));

    let mut classifier = EditClassifier::new(f.field);
    let classified = classifier
        .classify(Mutation::remove(0, "ab"), Some(Ambient::new(&event, &resolver)))
        .without_tag();
    assert_eq!(classified.tag, None);
    assert_eq!(classified.token, CorrelationToken::Event(event.id));
}
