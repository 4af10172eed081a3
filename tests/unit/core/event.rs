use super::*;
use slotmap::KeyData;

fn widget() -> WidgetId {
    WidgetId::from(KeyData::from_ffi(1))
}

#[test]
fn test_chord_creation() {
    let chord = Chord::ctrl(KeyCode::Char('s'));
    assert_eq!(chord.code, KeyCode::Char('s'));
    assert_eq!(chord.modifiers, KeyModifiers::CONTROL);
    assert_eq!(chord.phase, KeyPhase::Pressed);
}

#[test]
fn uppercase_press_is_normalized_to_shift() {
    let chord = Chord::ctrl(KeyCode::Char('Z'));
    assert_eq!(chord, Chord::ctrl_shift(KeyCode::Char('z')));
}

#[test]
fn typed_chord_keeps_case_and_drops_modifiers() {
    let input = KeyInput {
        code: KeyCode::Char('A'),
        extended_code: Some(KeyCode::Char('B')),
        modifiers: KeyModifiers::SHIFT,
        phase: KeyPhase::Typed,
        source: Some(widget()),
    };
    assert_eq!(input.primary_chord(), Chord::typed('A'));
    assert_eq!(input.secondary_chord(), None);
    assert_eq!(input.candidate_chords(), vec![Chord::typed('A')]);
    assert_eq!(input.typed_char(), Some('A'));
}

#[test]
fn extended_code_comes_first_when_it_differs() {
    let input = KeyInput::pressed(widget(), KeyCode::Char('q'), KeyModifiers::CONTROL)
        .with_extended_code(KeyCode::Char('a'));
    assert_eq!(
        input.candidate_chords(),
        vec![
            Chord::ctrl(KeyCode::Char('a')),
            Chord::ctrl(KeyCode::Char('q'))
        ]
    );
}

#[test]
fn identical_extended_code_adds_no_candidate() {
    let input = KeyInput::pressed(widget(), KeyCode::Backspace, KeyModifiers::NONE)
        .with_extended_code(KeyCode::Backspace);
    assert_eq!(input.candidate_chords().len(), 1);
}

#[test]
fn released_phase_is_part_of_the_chord() {
    let input = KeyInput::released(widget(), KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(
        input.primary_chord(),
        Chord::simple(KeyCode::Enter).released()
    );
    assert_ne!(input.primary_chord(), Chord::simple(KeyCode::Enter));
}

#[test]
fn chord_display() {
    assert_eq!(
        Chord::ctrl_shift(KeyCode::Char('z')).to_string(),
        "ctrl+shift+z"
    );
    assert_eq!(Chord::simple(KeyCode::Backspace).to_string(), "backspace");
    assert_eq!(Chord::typed('x').to_string(), "typed 'x'");
}

#[test]
fn event_clock_is_monotonic() {
    let mut clock = EventClock::new();
    let a = clock.stamp(InputEvent::FocusGained { source: None });
    let b = clock.stamp(InputEvent::FocusLost { source: None });
    assert!(a.id < b.id);
    assert!(!a.event.is_key());
    assert_eq!(b.event.source(), None);
}
