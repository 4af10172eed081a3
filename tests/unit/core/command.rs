use super::*;

#[test]
fn test_command_names() {
    assert_eq!(Command::DefaultTyped.name(), "default-typed");
    assert_eq!(Command::DeletePrevious.name(), "delete-previous");
    assert_eq!(Command::Undo.name(), "undo");
    assert_eq!(Command::ShowContextMenu.name(), "show-context-menu");
    assert_eq!(Command::Custom("open-link".to_string()).name(), "open-link");
}

#[test]
fn from_name_round_trips_known_commands() {
    for cmd in [
        Command::DefaultTyped,
        Command::DeleteNext,
        Command::CaretForward,
        Command::SelectionBackward,
        Command::SetWritable,
        Command::ShowContextMenu,
        Command::PastePlain,
    ] {
        assert_eq!(Command::from_name(cmd.name()), cmd);
    }
}

#[test]
fn unknown_names_become_custom() {
    assert_eq!(
        Command::from_name("paste-from-clipboard"),
        Command::Custom("paste-from-clipboard".to_string())
    );
}

#[test]
fn test_is_edit_command() {
    assert!(Command::DefaultTyped.is_edit_command());
    assert!(Command::DeletePrevious.is_edit_command());
    assert!(!Command::CaretForward.is_edit_command());
    assert!(!Command::Undo.is_edit_command());
    assert!(Command::Redo.is_history_command());
    assert!(!Command::ShowContextMenu.is_edit_command());
    assert!(!Command::PastePlain.is_history_command());
}
