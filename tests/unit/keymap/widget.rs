use super::*;

#[test]
fn focus_path_runs_from_source_to_root() {
    let mut tree = WidgetTree::new();
    let window = tree.insert_root(WidgetKind::Window);
    let panel = tree.insert_child(window, WidgetKind::Container).unwrap();
    let field = tree.insert_child(panel, WidgetKind::Component).unwrap();

    assert_eq!(tree.focus_path(field), vec![field, panel, window]);
    assert_eq!(tree.focus_path(window), vec![window]);
}

#[test]
fn window_cannot_be_nested() {
    let mut tree = WidgetTree::new();
    let window = tree.insert_root(WidgetKind::Window);
    assert!(matches!(
        tree.insert_child(window, WidgetKind::Window),
        Err(WidgetTreeError::WindowNotRoot)
    ));
}

#[test]
fn remove_drops_subtree() {
    let mut tree = WidgetTree::new();
    let window = tree.insert_root(WidgetKind::Window);
    let panel = tree.insert_child(window, WidgetKind::Container).unwrap();
    let field = tree.insert_child(panel, WidgetKind::Component).unwrap();
    let sibling = tree.insert_child(window, WidgetKind::Component).unwrap();

    tree.remove(panel).unwrap();

    assert!(!tree.contains(panel));
    assert!(!tree.contains(field));
    assert!(tree.contains(sibling));
    assert!(tree.focus_path(field).is_empty());
    assert!(matches!(
        tree.remove(panel),
        Err(WidgetTreeError::InvalidWidgetId)
    ));
}

#[test]
fn set_enabled_toggles_flag() {
    let mut tree = WidgetTree::new();
    let field = tree.insert_root(WidgetKind::Component);
    assert!(tree.get(field).unwrap().is_enabled());
    tree.set_enabled(field, false).unwrap();
    assert!(!tree.get(field).unwrap().is_enabled());
}

#[test]
fn interactive_kinds() {
    assert!(WidgetKind::Component.is_interactive());
    assert!(WidgetKind::InternalFrame.is_interactive());
    assert!(!WidgetKind::Container.is_interactive());
    assert!(!WidgetKind::Window.is_interactive());
}
