use a11y_tabs::app::{BASE_PAGE, VERTICAL_PAGE};
use a11y_tabs::dom::{Document, ElementId, RenderTree};
use a11y_tabs::event::{Key, ListenerId};
use a11y_tabs::tabs::{Orientation, TabController};
use a11y_tabs::{TabSettings, TabsError};

const TABLIST: &str = ".tab-list";
const PANELS: &str = r#"[role="tabpanel"]"#;

fn build(markup: &str, settings: &TabSettings) -> (Document, TabController) {
    let mut doc = Document::parse(markup).unwrap();
    let controller = TabController::new(&mut doc, ListenerId(0), TABLIST, PANELS, settings).unwrap();
    (doc, controller)
}

fn trigger(controller: &TabController, index: usize) -> ElementId {
    controller.triggers()[index].element
}

fn panel(doc: &Document, id: &str) -> ElementId {
    doc.get_element_by_id(id).unwrap()
}

/// Exactly one selected trigger, exactly one shown panel, and they belong together
fn assert_single_selection(doc: &Document, controller: &TabController, expected: usize) {
    let selected: Vec<usize> = (0..controller.len())
        .filter(|&i| doc.attribute(trigger(controller, i), "aria-selected") == Some("true"))
        .collect();
    assert_eq!(selected, vec![expected]);

    for i in 0..controller.len() {
        let el = trigger(controller, i);
        assert_eq!(doc.has_class(el, "active"), i == expected, "class on trigger {}", i);
        if i == expected {
            assert_eq!(doc.attribute(el, "tabindex"), None);
        } else {
            assert_eq!(doc.attribute(el, "tabindex"), Some("-1"));
            assert_eq!(doc.attribute(el, "aria-selected"), Some("false"));
        }
    }

    let shown: Vec<ElementId> = controller
        .panels()
        .iter()
        .copied()
        .filter(|&p| !doc.is_hidden(p))
        .collect();
    assert_eq!(shown.len(), 1);
    assert_eq!(
        doc.attribute(shown[0], "id"),
        Some(controller.triggers()[expected].controls.as_str())
    );
    for &p in controller.panels() {
        let expanded = if p == shown[0] { "true" } else { "false" };
        assert_eq!(doc.attribute(p, "aria-expanded"), Some(expanded));
        assert_eq!(doc.attribute(p, "tabindex"), Some("0"));
    }
}

#[test]
fn test_basic_activation() {
    let (doc, controller) = build(BASE_PAGE, &TabSettings::default());

    assert_eq!(controller.len(), 3);
    assert_eq!(controller.orientation(), Orientation::Horizontal);
    assert_eq!(controller.selected_index(), 0);
    assert_eq!(controller.active_index(), 0);
    assert_single_selection(&doc, &controller, 0);
    assert!(doc.has_attribute(panel(&doc, "panel-2"), "hidden"));
    assert!(doc.has_attribute(panel(&doc, "panel-3"), "hidden"));
    // construction never moves focus
    assert_eq!(doc.focused(), None);
}

#[test]
fn test_initial_index() {
    let (doc, controller) = build(BASE_PAGE, &TabSettings::new().with_initial_index(2));
    assert_single_selection(&doc, &controller, 2);
    assert_eq!(controller.active_index(), 2);
    assert!(!doc.is_hidden(panel(&doc, "panel-3")));
}

#[test]
fn test_vertical_orientation_is_read_from_markup() {
    let (_, controller) = build(VERTICAL_PAGE, &TabSettings::default());
    assert_eq!(controller.orientation(), Orientation::Vertical);
}

#[test]
fn test_custom_selected_class() {
    let (mut doc, mut controller) =
        build(BASE_PAGE, &TabSettings::new().with_selected_class("is-current"));
    assert!(doc.has_class(trigger(&controller, 0), "is-current"));
    assert!(!doc.has_class(trigger(&controller, 0), "active"));

    controller.select_index(&mut doc, 1).unwrap();
    assert!(!doc.has_class(trigger(&controller, 0), "is-current"));
    assert!(doc.has_class(trigger(&controller, 1), "is-current"));
    // other classes survive the toggling
    assert!(doc.has_class(trigger(&controller, 0), "tab-button"));
}

#[test]
fn test_select_tab_does_not_move_focus() {
    let (mut doc, mut controller) = build(BASE_PAGE, &TabSettings::default());
    let t2 = trigger(&controller, 2);

    controller.select_tab(&mut doc, t2).unwrap();

    assert_single_selection(&doc, &controller, 2);
    assert_eq!(controller.selected_index(), 2);
    assert_eq!(controller.active_index(), 2);
    assert_eq!(doc.focused(), None);
}

#[test]
fn test_select_is_idempotent() {
    let (mut doc, mut controller) = build(BASE_PAGE, &TabSettings::default());
    let t1 = trigger(&controller, 1);

    controller.select_tab(&mut doc, t1).unwrap();
    let once = doc.clone();
    controller.select_tab(&mut doc, t1).unwrap();

    for el in once.descendants(once.root()) {
        let before: Vec<_> = once.element(el).unwrap().attributes().collect();
        let after: Vec<_> = doc.element(el).unwrap().attributes().collect();
        assert_eq!(before, after, "attributes of {}", el);
    }
}

#[test]
fn test_select_unknown_trigger() {
    let (mut doc, mut controller) = build(BASE_PAGE, &TabSettings::default());
    let p1 = panel(&doc, "panel-1");

    let result = controller.select_tab(&mut doc, p1);
    assert!(matches!(result, Err(TabsError::UnknownTrigger(_))));
    assert!(matches!(
        controller.select_index(&mut doc, 3),
        Err(TabsError::IndexOutOfRange { index: 3, len: 3 })
    ));
    assert_single_selection(&doc, &controller, 0);
}

#[test]
fn test_arrow_keys_roam_without_selecting() {
    let (mut doc, mut controller) = build(BASE_PAGE, &TabSettings::default());
    let t0 = trigger(&controller, 0);

    let outcome = controller
        .handle_keydown(&mut doc, t0, &Key::ArrowRight)
        .unwrap();

    assert!(outcome.handled);
    assert!(outcome.default_prevented);
    assert_eq!(controller.active_index(), 1);
    assert_eq!(doc.focused(), Some(trigger(&controller, 1)));
    assert_single_selection(&doc, &controller, 0);
}

#[test]
fn test_unmapped_keys_are_left_alone() {
    let (mut doc, mut controller) = build(BASE_PAGE, &TabSettings::default());
    let t0 = trigger(&controller, 0);

    for key in [Key::ArrowUp, Key::ArrowDown, Key::Tab, Key::Char('a'), Key::Escape] {
        let outcome = controller.handle_keydown(&mut doc, t0, &key).unwrap();
        assert!(!outcome.handled, "{} should not be handled", key);
        assert!(!outcome.default_prevented);
    }
    assert_eq!(doc.focused(), None);
    assert_eq!(controller.active_index(), 0);
}

#[test]
fn test_events_on_foreign_elements_are_ignored() {
    let (mut doc, mut controller) = build(BASE_PAGE, &TabSettings::default());
    let p2 = panel(&doc, "panel-2");

    assert!(!controller.handle_click(&mut doc, p2).unwrap().handled);
    assert!(!controller
        .handle_keydown(&mut doc, p2, &Key::Enter)
        .unwrap()
        .handled);
    assert_single_selection(&doc, &controller, 0);
}

#[test]
fn test_click_selects_and_focuses() {
    let (mut doc, mut controller) = build(BASE_PAGE, &TabSettings::default());
    let t2 = trigger(&controller, 2);

    let outcome = controller.handle_click(&mut doc, t2).unwrap();

    assert!(outcome.handled);
    assert!(!outcome.default_prevented);
    assert_single_selection(&doc, &controller, 2);
    assert_eq!(doc.focused(), Some(t2));
}

#[test]
fn test_panel_lookup() {
    let (doc, controller) = build(BASE_PAGE, &TabSettings::default());
    assert_eq!(controller.panel_for(1), Some(panel(&doc, "panel-2")));
    assert_eq!(controller.panel_for(5), None);
    assert_eq!(controller.trigger_index(trigger(&controller, 2)), Some(2));
}

#[test]
fn test_dispose_detaches_listeners() {
    let (mut doc, controller) = build(BASE_PAGE, &TabSettings::default());
    let t0 = trigger(&controller, 0);
    assert_eq!(doc.listeners(t0, a11y_tabs::event::EventType::Click), vec![ListenerId(0)]);

    let removed = controller.dispose(&mut doc);

    assert_eq!(removed, 6);
    assert!(doc.listeners(t0, a11y_tabs::event::EventType::Click).is_empty());
    assert!(doc.listeners(t0, a11y_tabs::event::EventType::KeyDown).is_empty());
    // state is left as it was
    assert_eq!(doc.attribute(t0, "aria-selected"), Some("true"));
}

fn construction_error(markup: &str, tablist: &str, settings: &TabSettings) -> (Document, TabsError) {
    let mut doc = Document::parse(markup).unwrap();
    let err = TabController::new(&mut doc, ListenerId(0), tablist, PANELS, settings).unwrap_err();
    (doc, err)
}

#[test]
fn test_missing_tablist() {
    let (_, err) = construction_error(BASE_PAGE, "#no-such-list", &TabSettings::default());
    assert!(matches!(err, TabsError::MissingTablist(ref s) if s == "#no-such-list"));
    assert!(err.is_configuration());
}

#[test]
fn test_empty_tablist() {
    let markup = r#"<div class="tab-list" role="tablist"></div><div id="p" role="tabpanel"></div>"#;
    let (_, err) = construction_error(markup, TABLIST, &TabSettings::default());
    assert!(matches!(err, TabsError::NoTriggers(_)));
}

#[test]
fn test_trigger_without_controls() {
    let markup = r#"
        <div class="tab-list" role="tablist">
            <button role="tab" aria-controls="p1">One</button>
            <button role="tab">Two</button>
        </div>
        <div id="p1" role="tabpanel">One</div>"#;
    let (_, err) = construction_error(markup, TABLIST, &TabSettings::default());
    assert!(matches!(err, TabsError::MissingControls { index: 1 }));
}

#[test]
fn test_trigger_with_unknown_panel() {
    let markup = r#"
        <div class="tab-list" role="tablist">
            <button role="tab" aria-controls="p1">One</button>
            <button role="tab" aria-controls="p9">Two</button>
        </div>
        <div id="p1" role="tabpanel">One</div>
        <div id="p9">Not a panel</div>"#;
    let (_, err) = construction_error(markup, TABLIST, &TabSettings::default());
    match err {
        TabsError::UnknownPanel { index, panel_id } => {
            assert_eq!(index, 1);
            assert_eq!(panel_id, "p9");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_initial_index_out_of_range_leaves_markup_untouched() {
    let (doc, err) = construction_error(
        BASE_PAGE,
        TABLIST,
        &TabSettings::new().with_initial_index(3),
    );
    assert!(matches!(err, TabsError::IndexOutOfRange { index: 3, len: 3 }));
    for el in doc.descendants(doc.root()) {
        assert!(!doc.has_attribute(el, "aria-selected"));
        assert!(!doc.has_attribute(el, "hidden"));
    }
}

#[test]
fn test_bad_selector() {
    let (_, err) = construction_error(BASE_PAGE, "div[role] >", &TabSettings::default());
    assert!(matches!(err, TabsError::Selector { .. }));
}

#[test]
fn test_triggers_come_from_the_first_matching_tablist() {
    let markup = r#"
        <div class="tab-list" role="tablist">
            <button role="tab" aria-controls="a1">A1</button>
            <button role="tab" aria-controls="a2">A2</button>
        </div>
        <div class="tab-list" role="tablist">
            <button id="b1" role="tab" aria-controls="b1-panel">B1</button>
        </div>
        <div id="a1" role="tabpanel">a1</div>
        <div id="a2" role="tabpanel">a2</div>
        <div id="b1-panel" role="tabpanel">b1</div>"#;
    let (doc, controller) = build(markup, &TabSettings::default());
    let first_list = doc.query_selector_all(TABLIST).unwrap()[0];
    let b1 = doc.get_element_by_id("b1").unwrap();

    assert_eq!(controller.tablist(), first_list);
    assert_eq!(controller.len(), 2);
    assert_eq!(controller.trigger_index(b1), None);
    assert!(!doc.has_attribute(b1, "aria-selected"));
    assert!(doc.listeners(b1, a11y_tabs::event::EventType::Click).is_empty());
    // every matching panel is still normalised
    assert!(doc.is_hidden(panel(&doc, "b1-panel")));
}

#[test]
fn test_structural_tablist_selector() {
    let markup = r#"
        <section>
            <div role="tablist"><button role="tab" aria-controls="x">X</button></div>
            <div role="tablist"><button role="tab" aria-controls="y">Y</button></div>
        </section>
        <div id="x" role="tabpanel">x</div>
        <div id="y" role="tabpanel">y</div>"#;
    let mut doc = Document::parse(markup).unwrap();
    let controller = TabController::new(
        &mut doc,
        ListenerId(0),
        r#"[role~="tablist"]:last-of-type"#,
        PANELS,
        &TabSettings::default(),
    )
    .unwrap();

    assert_eq!(doc.text_content(trigger(&controller, 0)), "Y");
    assert!(!doc.is_hidden(panel(&doc, "y")));
    assert!(doc.is_hidden(panel(&doc, "x")));
}
