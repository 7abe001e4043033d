mod common;

use std::time::{Duration, Instant};

use common::{fruit_select, recording_settings, veg_select, Page};
use dropkick::prelude::*;

#[test]
fn init_builds_panel_mirroring_the_control() {
    let mut page = Page::new(Environment::new());
    let select = page.bound(fruit_select(), Settings::new());
    let instance = page.instance(select);

    assert_eq!(instance.id(), "fruit");
    assert_eq!(page.containers(), vec![instance.container()]);
    assert_eq!(page.doc.element_id(instance.container()), Some("dk_container_fruit"));
    assert_eq!(page.doc.children(page.doc.body())[0], instance.container());
    assert!(page.doc.has_class(instance.container(), "dk_theme_default"));

    assert_eq!(page.label_text(select), "Banana");
    assert_eq!(instance.rows().len(), 3);
    assert_eq!(page.marked_row(select), Some(1));
    assert_eq!(instance.original_index(), Some(1));
    assert_eq!(instance.current_value(), Some("b"));

    let values: Vec<String> = (0..3)
        .map(|row| {
            let anchor = page.row_anchor(select, row);
            page.doc.attr(anchor, classes::VALUE_ATTR).unwrap_or_default().to_string()
        })
        .collect();
    assert_eq!(values, ["a", "b", "c"]);
}

#[test]
fn init_twice_is_a_no_op() {
    let mut page = Page::new(Environment::new());
    let select = page.bound(fruit_select(), Settings::new());
    let container = page.instance(select).container();
    let nodes = page.doc.len();

    let again = page.dk.init(&mut page.doc, select, Settings::new().theme("dark")).unwrap();
    assert_eq!(again.map(WidgetInstance::container), Some(container));
    assert_eq!(page.doc.len(), nodes);
    assert_eq!(page.containers().len(), 1);
    assert_eq!(page.dk.len(), 1);
    assert_eq!(page.instance(select).theme(), "default");
}

#[test]
fn init_rejects_non_selects_and_detached_controls() {
    let mut page = Page::new(Environment::new());
    let body = page.doc.body();
    let div = page.doc.append(body, Element::div()).unwrap();
    assert!(matches!(
        page.dk.init(&mut page.doc, div, Settings::new()),
        Err(DropkickError::NotASelect(n)) if n == div
    ));

    let select = page.add(fruit_select());
    page.doc.remove(select);
    assert!(page.dk.init(&mut page.doc, select, Settings::new()).is_err());
    assert!(page.dk.is_empty());
}

#[test]
fn widget_id_falls_back_to_name_then_generated() {
    let mut page = Page::new(Environment::new());
    let named = page.bound(veg_select(), Settings::new());
    assert_eq!(page.instance(named).id(), "veg");

    let anonymous = page.bound(
        Element::select().child(Element::option("x", "X")),
        Settings::new(),
    );
    assert!(page.instance(anonymous).id().starts_with("dk-"));
}

#[test]
fn toggle_width_comes_from_settings_or_control() {
    let mut page = Page::new(Environment::new());
    let measured = page.bound(fruit_select(), Settings::new());
    // "Banana"/"Cherry" are six columns plus the select's chrome.
    assert_eq!(page.doc.width(page.instance(measured).toggle()), Some(8));

    let fixed = page.bound(veg_select(), Settings::new().width(20));
    assert_eq!(page.doc.width(page.instance(fixed).toggle()), Some(20));
}

#[test]
fn tabindex_is_copied_to_container() {
    let mut page = Page::new(Environment::new());
    let select = page.bound(fruit_select().attr("tabindex", "4"), Settings::new());
    let container = page.instance(select).container();
    assert_eq!(page.doc.attr(container, "tabindex"), Some("4"));
}

#[test]
fn empty_select_binds_with_empty_label() {
    let mut page = Page::new(Environment::new());
    let select = page.bound(Element::select().id("empty"), Settings::new());
    let instance = page.instance(select);
    assert!(instance.rows().is_empty());
    assert_eq!(instance.original_index(), None);
    assert_eq!(page.label_text(select), "");

    page.dk.reset(&mut page.doc);
    assert_eq!(page.label_text(select), "");
}

#[test]
fn control_is_hidden_on_next_tick() {
    let mut page = Page::new(Environment::new());
    assert!(page.doc.has_class(page.doc.root(), classes::FOUC));

    let select = page.bound(fruit_select(), Settings::new());
    assert!(!page.doc.is_hidden(select));
    assert!(page.dk.has_pending_work());

    page.dk.tick(&mut page.doc);
    assert!(page.doc.is_hidden(select));
}

#[test]
fn container_fades_in() {
    let mut page = Page::new(Environment::new());
    let start = Instant::now();
    let select = page.bound(fruit_select(), Settings::new().open_animation_delay_ms(400));
    let container = page.instance(select).container();
    assert!(page.doc.opacity(container) < 0.5);

    page.dk.animate(&mut page.doc, start + Duration::from_secs(1));
    assert_eq!(page.doc.opacity(container), 1.0);
}

#[test]
fn apply_selection_syncs_every_surface() {
    let mut page = Page::new(Environment::new());
    let (settings, calls) = recording_settings();
    let select = page.bound(fruit_select(), settings);

    for (row, (value, text)) in [("a", "Apple"), ("b", "Banana"), ("c", "Cherry")]
        .into_iter()
        .enumerate()
    {
        page.dk.apply_selection(&mut page.doc, select, row, false).unwrap();
        assert_eq!(page.native_value(select).as_deref(), Some(value));
        assert_eq!(page.label_text(select), text);
        assert_eq!(page.instance(select).current_value(), Some(value));
        assert_eq!(page.instance(select).current_label(), text);
    }
    assert_eq!(calls.borrow().len(), 3);
    assert_eq!(calls.borrow()[2], ("c".to_string(), "Cherry".to_string()));
}

#[test]
fn apply_selection_out_of_range_changes_nothing() {
    let mut page = Page::new(Environment::new());
    let (settings, calls) = recording_settings();
    let select = page.bound(fruit_select(), settings);

    page.dk.apply_selection(&mut page.doc, select, 9, false).unwrap();
    assert_eq!(page.native_value(select).as_deref(), Some("b"));
    assert_eq!(page.label_text(select), "Banana");
    assert!(calls.borrow().is_empty());
}

#[test]
fn apply_selection_fires_change_listeners() {
    let mut page = Page::new(Environment::new());
    let select = page.bound(fruit_select(), Settings::new());
    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = std::rc::Rc::clone(&seen);
    page.doc.on_change(select, move |event| {
        sink.borrow_mut().push(event.value.clone());
    });

    page.dk.apply_selection(&mut page.doc, select, 0, true).unwrap();
    assert_eq!(*seen.borrow(), vec![Some("a".to_string())]);
}

#[test]
fn reset_restores_original_selection_without_callbacks() {
    let mut page = Page::new(Environment::new());
    let (settings, calls) = recording_settings();
    let fruit = page.bound(fruit_select(), settings);
    let veg = page.bound(veg_select(), Settings::new());

    page.dk.apply_selection(&mut page.doc, fruit, 2, false).unwrap();
    page.dk.set_current(&mut page.doc, fruit, 2).unwrap();
    page.dk.apply_selection(&mut page.doc, veg, 1, false).unwrap();
    let list = page.instance(fruit).option_list();
    assert_eq!(page.doc.scroll_top(list), 2);
    calls.borrow_mut().clear();

    page.dk.reset(&mut page.doc);

    assert_eq!(page.native_value(fruit).as_deref(), Some("b"));
    assert_eq!(page.label_text(fruit), "Banana");
    assert_eq!(page.marked_row(fruit), Some(1));
    assert_eq!(page.doc.scroll_top(list), 1);
    assert_eq!(page.native_value(veg).as_deref(), Some("k"));
    assert_eq!(page.label_text(veg), "Kale");
    assert!(calls.borrow().is_empty());
}

#[test]
fn theme_swaps_class_and_keeps_value() {
    let mut page = Page::new(Environment::new());
    let select = page.bound(fruit_select(), Settings::new());
    let container = page.instance(select).container();

    page.dk.theme(&mut page.doc, select, "dark").unwrap();
    assert!(page.doc.has_class(container, "dk_theme_dark"));
    assert!(!page.doc.has_class(container, "dk_theme_default"));
    assert_eq!(page.native_value(select).as_deref(), Some("b"));

    page.dk.theme(&mut page.doc, select, "light").unwrap();
    assert!(page.doc.has_class(container, "dk_theme_light"));
    assert!(!page.doc.has_class(container, "dk_theme_dark"));
}

#[test]
fn theme_on_unbound_control_errors() {
    let mut page = Page::new(Environment::new());
    let select = page.add(fruit_select());
    assert!(matches!(
        page.dk.theme(&mut page.doc, select, "dark"),
        Err(DropkickError::NotBound(_))
    ));
}

#[test]
fn initial_theme_comes_from_settings() {
    let mut page = Page::new(Environment::new());
    let select = page.bound(fruit_select(), Settings::new().theme("blue"));
    let container = page.instance(select).container();
    assert!(page.doc.has_class(container, "dk_theme_blue"));
    assert!(!page.doc.has_class(container, "dk_theme_default"));
}

#[test]
fn reload_picks_up_new_options() {
    let mut page = Page::new(Environment::new());
    let select = page.bound(fruit_select(), Settings::new().theme("dark"));
    page.dk.tick(&mut page.doc);
    let old_container = page.instance(select).container();

    page.doc.append(select, Element::option("d", "Date")).unwrap();
    page.dk.reload(&mut page.doc, select).unwrap();

    let instance = page.instance(select);
    assert!(!page.doc.contains(old_container));
    assert_eq!(page.containers(), vec![instance.container()]);
    assert_eq!(instance.rows().len(), 4);
    assert_eq!(instance.theme(), "dark");
    assert_eq!(page.label_text(select), "Banana");
    assert_eq!(page.dk.len(), 1);
    assert_eq!(page.dk.instances().count(), 1);
    // Width is measured from the hidden control as if it were shown.
    assert_eq!(page.doc.width(instance.toggle()), Some(8));
}

#[test]
fn reload_unbound_control_errors() {
    let mut page = Page::new(Environment::new());
    let select = page.add(fruit_select());
    assert!(page.dk.reload(&mut page.doc, select).is_err());
    assert!(page.containers().is_empty());
}

#[test]
fn legacy_environment_binds_nothing() {
    let mut page = Page::new(Environment::new().legacy(true));
    assert!(!page.doc.has_class(page.doc.root(), classes::FOUC));

    let select = page.add(fruit_select());
    let bound = page.dk.init(&mut page.doc, select, Settings::new()).unwrap();
    assert!(bound.is_none());
    assert!(page.dk.is_empty());
    assert!(page.containers().is_empty());

    page.dk.tick(&mut page.doc);
    assert!(!page.doc.is_hidden(select));
    assert!(page.dk.theme(&mut page.doc, select, "dark").is_ok());
    assert!(page.dk.reload(&mut page.doc, select).is_ok());
}

#[test]
fn option_added_before_reload_commits_by_value() {
    let mut page = Page::new(Environment::new());
    let (settings, calls) = recording_settings();
    let select = page.bound(fruit_select(), settings);
    let apple = page.doc.options(select)[0];
    page.doc.insert_before(apple, Element::option("z", "Zucchini")).unwrap();

    page.click(page.row_anchor(select, 0));

    assert_eq!(page.label_text(select), "Apple");
    assert_eq!(page.native_value(select).as_deref(), Some("a"));
    assert_eq!(*calls.borrow(), vec![("a".to_string(), "Apple".to_string())]);
}

#[test]
fn option_removed_before_reload_changes_nothing() {
    let mut page = Page::new(Environment::new());
    let (settings, calls) = recording_settings();
    let select = page.bound(fruit_select(), settings);
    let cherry = page.doc.options(select)[2];
    page.doc.remove(cherry);

    page.dk.apply_selection(&mut page.doc, select, 2, false).unwrap();

    assert_eq!(page.label_text(select), "Banana");
    assert_eq!(page.native_value(select).as_deref(), Some("b"));
    assert_eq!(page.instance(select).current_value(), Some("b"));
    assert!(calls.borrow().is_empty());
}

#[test]
fn duplicate_values_commit_the_chosen_row() {
    let mut page = Page::new(Environment::new());
    let select = page.bound(
        Element::select()
            .id("dupes")
            .child(Element::option("", "Pick one"))
            .child(Element::option("x", "First"))
            .child(Element::option("x", "Second")),
        Settings::new(),
    );

    page.dk.apply_selection(&mut page.doc, select, 2, false).unwrap();
    assert_eq!(page.doc.selected_index(select), Some(2));
    assert_eq!(page.label_text(select), "Second");
}
