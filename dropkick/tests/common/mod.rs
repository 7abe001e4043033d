#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use dropkick::prelude::*;

/// `<select id="fruit">` with Apple / Banana (selected) / Cherry.
pub fn fruit_select() -> Element {
    Element::select()
        .id("fruit")
        .attr("name", "fruit-field")
        .child(Element::option("a", "Apple"))
        .child(Element::option("b", "Banana").selected(true))
        .child(Element::option("c", "Cherry"))
}

pub fn veg_select() -> Element {
    Element::select()
        .attr("name", "veg")
        .child(Element::option("k", "Kale"))
        .child(Element::option("l", "Leek"))
}

pub struct Page {
    pub doc: Document,
    pub dk: Dropkick,
}

impl Page {
    pub fn new(env: Environment) -> Self {
        let mut doc = Document::new();
        let dk = Dropkick::new(&mut doc, env);
        Self { doc, dk }
    }

    pub fn add(&mut self, select: Element) -> NodeId {
        let body = self.doc.body();
        self.doc.append(body, select).unwrap()
    }

    /// Add and bind a select, returning the control.
    pub fn bound(&mut self, select: Element, settings: Settings) -> NodeId {
        let control = self.add(select);
        self.dk.init(&mut self.doc, control, settings).unwrap();
        control
    }

    pub fn instance(&self, control: NodeId) -> &WidgetInstance {
        self.dk.instance(control).unwrap()
    }

    pub fn send(&mut self, event: Event) -> EventOutcome {
        self.dk.handle_event(&mut self.doc, &event)
    }

    pub fn key(&mut self, key: Key) -> EventOutcome {
        self.send(Event::key(key))
    }

    pub fn click(&mut self, target: NodeId) -> EventOutcome {
        self.send(Event::Click { target })
    }

    pub fn focus(&mut self, control: NodeId) {
        let container = self.instance(control).container();
        self.send(Event::Focus { target: container });
    }

    pub fn is_open(&self, control: NodeId) -> bool {
        self.instance(control).is_open(&self.doc)
    }

    /// Anchor inside option row `row`.
    pub fn row_anchor(&self, control: NodeId, row: usize) -> NodeId {
        let li = self.instance(control).rows()[row];
        self.doc.children(li)[0]
    }

    pub fn label_text(&self, control: NodeId) -> String {
        self.doc.text(self.instance(control).label_node())
    }

    pub fn native_value(&self, control: NodeId) -> Option<String> {
        self.doc.control_value(control)
    }

    /// Index of the row carrying the current-row marker.
    pub fn marked_row(&self, control: NodeId) -> Option<usize> {
        self.instance(control)
            .rows()
            .iter()
            .position(|&r| self.doc.has_class(r, classes::OPTION_CURRENT))
    }

    pub fn containers(&self) -> Vec<NodeId> {
        self.doc.query(".dk_container").unwrap()
    }
}

pub type Calls = Rc<RefCell<Vec<(String, String)>>>;

/// Settings whose change callback records `(value, label)` pairs.
pub fn recording_settings() -> (Settings, Calls) {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let settings = Settings::new().on_change(move |_control, value, label| {
        sink.borrow_mut().push((value.to_string(), label.to_string()));
    });
    (settings, calls)
}
