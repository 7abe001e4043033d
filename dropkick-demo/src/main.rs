mod render;
mod terminal;

use std::cell::RefCell;
use std::fs::File;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers};
use dropkick::prelude::*;
use serde_json::json;
use simplelog::{Config, LevelFilter, WriteLogger};

use terminal::TerminalGuard;

const THEMES: [&str; 3] = ["default", "dark", "light"];

struct Demo {
    doc: Document,
    dk: Dropkick,
    changes: Rc<RefCell<Vec<String>>>,
    focused: Option<usize>,
    theme: usize,
    added: usize,
}

impl Demo {
    fn new() -> Self {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append(
            body,
            Element::select()
                .id("fruit")
                .child(Element::option("a", "Apple"))
                .child(Element::option("b", "Banana").selected(true))
                .child(Element::option("c", "Cherry")),
        );
        doc.append(
            body,
            Element::select()
                .attr("name", "size")
                .child(Element::option("s", "Small"))
                .child(Element::option("m", "Medium"))
                .child(Element::option("l", "Large")),
        );

        let changes = Rc::new(RefCell::new(Vec::new()));
        let mut dk = Dropkick::new(&mut doc, Environment::new());
        dk.bind(&mut doc, "#fruit", &[json!({ "width": 12 })]);

        let sink = Rc::clone(&changes);
        let settings = Settings::new()
            .theme("dark")
            .open_animation_delay_ms(300)
            .on_change(move |control, value, label| {
                sink.borrow_mut().push(format!("{control}: {value} ({label})"));
            });
        if let Ok(controls) = doc.query("select") {
            for control in controls {
                if dk.is_bound(control) {
                    continue;
                }
                if let Err(err) = dk.init(&mut doc, control, settings.clone()) {
                    log::warn!("binding {control}: {err}");
                }
            }
        }

        Self {
            doc,
            dk,
            changes,
            focused: None,
            theme: 0,
            added: 0,
        }
    }

    fn controls(&self) -> Vec<NodeId> {
        self.dk.instances().map(WidgetInstance::control).collect()
    }

    fn container(&self, n: usize) -> Option<NodeId> {
        self.controls()
            .get(n)
            .and_then(|c| self.dk.instance(*c))
            .map(WidgetInstance::container)
    }

    /// Move focus like a browser would after the widget saw the Tab.
    fn cycle_focus(&mut self) {
        if let Some(container) = self.focused.and_then(|n| self.container(n)) {
            self.dk.handle_event(&mut self.doc, &Event::Blur { target: container });
        }
        let count = self.controls().len();
        if count == 0 {
            return;
        }
        let next = self.focused.map_or(0, |n| (n + 1) % count);
        self.focused = Some(next);
        if let Some(container) = self.container(next) {
            self.dk.handle_event(&mut self.doc, &Event::Focus { target: container });
        }
    }

    fn click_toggle(&mut self, n: usize) {
        let toggle = self
            .controls()
            .get(n)
            .and_then(|c| self.dk.instance(*c))
            .map(WidgetInstance::toggle);
        if let Some(target) = toggle {
            self.dk.handle_event(&mut self.doc, &Event::Click { target });
        }
    }

    fn click_outside(&mut self) {
        let target = self.doc.body();
        self.dk.handle_event(&mut self.doc, &Event::Click { target });
    }

    fn next_theme(&mut self) {
        self.theme = (self.theme + 1) % THEMES.len();
        self.dk
            .bind(&mut self.doc, "select", &[json!("theme"), json!(THEMES[self.theme])]);
    }

    fn add_option(&mut self) {
        let Some(fruit) = self.doc.find_by_id("fruit") else {
            return;
        };
        self.added += 1;
        let value = format!("x{}", self.added);
        let text = format!("Extra {}", self.added);
        self.doc.append(fruit, Element::option(value, text));
        self.dk.bind(&mut self.doc, "#fruit", &[json!("reload")]);
    }

    fn handle_key(&mut self, event: crossterm::event::KeyEvent) -> bool {
        if event.kind != KeyEventKind::Press {
            return true;
        }
        match event.code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Char('1') => self.click_toggle(0),
            KeyCode::Char('2') => self.click_toggle(1),
            KeyCode::Char('o') => self.click_outside(),
            KeyCode::Char('t') => self.next_theme(),
            KeyCode::Char('a') => self.add_option(),
            KeyCode::Char('r') => {
                self.dk.bind(&mut self.doc, "select", &[json!("reset")]);
            }
            _ => {
                let outcome = self.dk.handle_event(&mut self.doc, &Event::from(event));
                if matches!(event.code, KeyCode::Tab) && !outcome.is_default_prevented() {
                    self.cycle_focus();
                }
            }
        }
        true
    }
}

fn main() {
    let log_file = File::create("dropkick-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut demo = Demo::new();
    let mut terminal = TerminalGuard::new().expect("Failed to set up terminal");

    loop {
        demo.dk.tick(&mut demo.doc);
        demo.dk.animate(&mut demo.doc, Instant::now());

        let lines = render::screen(&demo.doc, &demo.dk, &demo.changes.borrow());
        if let Err(e) = terminal.draw(&lines) {
            log::error!("draw failed: {e}");
            break;
        }

        let timeout = if demo.dk.has_pending_work() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(250)
        };
        let events = match terminal.poll(timeout) {
            Ok(events) => events,
            Err(e) => {
                log::error!("input failed: {e}");
                break;
            }
        };
        let running = events.into_iter().all(|event| match event {
            CrosstermEvent::Key(key) => demo.handle_key(key),
            _ => true,
        });
        if !running {
            break;
        }
    }
}
