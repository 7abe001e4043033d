//! Event routing.
//!
//! One manager-level entry point resolves which widget (and which part of
//! it) an event hit by walking up the document, then hands the event to a
//! handler object for that kind of interaction.

use std::time::Instant;

use kickdom::{Document, Event, EventOutcome, Key, NodeId};

use crate::classes;
use crate::environment::OptionTrigger;
use crate::keyboard::{self, NavCommand};
use crate::manager::Dropkick;
use crate::panel;
use crate::selection;

/// Where a pointer event landed relative to the bound widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Toggle(NodeId),
    Row { control: NodeId, row: usize },
    /// Inside a container but not on anything interactive.
    Inside,
    Outside,
}

/// Handles one kind of interaction for one widget.
trait Interaction {
    fn name(&self) -> &'static str;

    fn handle(&self, dk: &mut Dropkick, doc: &mut Document, outcome: &mut EventOutcome);
}

/// Click on a toggle flips its panel.
struct ToggleClick {
    control: NodeId,
}

impl Interaction for ToggleClick {
    fn name(&self) -> &'static str {
        "toggle-click"
    }

    fn handle(&self, dk: &mut Dropkick, doc: &mut Document, outcome: &mut EventOutcome) {
        let Some(instance) = dk.instances.get(&self.control) else {
            return;
        };
        let (container, option_list) = (instance.parts.container, instance.parts.option_list);
        let open = panel::toggle(doc, instance);

        if dk.env.touch {
            doc.add_class(container, classes::TOUCH);
            doc.add_class(option_list, classes::TOUCH_SCROLL);
        }
        if open {
            dk.close_others(doc, self.control);
        }

        outcome.prevent_default();
        outcome.stop_propagation();
    }
}

/// Click (or press-down) on an option row commits it.
struct RowPick {
    control: NodeId,
    row: usize,
}

impl Interaction for RowPick {
    fn name(&self) -> &'static str {
        "row-pick"
    }

    fn handle(&self, dk: &mut Dropkick, doc: &mut Document, outcome: &mut EventOutcome) {
        let Dropkick {
            instances,
            animations,
            ..
        } = dk;
        let Some(instance) = instances.get_mut(&self.control) else {
            return;
        };
        panel::close(doc, instance);
        selection::apply_selection(doc, instance, self.row, false);
        panel::set_current(doc, animations, instance, self.row, Instant::now());

        outcome.prevent_default();
        outcome.stop_propagation();
    }
}

/// Click outside every widget closes open panels.
struct OutsideClick;

impl Interaction for OutsideClick {
    fn name(&self) -> &'static str {
        "outside-click"
    }

    fn handle(&self, dk: &mut Dropkick, doc: &mut Document, _outcome: &mut EventOutcome) {
        dk.close_all(doc);
    }
}

/// Focus and blur on a widget container.
struct FocusChange {
    control: NodeId,
    focused: bool,
}

impl Interaction for FocusChange {
    fn name(&self) -> &'static str {
        if self.focused { "focus" } else { "blur" }
    }

    fn handle(&self, dk: &mut Dropkick, doc: &mut Document, _outcome: &mut EventOutcome) {
        let Some(instance) = dk.instances.get(&self.control) else {
            return;
        };
        let container = instance.parts.container;
        if self.focused {
            doc.add_class(container, classes::FOCUS);
        } else {
            panel::close(doc, instance);
            doc.remove_class(container, classes::FOCUS);
        }
    }
}

/// Key press routed to the open widget, else the focused one.
struct KeyboardNav {
    key: Key,
}

impl Interaction for KeyboardNav {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn handle(&self, dk: &mut Dropkick, doc: &mut Document, outcome: &mut EventOutcome) {
        let Some(control) = dk.keyboard_target(doc) else {
            return;
        };
        let Some(instance) = dk.instances.get(&control) else {
            return;
        };
        let plan = keyboard::plan(self.key, instance.is_open(doc));
        if plan.prevent_default {
            outcome.prevent_default();
        }

        match plan.command {
            Some(NavCommand::Open) => dk.open_exclusive(doc, control),
            Some(NavCommand::Commit) => dk.commit_current(doc, control),
            Some(command @ (NavCommand::Previous | NavCommand::Next)) => {
                dk.step_current(doc, control, command)
            }
            None => {}
        }
    }
}

impl Dropkick {
    /// Feed one input event to the widgets.
    ///
    /// The returned outcome tells the host whether to suppress the event's
    /// default action and whether it should keep propagating.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event) -> EventOutcome {
        let mut outcome = EventOutcome::new();
        if self.env.legacy {
            return outcome;
        }
        if let Some(handler) = self.route(doc, event) {
            log::trace!("routing {event:?} to {}", handler.name());
            handler.handle(self, doc, &mut outcome);
        }
        outcome
    }

    fn route(&self, doc: &Document, event: &Event) -> Option<Box<dyn Interaction>> {
        let trigger = self.env.option_trigger;
        match *event {
            Event::Click { target } => match self.hit(doc, target) {
                Hit::Toggle(control) => Some(Box::new(ToggleClick { control })),
                Hit::Row { control, row } if trigger == OptionTrigger::Click => {
                    Some(Box::new(RowPick { control, row }))
                }
                Hit::Outside => Some(Box::new(OutsideClick)),
                Hit::Row { .. } | Hit::Inside => None,
            },
            Event::PointerDown { target } => match self.hit(doc, target) {
                Hit::Row { control, row } if trigger == OptionTrigger::PointerDown => {
                    Some(Box::new(RowPick { control, row }))
                }
                _ => None,
            },
            Event::KeyDown { key, .. } => Some(Box::new(KeyboardNav { key })),
            Event::Focus { target } => self
                .container_owner(target)
                .map(|control| Box::new(FocusChange { control, focused: true }) as Box<dyn Interaction>),
            Event::Blur { target } => self
                .container_owner(target)
                .map(|control| Box::new(FocusChange { control, focused: false }) as Box<dyn Interaction>),
        }
    }

    /// Resolve a pointer target by walking up to its widget container.
    fn hit(&self, doc: &Document, target: NodeId) -> Hit {
        if doc.closest_class(target, classes::CONTAINER).is_none() {
            return Hit::Outside;
        }
        let Some(instance) = self.instance_for_node(doc, target) else {
            return Hit::Inside;
        };
        if doc.closest_class(target, classes::TOGGLE).is_some() {
            return Hit::Toggle(instance.control);
        }
        let row = doc
            .closest(target, |d, n| d.attr(n, classes::VALUE_ATTR).is_some())
            .and_then(|anchor| doc.parent(anchor))
            .and_then(|li| instance.row_of(li));
        match row {
            Some(row) => Hit::Row {
                control: instance.control,
                row,
            },
            None => Hit::Inside,
        }
    }

    /// Control whose container is exactly `node`.
    fn container_owner(&self, node: NodeId) -> Option<NodeId> {
        self.instances
            .values()
            .find(|i| i.parts.container == node)
            .map(|i| i.control)
    }
}
