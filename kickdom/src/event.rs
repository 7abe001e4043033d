use crate::document::NodeId;

/// Input events delivered to a document, targeted at the node they hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Primary-button click.
    Click { target: NodeId },
    /// Pointer pressed, before the click completes.
    PointerDown { target: NodeId },
    /// Key press. Keyboard events are not targeted; listeners decide who
    /// receives them.
    KeyDown { key: Key, modifiers: Modifiers },
    /// Element gained focus
    Focus { target: NodeId },
    /// Element lost focus
    Blur { target: NodeId },
}

impl Event {
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Event::Click { target }
            | Event::PointerDown { target }
            | Event::Focus { target }
            | Event::Blur { target } => Some(*target),
            Event::KeyDown { .. } => None,
        }
    }

    pub fn key(key: Key) -> Self {
        Event::KeyDown {
            key,
            modifiers: Modifiers::default(),
        }
    }
}

/// What listeners decided about an event after dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl EventOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'),
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::KeyEvent> for Event {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        Event::KeyDown {
            key: event.code.into(),
            modifiers: event.modifiers.into(),
        }
    }
}
