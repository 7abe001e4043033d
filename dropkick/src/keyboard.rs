//! Keyboard policy: which key does what, given whether the panel is open.

use kickdom::Key;

/// Action the navigator asks the controllers to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Ensure the panel is open.
    Open,
    /// Commit the current row and close the panel.
    Commit,
    /// Highlight the previous row, wrapping to the last.
    Previous,
    /// Highlight the next row, wrapping to the first.
    Next,
}

/// Outcome of running a key through the policy table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavPlan {
    pub command: Option<NavCommand>,
    pub prevent_default: bool,
}

impl NavPlan {
    fn run(command: NavCommand) -> Self {
        Self {
            command: Some(command),
            prevent_default: true,
        }
    }
}

/// Look up `key` in the policy table.
///
/// | Key       | closed | open     |
/// |-----------|--------|----------|
/// | Enter     | Open   | Commit   |
/// | Tab       | -      | Commit   |
/// | ArrowUp   | Open   | Previous |
/// | ArrowDown | Open   | Next     |
///
/// Tab never prevents the default focus move; every other recognised key
/// does. Unrecognised keys are left alone.
pub fn plan(key: Key, open: bool) -> NavPlan {
    match (key, open) {
        (Key::Enter, false) | (Key::Up, false) | (Key::Down, false) => {
            NavPlan::run(NavCommand::Open)
        }
        (Key::Enter, true) => NavPlan::run(NavCommand::Commit),
        (Key::Up, true) => NavPlan::run(NavCommand::Previous),
        (Key::Down, true) => NavPlan::run(NavCommand::Next),
        (Key::Tab | Key::BackTab, true) => NavPlan {
            command: Some(NavCommand::Commit),
            prevent_default: false,
        },
        _ => NavPlan::default(),
    }
}

/// Row before `current`, wrapping from the first row (or no row) to the last.
pub fn wrap_previous(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        Some(i) if i > 0 && i < len => Some(i - 1),
        _ => Some(len - 1),
    }
}

/// Row after `current`, wrapping from the last row (or no row) to the first.
pub fn wrap_next(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        Some(i) if i + 1 < len => Some(i + 1),
        _ => Some(0),
    }
}
