//! Capabilities of the host environment that change widget behaviour.

/// Which pointer event commits an option row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OptionTrigger {
    #[default]
    Click,
    /// Older engines lose the click once focus moves, so rows commit on
    /// press-down instead.
    PointerDown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Environment {
    /// Touch input is available; toggles mark their widget touch-capable.
    pub touch: bool,
    /// Engine too old to support the widget. Every operation is a no-op.
    pub legacy: bool,
    pub option_trigger: OptionTrigger,
}

/// Oldest Internet Explorer major version the widget supports.
const MIN_MSIE_VERSION: f32 = 7.0;

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    pub fn legacy(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }

    pub fn option_trigger(mut self, trigger: OptionTrigger) -> Self {
        self.option_trigger = trigger;
        self
    }

    /// Derive the environment from a user-agent string.
    ///
    /// Internet Explorer commits rows on press-down; versions before 7 are
    /// treated as legacy.
    pub fn from_user_agent(user_agent: &str, touch: bool) -> Self {
        let msie = msie_version(user_agent);
        Self {
            touch,
            legacy: msie.is_some_and(|v| v < MIN_MSIE_VERSION),
            option_trigger: if msie.is_some() {
                OptionTrigger::PointerDown
            } else {
                OptionTrigger::Click
            },
        }
    }
}

fn msie_version(user_agent: &str) -> Option<f32> {
    let start = user_agent.find("MSIE ")? + "MSIE ".len();
    let rest = &user_agent[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    let version = &rest[..end];
    // "7.0.1" parses as 7.0, like parseFloat.
    let mut parts = version.splitn(3, '.');
    let major = parts.next().filter(|p| !p.is_empty())?;
    let number = match parts.next() {
        Some(minor) if !minor.is_empty() => format!("{major}.{minor}"),
        _ => major.to_string(),
    };
    number.parse().ok()
}
