use crossterm::event::KeyCode;
use std::fmt;

/// A key as seen by keydown listeners
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Enter,
    Space,
    Tab,
    BackTab,
    Escape,
    Char(char),
    Other(String),
}

impl From<&str> for Key {
    /// Maps DOM `KeyboardEvent.key` names, including the legacy Edge/IE spellings
    fn from(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Home" | "ArrowHome" => Key::Home,
            "End" | "ArrowEnd" => Key::End,
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            "Tab" => Key::Tab,
            "BackTab" => Key::BackTab,
            "Escape" | "Esc" => Key::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other(name.to_string()),
                }
            }
        }
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Left => Key::ArrowLeft,
            KeyCode::Right => Key::ArrowRight,
            KeyCode::Up => Key::ArrowUp,
            KeyCode::Down => Key::ArrowDown,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Enter => Key::Enter,
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            other => Key::Other(format!("{:?}", other)),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Other(name) => f.write_str(name),
            named => write!(f, "{:?}", named),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
}

/// Handle under which a controller registers its listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub usize);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happened while an event was dispatched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// At least one listener acted on the event
    pub handled: bool,
    /// The host's default action for the event must be skipped
    pub default_prevented: bool,
}

impl DispatchOutcome {
    pub const IGNORED: DispatchOutcome = DispatchOutcome {
        handled: false,
        default_prevented: false,
    };

    pub fn handled() -> Self {
        Self {
            handled: true,
            default_prevented: false,
        }
    }

    pub fn prevented() -> Self {
        Self {
            handled: true,
            default_prevented: true,
        }
    }

    pub fn merge(self, other: DispatchOutcome) -> Self {
        Self {
            handled: self.handled || other.handled,
            default_prevented: self.default_prevented || other.default_prevented,
        }
    }
}
