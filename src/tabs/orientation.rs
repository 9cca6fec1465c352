use crate::event::Key;
use std::fmt;

/// Axis along which arrow keys roam between triggers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// What a handled key does to the trigger cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Previous,
    Next,
    First,
    Last,
    /// Select the focused trigger and show its panel
    Activate,
}

const HORIZONTAL_KEYS: &[(Key, NavAction)] = &[
    (Key::ArrowLeft, NavAction::Previous),
    (Key::ArrowRight, NavAction::Next),
    (Key::Home, NavAction::First),
    (Key::End, NavAction::Last),
    (Key::Enter, NavAction::Activate),
    (Key::Space, NavAction::Activate),
];

const VERTICAL_KEYS: &[(Key, NavAction)] = &[
    (Key::ArrowUp, NavAction::Previous),
    (Key::ArrowDown, NavAction::Next),
    (Key::Home, NavAction::First),
    (Key::End, NavAction::Last),
    (Key::Enter, NavAction::Activate),
    (Key::Space, NavAction::Activate),
];

impl Orientation {
    /// Reads an `aria-orientation` value; only `vertical` switches axis
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("vertical") => Orientation::Vertical,
            _ => Orientation::Horizontal,
        }
    }

    pub fn key_map(self) -> &'static [(Key, NavAction)] {
        match self {
            Orientation::Horizontal => HORIZONTAL_KEYS,
            Orientation::Vertical => VERTICAL_KEYS,
        }
    }

    /// `None` leaves the key to the host's default behaviour
    pub fn action_for(self, key: &Key) -> Option<NavAction> {
        self.key_map()
            .iter()
            .find(|(mapped, _)| mapped == key)
            .map(|&(_, action)| action)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attribute() {
        assert_eq!(Orientation::from_attribute(None), Orientation::Horizontal);
        assert_eq!(
            Orientation::from_attribute(Some("horizontal")),
            Orientation::Horizontal
        );
        assert_eq!(
            Orientation::from_attribute(Some("vertical")),
            Orientation::Vertical
        );
        assert_eq!(
            Orientation::from_attribute(Some("sideways")),
            Orientation::Horizontal
        );
    }

    #[test]
    fn test_axis_gating() {
        let h = Orientation::Horizontal;
        assert_eq!(h.action_for(&Key::ArrowRight), Some(NavAction::Next));
        assert_eq!(h.action_for(&Key::ArrowLeft), Some(NavAction::Previous));
        assert_eq!(h.action_for(&Key::ArrowUp), None);
        assert_eq!(h.action_for(&Key::ArrowDown), None);

        let v = Orientation::Vertical;
        assert_eq!(v.action_for(&Key::ArrowDown), Some(NavAction::Next));
        assert_eq!(v.action_for(&Key::ArrowUp), Some(NavAction::Previous));
        assert_eq!(v.action_for(&Key::ArrowLeft), None);
        assert_eq!(v.action_for(&Key::ArrowRight), None);
    }

    #[test]
    fn test_shared_keys() {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            assert_eq!(orientation.action_for(&Key::Home), Some(NavAction::First));
            assert_eq!(orientation.action_for(&Key::End), Some(NavAction::Last));
            assert_eq!(orientation.action_for(&Key::Enter), Some(NavAction::Activate));
            assert_eq!(orientation.action_for(&Key::Space), Some(NavAction::Activate));
            assert_eq!(orientation.action_for(&Key::Tab), None);
            assert_eq!(orientation.action_for(&Key::Char('x')), None);
        }
    }
}
