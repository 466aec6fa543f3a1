//! Input vocabulary shared by the platform and its backends
//!
//! Engine code names keys and buttons with [`KeyCode`] and [`MouseButton`].
//! Only a subset of them can be queried through the platform; see
//! [`KeyCode::is_platform_key`] and [`MouseButton::is_platform_button`].

use std::fmt;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl KeyCode {
    /// Keys the platform can report state for
    pub const PLATFORM_KEYS: [Self; 10] = [
        Self::W,
        Self::A,
        Self::S,
        Self::D,
        Self::Q,
        Self::E,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
    ];

    /// Whether the platform can report state for this key
    pub fn is_platform_key(self) -> bool {
        Self::PLATFORM_KEYS.contains(&self)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

impl MouseButton {
    /// Whether the platform reports this button (state queries and events)
    pub const fn is_platform_button(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Press or release of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    /// Button went down
    Pressed,
    /// Button went up
    Released,
}

impl ButtonAction {
    /// Map a native "is pressed" flag to an action
    pub const fn from_pressed(pressed: bool) -> Self {
        if pressed {
            Self::Pressed
        } else {
            Self::Released
        }
    }
}

/// Cursor behaviour while over the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MouseMode {
    /// Visible cursor, free to leave the window
    #[default]
    Normal,
    /// Hidden cursor locked to the window, reporting unbounded motion
    Grabbed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_key_subset() {
        for key in [KeyCode::W, KeyCode::A, KeyCode::S, KeyCode::D, KeyCode::Q, KeyCode::E] {
            assert!(key.is_platform_key(), "{key} should be supported");
        }
        for key in [KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right] {
            assert!(key.is_platform_key(), "{key} should be supported");
        }
        assert!(!KeyCode::Space.is_platform_key());
        assert!(!KeyCode::Escape.is_platform_key());
        assert!(!KeyCode::Z.is_platform_key());
    }

    #[test]
    fn test_platform_buttons() {
        assert!(MouseButton::Left.is_platform_button());
        assert!(MouseButton::Right.is_platform_button());
        assert!(!MouseButton::Middle.is_platform_button());
    }

    #[test]
    fn test_button_action_from_pressed() {
        assert_eq!(ButtonAction::from_pressed(true), ButtonAction::Pressed);
        assert_eq!(ButtonAction::from_pressed(false), ButtonAction::Released);
    }

    #[test]
    fn test_mouse_mode_defaults_to_normal() {
        assert_eq!(MouseMode::default(), MouseMode::Normal);
    }
}
