//! Platform-specific shortcuts

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Modifier for clipboard paste: Cmd on macOS, Ctrl elsewhere
#[cfg(target_os = "macos")]
pub const PASTE_MODIFIER: KeyModifiers = KeyModifiers::SUPER;
#[cfg(not(target_os = "macos"))]
pub const PASTE_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

#[cfg(target_os = "macos")]
pub const PASTE_SHORTCUT: &str = "Cmd+V";
#[cfg(not(target_os = "macos"))]
pub const PASTE_SHORTCUT: &str = "Ctrl+V";

/// Ctrl+S on every platform; Cmd+S is usually taken by the terminal on macOS
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

pub fn is_paste(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('v' | 'V')) && key.modifiers.contains(PASTE_MODIFIER)
}

pub fn is_submit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('s' | 'S')) && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paste_needs_platform_modifier() {
        assert!(is_paste(&KeyEvent::new(KeyCode::Char('v'), PASTE_MODIFIER)));
        assert!(!is_paste(&KeyEvent::new(KeyCode::Char('v'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_submit_is_ctrl_s() {
        assert!(is_submit(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!is_submit(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE)));
    }
}
