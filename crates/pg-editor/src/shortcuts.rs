//! Editor keyboard shortcuts.
//!
//! The host forwards raw `keydown` values; the session turns the resulting
//! action into an `EditCommand`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Selection ──
    Deselect,

    // ── Typography ──
    ToggleBold,
    /// Drop the preset tag, keeping the current look.
    ResetToCustom,

    // ── Block ──
    IndentIncrease,
    IndentDecrease,
    AlignLeft,
    AlignCenter,
    AlignRight,
}

/// `ctrl` and `meta` are interchangeable, so ⌘ on macOS and Ctrl elsewhere
/// bind the same actions.
pub struct ShortcutMap;

impl ShortcutMap {
    /// `key` is the `KeyboardEvent.key` value (e.g. `"b"`, `"Escape"`).
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        // mod+shift before mod alone
        if cmd && shift {
            return match key {
                "l" | "L" => Some(ShortcutAction::AlignLeft),
                "e" | "E" => Some(ShortcutAction::AlignCenter),
                "r" | "R" => Some(ShortcutAction::AlignRight),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "b" | "B" => Some(ShortcutAction::ToggleBold),
                "]" => Some(ShortcutAction::IndentIncrease),
                "[" => Some(ShortcutAction::IndentDecrease),
                "\\" => Some(ShortcutAction::ResetToCustom),
                _ => None,
            };
        }

        if shift {
            return None;
        }

        match key {
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}
