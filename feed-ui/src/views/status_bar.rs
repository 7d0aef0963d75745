//! Command hints for the interactive loop.

/// Command hint for the status bar.
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(
        key: &'static str,
        action: &'static str,
    ) -> Self {
        Self { key, action }
    }
}

/// Build a status bar line from a list of hints.
pub fn build_status_bar(hints: &[KeyHint]) -> String {
    hints
        .iter()
        .map(|h| format!("{}: {}", h.key, h.action))
        .collect::<Vec<_>>()
        .join(" │ ")
}

/// Common hints.
pub mod hints {
    use super::KeyHint;

    pub const SET: KeyHint = KeyHint::new("set <field> <value>", "Edit");
    pub const CLEAR: KeyHint = KeyHint::new("clear <field>", "Empty");
    pub const SUBMIT: KeyHint = KeyHint::new("submit", "Calculate Feed");
    pub const ORDER: KeyHint = KeyHint::new("order", "Place Simulated Order");
    pub const SHOW: KeyHint = KeyHint::new("show", "Redraw");
    pub const HELP: KeyHint = KeyHint::new("help", "Commands");
    pub const QUIT: KeyHint = KeyHint::new("quit", "Exit");
}
