use crate::app::AppMode;

#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: String,
    pub short_description: String,
    pub description: String,
}

impl Keybinding {
    pub fn new(
        key: impl Into<String>,
        short_description: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            short_description: short_description.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeybindingContext {
    pub name: String,
    pub bindings: Vec<Keybinding>,
}

impl KeybindingContext {
    pub fn new(name: impl Into<String>, bindings: Vec<Keybinding>) -> Self {
        Self {
            name: name.into(),
            bindings,
        }
    }

    /// One-line summary for the footer
    pub fn help_line(&self) -> String {
        self.bindings
            .iter()
            .map(|b| format!("{}: {}", b.key, b.short_description))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

pub fn context_for(mode: &AppMode) -> KeybindingContext {
    match mode {
        AppMode::Normal => KeybindingContext::new(
            "Board",
            vec![
                Keybinding::new(
                    "drag card",
                    "move",
                    "Drag a card to reorder it or move it to another column",
                ),
                Keybinding::new("click x", "delete", "Delete the card"),
                Keybinding::new("click +", "add", "Add a card to the column"),
                Keybinding::new("wheel", "scroll", "Scroll the column under the pointer"),
                Keybinding::new("?", "help", "Show this help"),
                Keybinding::new("q", "quit", "Quit application"),
            ],
        ),
        AppMode::AddCard { .. } => KeybindingContext::new(
            "Add Card",
            vec![
                Keybinding::new("Enter", "add", "Add the card"),
                Keybinding::new("Esc", "cancel", "Close the form without adding"),
            ],
        ),
        AppMode::Help => KeybindingContext::new(
            "Help",
            vec![Keybinding::new("Esc", "close", "Close help")],
        ),
    }
}
