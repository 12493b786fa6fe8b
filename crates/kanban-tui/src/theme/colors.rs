use ratatui::style::Color;

pub const COLUMN_BORDER: Color = Color::White;
pub const TARGET_BORDER: Color = Color::Cyan;
pub const CARD_BORDER: Color = Color::DarkGray;

pub const NORMAL_TEXT: Color = Color::White;
pub const LABEL_TEXT: Color = Color::DarkGray;
pub const HIGHLIGHT_TEXT: Color = Color::Yellow;

pub const DELETE_CONTROL: Color = Color::Red;
pub const ADD_CONTROL: Color = Color::Green;
pub const PLACEHOLDER: Color = Color::Cyan;
pub const DRAG_PROXY: Color = Color::Yellow;

pub const POPUP_BG: Color = Color::Black;
