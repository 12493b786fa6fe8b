use super::colors::*;
use ratatui::style::{Modifier, Style};

pub fn column_border(is_drop_target: bool) -> Style {
    if is_drop_target {
        Style::default().fg(TARGET_BORDER)
    } else {
        Style::default().fg(COLUMN_BORDER)
    }
}

pub fn column_title() -> Style {
    Style::default()
        .fg(NORMAL_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn card_border() -> Style {
    Style::default().fg(CARD_BORDER)
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn highlight_text() -> Style {
    Style::default().fg(HIGHLIGHT_TEXT)
}

pub fn delete_control() -> Style {
    Style::default()
        .fg(DELETE_CONTROL)
        .add_modifier(Modifier::BOLD)
}

pub fn add_control() -> Style {
    Style::default().fg(ADD_CONTROL)
}

pub fn placeholder() -> Style {
    Style::default()
        .fg(PLACEHOLDER)
        .add_modifier(Modifier::DIM)
}

pub fn drag_proxy() -> Style {
    Style::default()
        .fg(DRAG_PROXY)
        .add_modifier(Modifier::BOLD)
}

pub fn popup_bg() -> Style {
    Style::default().bg(POPUP_BG)
}
