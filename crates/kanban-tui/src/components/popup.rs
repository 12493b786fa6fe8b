use crate::theme::{highlight_text, normal_text, popup_bg};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Single-line input box over the board. The popup is at least
/// `MIN_HEIGHT` rows so the input field stays visible on short terminals.
pub fn render_input_popup(
    frame: &mut Frame,
    title: &str,
    label: &str,
    input_text: &str,
    cursor_pos: usize,
) {
    const MIN_HEIGHT: u16 = 9;

    let mut area = centered_rect(60, 30, frame.area());
    if area.height < MIN_HEIGHT {
        let full = frame.area();
        area.height = MIN_HEIGHT.min(full.height);
        area.y = full.y + (full.height - area.height) / 2;
    }

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(popup_bg());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(label).style(highlight_text()), chunks[0]);

    let input = Paragraph::new(input_text)
        .style(normal_text())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(input, chunks[1]);

    let max_x = chunks[1].right().saturating_sub(2);
    let cursor_x = (chunks[1].x + cursor_pos as u16 + 1).min(max_x);
    let cursor_y = chunks[1].y + 1;
    frame.set_cursor_position((cursor_x, cursor_y));
}
