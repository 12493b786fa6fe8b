use crate::app::{App, AppMode};
use crate::components::{centered_rect, render_input_popup};
use crate::keybindings::context_for;
use crate::theme::*;
use kanban_domain::{
    BoardGateway, BoardLayout, Bounds, Card, CardSlot, Column, DragSession, DropZone,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// Rows taken by one card, borders included
pub const CARD_HEIGHT: u16 = 3;
pub const ADD_CARD_LABEL: &str = "+ Add another card";

/// Draws the whole screen and records the board geometry on `app`.
pub fn render<G: BoardGateway>(app: &mut App<G>, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    let layout = render_board(app, frame, chunks[0]);
    app.set_layout(layout);

    render_footer(app, frame, chunks[1]);
    render_drag_proxy(app, frame);

    if let AppMode::AddCard { column_id } = &app.mode {
        let title = app
            .controller
            .board()
            .column(column_id)
            .map(|c| format!(" Add card to {} ", c.title))
            .unwrap_or_else(|| " Add card ".to_string());
        render_input_popup(
            frame,
            &title,
            "Card text:",
            app.input.as_str(),
            app.input.cursor_pos(),
        );
    }

    if app.mode == AppMode::Help {
        render_help_popup(frame);
    }

    if let Some(banner) = &app.banner {
        banner.render(frame, chunks[0]);
    }
}

fn render_board<G: BoardGateway>(app: &App<G>, frame: &mut Frame, area: Rect) -> BoardLayout {
    let board = app.controller.board();
    let session = app.controller.drag().session();
    let mut layout = BoardLayout::new();

    if board.columns.is_empty() {
        return layout;
    }

    let count = board.columns.len() as u32;
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); board.columns.len()])
        .split(area);

    for (column, column_area) in board.columns.iter().zip(areas.iter()) {
        let offset = app.scroll_offset(&column.id);
        layout.push_zone(render_column(frame, column, *column_area, session, offset));
    }
    layout
}

/// Draws one column starting `offset` cards down. The dragged card is left
/// out of the flow and a placeholder takes the slot under the insertion
/// marker. The last row holds the add control, outside the drop zone.
fn render_column(
    frame: &mut Frame,
    column: &Column,
    area: Rect,
    session: Option<&DragSession>,
    offset: usize,
) -> DropZone {
    let marker = session
        .and_then(|s| s.marker.as_ref())
        .filter(|m| m.column_id == column.id);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ({}) ", column.title, column.len()),
            column_title(),
        ))
        .borders(Borders::ALL)
        .border_style(column_border(marker.is_some()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let list = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    let mut zone = DropZone::new(column.id.clone(), bounds_of(list));

    let visible: Vec<&Card> = column
        .cards
        .iter()
        .filter(|card| session.map_or(true, |s| s.card_id != card.id))
        .collect();

    let offset = offset.min(visible.len().saturating_sub(1));
    zone.first_index = offset;
    let limit = list.bottom();
    let mut y = list.y;

    for index in offset..=visible.len() {
        if marker.is_some_and(|m| m.index == index) {
            if let Some(rect) = take_rows(list, &mut y, limit) {
                render_placeholder(frame, rect);
            }
        }
        let Some(card) = visible.get(index) else {
            break;
        };
        let Some(rect) = take_rows(list, &mut y, limit) else {
            break;
        };
        zone.cards.push(render_card(frame, card, rect));
    }

    if inner.height > 0 {
        let rect = Rect::new(inner.x, list.bottom(), inner.width, 1);
        frame.render_widget(Paragraph::new(ADD_CARD_LABEL).style(add_control()), rect);
        zone.add_control = Some(bounds_of(rect));
    }

    let below = visible.len().saturating_sub(offset + zone.cards.len());
    render_scroll_hint(frame, area, offset, below);

    zone
}

/// Counts of cards out of view, drawn on the column's bottom border.
fn render_scroll_hint(frame: &mut Frame, area: Rect, above: usize, below: usize) {
    if (above == 0 && below == 0) || area.height < 2 {
        return;
    }
    let hint = format!(" ↑{} ↓{} ", above, below);
    let width = (hint.chars().count() as u16).min(area.width.saturating_sub(4));
    let rect = Rect::new(area.x + 2, area.bottom() - 1, width, 1);
    frame.render_widget(Paragraph::new(hint).style(label_text()), rect);
}

fn take_rows(inner: Rect, y: &mut u16, limit: u16) -> Option<Rect> {
    if *y + CARD_HEIGHT > limit {
        return None;
    }
    let rect = Rect::new(inner.x, *y, inner.width, CARD_HEIGHT);
    *y += CARD_HEIGHT;
    Some(rect)
}

fn render_card(frame: &mut Frame, card: &Card, rect: Rect) -> CardSlot {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(card_border());
    frame.render_widget(
        Paragraph::new(card.text.as_str())
            .style(normal_text())
            .block(block),
        rect,
    );

    // Sits on the top border, one cell in from the corner
    let control_bounds = (rect.width >= 4).then(|| {
        let control = Rect::new(rect.right() - 2, rect.y, 1, 1);
        frame.render_widget(Paragraph::new("x").style(delete_control()), control);
        bounds_of(control)
    });

    CardSlot {
        card_id: card.id.clone(),
        bounds: bounds_of(rect),
        delete_control: control_bounds,
    }
}

fn render_placeholder(frame: &mut Frame, rect: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(placeholder());
    frame.render_widget(
        Paragraph::new("drop here")
            .style(placeholder())
            .alignment(Alignment::Center)
            .block(block),
        rect,
    );
}

fn render_drag_proxy<G: BoardGateway>(app: &App<G>, frame: &mut Frame) {
    let Some(session) = app.controller.drag().session() else {
        return;
    };
    let Some(card) = app.controller.board().card(&session.card_id) else {
        return;
    };
    let Some(rect) = rect_of(session.proxy, frame.area()) else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(drag_proxy());
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(card.text.as_str())
            .style(normal_text())
            .block(block),
        rect,
    );
}

fn render_footer<G: BoardGateway>(app: &App<G>, frame: &mut Frame, area: Rect) {
    let context = context_for(&app.mode);
    let help = Paragraph::new(context.help_line())
        .style(label_text())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn render_help_popup(frame: &mut Frame) {
    let context = context_for(&AppMode::Normal);
    let area = centered_rect(80, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" Help - {} ", context.name))
        .borders(Borders::ALL)
        .style(popup_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = context
        .bindings
        .iter()
        .map(|binding| {
            Line::from(vec![
                Span::styled(format!("  {:<10}", binding.key), highlight_text()),
                Span::styled(binding.description.clone(), normal_text()),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press ESC or ? to close help",
        label_text(),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn bounds_of(rect: Rect) -> Bounds {
    Bounds::new(
        f64::from(rect.x),
        f64::from(rect.y),
        f64::from(rect.width),
        f64::from(rect.height),
    )
}

/// Snaps floating bounds to whole cells, clipped to `area`.
pub fn rect_of(bounds: Bounds, area: Rect) -> Option<Rect> {
    let to_cell = |v: f64| v.round().clamp(0.0, f64::from(u16::MAX)) as u16;
    let left = to_cell(bounds.x);
    let top = to_cell(bounds.y);
    let right = to_cell(bounds.x + bounds.width);
    let bottom = to_cell(bounds.y + bounds.height);

    let rect = Rect::new(
        left,
        top,
        right.saturating_sub(left),
        bottom.saturating_sub(top),
    )
    .intersection(area);
    (!rect.is_empty()).then_some(rect)
}
