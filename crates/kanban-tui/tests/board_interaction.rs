use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use kanban_domain::{Board, BoardController, BoardGateway, Bounds, ColumnId, Point};
use kanban_persistence::{MemoryStore, StorageGateway};
use kanban_tui::{ui, App, AppMode};
use ratatui::{backend::TestBackend, Terminal};

type TestApp = App<StorageGateway<MemoryStore>>;

fn col(id: &str) -> ColumnId {
    ColumnId::new(id)
}

fn app_with(board: Board) -> TestApp {
    let gateway = StorageGateway::new(MemoryStore::new());
    App::new(BoardController::new(board, gateway))
}

fn seeded_board() -> Board {
    let mut board = Board::default();
    board.add_card(&col("column-1"), "Alpha").unwrap();
    board.add_card(&col("column-1"), "Bravo").unwrap();
    board.add_card(&col("column-2"), "Charlie").unwrap();
    board
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(90, 24)).unwrap()
}

fn draw(terminal: &mut Terminal<TestBackend>, app: &mut TestApp) {
    terminal.draw(|frame| ui::render(app, frame)).unwrap();
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn mouse(kind: MouseEventKind, point: Point) -> MouseEvent {
    MouseEvent {
        kind,
        column: point.x as u16,
        row: point.y as u16,
        modifiers: KeyModifiers::NONE,
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// A point on the card's text row, clear of the delete control
fn card_body(bounds: Bounds) -> Point {
    Point::new(bounds.x + 2.0, bounds.y + 1.0)
}

fn texts(app: &TestApp, column: &str) -> Vec<String> {
    app.controller
        .board()
        .column(&col(column))
        .unwrap()
        .cards
        .iter()
        .map(|c| c.text.clone())
        .collect()
}

async fn type_text(app: &mut TestApp, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c))).await;
    }
}

#[tokio::test]
async fn test_renders_columns_cards_and_controls() {
    let mut app = app_with(seeded_board());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let text = screen(&terminal);
    for expected in ["To Do (2)", "In Progress (1)", "Done (0)", "Alpha", "Charlie"] {
        assert!(text.contains(expected), "missing {:?} in\n{}", expected, text);
    }
    assert_eq!(text.matches("+ Add another card").count(), 3);
    assert!(text.contains("q: quit"));

    let zones = app.layout().zones();
    assert_eq!(zones.len(), 3);
    assert_eq!(zones[0].cards.len(), 2);
    assert!(zones[0].cards.iter().all(|c| c.delete_control.is_some()));
}

#[tokio::test]
async fn test_drag_card_to_other_column() {
    let mut app = app_with(seeded_board());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let alpha = app.layout().zones()[0].cards[0].bounds;
    let charlie = app.layout().zones()[1].cards[0].bounds;

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card_body(alpha)))
        .await;
    assert!(app.controller.drag().is_dragging());
    draw(&mut terminal, &mut app);
    // The dragged card leaves the flow of its column
    assert_eq!(app.layout().zones()[0].cards.len(), 1);

    // Below the middle of Charlie
    let target = Point::new(charlie.x + 4.0, charlie.y + charlie.height + 1.0);
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), target))
        .await;
    draw(&mut terminal, &mut app);
    let marker = app
        .controller
        .drag()
        .session()
        .and_then(|s| s.marker.clone())
        .unwrap();
    assert_eq!(marker.column_id, col("column-2"));
    assert_eq!(marker.index, 1);

    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), target))
        .await;
    assert!(!app.controller.drag().is_dragging());
    assert_eq!(texts(&app, "column-1"), vec!["Bravo"]);
    assert_eq!(texts(&app, "column-2"), vec!["Charlie", "Alpha"]);

    let saved = app.controller.gateway().load().await.unwrap();
    assert_eq!(&saved, app.controller.board());

    draw(&mut terminal, &mut app);
    assert!(!screen(&terminal).contains("drop here"));
}

#[tokio::test]
async fn test_placeholder_marks_drop_position() {
    let mut app = app_with(seeded_board());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let alpha = app.layout().zones()[0].cards[0].bounds;
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card_body(alpha)))
        .await;
    draw(&mut terminal, &mut app);

    // Low in the empty Done column, so the proxy does not cover the gap
    let target = Point::new(70.0, 15.0);
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), target))
        .await;
    draw(&mut terminal, &mut app);
    assert!(screen(&terminal).contains("drop here"));

    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), target))
        .await;
    assert_eq!(texts(&app, "column-3"), vec!["Alpha"]);
}

#[tokio::test]
async fn test_reorder_within_column() {
    let mut app = app_with(seeded_board());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let zone = app.layout().zones()[0].clone();
    let alpha = zone.cards[0].bounds;
    let bravo = zone.cards[1].bounds;

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card_body(alpha)))
        .await;
    draw(&mut terminal, &mut app);

    // Below everything in the column
    let target = Point::new(bravo.x + 4.0, bravo.y + bravo.height + 2.0);
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), target))
        .await;
    draw(&mut terminal, &mut app);
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), target))
        .await;

    assert_eq!(texts(&app, "column-1"), vec!["Bravo", "Alpha"]);
}

#[tokio::test]
async fn test_release_outside_board_changes_nothing() {
    let board = seeded_board();
    let mut app = app_with(board.clone());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let alpha = app.layout().zones()[0].cards[0].bounds;
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card_body(alpha)))
        .await;

    // The footer is not a drop zone
    let footer = Point::new(10.0, 22.0);
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), footer))
        .await;
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), footer))
        .await;

    assert!(!app.controller.drag().is_dragging());
    assert_eq!(app.controller.board(), &board);
    assert!(app.controller.gateway().load().await.is_none());
}

#[tokio::test]
async fn test_click_delete_control() {
    let mut app = app_with(seeded_board());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let control = app.layout().zones()[0].cards[1].delete_control.unwrap();
    app.handle_mouse(mouse(
        MouseEventKind::Down(MouseButton::Left),
        control.origin(),
    ))
    .await;

    assert!(!app.controller.drag().is_dragging());
    assert_eq!(texts(&app, "column-1"), vec!["Alpha"]);
}

#[tokio::test]
async fn test_add_card_through_form() {
    let mut app = app_with(Board::default());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let add = app.layout().zones()[2].add_control.unwrap();
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), add.origin()))
        .await;
    assert_eq!(
        app.mode,
        AppMode::AddCard {
            column_id: col("column-3")
        }
    );
    draw(&mut terminal, &mut app);
    assert!(screen(&terminal).contains("Add card to Done"));

    type_text(&mut app, "  Ship release ").await;
    app.handle_key(key(KeyCode::Enter)).await;

    assert_eq!(app.mode, AppMode::Normal);
    assert_eq!(texts(&app, "column-3"), vec!["Ship release"]);
    assert!(app.controller.gateway().load().await.is_some());
}

#[tokio::test]
async fn test_duplicate_text_keeps_form_open() {
    let mut app = app_with(seeded_board());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let add = app.layout().zones()[0].add_control.unwrap();
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), add.origin()))
        .await;
    type_text(&mut app, "Alpha").await;
    app.handle_key(key(KeyCode::Enter)).await;

    assert!(matches!(app.mode, AppMode::AddCard { .. }));
    assert_eq!(app.input.as_str(), "Alpha");
    assert!(app.banner.is_some());
    assert_eq!(texts(&app, "column-1"), vec!["Alpha", "Bravo"]);

    draw(&mut terminal, &mut app);
    assert!(screen(&terminal).contains("already exists"));
}

#[tokio::test]
async fn test_escape_cancels_form() {
    let mut app = app_with(Board::default());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let add = app.layout().zones()[0].add_control.unwrap();
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), add.origin()))
        .await;
    type_text(&mut app, "Never mind").await;
    app.handle_key(key(KeyCode::Esc)).await;

    assert_eq!(app.mode, AppMode::Normal);
    assert!(app.input.as_str().is_empty());
    assert_eq!(app.controller.board().card_count(), 0);
}

#[tokio::test]
async fn test_quit_key() {
    let mut app = app_with(Board::default());
    app.handle_key(key(KeyCode::Char('x'))).await;
    assert!(!app.should_quit);
    app.handle_key(key(KeyCode::Char('q'))).await;
    assert!(app.should_quit);
}

#[tokio::test]
async fn test_redraw_requests() {
    let mut app = app_with(Board::default());
    assert!(app.needs_redraw());
    assert!(!app.needs_redraw());

    let mut terminal = terminal();
    draw(&mut terminal, &mut app);
    let add = app.layout().zones()[0].add_control.unwrap();
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), add.origin()))
        .await;
    assert!(app.needs_redraw());
}

#[tokio::test]
async fn test_down_without_release_ends_stale_drag() {
    let board = seeded_board();
    let mut app = app_with(board.clone());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let alpha = app.layout().zones()[0].cards[0].bounds;
    let add = app.layout().zones()[1].add_control.unwrap();

    // The release of this press never arrives
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card_body(alpha)))
        .await;
    assert!(app.controller.drag().is_dragging());

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), add.origin()))
        .await;
    assert!(!app.controller.drag().is_dragging());
    assert_eq!(
        app.mode,
        AppMode::AddCard {
            column_id: col("column-2")
        }
    );

    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), add.origin()))
        .await;
    app.handle_key(key(KeyCode::Esc)).await;
    assert_eq!(app.mode, AppMode::Normal);
    assert!(!app.controller.drag().is_dragging());

    draw(&mut terminal, &mut app);
    assert_eq!(app.layout().zones()[0].cards.len(), 2);
    assert_eq!(app.controller.board(), &board);
}

#[tokio::test]
async fn test_delete_during_stale_drag_cancels_it_first() {
    let mut app = app_with(seeded_board());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let alpha = app.layout().zones()[0].cards[0].bounds;
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card_body(alpha)))
        .await;
    draw(&mut terminal, &mut app);

    // Alpha is out of the flow, so Bravo is the first slot
    let bravo_delete = app.layout().zones()[0].cards[0].delete_control.unwrap();
    app.handle_mouse(mouse(
        MouseEventKind::Down(MouseButton::Left),
        bravo_delete.origin(),
    ))
    .await;

    assert!(!app.controller.drag().is_dragging());
    assert_eq!(texts(&app, "column-1"), vec!["Alpha"]);
}

#[tokio::test]
async fn test_release_ends_drag_while_help_is_open() {
    let board = seeded_board();
    let mut app = app_with(board.clone());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let alpha = app.layout().zones()[0].cards[0].bounds;
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card_body(alpha)))
        .await;
    app.handle_key(key(KeyCode::Char('?'))).await;
    assert_eq!(app.mode, AppMode::Help);

    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), card_body(alpha)))
        .await;
    assert!(!app.controller.drag().is_dragging());
    assert_eq!(app.controller.board(), &board);
}

#[tokio::test]
async fn test_help_popup_lists_bindings() {
    let mut app = app_with(Board::default());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    app.handle_key(key(KeyCode::Char('?'))).await;
    draw(&mut terminal, &mut app);
    let text = screen(&terminal);
    assert!(text.contains("Help - Board"));
    assert!(text.contains("Delete the card"));
    assert!(text.contains("Esc: close"));

    // The board does not take clicks while help is shown
    let add = app.layout().zones()[0].add_control.unwrap();
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), add.origin()))
        .await;
    assert_eq!(app.mode, AppMode::Help);

    app.handle_key(key(KeyCode::Esc)).await;
    assert_eq!(app.mode, AppMode::Normal);
    draw(&mut terminal, &mut app);
    assert!(!screen(&terminal).contains("Help - Board"));
}

#[tokio::test]
async fn test_release_over_add_control_is_not_a_drop() {
    let board = seeded_board();
    let mut app = app_with(board.clone());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let alpha = app.layout().zones()[0].cards[0].bounds;
    let add = app.layout().zones()[1].add_control.unwrap();
    assert!(app.layout().zone_at(add.origin()).is_none());

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card_body(alpha)))
        .await;
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), add.origin()))
        .await;
    assert!(app
        .controller
        .drag()
        .session()
        .is_some_and(|s| s.marker.is_none()));

    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), add.origin()))
        .await;
    assert!(!app.controller.drag().is_dragging());
    assert_eq!(app.controller.board(), &board);
    assert_eq!(app.mode, AppMode::Normal);
}

fn long_board() -> Board {
    let mut board = Board::default();
    for n in 1..=10 {
        board
            .add_card(&col("column-1"), &format!("Card {}", n))
            .unwrap();
    }
    board
}

async fn scroll_down(app: &mut TestApp, times: usize) {
    for _ in 0..times {
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, Point::new(5.0, 5.0)))
            .await;
    }
}

#[tokio::test]
async fn test_overflowing_column_scrolls() {
    let mut app = app_with(long_board());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    let zone = &app.layout().zones()[0];
    assert_eq!(zone.cards.len(), 6);
    assert_eq!(zone.first_index, 0);
    assert!(screen(&terminal).contains("↑0 ↓4"));

    // Nothing above the first card
    app.handle_mouse(mouse(MouseEventKind::ScrollUp, Point::new(5.0, 5.0)))
        .await;
    assert_eq!(app.scroll_offset(&col("column-1")), 0);

    scroll_down(&mut app, 2).await;
    assert_eq!(app.scroll_offset(&col("column-1")), 2);
    draw(&mut terminal, &mut app);

    let text = screen(&terminal);
    assert!(text.contains("Card 8"));
    assert!(!text.contains("Card 2 "));
    assert!(text.contains("↑2 ↓2"));
    assert_eq!(app.layout().zones()[0].first_index, 2);

    // Scrolling stops with the last card still in view
    scroll_down(&mut app, 20).await;
    assert_eq!(app.scroll_offset(&col("column-1")), 9);
}

#[tokio::test]
async fn test_delete_card_scrolled_into_view() {
    let mut app = app_with(long_board());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);
    let eighth = app.controller.board().columns[0].cards[7].id.clone();

    scroll_down(&mut app, 2).await;
    draw(&mut terminal, &mut app);

    let slot = app.layout().zones()[0].cards[5].clone();
    assert_eq!(slot.card_id, eighth);
    app.handle_mouse(mouse(
        MouseEventKind::Down(MouseButton::Left),
        slot.delete_control.unwrap().origin(),
    ))
    .await;

    let remaining = texts(&app, "column-1");
    assert_eq!(remaining.len(), 9);
    assert!(!remaining.contains(&"Card 8".to_string()));
}

#[tokio::test]
async fn test_drag_card_scrolled_into_view() {
    let mut app = app_with(long_board());
    let mut terminal = terminal();
    draw(&mut terminal, &mut app);

    scroll_down(&mut app, 2).await;
    draw(&mut terminal, &mut app);

    let eighth = app.layout().zones()[0].cards[5].bounds;
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card_body(eighth)))
        .await;
    draw(&mut terminal, &mut app);

    // Above the first card on screen, which is the third in the column
    let target = Point::new(5.0, 1.0);
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), target))
        .await;
    let marker = app
        .controller
        .drag()
        .session()
        .and_then(|s| s.marker.clone())
        .unwrap();
    assert_eq!(marker.index, 2);

    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), target))
        .await;
    assert_eq!(
        texts(&app, "column-1"),
        [1, 2, 8, 3, 4, 5, 6, 7, 9, 10]
            .iter()
            .map(|n| format!("Card {}", n))
            .collect::<Vec<_>>()
    );
}
