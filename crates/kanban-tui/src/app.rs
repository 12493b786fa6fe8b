use crate::components::Banner;
use crate::dialog::{handle_dialog_input, DialogAction};
use crate::events::{self, Event, EventHandler};
use crate::ui;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kanban_core::{InputState, KanbanError, KanbanResult};
use kanban_domain::{BoardController, BoardGateway, BoardLayout, ColumnId, Hit, Point};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::collections::HashMap;
use std::io;
use std::time::Duration;

const DEFAULT_BANNER_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// The add-card form is open for this column
    AddCard { column_id: ColumnId },
    Help,
}

pub struct App<G: BoardGateway> {
    pub controller: BoardController<G>,
    pub mode: AppMode,
    pub input: InputState,
    pub banner: Option<Banner>,
    pub should_quit: bool,
    layout: BoardLayout,
    /// Cards scrolled out of view at the top of each column
    scroll: HashMap<ColumnId, usize>,
    banner_ttl: Duration,
    dirty: bool,
}

impl<G: BoardGateway> App<G> {
    pub fn new(controller: BoardController<G>) -> Self {
        Self {
            controller,
            mode: AppMode::Normal,
            input: InputState::new(),
            banner: None,
            should_quit: false,
            layout: BoardLayout::new(),
            scroll: HashMap::new(),
            banner_ttl: DEFAULT_BANNER_TTL,
            dirty: true,
        }
    }

    pub fn with_banner_ttl(mut self, ttl: Duration) -> Self {
        self.banner_ttl = ttl;
        self
    }

    pub fn show_banner(&mut self, banner: Banner) {
        self.banner = Some(banner);
        self.dirty = true;
    }

    /// Geometry recorded by the last render
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub(crate) fn set_layout(&mut self, layout: BoardLayout) {
        self.layout = layout;
    }

    pub fn scroll_offset(&self, column_id: &ColumnId) -> usize {
        self.scroll.get(column_id).copied().unwrap_or(0)
    }

    /// Scrolls the column under the pointer by one card, keeping at
    /// least one card in view.
    fn scroll_column(&mut self, pointer: Point, down: bool) {
        let Some(zone) = self.layout.zone_at(pointer) else {
            return;
        };
        let column_id = zone.column_id.clone();
        let max = self
            .controller
            .board()
            .column(&column_id)
            .map_or(0, |c| c.len().saturating_sub(1));

        let offset = self.scroll.entry(column_id).or_default();
        let current = (*offset).min(max);
        let next = if down {
            (current + 1).min(max)
        } else {
            current.saturating_sub(1)
        };
        if next != *offset {
            *offset = next;
            self.dirty = true;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// True when the screen is out of date; clears the request.
    pub fn needs_redraw(&mut self) -> bool {
        let board_changed = self.controller.take_redraw();
        std::mem::take(&mut self.dirty) || board_changed
    }

    pub fn tick(&mut self) {
        if self
            .banner
            .as_ref()
            .is_some_and(|b| b.is_expired(self.banner_ttl))
        {
            self.banner = None;
            self.dirty = true;
        }
    }

    fn report(&mut self, error: KanbanError) {
        if error.is_benign() {
            tracing::debug!("Ignored: {}", error);
            return;
        }
        tracing::warn!("{}", error);
        self.show_banner(Banner::error(error.to_string()));
    }

    fn open_form(&mut self, column_id: ColumnId) {
        tracing::debug!("Opening add-card form for {}", column_id);
        self.input.clear();
        self.mode = AppMode::AddCard { column_id };
        self.dirty = true;
    }

    fn close_form(&mut self) {
        self.input.clear();
        self.mode = AppMode::Normal;
        self.dirty = true;
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.mode.clone() {
            AppMode::Normal => {
                if events::should_quit(&key) {
                    self.quit();
                } else if key.code == KeyCode::Char('?') {
                    self.mode = AppMode::Help;
                    self.dirty = true;
                }
            }
            AppMode::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                    self.mode = AppMode::Normal;
                    self.dirty = true;
                }
            }
            AppMode::AddCard { column_id } => {
                self.dirty = true;
                match handle_dialog_input(&mut self.input, key.code) {
                    DialogAction::Confirm => self.submit_card(column_id).await,
                    DialogAction::Cancel => self.close_form(),
                    DialogAction::None => {}
                }
            }
        }
    }

    async fn submit_card(&mut self, column_id: ColumnId) {
        let Some(text) = self.input.submission() else {
            return;
        };

        match self.controller.add_card(&column_id, &text).await {
            Ok(card) => {
                tracing::info!("Added card {} to {}", card.id, column_id);
                self.close_form();
            }
            // Keep the form open so the text can be corrected
            Err(e @ (KanbanError::DuplicateText { .. } | KanbanError::Validation(_))) => {
                self.report(e)
            }
            Err(e) => {
                self.close_form();
                self.report(e);
            }
        }
    }

    /// Releases end the drag in every mode; everything else is only
    /// read while no popup is open.
    pub async fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind == MouseEventKind::Up(MouseButton::Left) {
            if let Err(e) = self.controller.pointer_up().await {
                self.report(e);
            }
            return;
        }
        if self.mode != AppMode::Normal {
            return;
        }

        let pointer = Point::new(f64::from(mouse.column), f64::from(mouse.row));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(pointer).await,
            MouseEventKind::Drag(MouseButton::Left) => {
                self.controller.pointer_move(&self.layout, pointer);
            }
            MouseEventKind::ScrollDown => self.scroll_column(pointer, true),
            MouseEventKind::ScrollUp => self.scroll_column(pointer, false),
            _ => {}
        }
    }

    async fn pointer_down(&mut self, pointer: Point) {
        // A session still open here lost its release
        self.controller.cancel_drag();

        match self.layout.hit_test(pointer) {
            Hit::DeleteControl { column_id, card_id } => {
                if let Err(e) = self.controller.delete_card(&column_id, &card_id).await {
                    self.report(e);
                }
            }
            Hit::AddControl { column_id } => self.open_form(column_id),
            Hit::Card { .. } => {
                self.controller.pointer_down(&self.layout, pointer);
            }
            Hit::Zone { .. } | Hit::Nothing => {}
        }
    }

    pub async fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key).await,
            Event::Mouse(mouse) => self.handle_mouse(mouse).await,
            Event::Resize(..) => self.dirty = true,
            Event::Tick => self.tick(),
        }
    }

    pub async fn run(&mut self) -> KanbanResult<()> {
        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::new();

        let result = self.event_loop(&mut terminal, &mut events).await;

        events.stop();
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut EventHandler,
    ) -> KanbanResult<()> {
        while !self.should_quit {
            if self.needs_redraw() {
                terminal.draw(|frame| ui::render(self, frame))?;
            }

            let Some(event) = events.next().await else {
                break;
            };
            self.handle_event(event).await;
        }
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
