use std::{cmp, io, sync::Arc, thread, time::Duration};

use anyhow::{Context, Result};
use campus_hub_core::{
    display::{self, Category, PriceTag, ResourceCard, RideCard},
    error::ApiResult,
    listing::{Applied, FormMessage, MessageKind},
    CategoryFilter, Clock, Resource, ResourceApi, ResourceBoard, Ride, RideApi, RideBoard, Ticket,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use tokio::{spawn, sync::mpsc};
use tracing::{debug, error, info};

use crate::form::{FormKind, FormModal};

const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Resources,
    Rides,
}

impl Page {
    fn index(self) -> usize {
        match self {
            Self::Resources => 0,
            Self::Rides => 1,
        }
    }

    fn toggle(self) -> Self {
        match self {
            Self::Resources => Self::Rides,
            Self::Rides => Self::Resources,
        }
    }
}

/// Two-step join placeholder: confirm, then acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
enum JoinPrompt {
    Confirm { ride_id: u64 },
    Acknowledged,
}

enum AppEvent {
    Input(Event),
    Tick,
    ResourcesLoaded(Ticket, ApiResult<Vec<Resource>>),
    RidesLoaded(Ticket, ApiResult<Vec<Ride>>),
    ResourceAdded(ApiResult<Resource>),
    RideAdded(ApiResult<Ride>),
}

/// Terminal frontend over the resource and ride access layers.
pub struct CampusHubApp {
    resources: Arc<dyn ResourceApi>,
    rides: Arc<dyn RideApi>,
    clock: Arc<dyn Clock>,
    resource_board: ResourceBoard,
    ride_board: RideBoard,
    resource_cursor: ListCursor,
    ride_cursor: ListCursor,
    page: Page,
    mode: Mode,
    form: Option<FormModal>,
    join_prompt: Option<JoinPrompt>,
    status: String,
    event_tx: Option<mpsc::Sender<AppEvent>>,
    should_quit: bool,
    theme: Theme,
}

impl CampusHubApp {
    pub fn new(
        resources: Arc<dyn ResourceApi>,
        rides: Arc<dyn RideApi>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            resources,
            rides,
            clock,
            resource_board: ResourceBoard::default(),
            ride_board: RideBoard::default(),
            resource_cursor: ListCursor::default(),
            ride_cursor: ListCursor::default(),
            page: Page::Resources,
            mode: Mode::Browse,
            form: None,
            join_prompt: None,
            status: "Ready".to_string(),
            event_tx: None,
            should_quit: false,
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);

        self.request_resources();
        self.request_rides();

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }
            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) || self.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    self.set_status(format!("Error: {err}"));
                }
                true
            }
            Some(AppEvent::Tick) => {
                self.resource_board.expire_message();
                self.ride_board.expire_message();
                true
            }
            Some(AppEvent::ResourcesLoaded(ticket, result)) => {
                if self.resource_board.apply(ticket, result) == Applied::Rendered {
                    self.resource_cursor
                        .clamp(self.resource_board.items().len());
                    self.set_status(format!(
                        "Showing {} items",
                        self.resource_board.items().len()
                    ));
                }
                true
            }
            Some(AppEvent::RidesLoaded(ticket, result)) => {
                if self.ride_board.apply(ticket, result) == Applied::Rendered {
                    self.ride_cursor.clamp(self.ride_board.items().len());
                    self.set_status(format!("Showing {} rides", self.ride_board.items().len()));
                }
                true
            }
            Some(AppEvent::ResourceAdded(result)) => {
                if self.resource_board.added(result) {
                    self.form = None;
                    self.request_resources();
                }
                true
            }
            Some(AppEvent::RideAdded(result)) => {
                if self.ride_board.added(result) {
                    self.form = None;
                    self.request_rides();
                }
                true
            }
            None => false,
        }
    }

    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn sender(&self) -> Option<mpsc::Sender<AppEvent>> {
        self.event_tx.clone()
    }

    /// List or search resources, depending on the active filters.
    fn request_resources(&mut self) {
        let Some(tx) = self.sender() else {
            return;
        };
        let ticket = self.resource_board.issue();
        let api = Arc::clone(&self.resources);
        let query = self.resource_board.query().to_string();
        let category = self.resource_board.category().clone();
        let filtered = self.resource_board.is_filtered();
        debug!(?ticket, %query, %category, "Requesting resources");
        spawn(async move {
            let result = if filtered {
                api.search_resources(&query, &category).await
            } else {
                api.list_resources().await
            };
            let _ = tx.send(AppEvent::ResourcesLoaded(ticket, result)).await;
        });
    }

    fn request_rides(&mut self) {
        let Some(tx) = self.sender() else {
            return;
        };
        let ticket = self.ride_board.issue();
        let api = Arc::clone(&self.rides);
        let query = self.ride_board.query().to_string();
        debug!(?ticket, %query, "Requesting rides");
        spawn(async move {
            let result = if query.trim().is_empty() {
                api.list_rides().await
            } else {
                api.search_rides(&query).await
            };
            let _ = tx.send(AppEvent::RidesLoaded(ticket, result)).await;
        });
    }

    fn request_current_page(&mut self) {
        match self.page {
            Page::Resources => self.request_resources(),
            Page::Rides => self.request_rides(),
        }
    }

    fn submit_form(&mut self) {
        if let Some(modal) = self.form.as_mut() {
            modal.touch_all();
        }
        let Some(modal) = self.form.as_ref() else {
            return;
        };
        let Some(tx) = self.sender() else {
            return;
        };
        match modal.kind {
            FormKind::Resource => {
                let form = modal.resource_form();
                let Some(draft) = self.resource_board.submit(&form) else {
                    return;
                };
                let api = Arc::clone(&self.resources);
                info!(name = %draft.item_name, "Submitting resource");
                spawn(async move {
                    let result = api.add_resource(draft).await;
                    let _ = tx.send(AppEvent::ResourceAdded(result)).await;
                });
            }
            FormKind::Ride => {
                let form = modal.ride_form();
                let Some(draft) = self.ride_board.submit(&form, self.clock.today()) else {
                    return;
                };
                let api = Arc::clone(&self.rides);
                info!(from = %draft.from, to = %draft.to, "Submitting ride");
                spawn(async move {
                    let result = api.add_ride(draft).await;
                    let _ = tx.send(AppEvent::RideAdded(result)).await;
                });
            }
        }
        self.set_status("Submitting…".to_string());
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if self.join_prompt.is_some() {
            self.handle_join_key(key);
            return Ok(());
        }
        if self.form.is_some() {
            self.handle_form_key(key);
            return Ok(());
        }
        match self.mode {
            Mode::Search => self.handle_search_key(key),
            Mode::Browse => self.handle_browse_key(key),
        }
        Ok(())
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        let len = self.current_len();
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => self.should_quit = true,
            KeyCode::Tab => {
                self.page = self.page.toggle();
                self.set_status(format!("Switched to {}", self.page_title()));
            }
            KeyCode::Char('j') | KeyCode::Down => self.current_cursor_mut().move_by(1, len),
            KeyCode::Char('k') | KeyCode::Up => self.current_cursor_mut().move_by(-1, len),
            KeyCode::Char('g') if key.modifiers.is_empty() => {
                self.current_cursor_mut().move_to(0, len)
            }
            KeyCode::Char('G') => self.current_cursor_mut().move_to(len.saturating_sub(1), len),
            KeyCode::Home => self.current_cursor_mut().move_to(0, len),
            KeyCode::End => self.current_cursor_mut().move_to(len.saturating_sub(1), len),
            KeyCode::PageDown => self.current_cursor_mut().page(1, len),
            KeyCode::PageUp => self.current_cursor_mut().page(-1, len),
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                self.set_status("Type to search".to_string());
            }
            KeyCode::Char('c') if self.page == Page::Resources => self.cycle_category(),
            KeyCode::Char('n') => self.open_form(),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request_current_page();
                self.set_status("Reloading…".to_string());
            }
            KeyCode::Enter if self.page == Page::Rides => self.open_join_prompt(),
            KeyCode::Esc => match self.page {
                Page::Resources => self.resource_board.clear_message(),
                Page::Rides => self.ride_board.clear_message(),
            },
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.mode = Mode::Browse;
                self.set_status(format!("Search: {}", self.current_query()));
            }
            KeyCode::Backspace => {
                let mut query = self.current_query().to_string();
                query.pop();
                self.set_query(query);
            }
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                let mut query = self.current_query().to_string();
                query.push(c);
                self.set_query(query);
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(modal) = self.form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                self.set_status("Form cancelled".to_string());
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => modal.next_field(),
            KeyCode::BackTab | KeyCode::Up => modal.previous_field(),
            KeyCode::Left => modal.move_cursor(-1),
            KeyCode::Right => modal.move_cursor(1),
            KeyCode::Home => modal.move_home(),
            KeyCode::End => modal.move_end(),
            KeyCode::Backspace => modal.backspace(),
            KeyCode::Delete => modal.delete(),
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                modal.insert(c)
            }
            _ => {}
        }
    }

    fn handle_join_key(&mut self, key: KeyEvent) {
        match self.join_prompt.take() {
            Some(JoinPrompt::Confirm { ride_id }) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    info!(ride_id, "Join confirmed");
                    self.join_prompt = Some(JoinPrompt::Acknowledged);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.set_status("Join cancelled".to_string());
                }
                _ => self.join_prompt = Some(JoinPrompt::Confirm { ride_id }),
            },
            Some(JoinPrompt::Acknowledged) | None => {}
        }
    }

    fn open_form(&mut self) {
        let modal = match self.page {
            Page::Resources => FormModal::resource(),
            Page::Rides => FormModal::ride(self.clock.today().format("%Y-%m-%d").to_string()),
        };
        self.form = Some(modal);
        self.set_status(format!("{}: Tab moves, Enter submits", self.page_title()));
    }

    fn open_join_prompt(&mut self) {
        let Some(ride) = self.ride_board.items().get(self.ride_cursor.cursor) else {
            return;
        };
        if ride.seats == 0 {
            self.set_status("This ride is fully booked".to_string());
            return;
        }
        self.join_prompt = Some(JoinPrompt::Confirm { ride_id: ride.id });
    }

    fn cycle_category(&mut self) {
        let next = next_category(self.resource_board.category());
        self.resource_board.set_category(next);
        self.set_status(format!("Category: {}", self.resource_board.category()));
        self.request_resources();
    }

    fn current_query(&self) -> &str {
        match self.page {
            Page::Resources => self.resource_board.query(),
            Page::Rides => self.ride_board.query(),
        }
    }

    /// Every keystroke issues a new request; stale replies are dropped by the board.
    fn set_query(&mut self, query: String) {
        match self.page {
            Page::Resources => {
                self.resource_board.set_query(query);
                self.request_resources();
            }
            Page::Rides => {
                self.ride_board.set_query(query);
                self.request_rides();
            }
        }
    }

    fn current_len(&self) -> usize {
        match self.page {
            Page::Resources => self.resource_board.items().len(),
            Page::Rides => self.ride_board.items().len(),
        }
    }

    fn current_cursor_mut(&mut self) -> &mut ListCursor {
        match self.page {
            Page::Resources => &mut self.resource_cursor,
            Page::Rides => &mut self.ride_cursor,
        }
    }

    fn page_title(&self) -> &'static str {
        match self.page {
            Page::Resources => "Resources",
            Page::Rides => "Rides",
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(size);

        self.render_tabs(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        match self.page {
            Page::Resources => {
                self.render_resource_list(frame, body[0]);
                self.render_resource_card(frame, body[1]);
            }
            Page::Rides => {
                self.render_ride_list(frame, body[0]);
                self.render_ride_card(frame, body[1]);
            }
        }
        self.render_status(frame, chunks[2]);

        if let Some(modal) = &self.form {
            self.render_form(frame, modal);
        }
        if let Some(prompt) = &self.join_prompt {
            self.render_join_prompt(frame, prompt);
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles = vec![
            Line::from(format!(" Resources ({}) ", self.resource_board.items().len())),
            Line::from(format!(" Rides ({}) ", self.ride_board.items().len())),
        ];
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("Campus Hub"))
            .select(self.page.index())
            .style(Style::default().fg(self.theme.muted))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn render_empty_state(&self, frame: &mut Frame, area: Rect, title: &str, loading: bool) {
        let text = if loading {
            "Loading…"
        } else {
            display::EMPTY_STATE
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(self.theme.muted),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
        frame.render_widget(paragraph, area);
    }

    fn render_resource_list(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!("Items · {}", self.resource_board.category());
        if self.resource_board.is_empty() {
            let loading = !self.resource_board.is_settled();
            self.render_empty_state(frame, area, &title, loading);
            return;
        }
        let height = area.height.saturating_sub(2) as usize;
        let len = self.resource_board.items().len();
        self.resource_cursor.set_height(height, len);

        let items: Vec<ListItem> = self
            .resource_board
            .items()
            .iter()
            .skip(self.resource_cursor.offset)
            .take(height)
            .map(|resource| {
                let price = PriceTag::from_price(resource.price);
                let price_style = if price.is_free() {
                    Style::default()
                        .fg(self.theme.success)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.warning)
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", display::category_icon(&resource.category).glyph())),
                    Span::styled(
                        resource.item_name.clone(),
                        Style::default()
                            .fg(self.theme.primary_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(price.to_string(), price_style),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.resource_cursor.visible_index()));
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(self.theme.selection_bg))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_resource_card(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Item Details");
        let Some(resource) = self.resource_board.items().get(self.resource_cursor.cursor) else {
            frame.render_widget(Paragraph::new("Nothing selected").block(block), area);
            return;
        };
        let card = ResourceCard::from(resource);
        let price_style = if card.price.is_free() {
            Style::default()
                .fg(self.theme.success)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.warning)
        };
        let status_style = match card.status.as_str() {
            "available" => Style::default().fg(self.theme.success),
            "reserved" => Style::default().fg(self.theme.danger),
            _ => Style::default().fg(self.theme.muted),
        };
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    card.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(card.price.to_string(), price_style),
            ]),
            Line::from(Span::styled(
                format!("{} {}", card.icon.glyph(), card.category),
                Style::default().fg(self.theme.accent),
            )),
            Line::from(""),
            Line::from(card.description.clone()),
            Line::from(""),
            Line::from(format!("Location: {}", card.location)),
            Line::from(vec![
                Span::raw("Status: "),
                Span::styled(card.availability.clone(), status_style),
            ]),
            Line::from(format!("Posted: {}", card.posted)),
        ];
        if let Some(image) = &card.image {
            lines.push(Line::from(Span::styled(
                format!("Image: {image}"),
                Style::default().fg(self.theme.muted),
            )));
        }
        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_ride_list(&mut self, frame: &mut Frame, area: Rect) {
        if self.ride_board.is_empty() {
            let loading = !self.ride_board.is_settled();
            self.render_empty_state(frame, area, "Rides", loading);
            return;
        }
        let height = area.height.saturating_sub(2) as usize;
        let len = self.ride_board.items().len();
        self.ride_cursor.set_height(height, len);

        let items: Vec<ListItem> = self
            .ride_board
            .items()
            .iter()
            .skip(self.ride_cursor.offset)
            .take(height)
            .map(|ride| {
                let card = RideCard::from(ride);
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} {} ", card.date, card.time),
                        Style::default().fg(self.theme.muted),
                    ),
                    Span::styled(
                        card.route,
                        Style::default()
                            .fg(self.theme.primary_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.ride_cursor.visible_index()));
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Rides"))
            .highlight_style(Style::default().bg(self.theme.selection_bg))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_ride_card(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Ride Details");
        let Some(ride) = self.ride_board.items().get(self.ride_cursor.cursor) else {
            frame.render_widget(Paragraph::new("Nothing selected").block(block), area);
            return;
        };
        let card = RideCard::from(ride);
        let join_style = if card.joinable {
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted)
        };
        let lines = vec![
            Line::from(Span::styled(
                card.route.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("📅 {}   🕒 {}", card.date, card.time)),
            Line::from(""),
            Line::from(vec![
                Span::raw("Cost: "),
                Span::styled(card.cost.clone(), Style::default().fg(self.theme.warning)),
                Span::raw(" per person"),
            ]),
            Line::from(format!("Seats: {}", card.seats)),
            Line::from(format!("Vehicle: {} {}", card.icon.glyph(), card.vehicle)),
            Line::from(format!("Total split: {}", card.total_split)),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("[{}]", card.initials),
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {} · {}", card.driver, card.vehicle)),
            ]),
            Line::from(""),
            Line::from(Span::styled(format!("Enter: {}", card.join_label), join_style)),
        ];
        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn current_message(&self) -> Option<&FormMessage> {
        match self.page {
            Page::Resources => self.resource_board.message(),
            Page::Rides => self.ride_board.message(),
        }
    }

    fn message_line(&self, message: &FormMessage) -> Line<'static> {
        let (marker, color) = match message.kind {
            MessageKind::Success => ("✅", self.theme.success),
            MessageKind::Error => ("❌", self.theme.danger),
        };
        Line::from(Span::styled(
            format!("{marker} {}", message.text),
            Style::default().fg(color),
        ))
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let primary = if self.mode == Mode::Search {
            Line::from(vec![
                Span::styled("Search: ", Style::default().fg(self.theme.accent)),
                Span::raw(self.current_query().to_string()),
            ])
        } else if let Some(message) = self.current_message() {
            self.message_line(message)
        } else {
            Line::from(self.status.clone())
        };
        let help = match self.page {
            Page::Resources => "Tab rides · / search · c category · n add item · Ctrl-r reload · q quit",
            Page::Rides => "Tab items · / search · n post ride · Enter join · Ctrl-r reload · q quit",
        };
        let paragraph = Paragraph::new(vec![
            primary,
            Line::from(Span::styled(help, Style::default().fg(self.theme.muted))),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_form(&self, frame: &mut Frame, modal: &FormModal) {
        let frame_area = frame.size();
        let width = cmp::max(cmp::min(64_u16, frame_area.width.saturating_sub(4)), 30_u16);
        let height = (modal.fields.len() as u16 + 5).min(frame_area.height.saturating_sub(2));
        let area = centered_rect(width, height, frame_area);
        frame.render_widget(Clear, area);

        let label_width = modal
            .fields
            .iter()
            .map(|field| field.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::with_capacity(modal.fields.len() + 3);
        let message = match modal.kind {
            FormKind::Resource => self.resource_board.message(),
            FormKind::Ride => self.ride_board.message(),
        };
        lines.push(match message {
            Some(message) => self.message_line(message),
            None => Line::from(""),
        });
        for (idx, field) in modal.fields.iter().enumerate() {
            let focused = idx == modal.focus;
            let label_style = if field.is_missing() {
                Style::default()
                    .fg(self.theme.danger)
                    .add_modifier(Modifier::BOLD)
            } else if focused {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted)
            };
            let value = if field.is_select() {
                format!("‹ {} ›", field.input)
            } else {
                field.input.clone()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:>label_width$}: ", field.label), label_style),
                Span::raw(value),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" submit  "),
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" next  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(modal.kind.title()),
        );
        frame.render_widget(paragraph, area);

        if let Some(field) = modal.focused() {
            if !field.is_select() {
                let x = area.x + 1 + label_width as u16 + 2 + field.cursor() as u16;
                let y = area.y + 2 + modal.focus as u16;
                frame.set_cursor(
                    x.min(area.x + area.width.saturating_sub(2)),
                    y.min(area.y + area.height.saturating_sub(2)),
                );
            }
        }
    }

    fn render_join_prompt(&self, frame: &mut Frame, prompt: &JoinPrompt) {
        let frame_area = frame.size();
        let width = cmp::max(cmp::min(60_u16, frame_area.width.saturating_sub(4)), 24_u16);
        let area = centered_rect(width, 6, frame_area);
        frame.render_widget(Clear, area);

        let (title, text, hint) = match prompt {
            JoinPrompt::Confirm { .. } => ("Join Ride", display::JOIN_CONFIRM_PROMPT, "y confirm  n cancel"),
            JoinPrompt::Acknowledged => ("Joined", display::JOIN_ACKNOWLEDGEMENT, "any key to close"),
        };
        let paragraph = Paragraph::new(vec![
            Line::from(text),
            Line::from(""),
            Line::from(Span::styled(hint, Style::default().fg(self.theme.muted))),
        ])
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

/// Next entry in the filter cycle: all, then each known category.
fn next_category(current: &CategoryFilter) -> CategoryFilter {
    let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
    match current {
        CategoryFilter::All => CategoryFilter::Only(labels[0].to_string()),
        CategoryFilter::Only(label) => match labels.iter().position(|l| *l == label.as_str()) {
            Some(idx) if idx + 1 < labels.len() => CategoryFilter::Only(labels[idx + 1].to_string()),
            _ => CategoryFilter::All,
        },
    }
}

/// Scroll position of a list panel.
#[derive(Debug, Default, Clone, Copy)]
struct ListCursor {
    cursor: usize,
    offset: usize,
    height: usize,
}

impl ListCursor {
    fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let idx = (self.cursor as isize + delta).clamp(0, len as isize - 1);
        self.cursor = idx as usize;
        self.ensure_visible(len);
    }

    fn move_to(&mut self, index: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = index.min(len - 1);
        self.ensure_visible(len);
    }

    fn page(&mut self, direction: isize, len: usize) {
        if self.height == 0 {
            return;
        }
        self.move_by(direction * self.height.min(len) as isize, len);
    }

    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
            self.offset = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
        self.ensure_visible(len);
    }

    fn set_height(&mut self, height: usize, len: usize) {
        self.height = height;
        self.clamp(len);
    }

    fn visible_index(&self) -> usize {
        self.cursor.saturating_sub(self.offset)
    }

    fn ensure_visible(&mut self, len: usize) {
        if len == 0 || self.height == 0 {
            self.offset = 0;
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
        self.offset = self.offset.min(len.saturating_sub(self.height));
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    error!(?err, "Terminal input failed");
                    break;
                }
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(err) => {
                error!(?err, "Terminal poll failed");
                break;
            }
        }
    });
}
