use std::{cmp, io, thread, time::Duration, time::Instant};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use xcom_containment_core::{
    containment::{ContainmentCapacity, ContainmentDisplay, ContainmentRow, Inventory, SpecimenRules},
    AppConfig, BaseView, ContainmentController, ContainmentOutcome, Direction, Language, Scenario,
};

const TICK_RATE: Duration = Duration::from_millis(50);
const POINTER_WIDTH: usize = 2;
const LABEL_WIDTH: usize = 26;
const REMAINING_WIDTH: usize = 10;
const PENDING_WIDTH: usize = 8;
/// Column of the decrease arrow inside the list area.
const DEC_ARROW_OFFSET: u16 = (POINTER_WIDTH + LABEL_WIDTH + REMAINING_WIDTH + 1) as u16;
/// Column of the increase arrow inside the list area.
const INC_ARROW_OFFSET: u16 = DEC_ARROW_OFFSET + 2;
const MODAL_WIDTH: u16 = (POINTER_WIDTH + LABEL_WIDTH + REMAINING_WIDTH + 6 + PENDING_WIDTH + 4) as u16;
const MODAL_HEIGHT: u16 = 20;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    highlight: Color,
    muted: Color,
    selection_fg: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            highlight: Color::LightGreen,
            muted: Color::DarkGray,
            selection_fg: Color::Yellow,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// What the containment modal currently shows, fed by the controller.
#[derive(Debug, Default)]
struct ContainmentPanel {
    rows: Vec<ContainmentRow>,
    space_available: String,
    space_used: String,
    confirm_visible: bool,
    cancel_visible: bool,
}

impl ContainmentDisplay for ContainmentPanel {
    fn set_row(&mut self, index: usize, row: ContainmentRow) {
        if index < self.rows.len() {
            self.rows[index] = row;
        } else {
            self.rows.push(row);
        }
    }

    fn set_summary(&mut self, space_available: String, space_used: String) {
        self.space_available = space_available;
        self.space_used = space_used;
    }

    fn set_controls(&mut self, confirm_visible: bool, cancel_visible: bool) {
        self.confirm_visible = confirm_visible;
        self.cancel_visible = cancel_visible;
    }
}

/// Where the list was last drawn, for mouse hit testing.
#[derive(Debug, Clone, Copy)]
struct ModalLayout {
    list: Rect,
}

impl ModalLayout {
    fn row_at(&self, x: u16, y: u16, offset: usize, len: usize) -> Option<usize> {
        let inside_x = x >= self.list.x && x < self.list.x + self.list.width;
        let inside_y = y >= self.list.y && y < self.list.y + self.list.height;
        if !inside_x || !inside_y {
            return None;
        }
        let index = offset + usize::from(y - self.list.y);
        (index < len).then_some(index)
    }

    fn arrow_at(&self, x: u16) -> Option<Direction> {
        match x.checked_sub(self.list.x)? {
            DEC_ARROW_OFFSET => Some(Direction::Decrease),
            INC_ARROW_OFFSET => Some(Direction::Increase),
            _ => None,
        }
    }

    fn over_arrows(&self, x: u16) -> bool {
        x.checked_sub(self.list.x)
            .map(|dx| (DEC_ARROW_OFFSET..=INC_ARROW_OFFSET).contains(&dx))
            .unwrap_or(false)
    }
}

struct ContainmentScreen {
    controller: ContainmentController,
    panel: ContainmentPanel,
    offset: usize,
    layout: Option<ModalLayout>,
}

impl ContainmentScreen {
    fn new(controller: ContainmentController) -> Self {
        Self {
            controller,
            panel: ContainmentPanel::default(),
            offset: 0,
            layout: None,
        }
    }

    fn sync(&mut self, view: &BaseView<'_>, language: &Language) {
        self.controller.render(view, language, &mut self.panel);
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.controller.lines().len() as isize;
        let next = (self.controller.selected() as isize + delta).clamp(0, len - 1);
        if let Err(err) = self.controller.select_line(next as usize) {
            warn!(?err, "selection out of range");
        }
    }

    fn ensure_selection_visible(&mut self, visible: usize) {
        let selected = self.controller.selected();
        let visible = visible.max(1);
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + visible {
            self.offset = selected + 1 - visible;
        }
    }
}

struct UiState {
    status: String,
    should_quit: bool,
    inventory_offset: usize,
    inventory_height: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: String::new(),
            should_quit: false,
            inventory_offset: 0,
            inventory_height: 1,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        self.status = format!("[{}] {message}", Local::now().format("%H:%M:%S"));
    }

    fn scroll_inventory(&mut self, delta: isize, total: usize) {
        let max_offset = total.saturating_sub(self.inventory_height.max(1)) as isize;
        let next = (self.inventory_offset as isize + delta).clamp(0, max_offset.max(0));
        self.inventory_offset = next as usize;
    }
}

/// Terminal host for the base overview and the containment screen.
pub struct ContainmentApp {
    scenario: Scenario,
    language: Language,
    config: AppConfig,
    state: UiState,
    containment: Option<ContainmentScreen>,
    theme: Theme,
}

impl ContainmentApp {
    pub fn new(scenario: Scenario, config: AppConfig) -> Self {
        let language = scenario.language();
        Self {
            scenario,
            language,
            config,
            state: UiState::default(),
            containment: None,
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.state
            .set_status(format!("Loaded scenario '{}'", self.scenario.name));
        if self.base_overcrowded() {
            info!("base starts over containment capacity; opening containment screen");
            self.open_containment();
        }

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                self.handle_input(event);
                self.handle_tick();
                true
            }
            Some(AppEvent::Tick) => {
                self.handle_tick();
                true
            }
            None => false,
        }
    }

    fn base_overcrowded(&self) -> bool {
        let view = self.scenario.view();
        self.config.containment_limit_enforced
            && view.available_containment() < view.used_containment()
    }

    fn handle_tick(&mut self) {
        let Some(screen) = self.containment.as_mut() else {
            return;
        };
        let view = self.scenario.view();
        if screen.controller.tick(&view, Instant::now()) > 0 {
            screen.sync(&view, &self.language);
        }
    }

    fn handle_input(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
                    self.state.should_quit = true;
                } else if self.containment.is_some() {
                    self.handle_containment_key(key);
                } else {
                    self.handle_base_key(key);
                }
            }
            Event::Mouse(mouse) if self.containment.is_some() => {
                self.handle_containment_mouse(mouse);
            }
            _ => {}
        }
    }

    fn handle_base_key(&mut self, key: KeyEvent) {
        let total = self.inventory_lines().len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.state.should_quit = true;
            }
            KeyCode::Char('c') | KeyCode::Enter => self.open_containment(),
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_inventory(1, total),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_inventory(-1, total),
            KeyCode::PageDown => self
                .state
                .scroll_inventory(self.state.inventory_height as isize, total),
            KeyCode::PageUp => self
                .state
                .scroll_inventory(-(self.state.inventory_height as isize), total),
            _ => {}
        }
    }

    fn open_containment(&mut self) {
        let settings = self.config.controller_settings();
        match ContainmentController::for_base(
            &self.scenario.base,
            &self.scenario.ruleset,
            settings,
        ) {
            Ok(controller) => {
                let mut screen = ContainmentScreen::new(controller);
                screen.sync(&self.scenario.view(), &self.language);
                if screen.controller.is_overcrowded() {
                    self.state.set_status(
                        "Containment overcrowded: remove aliens before leaving".to_string(),
                    );
                } else {
                    self.state
                        .set_status("Select aliens to exterminate".to_string());
                }
                self.containment = Some(screen);
            }
            Err(err) => {
                self.state
                    .set_status(format!("Cannot manage containment: {err}"));
            }
        }
    }

    /// Run `action` against the open controller and refresh the panel if it
    /// moved anything.
    fn adjust<F>(&mut self, action: F)
    where
        F: FnOnce(&mut ContainmentController, &BaseView<'_>) -> u32,
    {
        let Some(screen) = self.containment.as_mut() else {
            return;
        };
        let view = self.scenario.view();
        if action(&mut screen.controller, &view) > 0 {
            screen.sync(&view, &self.language);
        }
    }

    fn handle_containment_key(&mut self, key: KeyEvent) {
        let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if let Some(screen) = self.containment.as_mut() {
                    screen.move_selection(1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if let Some(screen) = self.containment.as_mut() {
                    screen.move_selection(-1);
                }
            }
            KeyCode::Right if shifted => {
                self.adjust(|controller, view| controller.to_limit(view, Direction::Increase))
            }
            KeyCode::Left if shifted => {
                self.adjust(|controller, view| controller.to_limit(view, Direction::Decrease))
            }
            KeyCode::Char('L') => {
                self.adjust(|controller, view| controller.to_limit(view, Direction::Increase))
            }
            KeyCode::Char('H') => {
                self.adjust(|controller, view| controller.to_limit(view, Direction::Decrease))
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => {
                self.adjust(|controller, view| controller.step(view, Direction::Increase, 1))
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => {
                self.adjust(|controller, view| controller.step(view, Direction::Decrease, 1))
            }
            KeyCode::Enter => self.confirm_containment(),
            KeyCode::Esc => self.cancel_containment(),
            _ => {}
        }
    }

    fn handle_containment_mouse(&mut self, mouse: MouseEvent) {
        let Some(screen) = self.containment.as_mut() else {
            return;
        };
        let Some(layout) = screen.layout else {
            return;
        };
        let row = layout.row_at(mouse.column, mouse.row, screen.offset, screen.panel.rows.len());
        let arrow = layout.arrow_at(mouse.column);
        if let Some(index) = row {
            if let Err(err) = screen.controller.select_line(index) {
                warn!(?err, "clicked row out of range");
            }
        }

        let view = self.scenario.view();
        let changed = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let (Some(_), Some(direction)) = (row, arrow) {
                    screen.controller.press(direction, Instant::now());
                }
                0
            }
            MouseEventKind::Up(MouseButton::Left) => {
                screen.controller.release(&view, Direction::Increase)
                    + screen.controller.release(&view, Direction::Decrease)
            }
            MouseEventKind::Down(MouseButton::Right) => match (row, arrow) {
                (Some(_), Some(direction)) => screen.controller.to_limit(&view, direction),
                _ => 0,
            },
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let direction = if mouse.kind == MouseEventKind::ScrollUp {
                    Direction::Increase
                } else {
                    Direction::Decrease
                };
                let over_arrows = layout.over_arrows(mouse.column);
                let changed = screen.controller.wheel(&view, direction, over_arrows);
                if !over_arrows || !screen.controller.settings().wheel.enabled {
                    screen.move_selection(if direction == Direction::Increase { -1 } else { 1 });
                }
                changed
            }
            _ => 0,
        };
        if changed > 0 {
            screen.sync(&view, &self.language);
        }
    }

    fn confirm_containment(&mut self) {
        let Some(screen) = self.containment.as_ref() else {
            return;
        };
        let result = screen
            .controller
            .commit(&mut self.scenario.base.items, &self.scenario.ruleset);
        match result {
            Ok(outcome) => self.finish_containment(outcome),
            Err(err) => {
                error!(?err, "containment commit failed");
                self.state.set_status(format!("Cannot remove aliens: {err}"));
            }
        }
    }

    fn cancel_containment(&mut self) {
        let Some(screen) = self.containment.as_ref() else {
            return;
        };
        match screen.controller.cancel() {
            Ok(outcome) => self.finish_containment(outcome),
            Err(err) => self.state.set_status(format!("{err}")),
        }
    }

    fn finish_containment(&mut self, outcome: ContainmentOutcome) {
        self.containment = None;
        let message = match outcome {
            ContainmentOutcome::Committed(report) if report.removed.is_empty() => {
                "No aliens removed".to_string()
            }
            ContainmentOutcome::Committed(report) => {
                let parts = report
                    .removed
                    .iter()
                    .map(|entry| {
                        format!(
                            "{} {} → {}",
                            entry.count,
                            self.language.tr(&entry.species),
                            self.language.tr(&entry.corpse_item)
                        )
                    })
                    .collect::<Vec<_>>();
                format!("Exterminated {} aliens: {}", report.total(), parts.join(", "))
            }
            ContainmentOutcome::Cancelled { discarded } if discarded > 0 => {
                format!("Discarded {discarded} pending removals")
            }
            ContainmentOutcome::Cancelled { .. } => "Containment unchanged".to_string(),
        };
        self.state.set_status(message);
    }

    fn inventory_lines(&self) -> Vec<(String, u32, bool)> {
        let rules = &self.scenario.ruleset;
        let items = &self.scenario.base.items;
        rules
            .item_ids()
            .into_iter()
            .filter_map(|id| {
                let qty = items.quantity(id);
                (qty > 0).then(|| {
                    (
                        self.language.tr(id).into_string(),
                        qty,
                        rules.is_alien_specimen(id),
                    )
                })
            })
            .collect()
    }

    fn draw(&mut self, frame: &mut Frame) {
        self.draw_base(frame);
        if let Some(screen) = self.containment.as_mut() {
            render_containment_modal(&self.theme, &self.language, frame, screen);
        }
    }

    fn draw_base(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(4),
            ])
            .split(frame.size());

        let title = Paragraph::new(Line::from(Span::styled(
            format!("{} · {}", self.scenario.base.name, self.scenario.name),
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Base"));
        frame.render_widget(title, chunks[0]);

        let body = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);
        self.render_inventory(frame, body[0]);
        self.render_containment_summary(frame, body[1]);
        self.render_status(frame, chunks[2]);
    }

    fn render_inventory(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Stores");
        let height = block.inner(area).height as usize;
        self.state.inventory_height = height.max(1);
        let lines = self.inventory_lines();
        self.state.scroll_inventory(0, lines.len());

        let content: Vec<Line> = lines
            .iter()
            .skip(self.state.inventory_offset)
            .take(height)
            .map(|(label, qty, alien)| {
                let style = if *alien {
                    Style::default().fg(self.theme.highlight)
                } else {
                    Style::default().fg(self.theme.primary_fg)
                };
                Line::from(vec![
                    Span::styled(format!("{label:<30}"), style),
                    Span::styled(format!("{qty:>6}"), style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(content).block(block), area);
    }

    fn render_containment_summary(&self, frame: &mut Frame, area: Rect) {
        let view = self.scenario.view();
        let rules = &self.scenario.ruleset;
        let base = &self.scenario.base;
        let used = view.used_containment();
        let available = view.available_containment();
        let over = used > available;

        let capacity_style = if over && self.config.containment_limit_enforced {
            Style::default().fg(self.theme.danger)
        } else if over {
            Style::default().fg(self.theme.warning)
        } else {
            Style::default().fg(self.theme.success)
        };
        let mut lines = vec![
            Line::from(vec![
                Span::raw("Containment: "),
                Span::styled(format!("{used}/{available}"), capacity_style),
            ]),
            Line::from(format!("Live specimens: {}", base.stored_aliens(rules))),
            Line::from(format!(
                "Under interrogation: {}",
                base.researched_aliens(rules)
            )),
            Line::from(format!(
                "Limit enforced: {}",
                if self.config.containment_limit_enforced {
                    "yes"
                } else {
                    "no"
                }
            )),
            Line::from(""),
        ];
        if over && self.config.containment_limit_enforced {
            lines.push(Line::from(Span::styled(
                "Over capacity: aliens must be removed",
                Style::default()
                    .fg(self.theme.danger)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(Span::styled(
            "c manage containment · j/k scroll · q quit",
            Style::default().fg(self.theme.muted),
        )));
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Alien Containment"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let secondary = if self.containment.is_some() {
            "←/→ adjust · Shift+←/→ all · j/k select · Enter confirm · Esc cancel".to_string()
        } else {
            format!("{} items in stores", self.scenario.base.items.total())
        };
        let paragraph = Paragraph::new(vec![
            Line::from(self.state.status.clone()),
            Line::from(Span::styled(secondary, Style::default().fg(self.theme.muted))),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn render_containment_modal(
    theme: &Theme,
    language: &Language,
    frame: &mut Frame,
    screen: &mut ContainmentScreen,
) {
    let popup = centered_rect(MODAL_WIDTH, MODAL_HEIGHT, frame.size());
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(language.tr("STR_MANAGE_CONTAINMENT").into_string())
        .title_alignment(Alignment::Center);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let summary = Line::from(vec![
        Span::styled(
            format!("{:<30}", screen.panel.space_available),
            Style::default().fg(theme.accent),
        ),
        Span::styled(screen.panel.space_used.clone(), Style::default().fg(theme.accent)),
    ]);
    frame.render_widget(Paragraph::new(summary), chunks[0]);

    let header = format!(
        "{:pointer$}{:<label$}{:>remaining$}     {:>pending$}",
        "",
        fit(&language.tr("STR_ALIEN").into_string(), LABEL_WIDTH),
        fit(&language.tr("STR_LIVE_ALIENS").into_string(), REMAINING_WIDTH),
        fit(&language.tr("STR_DEAD_ALIENS").into_string(), PENDING_WIDTH),
        pointer = POINTER_WIDTH,
        label = LABEL_WIDTH,
        remaining = REMAINING_WIDTH,
        pending = PENDING_WIDTH,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            header,
            Style::default().fg(theme.muted),
        ))),
        chunks[1],
    );

    let list_area = chunks[2];
    let visible = list_area.height as usize;
    screen.ensure_selection_visible(visible);
    let selected = screen.controller.selected();
    let end = cmp::min(screen.offset + visible, screen.panel.rows.len());
    let lines: Vec<Line> = (screen.offset..end)
        .map(|index| {
            let row = &screen.panel.rows[index];
            let mut style = if row.highlighted {
                Style::default().fg(theme.highlight)
            } else {
                Style::default().fg(theme.primary_fg)
            };
            let pointer = if index == selected {
                style = style.add_modifier(Modifier::BOLD);
                Span::styled("▶ ", Style::default().fg(theme.selection_fg))
            } else {
                Span::raw("  ")
            };
            Line::from(vec![
                pointer,
                Span::styled(
                    format!("{:<width$}", fit(&row.label, LABEL_WIDTH), width = LABEL_WIDTH),
                    style,
                ),
                Span::styled(
                    format!("{:>width$}", row.remaining_text(), width = REMAINING_WIDTH),
                    style,
                ),
                Span::raw(" "),
                Span::styled("◀ ▶", Style::default().fg(theme.accent)),
                Span::raw(" "),
                Span::styled(
                    format!("{:>width$}", row.pending_text(), width = PENDING_WIDTH),
                    style,
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), list_area);
    screen.layout = Some(ModalLayout { list: list_area });

    let mut controls = Vec::new();
    if screen.panel.confirm_visible {
        controls.push(Span::styled(
            format!("[Enter] {}", language.tr("STR_REMOVE_SELECTED")),
            Style::default().fg(theme.success),
        ));
    }
    if screen.panel.cancel_visible {
        if !controls.is_empty() {
            controls.push(Span::raw("   "));
        }
        controls.push(Span::styled(
            format!("[Esc] {}", language.tr("STR_CANCEL")),
            Style::default().fg(theme.warning),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(controls)).alignment(Alignment::Center),
        chunks[3],
    );
}

fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
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
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
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
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ModalLayout {
        ModalLayout {
            list: Rect::new(10, 5, 60, 4),
        }
    }

    #[test]
    fn rows_map_from_screen_lines() {
        let layout = layout();
        assert_eq!(layout.row_at(12, 4, 0, 3), None);
        assert_eq!(layout.row_at(12, 5, 0, 3), Some(0));
        assert_eq!(layout.row_at(12, 6, 1, 3), Some(2));
        assert_eq!(layout.row_at(12, 7, 1, 3), None);
        assert_eq!(layout.row_at(12, 9, 0, 10), None);
    }

    #[test]
    fn clicks_beside_the_list_select_nothing() {
        let layout = layout();
        assert_eq!(layout.row_at(10, 5, 0, 3), Some(0));
        assert_eq!(layout.row_at(69, 5, 0, 3), Some(0));
        assert_eq!(layout.row_at(9, 5, 0, 3), None);
        assert_eq!(layout.row_at(70, 5, 0, 3), None);
        assert_eq!(layout.row_at(0, 6, 0, 3), None);
    }

    #[test]
    fn arrows_sit_between_the_count_columns() {
        let layout = layout();
        assert_eq!(layout.arrow_at(10 + DEC_ARROW_OFFSET), Some(Direction::Decrease));
        assert_eq!(layout.arrow_at(10 + INC_ARROW_OFFSET), Some(Direction::Increase));
        assert_eq!(layout.arrow_at(10 + DEC_ARROW_OFFSET + 1), None);
        assert_eq!(layout.arrow_at(3), None);
        assert!(layout.over_arrows(10 + DEC_ARROW_OFFSET + 1));
        assert!(!layout.over_arrows(10 + INC_ARROW_OFFSET + 1));
    }

    #[test]
    fn panel_grows_then_replaces_rows() {
        let mut panel = ContainmentPanel::default();
        let row = |pending| ContainmentRow {
            label: "Sectoid Soldier".to_string(),
            remaining: 5 - pending,
            pending,
            highlighted: true,
        };
        panel.set_row(0, row(0));
        panel.set_row(0, row(2));
        assert_eq!(panel.rows.len(), 1);
        assert_eq!(panel.rows[0].pending, 2);
    }

    #[test]
    fn only_escape_cancels_the_containment_screen() -> Result<()> {
        let config = AppConfig {
            containment_limit_enforced: false,
            ..AppConfig::default()
        };
        let mut app = ContainmentApp::new(Scenario::sample()?, config);
        app.open_containment();
        assert!(app.containment.is_some());

        let press = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        app.handle_input(press(KeyCode::Char('q')));
        assert!(app.containment.is_some());
        assert!(!app.state.should_quit);

        app.handle_input(press(KeyCode::Esc));
        assert!(app.containment.is_none());
        Ok(())
    }

    #[test]
    fn fit_truncates_by_characters() {
        assert_eq!(fit("Chryssalid Terrorist", 10), "Chryssalid");
        assert_eq!(fit("Sectoid", 10), "Sectoid");
    }
}
