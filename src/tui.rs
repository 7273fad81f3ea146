use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};
use std::{
    sync::{Arc, Mutex},
    thread,
};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use miette::IntoDiagnostic;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{PageResult, ProgressEvent, ProgressSink, ProgressSinkKind, ViewState};
use crate::domain::{Category, CategoryFilter, Region, RegionFilter};
use crate::error::DexError;

const EVENTS_MAX: usize = 6;
const LOGS_MAX: usize = 200;
const HINTS: &[&str] = &[
    "Tip: type a name or number to look it up",
    "Tip: filter fire kanto  |  filter water  |  filter any johto",
    "Tip: PgDn or `more` loads the next page",
    "Tip: TAB completes types and regions, F4 shows logs",
];
const COMMANDS: &[&str] = &["search", "filter", "reset", "more", "quit"];

/// A command typed into the TUI command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiCommand {
    Search(String),
    Filter(CategoryFilter, RegionFilter),
    Reset,
    More,
    Quit,
}

pub fn parse_command(input: &str) -> Result<TuiCommand, DexError> {
    let trimmed = input.trim();
    let mut parts = trimmed.split_whitespace();
    let Some(command) = parts.next() else {
        return Err(DexError::InvalidCommand("empty command".to_string()));
    };
    let rest: Vec<&str> = parts.collect();

    match command.to_lowercase().as_str() {
        "search" | "s" => {
            let term = rest.join(" ");
            if term.is_empty() {
                return Err(DexError::InvalidCommand(
                    "search requires a name or number".to_string(),
                ));
            }
            Ok(TuiCommand::Search(term))
        }
        "filter" | "f" => parse_filter(&rest),
        "reset" => Ok(TuiCommand::Reset),
        "more" | "m" => Ok(TuiCommand::More),
        "quit" | "q" | "exit" => Ok(TuiCommand::Quit),
        _ if rest.is_empty() => Ok(TuiCommand::Search(command.to_string())),
        _ => Err(DexError::InvalidCommand(trimmed.to_string())),
    }
}

fn parse_filter(args: &[&str]) -> Result<TuiCommand, DexError> {
    match args {
        [] => Ok(TuiCommand::Filter(CategoryFilter::Any, RegionFilter::Any)),
        [single] => {
            if let Some(region) = Region::from_name(single) {
                return Ok(TuiCommand::Filter(
                    CategoryFilter::Any,
                    RegionFilter::Only(region),
                ));
            }
            Ok(TuiCommand::Filter(single.parse()?, RegionFilter::Any))
        }
        [category, region] => {
            let region = region
                .parse::<RegionFilter>()
                .unwrap_or(RegionFilter::Any);
            Ok(TuiCommand::Filter(category.parse()?, region))
        }
        _ => Err(DexError::InvalidCommand(
            "usage: filter [type|any] [region|any]".to_string(),
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Results,
    Logs,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Command,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Resolve,
    Scan,
    Fetch,
    Render,
}

impl Phase {
    fn label(self) -> &'static str {
        match self {
            Phase::Resolve => "Resolve",
            Phase::Scan => "Scan",
            Phase::Fetch => "Fetch",
            Phase::Render => "Render",
        }
    }

    fn index(self) -> usize {
        match self {
            Phase::Resolve => 0,
            Phase::Scan | Phase::Fetch => 1,
            Phase::Render => 2,
        }
    }
}

#[derive(Debug)]
struct TuiState {
    status: String,
    phase: Phase,
    latency_ms: Option<u128>,
    matches: u64,
    skips: u64,
    events: VecDeque<String>,
    logs: VecDeque<String>,
    view: View,
    input_mode: InputMode,
    page: Option<PageResult>,
    started: Instant,
    active: bool,
    hint_index: usize,
    last_hint_update: Instant,
}

pub struct Tui {
    kind: ProgressSinkKind,
    state: Arc<Mutex<TuiState>>,
    input: String,
    history: Vec<String>,
    history_index: Option<usize>,
    log_scroll: u16,
    list_scroll: u16,
}

struct TuiProgress {
    state: Arc<Mutex<TuiState>>,
}

impl ProgressSink for TuiProgress {
    fn event(&self, event: ProgressEvent) {
        if let Ok(mut state) = self.state.lock() {
            let message = event.message.trim().to_string();
            if let Some((phase, payload)) = parse_phase(&message) {
                state.phase = phase;
                state.status = payload.to_string();
            } else if message.starts_with("match ") {
                state.matches = state.matches.saturating_add(1);
                state.status = message.clone();
            } else if message.starts_with("skip ") {
                state.skips = state.skips.saturating_add(1);
            }
            if let Some(elapsed) = event.elapsed {
                state.latency_ms = Some(elapsed.as_millis());
            }

            push_bounded(&mut state.events, message.clone(), EVENTS_MAX);
            let stamp = chrono::Local::now().format("%H:%M:%S");
            push_bounded(&mut state.logs, format!("[{stamp}] {message}"), LOGS_MAX);
        }
    }
}

impl Default for Tui {
    fn default() -> Self {
        Self::new(ProgressSinkKind::Browse)
    }
}

impl Tui {
    pub fn new(kind: ProgressSinkKind) -> Self {
        Self {
            kind,
            state: Arc::new(Mutex::new(TuiState {
                status: "ready".to_string(),
                phase: Phase::Resolve,
                latency_ms: None,
                matches: 0,
                skips: 0,
                events: VecDeque::new(),
                logs: VecDeque::new(),
                view: View::Results,
                input_mode: InputMode::Command,
                page: None,
                started: Instant::now(),
                active: false,
                hint_index: 0,
                last_hint_update: Instant::now(),
            })),
            input: String::new(),
            history: Vec::new(),
            history_index: None,
            log_scroll: 0,
            list_scroll: 0,
        }
    }

    pub fn set_kind(&mut self, kind: ProgressSinkKind) {
        self.kind = kind;
    }

    /// Runs `f` on a worker thread while drawing progress. Esc aborts the session.
    pub fn run<F, R>(&mut self, f: F) -> miette::Result<R>
    where
        F: FnOnce(&dyn ProgressSink) -> Result<R, DexError> + Send + 'static,
        R: Send + 'static,
    {
        self.set_active(true);

        let mut terminal = enter_terminal()?;
        let (tx, rx) = std::sync::mpsc::channel();
        let sink = TuiProgress {
            state: self.state.clone(),
        };
        let handle = thread::spawn(move || tx.send(f(&sink)));

        let mut tick = 0usize;
        loop {
            self.refresh();
            if let Ok(state) = self.state.lock() {
                let elapsed = state.started.elapsed();
                terminal
                    .draw(|frame| draw_ui(frame, self, &state, tick, elapsed))
                    .into_diagnostic()?;
            }

            if let Ok(result) = rx.try_recv() {
                self.set_active(false);
                leave_terminal()?;
                handle.join().ok();
                return result.map_err(miette::Report::new);
            }

            if event::poll(Duration::from_millis(120)).into_diagnostic()?
                && let Event::Key(key) = event::read().into_diagnostic()?
                && key.kind == KeyEventKind::Press
                && key.code == KeyCode::Esc
            {
                break;
            }

            tick = tick.wrapping_add(1);
        }

        self.set_active(false);
        leave_terminal()?;
        Err(miette::Report::msg("aborted"))
    }

    /// Shows the current page and waits for the next command line.
    pub fn idle_command(&mut self) -> miette::Result<Option<String>> {
        self.set_active(false);
        self.set_input_mode(InputMode::Command);

        let mut terminal = enter_terminal()?;
        let mut tick = 0usize;
        let mut command: Option<String> = None;
        loop {
            self.refresh();
            if let Ok(state) = self.state.lock() {
                let elapsed = state.started.elapsed();
                terminal
                    .draw(|frame| draw_ui(frame, self, &state, tick, elapsed))
                    .into_diagnostic()?;
            }

            if event::poll(Duration::from_millis(120)).into_diagnostic()?
                && let Event::Key(key) = event::read().into_diagnostic()?
            {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::PageDown {
                    command = Some("more".to_string());
                    break;
                }
                if key.kind == KeyEventKind::Press
                    && key.code == KeyCode::Enter
                    && self.input_mode() == InputMode::Command
                    && let Some(cmd) = self.take_command()
                {
                    command = Some(cmd);
                    break;
                }
                if self.handle_key(key) {
                    break;
                }
            }

            tick = tick.wrapping_add(1);
        }

        leave_terminal()?;
        Ok(command)
    }

    pub fn show_page(&mut self, page: PageResult) {
        if let Ok(mut state) = self.state.lock() {
            state.status = match (page.state, page.placeholder.as_deref()) {
                (_, Some(text)) => text.to_string(),
                (ViewState::ShowingResults, None) => {
                    format!("showing {} of {}", page.shown, page.total)
                }
                (other, None) => format!("{other:?}"),
            };
            state.page = Some(page);
            state.view = View::Results;
        }
    }

    pub fn show_error(&mut self, message: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.status = format!("error: {message}");
            push_bounded(&mut state.events, format!("error: {message}"), EVENTS_MAX);
            let stamp = chrono::Local::now().format("%H:%M:%S");
            push_bounded(&mut state.logs, format!("[{stamp}] error: {message}"), LOGS_MAX);
        }
    }

    /// Returns `true` when the session should end.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::F(1) => {
                self.set_view(View::Help);
                return false;
            }
            KeyCode::F(3) => {
                self.set_view(View::Results);
                self.set_input_mode(InputMode::Search);
                return false;
            }
            KeyCode::F(4) => {
                self.set_view(View::Logs);
                return false;
            }
            _ => {}
        }

        match key.code {
            KeyCode::Esc => {
                if self.current_view() != View::Results {
                    self.set_view(View::Results);
                    return false;
                }
                return true;
            }
            KeyCode::Char('/') if self.input.is_empty() => {
                self.set_input_mode(InputMode::Search);
            }
            KeyCode::Char('?') if self.input.is_empty() => {
                self.set_view(View::Help);
            }
            KeyCode::Tab => {
                let suggestion = self.autocomplete();
                self.input = suggestion;
            }
            KeyCode::Up => self.history_up(),
            KeyCode::Down => self.history_down(),
            KeyCode::PageUp => self.list_scroll = self.list_scroll.saturating_sub(5),
            KeyCode::Left => self.scroll_logs(-5),
            KeyCode::Right => self.scroll_logs(5),
            KeyCode::Enter => {
                if self.input_mode() == InputMode::Search {
                    if let Some(best) = self.best_history_match() {
                        self.input = best;
                    }
                    self.set_input_mode(InputMode::Command);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(ch) => self.input.push(ch),
            _ => {}
        }
        false
    }

    fn take_command(&mut self) -> Option<String> {
        let current = self.input.trim().to_string();
        if current.is_empty() {
            return None;
        }
        self.history.push(current.clone());
        self.history_index = None;
        self.input.clear();
        self.list_scroll = 0;
        Some(current)
    }

    fn input_mode(&self) -> InputMode {
        self.state
            .lock()
            .map(|state| state.input_mode)
            .unwrap_or(InputMode::Command)
    }

    fn set_input_mode(&self, mode: InputMode) {
        if let Ok(mut state) = self.state.lock() {
            state.input_mode = mode;
        }
    }

    fn current_view(&self) -> View {
        self.state
            .lock()
            .map(|state| state.view)
            .unwrap_or(View::Results)
    }

    fn set_view(&self, view: View) {
        if let Ok(mut state) = self.state.lock() {
            state.view = view;
        }
    }

    fn set_active(&self, active: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.active = active;
            if active {
                state.started = Instant::now();
                state.matches = 0;
                state.skips = 0;
                state.latency_ms = None;
                state.phase = Phase::Resolve;
            }
        }
    }

    fn refresh(&self) {
        if let Ok(mut state) = self.state.lock()
            && state.last_hint_update.elapsed() >= Duration::from_secs(5)
        {
            state.hint_index = (state.hint_index + 1) % HINTS.len();
            state.last_hint_update = Instant::now();
        }
    }

    fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.history_index {
            Some(index) if index > 0 => index - 1,
            Some(_) => 0,
            None => self.history.len() - 1,
        };
        self.history_index = Some(next);
        if let Some(value) = self.history.get(next) {
            self.input = value.clone();
        }
    }

    fn history_down(&mut self) {
        match self.history_index {
            Some(index) if index + 1 < self.history.len() => {
                self.history_index = Some(index + 1);
                self.input = self.history[index + 1].clone();
            }
            _ => {
                self.history_index = None;
                self.input.clear();
            }
        }
    }

    fn autocomplete(&self) -> String {
        complete_line(&self.input)
            .or_else(|| self.best_history_match())
            .unwrap_or_else(|| self.input.clone())
    }

    fn best_history_match(&self) -> Option<String> {
        let needle = self.input.trim();
        if needle.is_empty() {
            return None;
        }
        let mut best: Option<(usize, &String)> = None;
        for entry in &self.history {
            if let Some(score) = fuzzy_score(needle, entry) {
                match best {
                    Some((best_score, _)) if score >= best_score => {}
                    _ => best = Some((score, entry)),
                }
            }
        }
        best.map(|(_, entry)| entry.clone())
    }

    fn scroll_logs(&mut self, delta: i16) {
        let max = self.state.lock().map(|state| state.logs.len()).unwrap_or(0);
        let max_scroll = max.saturating_sub(1) as i16;
        let next = (self.log_scroll as i16 + delta).clamp(0, max_scroll);
        self.log_scroll = next as u16;
    }
}

/// Completes the last word of `line` against commands, types and regions.
pub fn complete_line(line: &str) -> Option<String> {
    let (head, last) = match line.rsplit_once(' ') {
        Some((head, last)) => (Some(head), last),
        None => (None, line),
    };
    if last.is_empty() {
        return None;
    }
    let needle = last.to_lowercase();
    let pool: Vec<String> = match head {
        None => COMMANDS.iter().map(|c| c.to_string()).collect(),
        Some(_) => std::iter::once("any".to_string())
            .chain(Category::ALL.iter().map(|c| c.as_str().to_string()))
            .chain(Region::ALL.iter().map(|r| r.display_name().to_lowercase()))
            .collect(),
    };
    let found = pool.into_iter().find(|candidate| candidate.starts_with(&needle))?;
    Some(match head {
        Some(head) => format!("{head} {found}"),
        None => format!("{found} "),
    })
}

fn enter_terminal() -> miette::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode().into_diagnostic()?;
    stdout.execute(EnterAlternateScreen).into_diagnostic()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).into_diagnostic()?;
    terminal.clear().into_diagnostic()?;
    Ok(terminal)
}

fn leave_terminal() -> miette::Result<()> {
    disable_raw_mode().into_diagnostic()?;
    io::stdout()
        .execute(LeaveAlternateScreen)
        .into_diagnostic()?;
    Ok(())
}

fn draw_ui(
    frame: &mut ratatui::Frame,
    tui: &Tui,
    state: &TuiState,
    tick: usize,
    elapsed: Duration,
) {
    match state.view {
        View::Results => draw_results(frame, tui, state, tick, elapsed),
        View::Logs => draw_logs(frame, tui, state, tick),
        View::Help => draw_help(frame),
    }
}

fn draw_results(
    frame: &mut ratatui::Frame,
    tui: &Tui,
    state: &TuiState,
    tick: usize,
    elapsed: Duration,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    frame.render_widget(draw_header(state, tui.kind, tick), chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    frame.render_widget(draw_cards(state, tui.list_scroll), main[0]);
    frame.render_widget(draw_status_panel(state, elapsed), main[1]);

    draw_command_line(frame, tui, state, tick, chunks[2]);
}

fn draw_logs(frame: &mut ratatui::Frame, tui: &Tui, state: &TuiState, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    frame.render_widget(draw_header(state, tui.kind, tick), chunks[0]);
    frame.render_widget(draw_logs_view(state, tui.log_scroll), chunks[1]);
    draw_command_line(frame, tui, state, tick, chunks[2]);
}

fn draw_help(frame: &mut ratatui::Frame) {
    let block = Block::default().borders(Borders::ALL).title("Help");
    let lines = vec![
        Line::from("F1 Help  F3 History search  F4 Logs  Esc back/quit"),
        Line::from("search <name|number>   or just type the name"),
        Line::from("filter [type|any] [region|any]   e.g. filter fire kanto"),
        Line::from("reset   more (PgDn)   quit"),
        Line::from("Left/Right scroll logs, PgUp scrolls the list back"),
    ];
    let view = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(view, frame.area());
}

fn draw_header(state: &TuiState, kind: ProgressSinkKind, tick: usize) -> Paragraph<'static> {
    let hb = if state.active && tick % 2 == 0 {
        "*"
    } else {
        " "
    };
    let op_label = match kind {
        ProgressSinkKind::Browse => "Browse",
        ProgressSinkKind::Search => "Search",
        ProgressSinkKind::Filter => "Filter",
    };
    let (category, region, term) = state
        .page
        .as_ref()
        .map(|page| {
            (
                page.inputs.category.to_string(),
                page.inputs.region.to_string(),
                page.inputs.term.clone(),
            )
        })
        .unwrap_or_else(|| ("Any".to_string(), "Any".to_string(), String::new()));
    let header_line = Line::from(vec![
        Span::styled(
            "POKEDEX",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(env!("CARGO_PKG_VERSION"), Style::default().fg(Color::Gray)),
        Span::raw("   Op: "),
        Span::styled(op_label, Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled(hb, Style::default().fg(Color::Green)),
    ]);
    let filter_line = Line::from(vec![Span::styled(
        format!("Type: {category}   Region: {region}   Search: {term}"),
        Style::default().fg(Color::Gray),
    )]);
    Paragraph::new(vec![header_line, filter_line])
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::BOTTOM))
}

fn draw_cards(state: &TuiState, scroll: u16) -> Paragraph<'static> {
    let mut lines = vec![Line::from(Span::styled(
        "RESULTS",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];

    match &state.page {
        None => lines.push(Line::from("Loading...")),
        Some(page) => {
            if let Some(text) = &page.placeholder {
                lines.push(Line::from(text.clone()));
            }
            for card in &page.cards {
                let mut spans = vec![
                    Span::styled(
                        format!("{:>6} ", card.number),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        format!("{:<14}", card.name),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ];
                for icon in &card.icons {
                    spans.push(Span::styled(
                        format!("[{}] ", icon.label),
                        Style::default().fg(category_color(&icon.label)),
                    ));
                }
                lines.push(Line::from(spans));
            }
            if page.has_more {
                lines.push(Line::from(Span::styled(
                    format!("-- {} more, PgDn to load --", page.total - page.shown),
                    Style::default().fg(Color::Yellow),
                )));
            }
        }
    }

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::RIGHT))
        .scroll((scroll, 0))
}

fn draw_status_panel(state: &TuiState, elapsed: Duration) -> Paragraph<'static> {
    let phase_color = if state.active {
        Color::Cyan
    } else {
        Color::Green
    };
    let latency = state
        .latency_ms
        .map(|v| format!("{v} ms"))
        .unwrap_or_else(|| "--".to_string());
    let fetches = state
        .page
        .as_ref()
        .map(|page| {
            format!(
                "{} net / {} cached",
                page.stats.network_fetches, page.stats.cache_hits
            )
        })
        .unwrap_or_else(|| "--".to_string());
    let mut lines = vec![
        Line::from(Span::styled(
            "STATUS",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Phase: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:<8}", state.phase.label()),
                Style::default().fg(phase_color),
            ),
            Span::raw(progress_bar(state.phase, state.active, elapsed)),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Gray)),
            Span::raw(state.status.clone()),
        ]),
        Line::from(vec![
            Span::styled("Matches: ", Style::default().fg(Color::Gray)),
            Span::raw(state.matches.to_string()),
            Span::styled("   Skipped: ", Style::default().fg(Color::Gray)),
            Span::raw(state.skips.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Latency: ", Style::default().fg(Color::Gray)),
            Span::raw(latency),
        ]),
        Line::from(vec![
            Span::styled("Fetches: ", Style::default().fg(Color::Gray)),
            Span::raw(fetches),
        ]),
        Line::from(Span::styled(
            "Recent events:",
            Style::default().fg(Color::Gray),
        )),
    ];

    for event in state.events.iter().rev().take(4) {
        lines.push(Line::from(format!("- {event}")));
    }
    lines.push(Line::from(vec![
        Span::styled("Hint: ", Style::default().fg(Color::Gray)),
        Span::styled(HINTS[state.hint_index], Style::default().fg(Color::Gray)),
    ]));

    Paragraph::new(lines).wrap(Wrap { trim: true })
}

fn draw_command_line(
    frame: &mut ratatui::Frame,
    tui: &Tui,
    state: &TuiState,
    tick: usize,
    area: Rect,
) {
    let prefix = match state.input_mode {
        InputMode::Command => ": ",
        InputMode::Search => "/ ",
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(
                prefix,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(tui.input.clone(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("= ", Style::default().fg(Color::DarkGray)),
            Span::styled(command_preview(tui, state), Style::default().fg(Color::DarkGray)),
        ]),
    ];
    let para = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
    frame.render_widget(para, area);

    if !state.active && (tick / 6) % 2 == 0 {
        let width = (prefix.len() + tui.input.len()) as u16;
        let cursor_x = area
            .x
            .saturating_add(width)
            .min(area.x.saturating_add(area.width.saturating_sub(1)));
        frame.set_cursor_position((cursor_x, area.y.saturating_add(1)));
    }
}

fn draw_logs_view(state: &TuiState, scroll: u16) -> Paragraph<'static> {
    let total = state.logs.len();
    let visible = 16usize;
    let start = total.saturating_sub(scroll as usize + visible);
    let mut lines = Vec::with_capacity(visible + 1);
    lines.push(Line::from(Span::styled(
        "LOGS (Left/Right to scroll)",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    for line in state.logs.iter().skip(start).take(visible) {
        lines.push(Line::from(line.clone()));
    }
    Paragraph::new(lines).wrap(Wrap { trim: true })
}

fn command_preview(tui: &Tui, state: &TuiState) -> String {
    if state.input_mode == InputMode::Search {
        return match tui.best_history_match() {
            Some(best) => format!("match: {best}"),
            None => "search history".to_string(),
        };
    }
    if tui.input.trim().is_empty() {
        return "ready".to_string();
    }
    match parse_command(&tui.input) {
        Ok(TuiCommand::Search(term)) => format!("look up {term}"),
        Ok(TuiCommand::Filter(category, region)) => {
            format!("filter type={category} region={region}")
        }
        Ok(TuiCommand::Reset) => "reset filters and browse".to_string(),
        Ok(TuiCommand::More) => "load next page".to_string(),
        Ok(TuiCommand::Quit) => "quit".to_string(),
        Err(err) => err.to_string(),
    }
}

fn progress_bar(phase: Phase, active: bool, elapsed: Duration) -> String {
    let total = 9;
    let filled = if active {
        let base = (phase.index() + 1) * 3;
        let wobble = (elapsed.as_millis() / 300 % 2) as usize;
        (base + wobble).min(total)
    } else {
        total
    };
    let mut out = String::from("[");
    for i in 0..total {
        out.push(if i < filled { '#' } else { '.' });
    }
    out.push(']');
    out
}

fn category_color(label: &str) -> Color {
    match label.parse::<Category>() {
        Ok(Category::Fire) => Color::Red,
        Ok(Category::Water | Category::Ice) => Color::Blue,
        Ok(Category::Grass | Category::Bug) => Color::Green,
        Ok(Category::Electric) => Color::Yellow,
        Ok(Category::Psychic | Category::Fairy) => Color::Magenta,
        Ok(Category::Poison | Category::Ghost | Category::Dragon) => Color::LightMagenta,
        Ok(Category::Ground | Category::Rock | Category::Fighting) => Color::LightRed,
        Ok(Category::Flying) => Color::LightCyan,
        Ok(Category::Dark | Category::Steel) => Color::DarkGray,
        _ => Color::White,
    }
}

fn parse_phase(message: &str) -> Option<(Phase, &str)> {
    let rest = message.strip_prefix("phase=")?;
    let (label, payload) = rest.split_once(';')?;
    let phase = match label {
        "Resolve" => Phase::Resolve,
        "Scan" => Phase::Scan,
        "Fetch" => Phase::Fetch,
        "Render" => Phase::Render,
        _ => return None,
    };
    Some((phase, payload.trim()))
}

fn push_bounded(buffer: &mut VecDeque<String>, item: String, max: usize) {
    buffer.push_back(item);
    while buffer.len() > max {
        buffer.pop_front();
    }
}

fn fuzzy_score(needle: &str, hay: &str) -> Option<usize> {
    let mut score = 0usize;
    let mut iter = hay.chars();
    for ch in needle.chars() {
        let mut found = false;
        for h in iter.by_ref() {
            score += 1;
            if h.eq_ignore_ascii_case(&ch) {
                found = true;
                break;
            }
        }
        if !found {
            return None;
        }
    }
    Some(score)
}
