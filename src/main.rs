use std::io;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use lineup_terminal::catalog::{Catalog, Map, Side, UtilityType};
use lineup_terminal::config::AppConfig;
use lineup_terminal::details::{DetailParams, DetailView};
use lineup_terminal::opener::{SystemOpener, VideoLauncher};
use lineup_terminal::state::{AppState, Focus, Screen, UiEvent};

struct App<'a> {
    state: AppState<'a>,
    launcher: VideoLauncher,
    should_quit: bool,
}

impl<'a> App<'a> {
    fn new(catalog: &'a Catalog, launcher: VideoLauncher) -> Self {
        Self {
            state: AppState::new(catalog),
            launcher,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.dismiss_notice();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => match self.state.screen {
                Screen::Browse => self.on_browse_key(key),
                Screen::Details(_) => self.on_details_key(key),
            },
        }
    }

    fn on_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.state.focus_next(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.state.focus_prev(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(url) = self.state.activate() {
                    self.launcher.spawn(url);
                }
            }
            KeyCode::Char('o') => {
                if let Some(url) = self.state.launch_highlighted() {
                    self.launcher.spawn(url);
                }
            }
            _ => {}
        }
    }

    fn on_details_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('w') | KeyCode::Char('o') => {
                if let Some(url) = self.state.activate() {
                    self.launcher.spawn(url);
                }
            }
            KeyCode::Char('b') | KeyCode::Esc => self.state.back(),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();
    let mut startup_logs = Vec::new();
    let catalog = match config.load_catalog() {
        Ok(catalog) => catalog,
        Err(err) => {
            startup_logs.push(format!("[WARN] Catalog load failed, using built-in: {err:#}"));
            Catalog::builtin().clone()
        }
    };
    let deep_link = std::env::args().nth(1);

    let (tx, rx) = mpsc::channel();
    let opener = Arc::new(SystemOpener::new(config.opener_command.as_deref()));
    let mut app = App::new(&catalog, VideoLauncher::new(opener, tx));
    app.state
        .push_log(format!("[INFO] {} lineups loaded", catalog.len()));
    for line in startup_logs {
        app.state.push_log(line);
    }
    if let Some(link) = deep_link {
        match DetailParams::from_deep_link(&link) {
            Ok(params) => app.state.open_details(params),
            Err(err) => app.state.push_log(format!("[WARN] {err:#}")),
        }
    }

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend).context("init terminal")?;

    let res = run_app(&mut terminal, &mut app, rx, config.tick_rate);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<UiEvent>,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        while let Ok(event) = rx.try_recv() {
            app.state.apply_event(event);
        }

        terminal.draw(|f| ui(f, &app.state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, state: &AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(area);

    let header = Paragraph::new(header_text(state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match &state.screen {
        Screen::Browse => render_browse(frame, chunks[1], state),
        Screen::Details(params) => render_details(frame, chunks[1], state, params),
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        render_help_overlay(frame, area);
    }
    if let Some(notice) = &state.notice {
        render_notice(frame, area, &notice.title, &notice.message);
    }
}

fn header_text(state: &AppState) -> String {
    let selection = state.selection();
    let title = match state.screen {
        Screen::Browse => format!(
            "CS2 LINEUPS | Map: {} | Side: {} | Utility: {}",
            selection.map().map(Map::label).unwrap_or("-"),
            selection.side().map(Side::label).unwrap_or("-"),
            selection.utility_type().map(UtilityType::label).unwrap_or("-"),
        ),
        Screen::Details(_) => "CS2 LINEUPS | VIDEO".to_string(),
    };
    let pending = if state.launch_pending {
        "  (opening video...)"
    } else {
        ""
    };
    format!("  ( )  {title}{pending}\n (___)")
}

fn footer_text(state: &AppState) -> &'static str {
    match state.screen {
        Screen::Browse => {
            "Tab/←/→ Step | j/k/↑/↓ Move | Enter Choose/Details | o Open video | ? Help | q Quit"
        }
        Screen::Details(_) => "Enter/w Watch video | b/Esc Back | ? Help | q Quit",
    }
}

fn render_browse(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let selection = state.selection();
    let map_labels = Map::ALL.map(Map::label);
    let side_labels = Side::ALL.map(Side::label);
    let utility_labels = UtilityType::ALL.map(UtilityType::label);

    render_option_group(
        frame,
        rows[0],
        "1) Map",
        &map_labels,
        selection.map().and_then(|m| Map::ALL.iter().position(|x| *x == m)),
        state.map_cursor,
        state.focus == Focus::Map,
        true,
    );
    render_option_group(
        frame,
        rows[1],
        "2) Side",
        &side_labels,
        selection.side().and_then(|s| Side::ALL.iter().position(|x| *x == s)),
        state.side_cursor,
        state.focus == Focus::Side,
        selection.side_enabled(),
    );
    render_option_group(
        frame,
        rows[2],
        "3) Utility",
        &utility_labels,
        selection
            .utility_type()
            .and_then(|t| UtilityType::ALL.iter().position(|x| *x == t)),
        state.utility_cursor,
        state.focus == Focus::Utility,
        selection.utility_enabled(),
    );

    let summary = Paragraph::new(state.engine().summary())
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(summary, rows[3]);

    render_lineup_list(frame, rows[4], state);
}

#[allow(clippy::too_many_arguments)]
fn render_option_group(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    labels: &[&str],
    chosen: Option<usize>,
    cursor: usize,
    focused: bool,
    enabled: bool,
) {
    let mut spans = Vec::with_capacity(labels.len() * 2);
    for (idx, label) in labels.iter().enumerate() {
        let mut style = Style::default();
        if !enabled {
            style = style.fg(Color::DarkGray);
        } else if chosen == Some(idx) {
            style = style.fg(Color::White).bg(Color::Blue);
        }
        if focused && cursor == idx {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {label} "), style));
        spans.push(Span::raw(" "));
    }

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let group = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(group, area);
}

fn render_lineup_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Lineups;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title("4) Lineups")
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lineups = state.visible_lineups();
    if lineups.is_empty() {
        let empty = Paragraph::new("Nothing to show yet")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    const ROW_HEIGHT: u16 = 3;
    if inner.height < ROW_HEIGHT {
        let empty = Paragraph::new("Lineup list needs more height")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let visible = (inner.height / ROW_HEIGHT) as usize;
    let (start, end) = visible_range(state.lineup_cursor, lineups.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + (i as u16) * ROW_HEIGHT,
            width: inner.width,
            height: ROW_HEIGHT,
        };

        let selected = focused && idx == state.lineup_cursor;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let lineup = lineups[idx];
        let text = vec![
            Line::from(Span::styled(
                lineup.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{} • {} • {}   {}",
                lineup.map, lineup.side, lineup.utility_type, lineup.image_url
            )),
            Line::from(Span::styled(
                "Enter for details, o to open the video",
                Style::default().fg(Color::LightBlue),
            )),
        ];
        let row = Paragraph::new(text).style(row_style);
        frame.render_widget(row, row_area);
    }
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_details(frame: &mut Frame, area: Rect, state: &AppState, params: &DetailParams) {
    let view = DetailView::from_params(params);
    let action_style = if state.launch_pending {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White).bg(Color::Blue)
    };

    let text = vec![
        Line::from(Span::styled(
            view.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(view.meta.clone(), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(format!("Image: {}", view.image)),
        Line::from(format!("Video: {}", params.video_url().unwrap_or("-"))),
        Line::from(""),
        Line::from(Span::styled(format!(" {} ", view.action), action_style)),
        Line::from(""),
        Line::from(Span::styled(
            format!("Link: {}", params.to_deep_link()),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let details = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(view.title).borders(Borders::ALL));
    frame.render_widget(details, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_notice(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let popup_area = centered_rect(40, 25, area);
    frame.render_widget(Clear, popup_area);

    let text = format!("{message}\n\nEnter / Esc to dismiss");
    let notice = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(notice, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "CS2 Lineups - Help",
        "",
        "Browse:",
        "  Tab / → / l        Next step",
        "  Shift-Tab / ← / h  Previous step",
        "  j/k or ↑/↓         Move within a step",
        "  Enter / Space      Choose option / open details",
        "  o                  Open the highlighted video",
        "",
        "Details:",
        "  Enter / w          Watch video",
        "  b / Esc            Back",
        "",
        "  ?                  Toggle help",
        "  q                  Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
