use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use courtside::config::AppConfig;
use courtside::fake_feed;
use courtside::score::Team;
use courtside::state::{apply_delta, format_label, on_off_label, AppState, Delta};

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(cfg: &AppConfig) -> Self {
        Self {
            state: AppState::from_config(cfg),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) {
        let delta = match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.state.help_overlay = !self.state.help_overlay;
                return;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.state.toggle_settings();
                return;
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Delta::Point(Team::A),
            KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Right => Delta::Point(Team::B),
            KeyCode::Char('u') | KeyCode::Char('z') | KeyCode::Backspace => Delta::Undo,
            KeyCode::Char('r') | KeyCode::Char('R') => Delta::Reset,
            KeyCode::Char('g') | KeyCode::Char('G') => Delta::ToggleGoldenPoint,
            KeyCode::Char('3') => Delta::ToggleBestOfThree,
            _ => return,
        };
        apply_delta(&mut self.state, delta, now);
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let cfg = AppConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    if cfg.demo_feed {
        fake_feed::spawn_fake_feed(tx, cfg.demo_point_interval, cfg.demo_serve_bias);
    } else {
        drop(tx);
    }

    let mut app = App::new(&cfg);
    app.state.push_log(format!(
        "[INFO] {} vs {} | {} | Golden point {}",
        cfg.team_a_name,
        cfg.team_b_name,
        format_label(cfg.rules.best_of_three),
        on_off_label(cfg.rules.golden_point)
    ));
    let res = run_app(&mut terminal, &mut app, rx);

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
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta, Instant::now());
        }
        app.state.clear_expired_flashes(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key, Instant::now());
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

fn ui(frame: &mut Frame, app: &App) {
    let state = &app.state;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(if state.settings_visible { 5 } else { 0 }),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_scoreboard(frame, chunks[1], state);

    if state.settings_visible {
        let settings = Paragraph::new(settings_text(state))
            .block(Block::default().title("Settings").borders(Borders::ALL));
        frame.render_widget(settings, chunks[2]);
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[3]);

    let footer = Paragraph::new(footer_text(state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[4]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let rules = state.engine.rules();
    let mut title = format!(
        "COURTSIDE | {} | Golden point {}",
        format_label(rules.best_of_three),
        on_off_label(rules.golden_point)
    );
    if state.engine.tie_break() {
        title.push_str(" | TIEBREAK");
    }
    let line1 = format!("  (o)  {title}");
    let line2 = format!(
        "  ---  {} vs {}",
        state.team_name(Team::A),
        state.team_name(Team::B)
    );
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    let undo = if state.engine.can_undo() {
        "u Undo"
    } else {
        "u Undo (-)"
    };
    format!("a/← Point A | b/→ Point B | {undo} | r Reset | s Settings | ? Help | q Quit")
}

fn render_scoreboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let widths = scoreboard_columns();
    render_scoreboard_header(frame, rows[0], &widths);

    let now = Instant::now();
    for (team, row_area) in [(Team::A, rows[1]), (Team::B, rows[2])] {
        render_team_row(frame, row_area, &widths, state, team, now);
    }

    let banner = match state.engine.winner() {
        Some(team) => Paragraph::new(format!("{} WINS THE MATCH", state.team_name(team)))
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        None => Paragraph::new(status_text(state)).style(Style::default().fg(Color::Gray)),
    };
    frame.render_widget(banner.alignment(Alignment::Center), rows[3]);
}

fn scoreboard_columns() -> [Constraint; 4] {
    [
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(10),
    ]
}

fn render_scoreboard_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);
    for (idx, title) in ["TEAM", "SETS", "GAMES", "POINTS"].iter().enumerate() {
        render_cell_text(frame, cols[idx], title, style);
    }
}

fn render_team_row(
    frame: &mut Frame,
    area: Rect,
    widths: &[Constraint],
    state: &AppState,
    team: Team,
    now: Instant,
) {
    let game_flash = state.game_flash_team(now) == Some(team);
    let point_flash = state.point_flash_team(now) == Some(team);
    let row_style = if game_flash {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else if state.engine.winner() == Some(team) {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    frame.render_widget(Block::default().style(row_style), area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);

    let sets = state.engine.sets_won()[team].to_string();
    let games = state.engine.games_won()[team].to_string();
    let points = state.engine.score_label(team);
    let points_style = if point_flash {
        row_style.fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        row_style.add_modifier(Modifier::BOLD)
    };

    render_cell_text(frame, cols[0], state.team_name(team), row_style);
    render_cell_text(frame, cols[1], &sets, row_style);
    render_cell_text(frame, cols[2], &games, row_style);
    render_cell_text(frame, cols[3], &points, points_style);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    if area.height == 0 {
        return;
    }
    let y_offset = area.height.saturating_sub(1) / 2;
    let line_area = Rect {
        x: area.x,
        y: area.y + y_offset,
        width: area.width,
        height: 1,
    };
    frame.render_widget(Paragraph::new(text.to_string()).style(style), line_area);
}

fn status_text(state: &AppState) -> String {
    let match_state = state.engine.state();
    if match_state.tie_break {
        return "Tiebreak: first to 7, win by 2".to_string();
    }
    if let Some(team) = match_state.advantage() {
        return format!("Advantage {}", state.team_name(team));
    }
    if match_state.is_deuce() {
        if state.engine.rules().golden_point {
            return "Deuce - golden point".to_string();
        }
        return "Deuce".to_string();
    }
    String::new()
}

fn settings_text(state: &AppState) -> String {
    let rules = state.engine.rules();
    [
        format!("  g  Golden point     {}", on_off_label(rules.golden_point)),
        format!("  3  Match format     {}", format_label(rules.best_of_three)),
        format!("     Undo depth       {}", state.engine.history_len()),
    ]
    .join("\n")
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No events yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(4)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Courtside - Help",
        "",
        "Scoring:",
        "  a / ←        Point to team A",
        "  b / →        Point to team B",
        "  u / z        Undo last action",
        "  r            Reset match (undoable)",
        "",
        "Settings:",
        "  s            Show/hide settings",
        "  g            Toggle golden point",
        "  3            Toggle best of 3 / best of 1",
        "",
        "  ?            Toggle help",
        "  q            Quit",
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
