//! Core TUI application state and event loop.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use codetutor_engine::{KnowledgeStore, ResponseEngine};
use codetutor_shared::load_config;
use codetutor_tokenizer::{TokenCounter, VocabTokenizer};

use crate::screens::{Screen, ScreenId};
use crate::widgets::status_bar;
use crate::worker::{self, WorkerHandle};

/// Index of the chat tab — worker replies are routed to it.
const CHAT_TAB: usize = 0;

/// Application state.
pub(crate) struct App {
    /// Currently active screen tab.
    pub active_tab: usize,
    /// Available screens.
    pub screens: Vec<ScreenId>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status message shown in bottom bar.
    pub status: String,
    /// Whether help overlay is visible.
    pub show_help: bool,
    /// Per-screen state.
    pub screen_states: Vec<Screen>,
    /// Handle to the engine thread.
    worker: WorkerHandle,
}

impl App {
    pub(crate) fn new(store: Arc<KnowledgeStore>, worker: WorkerHandle) -> Self {
        let screens = vec![ScreenId::Chat, ScreenId::Topics];
        let screen_states = screens
            .iter()
            .map(|s| Screen::new(*s, Arc::clone(&store)))
            .collect();

        Self {
            active_tab: 0,
            screens,
            should_quit: false,
            status: "Ready — press ? for help".to_string(),
            show_help: false,
            screen_states,
            worker,
        }
    }

    fn current_screen(&self) -> &Screen {
        &self.screen_states[self.active_tab]
    }

    fn current_screen_mut(&mut self) -> &mut Screen {
        &mut self.screen_states[self.active_tab]
    }

    /// Deliver any finished replies from the engine thread.
    fn drain_worker(&mut self) {
        while let Some(reply) = self.worker.try_recv() {
            self.screen_states[CHAT_TAB].chat.push_reply(reply.response);
            self.status = "Ready".to_string();
        }
    }
}

/// Entry point — builds the engine, sets up the terminal, runs the event
/// loop, restores the terminal.
pub(crate) fn run() -> Result<()> {
    let config = load_config()?;

    let mut defs = codetutor_topics::builtin_topics();
    if let Some(path) = &config.topics.file {
        defs.extend(codetutor_topics::load_topic_file(Path::new(path))?);
    }
    let store = Arc::new(KnowledgeStore::load(defs)?);

    let tokenizer: Option<Box<dyn TokenCounter + Send>> = match &config.tokenizer.model_dir {
        Some(dir) => match VocabTokenizer::load(Path::new(dir)) {
            Ok(t) => Some(Box::new(t)),
            Err(e) => {
                tracing::warn!(model_dir = %dir, error = %e, "tokenizer unavailable, using word count");
                None
            }
        },
        None => None,
    };

    let engine = ResponseEngine::new(Arc::clone(&store), tokenizer, config.engine.max_history);
    let worker = worker::spawn(engine);

    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(store, worker));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        app.drain_worker();

        terminal.draw(|f| draw(f, &app))?;

        // Poll for events with 100ms timeout for responsive UI
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key.code, key.modifiers);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Global keybindings (always active)
    match code {
        KeyCode::Char('q') | KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if !app.current_screen().is_editing() => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') if !app.current_screen().is_editing() => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        // Tab navigation with number keys
        KeyCode::Char(c @ '1'..='2') if !app.current_screen().is_editing() => {
            let idx = (c as usize) - ('1' as usize);
            if idx < app.screens.len() {
                app.active_tab = idx;
                app.status = format!("{}", app.screens[idx]);
            }
            return;
        }
        KeyCode::Tab if !app.current_screen().is_editing() => {
            app.active_tab = (app.active_tab + 1) % app.screens.len();
            app.status = format!("{}", app.screens[app.active_tab]);
            return;
        }
        KeyCode::BackTab if !app.current_screen().is_editing() => {
            app.active_tab = if app.active_tab == 0 {
                app.screens.len() - 1
            } else {
                app.active_tab - 1
            };
            app.status = format!("{}", app.screens[app.active_tab]);
            return;
        }
        _ => {}
    }

    // If help is showing, consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Delegate to current screen; the chat screen may hand back a query.
    if let Some(query) = app.current_screen_mut().handle_key(code, modifiers) {
        app.worker.submit(query);
        app.status = "Thinking...".to_string();
    }
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    // Tab bar
    let tab_titles: Vec<Line> = app.screens.iter().map(|s| Line::from(format!("{s}"))).collect();

    let tabs = Tabs::new(tab_titles)
        .block(Block::default().borders(Borders::ALL).title(" CodeTutor "))
        .select(app.active_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider(" │ ");

    f.render_widget(tabs, chunks[0]);

    // Content area — delegate to screen
    app.current_screen().draw(f, chunks[1]);

    // Status bar
    let bar = status_bar(&app.status);
    f.render_widget(bar, chunks[2]);

    // Help overlay
    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());

    let help_text = vec![
        Line::from("Keybindings").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("  1-2          Switch to screen"),
        Line::from("  Tab/S-Tab    Next/previous screen"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl-C   Quit"),
        Line::from(""),
        Line::from("Chat:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  Enter        Send message / focus input"),
        Line::from("  Ctrl-E       Cycle example questions"),
        Line::from("  Esc          Leave the input field"),
        Line::from("  ↑/↓          Scroll transcript / navigate topics"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help — press any key to close ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    // Clear background
    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(help, area);
}

/// Create a centered rectangle with percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
