use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::warn;

use crate::io::client;
use crate::io::taskrc;
use crate::io::watcher::DataWatcher;
use crate::model::{PanelConfig, TaskRecord};
use crate::panel;

use super::panel_view;
use super::theme::Theme;

/// Main application state
pub struct App {
    pub config: PanelConfig,
    pub theme: Theme,
    /// Latest task snapshot, replaced wholesale on every refresh.
    pub tasks: Vec<TaskRecord>,
    /// Message from the last failed fetch cycle, if any.
    pub last_error: Option<String>,
    /// Cursor into the visible (pending, sorted) rows.
    pub selected: usize,
    pub last_refresh: Option<chrono::DateTime<chrono::Local>>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: PanelConfig) -> Self {
        let theme = Theme::from_config(&config.ui);
        App {
            config,
            theme,
            tasks: Vec::new(),
            last_error: None,
            selected: 0,
            last_refresh: None,
            should_quit: false,
        }
    }

    /// Run one fetch cycle: resolve the taskrc, export, replace the snapshot.
    /// A failed cycle clears the snapshot and records the message; the next
    /// cycle starts from scratch either way.
    pub fn refresh(&mut self) {
        let result = taskrc::resolve_and_parse(self.config.taskrc.as_deref())
            .map_err(|e| e.to_string())
            .and_then(|rc| {
                client::fetch_all(&rc, self.config.refresh.fetch_timeout())
                    .map_err(|e| e.to_string())
            });

        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                self.last_error = None;
            }
            Err(message) => {
                self.tasks = Vec::new();
                self.last_error = Some(message);
            }
        }
        self.last_refresh = Some(chrono::Local::now());
        self.clamp_selection();
    }

    pub fn visible_len(&self) -> usize {
        panel::visible_tasks(&self.tasks).len()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn select_next(&mut self) {
        let len = self.visible_len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Handle one key press. Returns true when a refresh was requested.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('r') => return true,
            _ => {}
        }
        false
    }
}

/// Paths worth watching for changes: the rc file itself and the task data
/// directory it names.
fn watch_paths(config: &PanelConfig) -> Vec<PathBuf> {
    match taskrc::resolve_and_parse(config.taskrc.as_deref()) {
        Ok(rc) => {
            let mut paths = vec![rc.path.clone()];
            if let Some(dir) = rc.data_dir() {
                paths.push(dir);
            }
            paths
        }
        Err(_) => Vec::new(),
    }
}

/// Run the TUI panel
pub fn run(config: PanelConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(config);
    app.refresh();

    let watcher = match DataWatcher::start(&watch_paths(&app.config)) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "file watcher unavailable, refresh is timer/manual only");
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&DataWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_cycle = Instant::now();

    loop {
        terminal.draw(|frame| panel_view::render_panel(frame, app, frame.area()))?;

        let mut want_refresh = false;
        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            want_refresh = app.handle_key(key);
        }

        if app.should_quit {
            break;
        }

        if let Some(watcher) = watcher
            && !watcher.poll().is_empty()
        {
            want_refresh = true;
        }

        if let Some(interval) = app.config.refresh.interval()
            && last_cycle.elapsed() >= interval
        {
            want_refresh = true;
        }

        // Cycles never overlap: the fetch runs to completion on this thread
        // before the next tick is considered.
        if want_refresh {
            app.refresh();
            last_cycle = Instant::now();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TaskStatus, TaskRecord};
    use pretty_assertions::assert_eq;

    fn pending(id: u32, urgency: f64) -> TaskRecord {
        TaskRecord {
            id,
            description: format!("task {id}"),
            status: TaskStatus::Pending,
            urgency,
            ..TaskRecord::default()
        }
    }

    fn app_with_tasks(tasks: Vec<TaskRecord>) -> App {
        let mut app = App::new(PanelConfig::default());
        app.tasks = tasks;
        app
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::from(KeyCode::Char(c))
    }

    #[test]
    fn selection_moves_within_bounds() {
        let mut app = app_with_tasks(vec![pending(1, 3.0), pending(2, 2.0), pending(3, 1.0)]);
        assert_eq!(app.selected, 0);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 2);
        app.select_next();
        assert_eq!(app.selected, 2);
        app.select_prev();
        assert_eq!(app.selected, 1);
        app.select_prev();
        app.select_prev();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn selection_ignores_non_pending_tasks() {
        let mut done = pending(9, 99.0);
        done.status = TaskStatus::Completed;
        let mut app = app_with_tasks(vec![pending(1, 3.0), done]);
        app.select_next();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn selection_clamps_when_snapshot_shrinks() {
        let mut app = app_with_tasks(vec![pending(1, 3.0), pending(2, 2.0), pending(3, 1.0)]);
        app.selected = 2;
        app.tasks = vec![pending(1, 3.0)];
        app.clamp_selection();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn q_quits_and_r_requests_refresh() {
        let mut app = app_with_tasks(vec![pending(1, 1.0)]);
        assert!(!app.handle_key(press('j')));
        assert!(app.handle_key(press('r')));
        assert!(!app.should_quit);
        assert!(!app.handle_key(press('q')));
        assert!(app.should_quit);
    }
}
