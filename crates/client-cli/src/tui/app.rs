//! Main TUI application for the task browser

use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use shared::{Task, TaskPriority, TaskStatus};
use tokio::sync::mpsc::UnboundedSender;

use super::{FetchKind, FetchPayload, FetchRequest, FetchResponse};
use crate::view::{ListView, Phase, Projection};

/// Browser application state: the list controller plus terminal-local
/// concerns (selection, search input focus, filter cursors).
pub struct App {
    /// The same controller the one-shot commands use
    view: ListView<Task>,
    /// Selected row in the visible projection
    selected: usize,
    /// Search input buffer
    input: String,
    /// Whether keystrokes go to the search input
    input_mode: bool,
    /// Cursor into [None, TaskStatus::ALL...]
    status_idx: usize,
    /// Cursor into [None, TaskPriority::ALL...]
    priority_idx: usize,
    /// Elevated role: shown in the status bar only, mutations stay on the CLI
    can_manage: bool,
    /// Channel to ask the worker for a fetch
    request_tx: UnboundedSender<FetchRequest>,
    /// Channel the worker answers on
    response_rx: Receiver<FetchResponse>,
    /// Whether to quit
    should_quit: bool,
}

impl App {
    pub fn new(
        request_tx: UnboundedSender<FetchRequest>,
        response_rx: Receiver<FetchResponse>,
        can_manage: bool,
    ) -> Self {
        Self {
            view: ListView::new(),
            selected: 0,
            input: String::new(),
            input_mode: false,
            status_idx: 0,
            priority_idx: 0,
            can_manage,
            request_tx,
            response_rx,
            should_quit: false,
        }
    }

    /// Run the TUI main loop
    pub fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.reload();

        // Main loop
        while !self.should_quit {
            // Apply any responses that arrived since the last tick
            self.process_responses();

            // Draw UI
            terminal.draw(|f| self.draw(f))?;

            // Handle input with timeout
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        Ok(())
    }

    fn reload(&mut self) {
        let token = self.view.begin_fetch();
        let _ = self.request_tx.send(FetchRequest {
            token,
            kind: FetchKind::Reload,
        });
    }

    /// Apply pending worker responses. Stale ones are dropped by the
    /// controller, so arrival order here does not matter.
    fn process_responses(&mut self) {
        while let Ok(response) = self.response_rx.try_recv() {
            match response.payload {
                FetchPayload::Collection(result) => {
                    self.view.finish_fetch(response.token, result);
                }
                FetchPayload::Projection(result) => {
                    self.view.finish_server_projection(response.token, result);
                }
            }
        }
        let visible = self.view.visible().0.len();
        if visible == 0 {
            self.selected = 0;
        } else if self.selected >= visible {
            self.selected = visible - 1;
        }
    }

    fn status_cursor(&self) -> Option<TaskStatus> {
        (self.status_idx > 0).then(|| TaskStatus::ALL[self.status_idx - 1])
    }

    fn priority_cursor(&self) -> Option<TaskPriority> {
        (self.priority_idx > 0).then(|| TaskPriority::ALL[self.priority_idx - 1])
    }

    /// Handle keyboard input
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if code == KeyCode::Char('c') {
                self.should_quit = true;
            }
            return;
        }

        if self.input_mode {
            match code {
                KeyCode::Enter => {
                    // Hand the query to the backend's search endpoint; the
                    // live local filter stays visible until it answers.
                    if !self.input.is_empty() {
                        let token = self.view.begin_fetch();
                        let _ = self.request_tx.send(FetchRequest {
                            token,
                            kind: FetchKind::Search(self.input.clone()),
                        });
                    }
                    self.input_mode = false;
                }
                KeyCode::Char(c) => {
                    self.input.push(c);
                    self.view.set_search(self.input.clone());
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    self.view.set_search(self.input.clone());
                }
                KeyCode::Esc => {
                    self.input_mode = false;
                }
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('/') => {
                self.input_mode = true;
            }
            KeyCode::Char('r') => {
                self.reload();
            }
            KeyCode::Char('s') => {
                self.status_idx = (self.status_idx + 1) % (TaskStatus::ALL.len() + 1);
                self.view
                    .set_status_filter(self.status_cursor().map(|s| s.as_str().to_string()));
            }
            KeyCode::Char('p') => {
                self.priority_idx = (self.priority_idx + 1) % (TaskPriority::ALL.len() + 1);
                self.view
                    .set_category_filter(self.priority_cursor().map(|p| p.as_str().to_string()));
            }
            KeyCode::Char('c') => {
                self.input.clear();
                self.status_idx = 0;
                self.priority_idx = 0;
                self.view.clear_filters();
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let visible = self.view.visible().0.len();
                if visible > 0 && self.selected < visible - 1 {
                    self.selected += 1;
                }
            }
            KeyCode::Esc => {
                self.view.dismiss_error();
            }
            _ => {}
        }
    }

    /// Draw the UI
    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(8),
                Constraint::Length(1),
            ])
            .split(area);

        self.draw_list(frame, main_layout[0]);
        self.draw_detail(frame, main_layout[1]);
        self.draw_status_bar(frame, main_layout[2]);
    }

    fn draw_list(&self, frame: &mut Frame, area: Rect) {
        let (rows, source) = self.view.visible();

        let title = if self.input_mode {
            format!(" Tasks — search: {}_ ", self.input)
        } else if !self.view.search().is_empty() {
            format!(" Tasks — search: {} ", self.view.search())
        } else {
            " Tasks ".to_string()
        };

        let border_style = if self.input_mode {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = Vec::new();
        if let Some(error) = self.view.error() {
            lines.push(Line::styled(
                format!("✖ {error}"),
                Style::default().fg(Color::Red),
            ));
        }
        if self.view.has_loaded() && rows.is_empty() {
            lines.push(Line::styled(
                "No tasks match.",
                Style::default().fg(Color::DarkGray),
            ));
        }
        for (i, task) in rows.iter().enumerate() {
            let text = format!(
                "{:<10} {:<12} {:<8} {:>4}%  {}",
                task.status.as_str(),
                task.priority.as_str(),
                task.due_date,
                task.progress_percentage,
                task.title,
            );
            let style = if i == self.selected {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            lines.push(Line::styled(text, style));
        }

        let scroll = (self.selected as u16).saturating_sub(inner.height.saturating_sub(1));
        let paragraph = Paragraph::new(lines).scroll((scroll, 0));
        frame.render_widget(paragraph, inner);

        // Provenance marker in the top-right corner of the list frame
        if !rows.is_empty() {
            let marker = match source {
                Projection::Server => " server result ",
                Projection::Client => " local filter ",
            };
            let width = marker.len() as u16;
            if area.width > width + 2 {
                let corner = Rect::new(area.x + area.width - width - 2, area.y, width, 1);
                frame.render_widget(
                    Paragraph::new(marker).style(Style::default().fg(Color::DarkGray)),
                    corner,
                );
            }
        }
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(" Detail ").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (rows, _) = self.view.visible();
        let Some(task) = rows.get(self.selected) else {
            return;
        };

        let text = format!(
            "{}\n{}\nassignee: {}   owner: {}\ndue {}   timeline {} → {}\nprogress: {} ({}%)",
            task.title,
            task.description,
            task.assignee,
            task.owner,
            task.due_date,
            task.timeline.start,
            task.timeline.end,
            task.progress.as_str(),
            task.progress_percentage,
        );
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
    }

    /// Draw the status bar
    fn draw_status_bar(&self, frame: &mut Frame, area: Rect) {
        let phase = match self.view.phase() {
            Phase::Idle => "idle",
            Phase::Loading => "loading…",
            Phase::Loaded => "loaded",
            Phase::Failed => "failed",
        };
        let status = self
            .status_cursor()
            .map(|s| s.as_str())
            .unwrap_or("ALL");
        let priority = self
            .priority_cursor()
            .map(|p| p.as_str())
            .unwrap_or("ALL");
        let role = if self.can_manage { "" } else { " | read-only role" };

        let text = format!(
            " {} | status:{} prio:{}{} | /: search  s/p: filters  c: clear  r: reload  q: quit ",
            phase, status, priority, role
        );
        let paragraph =
            Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
        frame.render_widget(paragraph, area);
    }
}
