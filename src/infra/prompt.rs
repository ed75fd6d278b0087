use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
};
use std::{io, time::Duration};

/// Asks the user for the name of the companion file to create.
///
/// `Ok(None)` means the prompt was dismissed and nothing should be created.
pub trait CompanionPrompt {
    fn ask(&self, default_name: &str) -> anyhow::Result<Option<String>>;
}

/// Takes the suggested name without asking.
pub struct AcceptDefault;

impl CompanionPrompt for AcceptDefault {
    fn ask(&self, default_name: &str) -> anyhow::Result<Option<String>> {
        debug!("Accepting default companion name {}", default_name);
        Ok(Some(default_name.to_string()))
    }
}

/// Uses a name given up front on the command line.
pub struct FixedName(pub String);

impl CompanionPrompt for FixedName {
    fn ask(&self, _default_name: &str) -> anyhow::Result<Option<String>> {
        Ok(non_empty(&self.0))
    }
}

pub struct TuiPrompt;

impl CompanionPrompt for TuiPrompt {
    fn ask(&self, default_name: &str) -> anyhow::Result<Option<String>> {
        run_tui(default_name)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptOutcome {
    Submit(Option<String>),
    Cancel,
}

/// Single line text input, cursor counted in chars.
struct InputState {
    value: String,
    cursor: usize,
}

impl InputState {
    fn new(initial: &str) -> Self {
        InputState {
            value: initial.to_string(),
            cursor: initial.chars().count(),
        }
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn insert(&mut self, c: char) {
        let index = self.byte_index();
        self.value.insert(index, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let index = self.byte_index();
        self.value.remove(index);
    }

    fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let index = self.byte_index();
            self.value.remove(index);
        }
    }

    fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<PromptOutcome> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Esc => return Some(PromptOutcome::Cancel),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(PromptOutcome::Cancel);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.clear();
                self.cursor = 0;
            }
            KeyCode::Enter => return Some(PromptOutcome::Submit(non_empty(&self.value))),
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.left(),
            KeyCode::Right => self.right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.chars().count(),
            _ => {}
        }
        None
    }
}

fn ui(f: &mut Frame, input: &InputState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = Paragraph::new(Span::styled(
        "Enter the name of the new companion file",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(title, chunks[0]);

    let field = Paragraph::new(input.value.as_str())
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title("File name"));
    f.render_widget(field, chunks[1]);

    let before_cursor = input.value.chars().take(input.cursor).count() as u16;
    f.set_cursor_position((chunks[1].x + 1 + before_cursor, chunks[1].y + 1));

    let controls = Paragraph::new(Span::styled(
        "Enter: Create | Esc: Cancel | Ctrl+U: Clear",
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(controls, chunks[3]);
}

fn run_tui(default_name: &str) -> anyhow::Result<Option<String>> {
    enable_raw_mode()?;
    // Drawn on stderr so stdout only carries the resolved path.
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let mut input = InputState::new(default_name);
    let result = run_app(&mut terminal, &mut input);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result? {
        PromptOutcome::Submit(Some(name)) => {
            info!("Companion name entered: {}", name);
            Ok(Some(name))
        }
        PromptOutcome::Submit(None) | PromptOutcome::Cancel => {
            info!("Companion prompt dismissed");
            Ok(None)
        }
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    input: &mut InputState,
) -> anyhow::Result<PromptOutcome> {
    loop {
        terminal.draw(|f| ui(f, input))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if let Some(outcome) = input.handle_key(key) {
                    return Ok(outcome);
                }
            }
        }
    }
}
