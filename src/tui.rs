//! TUI (Terminal User Interface) front end for Detective Quest
//!
//! Full-screen alternative to the line-oriented CLI, built on Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: rendering plus key handling; implements `GameInterface`
//!
//! # Modes
//! - `Menu`: main menu between explorations
//! - `Exploring`: arrow keys move through the mansion
//! - `Accusing`: a suspect list with a cursor

use crate::accusation::Verdict;
use crate::game_state::{AccusationInput, GameInterface, UserAction};
use crate::room::Direction;
use crate::session::{Response, RoomView};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction as Axis, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const JOURNAL_CAPACITY: usize = 200;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Yellow);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiMode {
    Menu,
    Exploring,
    Accusing { selected: usize },
}

/// Main TUI interface component.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    mode: TuiMode,
    room: Option<RoomView>,
    notebook: Vec<String>,
    suspects: Vec<String>,
    journal: Vec<String>,
    verdict: Option<Verdict>,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            mode: TuiMode::Menu,
            room: None,
            notebook: Vec::new(),
            suspects: Vec::new(),
            journal: Vec::new(),
            verdict: None,
            status: "Press 1 to enter the mansion".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let view = View {
            mode: self.mode,
            room: self.room.as_ref(),
            notebook: &self.notebook,
            suspects: &self.suspects,
            journal: &self.journal,
            verdict: self.verdict.as_ref(),
            status: &self.status,
        };
        self.terminal.draw(|f| view.render(f))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Blocks until a key press arrives. Other events are ignored.
    fn next_key(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
                other => {
                    debug_log!("next_key() - Ignoring event: {:?}", other);
                }
            }
        }
    }

    fn push_journal(&mut self, lines: &[String]) {
        self.journal.extend(lines.iter().cloned());
        if self.journal.len() > JOURNAL_CAPACITY {
            let excess = self.journal.len() - JOURNAL_CAPACITY;
            self.journal.drain(..excess);
        }
    }

    /// Shows the current mode, waits for a key and maps it through `map`.
    /// A failing terminal ends the game.
    fn read_key_action(&mut self, map: fn(KeyCode) -> Option<UserAction>) -> Option<UserAction> {
        if self.draw().is_err() {
            info_log!("read_key_action() - Draw failed, returning Exit");
            return Some(UserAction::Exit);
        }
        match self.next_key() {
            Ok(key) => {
                let action = map(key.code);
                debug_log!("read_key_action() - {:?} -> {:?}", key.code, action);
                action
            }
            Err(e) => {
                info_log!("read_key_action() - Input error {}, returning Exit", e);
                Some(UserAction::Exit)
            }
        }
    }
}

fn menu_key(code: KeyCode) -> Option<UserAction> {
    match code {
        KeyCode::Char('1' | 'e') | KeyCode::Enter => Some(UserAction::Explore),
        KeyCode::Char('2' | 'c') => Some(UserAction::ViewClues),
        KeyCode::Char('3' | 'a') => Some(UserAction::Accuse),
        KeyCode::Char('4' | 'r') => Some(UserAction::ResetNotebook),
        KeyCode::Char('0' | 'q') | KeyCode::Esc => Some(UserAction::Exit),
        _ => None,
    }
}

fn move_key(code: KeyCode) -> Option<UserAction> {
    match code {
        KeyCode::Left | KeyCode::Char('1' | 'h') => Some(UserAction::Move(Direction::Left)),
        KeyCode::Right | KeyCode::Char('2' | 'l') => Some(UserAction::Move(Direction::Right)),
        KeyCode::Char('3') | KeyCode::Esc => Some(UserAction::Leave),
        KeyCode::Char('c') => Some(UserAction::ViewClues),
        KeyCode::Char('q') => Some(UserAction::Exit),
        _ => None,
    }
}

impl GameInterface for TuiInterface {
    fn read_menu_action(&mut self) -> Option<UserAction> {
        self.mode = TuiMode::Menu;
        self.room = None;
        self.read_key_action(menu_key)
    }

    fn read_move(&mut self, room: &RoomView) -> Option<UserAction> {
        self.mode = TuiMode::Exploring;
        self.room = Some(room.clone());
        self.status = "Arrows move, Esc leaves the mansion, c shows clues".to_string();
        self.read_key_action(move_key)
    }

    fn read_accusation(&mut self, suspects: &[String]) -> AccusationInput {
        if suspects.is_empty() {
            self.status = "This case has no suspects".to_string();
            return AccusationInput::Cancel;
        }
        suspects.clone_into(&mut self.suspects);
        let mut selected = match self.mode {
            TuiMode::Accusing { selected } => selected.min(suspects.len() - 1),
            _ => 0,
        };
        self.status = "Up/Down choose, Enter accuses, Esc cancels".to_string();

        loop {
            self.mode = TuiMode::Accusing { selected };
            if self.draw().is_err() {
                return AccusationInput::Cancel;
            }
            let Ok(key) = self.next_key() else {
                return AccusationInput::Cancel;
            };
            match key.code {
                KeyCode::Up => selected = selected.saturating_sub(1),
                KeyCode::Down => selected = (selected + 1).min(suspects.len() - 1),
                KeyCode::Enter => {
                    self.mode = TuiMode::Menu;
                    return AccusationInput::Suspect(suspects[selected].clone());
                }
                KeyCode::Esc | KeyCode::Char('0') => {
                    self.mode = TuiMode::Menu;
                    return AccusationInput::Cancel;
                }
                KeyCode::Char(c) => match c.to_digit(10).and_then(|d| suspects.get(d as usize - 1)) {
                    Some(name) => {
                        self.mode = TuiMode::Menu;
                        return AccusationInput::Suspect(name.clone());
                    }
                    None => return AccusationInput::Invalid,
                },
                _ => {}
            }
        }
    }

    fn display_response(&mut self, response: &Response) {
        self.push_journal(&response.lines);
        self.room.clone_from(&response.location);
        if let Some(verdict) = &response.verdict {
            self.verdict = Some(verdict.clone());
        }
        self.status = match (response.session_ended, &response.verdict) {
            (true, _) => "Exploration over. Press 3 to accuse or 1 to go back in".to_string(),
            (false, Some(v)) if v.correct => "Case closed!".to_string(),
            (false, Some(_)) => "The evidence does not hold up".to_string(),
            (false, None) => self.status.clone(),
        };
        self.draw_or_log();
    }

    fn display_notebook(&mut self, clues: &[String]) {
        clues.clone_into(&mut self.notebook);
    }

    fn display_exit_message(&mut self) {
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Borrowed snapshot of everything a frame needs.
struct View<'a> {
    mode: TuiMode,
    room: Option<&'a RoomView>,
    notebook: &'a [String],
    suspects: &'a [String],
    journal: &'a [String],
    verdict: Option<&'a Verdict>,
    status: &'a str,
}

impl View<'_> {
    fn render(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Axis::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        let title = Paragraph::new(Line::from(Span::styled("DETECTIVE QUEST", HEADER_STYLE)))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, rows[0]);

        let columns = Layout::default()
            .direction(Axis::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        self.render_main(f, columns[0]);

        let side = Layout::default()
            .direction(Axis::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[1]);
        self.render_notebook(f, side[0]);
        self.render_journal(f, side[1]);

        self.render_instructions(f, rows[2]);
        f.render_widget(
            Paragraph::new(Span::styled(self.status, INFO_STYLE)),
            rows[3],
        );
    }

    fn render_main(&self, f: &mut Frame, area: Rect) {
        let (title, lines) = match self.mode {
            TuiMode::Menu => ("Menu", self.menu_lines()),
            TuiMode::Exploring => ("Location", self.room_lines()),
            TuiMode::Accusing { selected } => ("Accusation", self.accusation_lines(selected)),
        };
        let widget = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        f.render_widget(widget, area);
    }

    fn menu_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from("1  Enter the mansion"),
            Line::from("2  View clues"),
            Line::from("3  Make an accusation"),
            Line::from("4  Reset notebook"),
            Line::from("0  Exit"),
        ];
        if let Some(verdict) = self.verdict {
            let (text, style) = if verdict.correct {
                ("Last accusation: CORRECT", SUCCESS_STYLE)
            } else {
                ("Last accusation: FALSE", ERROR_STYLE)
            };
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("{text} ({}, {} clue(s))", verdict.suspect, verdict.matching_clue_count),
                style,
            )));
        }
        lines
    }

    fn room_lines(&self) -> Vec<Line<'static>> {
        let Some(room) = self.room else {
            return vec![Line::from("Outside the mansion")];
        };
        let exit = |label: &str, open: bool| {
            if open {
                Line::from(format!("{label}: open"))
            } else {
                Line::from(Span::styled(format!("{label}: dead end"), ERROR_STYLE))
            }
        };
        vec![
            Line::from(Span::styled(room.name.clone(), HEADER_STYLE)),
            Line::from(""),
            match &room.clue {
                Some(clue) => Line::from(format!("Clue: {clue}")),
                None => Line::from("Nothing of interest here."),
            },
            Line::from(""),
            exit("← Left", room.has_left),
            exit("→ Right", room.has_right),
        ]
    }

    fn accusation_lines(&self, selected: usize) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("Who do you want to accuse?"), Line::from("")];
        lines.extend(self.suspects.iter().enumerate().map(|(i, name)| {
            let text = format!("{} - {}", i + 1, name);
            if i == selected {
                Line::from(Span::styled(text, SELECTED_STYLE))
            } else {
                Line::from(text)
            }
        }));
        lines
    }

    fn render_notebook(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = if self.notebook.is_empty() {
            vec![Line::from("No clues collected yet.")]
        } else {
            self.notebook.iter().map(|c| Line::from(format!("- {c}"))).collect()
        };
        let title = format!("Notebook ({})", self.notebook.len());
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)),
            area,
        );
    }

    fn render_journal(&self, f: &mut Frame, area: Rect) {
        // Keep the newest lines in view.
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.journal.len().saturating_sub(visible);
        let lines: Vec<Line> = self.journal[start..]
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect();
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Journal")),
            area,
        );
    }

    fn render_instructions(&self, f: &mut Frame, area: Rect) {
        let text = match self.mode {
            TuiMode::Menu => "1 explore | 2 clues | 3 accuse | 4 reset | q quit",
            TuiMode::Exploring => "← left | → right | Esc leave | c clues | q quit",
            TuiMode::Accusing { .. } => "↑/↓ choose | Enter accuse | Esc cancel",
        };
        f.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Keys")),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_keys() {
        assert_eq!(menu_key(KeyCode::Char('1')), Some(UserAction::Explore));
        assert_eq!(menu_key(KeyCode::Char('a')), Some(UserAction::Accuse));
        assert_eq!(menu_key(KeyCode::Esc), Some(UserAction::Exit));
        assert_eq!(menu_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_move_keys() {
        assert_eq!(move_key(KeyCode::Left), Some(UserAction::Move(Direction::Left)));
        assert_eq!(move_key(KeyCode::Char('l')), Some(UserAction::Move(Direction::Right)));
        assert_eq!(move_key(KeyCode::Esc), Some(UserAction::Leave));
        assert_eq!(move_key(KeyCode::Up), None);
    }

    #[test]
    fn test_room_lines_mark_dead_ends() {
        let room = RoomView {
            name: "Corredor Longo".into(),
            clue: None,
            has_left: false,
            has_right: true,
        };
        let view = View {
            mode: TuiMode::Exploring,
            room: Some(&room),
            notebook: &[],
            suspects: &[],
            journal: &[],
            verdict: None,
            status: "",
        };
        let text: Vec<String> = view.room_lines().iter().map(ToString::to_string).collect();
        assert!(text.contains(&"← Left: dead end".to_string()));
        assert!(text.contains(&"→ Right: open".to_string()));
        assert!(text.contains(&"Nothing of interest here.".to_string()));
    }
}
