use crate::game_state::{AccusationInput, GameInterface, UserAction};
use crate::room::Direction;
use crate::session::{Response, RoomView};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Detective Quest: explore the mansion, collect clues, name the culprit
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON case file (rooms and suspect table)
    #[arg(short = 'c', long = "case")]
    pub case_path: Option<PathBuf>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

/// Reads one trimmed line. `None` at end of input or on a read error.
fn read_input<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn is_exit_word(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "exit" | "quit" | "q")
}

fn parse_menu_choice(input: &str) -> Option<UserAction> {
    match input {
        "1" => Some(UserAction::Explore),
        "2" => Some(UserAction::ViewClues),
        "3" => Some(UserAction::Accuse),
        "4" => Some(UserAction::ResetNotebook),
        "0" => Some(UserAction::Exit),
        _ if is_exit_word(input) => Some(UserAction::Exit),
        _ => None,
    }
}

fn parse_move_choice(input: &str) -> Option<UserAction> {
    match input.to_lowercase().as_str() {
        "1" | "l" | "left" => Some(UserAction::Move(Direction::Left)),
        "2" | "r" | "right" => Some(UserAction::Move(Direction::Right)),
        "3" | "leave" => Some(UserAction::Leave),
        "c" | "clues" => Some(UserAction::ViewClues),
        other if is_exit_word(other) => Some(UserAction::Exit),
        _ => None,
    }
}

/// A menu number (1-based, 0 cancels) or a suspect's name, case-insensitive.
fn parse_accusation(input: &str, suspects: &[String]) -> AccusationInput {
    if input == "0" || input.eq_ignore_ascii_case("cancel") {
        return AccusationInput::Cancel;
    }
    if let Ok(n) = input.parse::<usize>() {
        return match suspects.get(n.wrapping_sub(1)) {
            Some(name) => AccusationInput::Suspect(name.clone()),
            None => AccusationInput::Invalid,
        };
    }
    let wanted = input.to_lowercase();
    suspects
        .iter()
        .find(|name| name.to_lowercase() == wanted)
        .map_or(AccusationInput::Invalid, |name| AccusationInput::Suspect(name.clone()))
}

fn prompt() {
    print!("Choice: ");
    let _ = io::stdout().flush();
}

pub fn display_main_menu() {
    println!("\n====== DETECTIVE QUEST ======");
    println!("1 - Enter the mansion");
    println!("2 - View clues");
    println!("3 - Make an accusation");
    println!("4 - Reset notebook");
    println!("0 - Exit");
    prompt();
}

pub fn display_room_menu(room: &RoomView) {
    let dead_end = |open: bool| if open { "" } else { " (dead end)" };
    println!("\n1 - Go left{}", dead_end(room.has_left));
    println!("2 - Go right{}", dead_end(room.has_right));
    println!("3 - Leave the mansion");
    prompt();
}

pub fn display_accusation_menu(suspects: &[String]) {
    println!("\nWho do you want to accuse?");
    for (i, name) in suspects.iter().enumerate() {
        println!("{} - {}", i + 1, name);
    }
    println!("0 - Cancel");
    prompt();
}

pub fn display_response(response: &Response) {
    println!();
    for line in &response.lines {
        println!("{line}");
    }
}

pub fn display_exit_message() {
    println!("Closing Detective Quest.");
}

/// CLI implementation of the `GameInterface` trait over any `BufRead`.
/// End of input counts as leaving the game.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_menu_action(&mut self) -> Option<UserAction> {
        display_main_menu();
        let Some(input) = read_input(&mut self.reader) else {
            return Some(UserAction::Exit);
        };
        let action = parse_menu_choice(&input);
        if action.is_none() {
            println!("Invalid option.");
        }
        action
    }

    fn read_move(&mut self, room: &RoomView) -> Option<UserAction> {
        display_room_menu(room);
        let Some(input) = read_input(&mut self.reader) else {
            return Some(UserAction::Exit);
        };
        let action = parse_move_choice(&input);
        if action.is_none() {
            println!("Invalid move.");
        }
        action
    }

    fn read_accusation(&mut self, suspects: &[String]) -> AccusationInput {
        display_accusation_menu(suspects);
        let Some(input) = read_input(&mut self.reader) else {
            return AccusationInput::Cancel;
        };
        let choice = parse_accusation(&input, suspects);
        if choice == AccusationInput::Invalid {
            println!("Invalid choice.");
        }
        choice
    }

    fn display_response(&mut self, response: &Response) {
        display_response(response);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn suspects() -> Vec<String> {
        ["Dr. Silva", "Maria", "Capitão Rocha"].map(String::from).to_vec()
    }

    fn corridor() -> RoomView {
        RoomView {
            name: "Corredor Longo".into(),
            clue: None,
            has_left: false,
            has_right: true,
        }
    }

    #[test]
    fn test_cli_structure() {
        let cli = Cli::parse_from(["detective-quest", "--case", "/tmp/case.json", "--tui"]);
        assert_eq!(cli.case_path, Some(PathBuf::from("/tmp/case.json")));
        assert!(cli.tui);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_cli_no_args() {
        let cli = Cli::parse_from(["detective-quest"]);
        assert_eq!(cli.case_path, None);
        assert!(!cli.tui);
    }

    #[test]
    fn test_parse_menu_choice() {
        assert_eq!(parse_menu_choice("1"), Some(UserAction::Explore));
        assert_eq!(parse_menu_choice("2"), Some(UserAction::ViewClues));
        assert_eq!(parse_menu_choice("3"), Some(UserAction::Accuse));
        assert_eq!(parse_menu_choice("4"), Some(UserAction::ResetNotebook));
        assert_eq!(parse_menu_choice("0"), Some(UserAction::Exit));
        assert_eq!(parse_menu_choice("EXIT"), Some(UserAction::Exit));
        assert_eq!(parse_menu_choice("5"), None);
        assert_eq!(parse_menu_choice(""), None);
    }

    #[test]
    fn test_parse_move_choice() {
        assert_eq!(parse_move_choice("1"), Some(UserAction::Move(Direction::Left)));
        assert_eq!(parse_move_choice("Right"), Some(UserAction::Move(Direction::Right)));
        assert_eq!(parse_move_choice("3"), Some(UserAction::Leave));
        assert_eq!(parse_move_choice("c"), Some(UserAction::ViewClues));
        assert_eq!(parse_move_choice("q"), Some(UserAction::Exit));
        assert_eq!(parse_move_choice("up"), None);
    }

    #[test]
    fn test_parse_accusation() {
        let suspects = suspects();
        assert_eq!(parse_accusation("2", &suspects), AccusationInput::Suspect("Maria".into()));
        assert_eq!(
            parse_accusation("capitão rocha", &suspects),
            AccusationInput::Suspect("Capitão Rocha".into())
        );
        assert_eq!(parse_accusation("0", &suspects), AccusationInput::Cancel);
        assert_eq!(parse_accusation("4", &suspects), AccusationInput::Invalid);
        assert_eq!(parse_accusation("Mordomo", &suspects), AccusationInput::Invalid);
    }

    #[test]
    fn test_read_menu_action_eof_exits() {
        let mut ui = CliInterface::new(Cursor::new(""));
        assert_eq!(ui.read_menu_action(), Some(UserAction::Exit));
    }

    #[test]
    fn test_read_menu_action_invalid() {
        let mut ui = CliInterface::new(Cursor::new("abc\n"));
        assert_eq!(ui.read_menu_action(), None);
    }

    #[test]
    fn test_read_move_trims_whitespace() {
        let mut ui = CliInterface::new(Cursor::new("  2  \n"));
        assert_eq!(ui.read_move(&corridor()), Some(UserAction::Move(Direction::Right)));
    }

    #[test]
    fn test_read_accusation_eof_cancels() {
        let mut ui = CliInterface::new(Cursor::new(""));
        assert_eq!(ui.read_accusation(&suspects()), AccusationInput::Cancel);
    }
}
