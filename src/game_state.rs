use crate::accusation::Verdict;
use crate::case_file::Case;
use crate::engine::EndReason;
use crate::info_log;
use crate::room::Direction;
use crate::session::{Request, Response, RoomView, Session};

/// Actions a front end can hand to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Explore,
    Move(Direction),
    Leave,
    ViewClues,
    Accuse,
    ResetNotebook,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccusationInput {
    Suspect(String),
    Cancel,
    Invalid,
}

/// What happened over a whole run of the game loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub clues: Vec<String>,
    pub verdicts: Vec<Verdict>,
    pub explorations_ended: Vec<EndReason>,
}

/// Trait for front ends driving the game.
///
/// `read_*` methods return `None` for input that could not be understood;
/// the loop asks again.
pub trait GameInterface {
    fn read_menu_action(&mut self) -> Option<UserAction>;
    fn read_move(&mut self, room: &RoomView) -> Option<UserAction>;
    fn read_accusation(&mut self, suspects: &[String]) -> AccusationInput;
    fn display_response(&mut self, response: &Response);
    fn display_notebook(&mut self, _clues: &[String]) {}
    fn display_exit_message(&mut self);
}

pub fn game_loop<I: GameInterface>(case: &Case, interface: &mut I) -> GameSummary {
    let mut session = Session::new(case);
    let mut summary = GameSummary::default();
    info_log!(
        "game_loop() - {} rooms, {} suspects",
        case.graph.len(),
        case.directory.suspects().len()
    );

    loop {
        let action = match session.location() {
            Some(room) => interface.read_move(&room),
            None => interface.read_menu_action(),
        };
        let Some(action) = action else {
            continue;
        };

        let request = match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Explore => Request::Explore,
            UserAction::Move(direction) => Request::Move(direction),
            UserAction::Leave => Request::Quit,
            UserAction::ViewClues => Request::ViewClues,
            UserAction::ResetNotebook => Request::ResetNotebook,
            UserAction::Accuse => match prompt_accusation(interface, session.suspects()) {
                Some(suspect) => Request::Accuse(suspect),
                None => continue,
            },
        };

        let response = submit(&mut session, interface, request, &mut summary);

        // Reaching the exit leads straight to the accusation.
        if response.end_reason == Some(EndReason::ReachedExit)
            && !session.clues().is_empty()
            && let Some(suspect) = prompt_accusation(interface, session.suspects())
        {
            submit(&mut session, interface, Request::Accuse(suspect), &mut summary);
        }
    }

    summary.clues = session.clues().iter().map(str::to_string).collect();
    summary
}

fn submit<I: GameInterface>(
    session: &mut Session<'_>,
    interface: &mut I,
    request: Request,
    summary: &mut GameSummary,
) -> Response {
    let response = session.handle(request);
    interface.display_response(&response);
    let clues: Vec<String> = session.clues().iter().map(str::to_string).collect();
    interface.display_notebook(&clues);

    if let Some(verdict) = &response.verdict {
        summary.verdicts.push(verdict.clone());
    }
    if let Some(reason) = response.end_reason {
        summary.explorations_ended.push(reason);
    }
    response
}

fn prompt_accusation<I: GameInterface>(interface: &mut I, suspects: &[String]) -> Option<String> {
    loop {
        match interface.read_accusation(suspects) {
            AccusationInput::Suspect(name) => return Some(name),
            AccusationInput::Cancel => return None,
            AccusationInput::Invalid => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays scripted actions and records what was displayed.
    #[derive(Default)]
    struct Scripted {
        actions: VecDeque<Option<UserAction>>,
        accusations: VecDeque<AccusationInput>,
        shown: Vec<String>,
        notebook: Vec<String>,
        exited: bool,
    }

    impl Scripted {
        fn new(actions: Vec<Option<UserAction>>, accusations: Vec<AccusationInput>) -> Self {
            Self {
                actions: actions.into(),
                accusations: accusations.into(),
                ..Self::default()
            }
        }

        fn next(&mut self) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Exit))
        }
    }

    impl GameInterface for Scripted {
        fn read_menu_action(&mut self) -> Option<UserAction> {
            self.next()
        }

        fn read_move(&mut self, _room: &RoomView) -> Option<UserAction> {
            self.next()
        }

        fn read_accusation(&mut self, _suspects: &[String]) -> AccusationInput {
            self.accusations.pop_front().unwrap_or(AccusationInput::Cancel)
        }

        fn display_response(&mut self, response: &Response) {
            self.shown.extend(response.lines.iter().cloned());
        }

        fn display_notebook(&mut self, clues: &[String]) {
            self.notebook = clues.to_vec();
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    #[test]
    fn test_immediate_exit() {
        let case = Case::reference();
        let mut ui = Scripted::new(vec![Some(UserAction::Exit)], vec![]);
        let summary = game_loop(&case, &mut ui);
        assert!(ui.exited);
        assert!(summary.clues.is_empty());
        assert!(summary.verdicts.is_empty());
    }

    #[test]
    fn test_invalid_input_is_skipped() {
        let case = Case::reference();
        let mut ui = Scripted::new(vec![None, None, Some(UserAction::ViewClues)], vec![]);
        game_loop(&case, &mut ui);
        assert_eq!(ui.shown, vec!["No clues collected yet."]);
    }

    #[test]
    fn test_exit_reached_prompts_accusation() {
        let case = Case::reference();
        let mut ui = Scripted::new(
            vec![
                Some(UserAction::Explore),
                Some(UserAction::Move(Direction::Left)),
                Some(UserAction::Move(Direction::Right)),
                Some(UserAction::Move(Direction::Right)),
            ],
            vec![AccusationInput::Invalid, AccusationInput::Suspect("Maria".into())],
        );
        let summary = game_loop(&case, &mut ui);
        assert_eq!(summary.explorations_ended, vec![EndReason::ReachedExit]);
        assert_eq!(summary.verdicts.len(), 1);
        // Only "Mapa rasgado" points at Maria on this path.
        assert_eq!(summary.verdicts[0].matching_clue_count, 1);
        assert!(!summary.verdicts[0].correct);
        assert_eq!(ui.notebook.len(), 3);
    }

    #[test]
    fn test_accusation_cancelled_from_menu() {
        let case = Case::reference();
        let mut ui = Scripted::new(vec![Some(UserAction::Accuse)], vec![AccusationInput::Cancel]);
        let summary = game_loop(&case, &mut ui);
        assert!(summary.verdicts.is_empty());
        assert!(ui.shown.is_empty());
    }

    #[test]
    fn test_leave_and_return_keeps_clues() {
        let case = Case::reference();
        let mut ui = Scripted::new(
            vec![
                Some(UserAction::Explore),
                Some(UserAction::Move(Direction::Right)),
                Some(UserAction::Leave),
                Some(UserAction::Explore),
                Some(UserAction::Move(Direction::Right)),
                Some(UserAction::Move(Direction::Right)),
            ],
            vec![AccusationInput::Suspect("Capitão Rocha".into())],
        );
        let summary = game_loop(&case, &mut ui);
        assert_eq!(
            summary.explorations_ended,
            vec![EndReason::PlayerQuit, EndReason::ReachedExit]
        );
        assert_eq!(
            summary.clues,
            vec!["Chave enferrujada", "Livro sobre mutacoes", "Pegadas de botas"]
        );
        assert!(summary.verdicts[0].correct);
    }
}
