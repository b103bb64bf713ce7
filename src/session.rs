//! The boundary front ends talk to: typed requests in, renderable
//! responses out.

use crate::accusation::{Verdict, evaluate};
use crate::case_file::Case;
use crate::clue_index::ClueIndex;
use crate::engine::{Arrival, Association, EndReason, ExplorationEngine, MoveError};
use crate::room::{Direction, RoomId};
use crate::{debug_log, info_log};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Enter the mansion at the entry room.
    Explore,
    Move(Direction),
    /// Leave the mansion, keeping the notebook.
    Quit,
    Accuse(String),
    ViewClues,
    /// Throw the notebook away and leave the mansion.
    ResetNotebook,
}

/// The room the player is standing in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomView {
    pub name: String,
    pub clue: Option<String>,
    pub has_left: bool,
    pub has_right: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub lines: Vec<String>,
    /// Set when this request ended the exploration.
    pub session_ended: bool,
    pub end_reason: Option<EndReason>,
    /// Present while the player is inside the mansion.
    pub location: Option<RoomView>,
    pub verdict: Option<Verdict>,
}

impl Response {
    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }
}

/// One player's game: shared read-only case data plus a private notebook.
///
/// The notebook survives leaving and re-entering the mansion; only
/// [`Request::ResetNotebook`] clears it.
#[derive(Debug)]
pub struct Session<'c> {
    case: &'c Case,
    clues: ClueIndex,
    engine: Option<ExplorationEngine<'c>>,
}

impl<'c> Session<'c> {
    #[must_use]
    pub fn new(case: &'c Case) -> Self {
        Self {
            case,
            clues: ClueIndex::new(),
            engine: None,
        }
    }

    #[must_use]
    pub fn clues(&self) -> &ClueIndex {
        &self.clues
    }

    #[must_use]
    pub fn suspects(&self) -> &'c [String] {
        self.case.directory.suspects()
    }

    #[must_use]
    pub fn is_exploring(&self) -> bool {
        self.engine.is_some()
    }

    #[must_use]
    pub fn location(&self) -> Option<RoomView> {
        let id = self.engine.as_ref()?.current_room()?;
        Some(self.view(id))
    }

    pub fn handle(&mut self, request: Request) -> Response {
        debug_log!("Session::handle({:?})", request);
        let mut response = match request {
            Request::Explore => self.explore(),
            Request::Move(direction) => self.move_to(direction),
            Request::Quit => self.leave(),
            Request::Accuse(suspect) => self.accuse(&suspect),
            Request::ViewClues => {
                let mut response = Response::default();
                self.push_notebook(&mut response);
                response
            }
            Request::ResetNotebook => self.reset(),
        };
        response.location = self.location();
        response
    }

    fn explore(&mut self) -> Response {
        let mut response = Response::default();
        if self.engine.is_some() {
            response.line("You are already inside the mansion.");
            return response;
        }
        let (engine, arrival) =
            ExplorationEngine::start(&self.case.graph, &self.case.directory, &mut self.clues);
        self.engine = Some(engine);
        self.push_arrival(&mut response, &arrival);
        response
    }

    fn move_to(&mut self, direction: Direction) -> Response {
        let mut response = Response::default();
        let Some(engine) = self.engine.as_mut() else {
            response.line("You are not inside the mansion.");
            return response;
        };
        match engine.move_to(direction, &mut self.clues) {
            Ok(arrival) => self.push_arrival(&mut response, &arrival),
            Err(MoveError::NoPath(d)) => response.line(format!("There is no path to the {d}.")),
            Err(MoveError::ExplorationOver) => {
                // Ended engines are dropped as soon as they end.
                self.engine = None;
                response.line("You are not inside the mansion.");
            }
        }
        response
    }

    fn leave(&mut self) -> Response {
        let mut response = Response::default();
        match self.engine.take() {
            Some(mut engine) => {
                let reason = engine.quit();
                response.session_ended = true;
                response.end_reason = Some(reason);
                response.line(format!(
                    "You leave the mansion. Your notebook holds {} clue(s).",
                    self.clues.len()
                ));
            }
            None => response.line("You are not inside the mansion."),
        }
        response
    }

    fn accuse(&self, suspect: &str) -> Response {
        let mut response = Response::default();
        let verdict = evaluate(&self.clues, &self.case.directory, suspect);
        info_log!(
            "Accusation against '{}': {} matching clue(s), correct={}",
            verdict.suspect,
            verdict.matching_clue_count,
            verdict.correct
        );

        response.line(format!("You accused: {suspect}"));
        if !self.case.directory.is_suspect(suspect) {
            response.line(format!("{suspect} is not a suspect in this case."));
        }
        response.line(format!(
            "Clues implicating {suspect}: {}",
            verdict.matching_clue_count
        ));
        for clue in &verdict.evidence {
            response.line(format!(" - {clue}"));
        }
        response.line(if verdict.correct {
            ">>> CORRECT ACCUSATION!"
        } else {
            ">>> FALSE ACCUSATION."
        });
        response.verdict = Some(verdict);
        response
    }

    fn reset(&mut self) -> Response {
        let mut response = Response::default();
        if let Some(mut engine) = self.engine.take() {
            response.session_ended = true;
            response.end_reason = Some(engine.quit());
        }
        self.clues = ClueIndex::new();
        info_log!("Notebook reset");
        response.line("Notebook cleared. The investigation starts over.");
        response
    }

    fn view(&self, id: RoomId) -> RoomView {
        let room = self.case.graph.room(id);
        RoomView {
            name: room.name().to_string(),
            clue: room.clue().map(str::to_string),
            has_left: room.edge(Direction::Left).is_some(),
            has_right: room.edge(Direction::Right).is_some(),
        }
    }

    fn push_arrival(&mut self, response: &mut Response, arrival: &Arrival) {
        response.line(format!("You are in: {}", arrival.room_name));
        match &arrival.sighting {
            Some(sighting) => {
                response.line(format!("Found a clue: {}", sighting.clue));
                match &sighting.association {
                    Some(Association::Implicates(suspect)) => {
                        response.line(format!("Associated with: {suspect}"));
                    }
                    Some(Association::NoKnownSuspect) => {
                        response.line("No known suspect for this clue.");
                    }
                    None => response.line("(already in your notebook)"),
                }
            }
            None => response.line("Nothing of interest here."),
        }

        if let Some(reason) = arrival.ended {
            self.engine = None;
            response.session_ended = true;
            response.end_reason = Some(reason);
            response.line("--- END OF EXPLORATION ---");
            self.push_notebook(response);
        }
    }

    fn push_notebook(&self, response: &mut Response) {
        if self.clues.is_empty() {
            response.line("No clues collected yet.");
            return;
        }
        response.line("Collected clues:");
        for clue in &self.clues {
            response.line(format!(" - {clue}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Direction::{Left, Right};

    #[test]
    fn test_explore_then_view_clues() {
        let case = Case::reference();
        let mut session = Session::new(&case);
        let response = session.handle(Request::Explore);
        assert!(!response.session_ended);
        assert_eq!(response.location.unwrap().name, "Hall de Entrada");
        assert!(response.lines.contains(&"Associated with: Capitão Rocha".to_string()));

        let response = session.handle(Request::ViewClues);
        assert_eq!(response.lines, vec!["Collected clues:", " - Pegadas de botas"]);
    }

    #[test]
    fn test_move_without_exploring() {
        let case = Case::reference();
        let mut session = Session::new(&case);
        let response = session.handle(Request::Move(Left));
        assert_eq!(response.lines, vec!["You are not inside the mansion."]);
        assert!(session.clues().is_empty());
    }

    #[test]
    fn test_no_path_message() {
        let case = Case::reference();
        let mut session = Session::new(&case);
        session.handle(Request::Explore);
        session.handle(Request::Move(Left));
        session.handle(Request::Move(Right));
        let response = session.handle(Request::Move(Left));
        assert_eq!(response.lines, vec!["There is no path to the left."]);
        let location = response.location.unwrap();
        assert_eq!(location.name, "Corredor Longo");
        assert!(!location.has_left);
        assert!(location.has_right);
    }

    #[test]
    fn test_reaching_exit_ends_session() {
        let case = Case::reference();
        let mut session = Session::new(&case);
        session.handle(Request::Explore);
        session.handle(Request::Move(Left));
        session.handle(Request::Move(Right));
        let response = session.handle(Request::Move(Right));
        assert!(response.session_ended);
        assert_eq!(response.end_reason, Some(EndReason::ReachedExit));
        assert_eq!(response.location, None);
        assert!(!session.is_exploring());
        assert!(response.lines.contains(&" - Mapa rasgado".to_string()));
    }

    #[test]
    fn test_quit_keeps_notebook_and_reenter() {
        let case = Case::reference();
        let mut session = Session::new(&case);
        session.handle(Request::Explore);
        session.handle(Request::Move(Right));
        let response = session.handle(Request::Quit);
        assert!(response.session_ended);
        assert_eq!(response.end_reason, Some(EndReason::PlayerQuit));
        assert_eq!(session.clues().len(), 2);

        let response = session.handle(Request::Explore);
        assert!(response.lines.contains(&"(already in your notebook)".to_string()));
        assert_eq!(session.clues().len(), 2);
    }

    #[test]
    fn test_quit_outside_is_harmless() {
        let case = Case::reference();
        let mut session = Session::new(&case);
        let response = session.handle(Request::Quit);
        assert!(!response.session_ended);
    }

    #[test]
    fn test_accusation_flow() {
        let case = Case::reference();
        let mut session = Session::new(&case);
        session.handle(Request::Explore);
        session.handle(Request::Move(Left));
        session.handle(Request::Move(Left));
        session.handle(Request::Move(Left)); // Poço Antigo, dead end
        let response = session.handle(Request::Accuse("Dr. Silva".into()));
        let verdict = response.verdict.unwrap();
        assert_eq!(verdict.matching_clue_count, 2);
        assert!(verdict.correct);
        assert_eq!(response.lines.last().unwrap(), ">>> CORRECT ACCUSATION!");
    }

    #[test]
    fn test_accuse_unknown_suspect() {
        let case = Case::reference();
        let mut session = Session::new(&case);
        session.handle(Request::Explore);
        let response = session.handle(Request::Accuse("Mordomo".into()));
        assert!(response.lines.contains(&"Mordomo is not a suspect in this case.".to_string()));
        assert!(!response.verdict.unwrap().correct);
    }

    #[test]
    fn test_reset_notebook() {
        let case = Case::reference();
        let mut session = Session::new(&case);
        session.handle(Request::Explore);
        let response = session.handle(Request::ResetNotebook);
        assert!(response.session_ended);
        assert!(session.clues().is_empty());
        assert!(!session.is_exploring());
        let response = session.handle(Request::ViewClues);
        assert_eq!(response.lines, vec!["No clues collected yet."]);
    }

    #[test]
    fn test_explore_twice() {
        let case = Case::reference();
        let mut session = Session::new(&case);
        session.handle(Request::Explore);
        session.handle(Request::Move(Right));
        let response = session.handle(Request::Explore);
        assert_eq!(response.lines, vec!["You are already inside the mansion."]);
        assert_eq!(response.location.unwrap().name, "Biblioteca");
    }

    #[test]
    fn test_suspects_listed() {
        let case = Case::reference();
        let session = Session::new(&case);
        assert_eq!(session.suspects().len(), 3);
    }
}
