//! Exploration state machine.
//!
//! # State Machine
//! - `AtRoom(entry)` on start
//! - `AtRoom(a)` -> `AtRoom(b)` on a successful move
//! - `AtRoom(_)` -> `Ended(ReachedExit)` when the room entered is terminal
//! - `AtRoom(_)` -> `Ended(PlayerQuit)` on quit
//!
//! `Ended` is final for the exploration.

use crate::clue_index::ClueIndex;
use crate::room::{Direction, NoPath, RoomGraph, RoomId};
use crate::suspects::SuspectDirectory;
use crate::{debug_log, info_log};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    ReachedExit,
    PlayerQuit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    AtRoom(RoomId),
    Ended(EndReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("there is no path to the {0}")]
    NoPath(Direction),
    #[error("the exploration is over")]
    ExplorationOver,
}

impl From<NoPath> for MoveError {
    fn from(e: NoPath) -> Self {
        Self::NoPath(e.direction)
    }
}

/// Who a freshly collected clue points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Association {
    Implicates(String),
    NoKnownSuspect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueSighting {
    pub clue: String,
    /// `None` when the clue was already in the notebook.
    pub association: Option<Association>,
}

impl ClueSighting {
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.association.is_some()
    }
}

/// What happened on entering a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub room: RoomId,
    pub room_name: String,
    pub sighting: Option<ClueSighting>,
    pub ended: Option<EndReason>,
}

/// Walks a [`RoomGraph`] from its entry, filing clues into the caller's
/// notebook.
///
/// The engine only borrows the read-only case data; the notebook is passed
/// to each call so that it outlives any single exploration.
#[derive(Debug)]
pub struct ExplorationEngine<'c> {
    graph: &'c RoomGraph,
    directory: &'c SuspectDirectory,
    state: EngineState,
}

impl<'c> ExplorationEngine<'c> {
    /// Places the player at the entry room and processes the arrival there.
    pub fn start(
        graph: &'c RoomGraph,
        directory: &'c SuspectDirectory,
        clues: &mut ClueIndex,
    ) -> (Self, Arrival) {
        let mut engine = Self {
            graph,
            directory,
            state: EngineState::AtRoom(graph.entry()),
        };
        info_log!("Exploration started at '{}'", graph.room(graph.entry()).name());
        let arrival = engine.arrive(graph.entry(), clues);
        (engine, arrival)
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[must_use]
    pub fn current_room(&self) -> Option<RoomId> {
        match self.state {
            EngineState::AtRoom(id) => Some(id),
            EngineState::Ended(_) => None,
        }
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        matches!(self.state, EngineState::Ended(_))
    }

    pub fn move_to(
        &mut self,
        direction: Direction,
        clues: &mut ClueIndex,
    ) -> Result<Arrival, MoveError> {
        let EngineState::AtRoom(at) = self.state else {
            return Err(MoveError::ExplorationOver);
        };
        let next = self.graph.navigate(at, direction).inspect_err(|_| {
            debug_log!("No {} edge from '{}'", direction, self.graph.room(at).name());
        })?;
        Ok(self.arrive(next, clues))
    }

    /// Ends the exploration. Returns the reason it ended, which is the
    /// earlier one if it was already over.
    pub fn quit(&mut self) -> EndReason {
        match self.state {
            EngineState::AtRoom(_) => {
                info_log!("Player left the mansion");
                self.state = EngineState::Ended(EndReason::PlayerQuit);
                EndReason::PlayerQuit
            }
            EngineState::Ended(reason) => reason,
        }
    }

    fn arrive(&mut self, id: RoomId, clues: &mut ClueIndex) -> Arrival {
        let room = self.graph.room(id);
        debug_log!("Entering '{}'", room.name());

        let sighting = room.clue().map(|clue| {
            let association = clues.insert(clue).then(|| {
                match self.directory.lookup(clue) {
                    Some(suspect) => Association::Implicates(suspect.to_string()),
                    None => Association::NoKnownSuspect,
                }
            });
            if association.is_some() {
                info_log!("Collected clue '{}' ({} in notebook)", clue, clues.len());
            }
            ClueSighting {
                clue: clue.to_string(),
                association,
            }
        });

        let ended = self.graph.is_terminal(id).then_some(EndReason::ReachedExit);
        self.state = match ended {
            Some(reason) => {
                info_log!("Exploration ended at '{}'", room.name());
                EngineState::Ended(reason)
            }
            None => EngineState::AtRoom(id),
        };

        Arrival {
            room: id,
            room_name: room.name().to_string(),
            sighting,
            ended,
        }
    }
}
