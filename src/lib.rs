// Library interface for detective-quest
// This allows integration tests to access internal modules

pub mod accusation;
pub mod case_file;
pub mod cli;
pub mod clue_index;
pub mod engine;
pub mod game_state;
pub mod logging;
pub mod room;
pub mod session;
pub mod suspects;
pub mod tui;

// Re-export commonly used items for easier testing
pub use accusation::{ACCUSATION_THRESHOLD, Verdict, evaluate};
pub use case_file::{Case, load_case_from_file, load_case_from_str};
pub use clue_index::ClueIndex;
pub use engine::{EndReason, ExplorationEngine, MoveError};
pub use game_state::{GameSummary, game_loop};
pub use room::{Direction, RoomGraph, RoomId};
pub use session::{Request, Response, Session};
pub use suspects::SuspectDirectory;
