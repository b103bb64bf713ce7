//! Case configuration: the mansion layout plus the suspect table.
//!
//! The built-in case is wired in code. Custom cases are JSON files:
//!
//! ```json
//! {
//!   "entry": "Hall",
//!   "rooms": [
//!     { "name": "Hall", "clue": "Pegadas de botas", "left": "Saída" },
//!     { "name": "Saída", "exit": true }
//!   ],
//!   "suspects": [ { "clue": "Pegadas de botas", "suspect": "Capitão Rocha" } ]
//! }
//! ```

use crate::room::{Direction, LayoutBuilder, LayoutError, RoomGraph, RoomId};
use crate::suspects::SuspectDirectory;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "detective-quest";
const CASE_FILE_NAME: &str = "case.json";

#[derive(Debug, Error)]
pub enum CaseFileError {
    #[error("cannot read case file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed case file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoomSpec {
    name: String,
    #[serde(default)]
    clue: Option<String>,
    #[serde(default)]
    left: Option<String>,
    #[serde(default)]
    right: Option<String>,
    #[serde(default)]
    exit: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MappingSpec {
    clue: String,
    suspect: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseSpec {
    entry: String,
    rooms: Vec<RoomSpec>,
    #[serde(default)]
    suspects: Vec<MappingSpec>,
}

/// Everything a session reads but never writes.
#[derive(Debug, Clone)]
pub struct Case {
    pub graph: RoomGraph,
    pub directory: SuspectDirectory,
}

impl Case {
    /// The reference mansion with its suspect table.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            graph: RoomGraph::fixed_layout(),
            directory: SuspectDirectory::fixed_table(),
        }
    }
}

pub fn load_case_from_str(data: &str) -> Result<Case, CaseFileError> {
    let parsed: CaseSpec = serde_json::from_str(data)?;

    let mut builder = RoomGraph::builder();
    let ids: Vec<_> = parsed
        .rooms
        .iter()
        .map(|r| {
            if r.exit {
                builder.exit(&r.name, r.clue.as_deref())
            } else {
                builder.room(&r.name, r.clue.as_deref())
            }
        })
        .collect();

    for (room, &id) in parsed.rooms.iter().zip(&ids) {
        for (direction, target) in [(Direction::Left, &room.left), (Direction::Right, &room.right)] {
            if let Some(target) = target {
                let to = resolve(&builder, target.as_str())?;
                builder.link(id, direction, to);
            }
        }
    }
    let entry = resolve(&builder, parsed.entry.as_str())?;
    builder.entry(entry);
    let graph = builder.build()?;

    let directory = SuspectDirectory::build(parsed.suspects.into_iter().map(|m| (m.clue, m.suspect)));
    Ok(Case { graph, directory })
}

fn resolve(builder: &LayoutBuilder, name: &str) -> Result<RoomId, LayoutError> {
    builder
        .find(name)
        .ok_or_else(|| LayoutError::UnknownRoom(name.to_string()))
}

pub fn load_case_from_file<P: AsRef<Path>>(path: P) -> Result<Case, CaseFileError> {
    let data = fs::read_to_string(path)?;
    load_case_from_str(&data)
}

/// `<config dir>/detective-quest/case.json`, if the platform has a config
/// directory.
#[must_use]
pub fn default_case_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CASE_FILE_NAME))
}

/// Explicit path first, then the default path if that file exists, then the
/// built-in case.
pub fn resolve_case(explicit: Option<&Path>) -> Result<Case, CaseFileError> {
    if let Some(path) = explicit {
        return load_case_from_file(path);
    }
    match default_case_path() {
        Some(path) if path.is_file() => load_case_from_file(path),
        _ => Ok(Case::reference()),
    }
}
