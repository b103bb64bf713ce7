//! The mansion: an immutable binary layout of rooms.
//!
//! Rooms live in an arena and edges refer to them by [`RoomId`]. Apart from
//! rooms marked as exits, every room has at most one parent, so the layout
//! is a tree rooted at the entry. An exit may be shared by several branches;
//! it is stored once and referenced by each of them.

use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Room names longer than this are truncated at construction.
pub const MAX_ROOM_NAME_CHARS: usize = 63;
/// Clues longer than this are truncated at construction.
pub const MAX_CLUE_CHARS: usize = 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Returned by [`RoomGraph::navigate`] when the room has no edge in the
/// requested direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no path to the {direction} of {room:?}")]
pub struct NoPath {
    pub room: RoomId,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("room names must not be empty")]
    EmptyName,
    #[error("duplicate room name '{0}'")]
    DuplicateName(String),
    #[error("unknown room '{0}'")]
    UnknownRoom(String),
    #[error("no entry room was designated")]
    MissingEntry,
    #[error("the {direction} edge of '{room}' is already linked")]
    EdgeTaken { room: String, direction: Direction },
    #[error("room '{0}' is reachable from more than one room but is not an exit")]
    SharedRoom(String),
    #[error("the entry room '{0}' cannot be the target of an edge")]
    EntryHasParent(String),
    #[error("room '{0}' is part of a cycle")]
    Cycle(String),
    #[error("room '{0}' is not reachable from the entry")]
    Unreachable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    name: String,
    clue: Option<String>,
    exit: bool,
    left: Option<RoomId>,
    right: Option<RoomId>,
}

impl Room {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The clue hidden in this room, if any. Never empty.
    #[must_use]
    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    #[must_use]
    pub fn is_exit(&self) -> bool {
        self.exit
    }

    #[must_use]
    pub fn edge(&self, direction: Direction) -> Option<RoomId> {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

/// Trims `name` and cuts it to [`MAX_ROOM_NAME_CHARS`]. Room and suspect
/// names are stored and looked up in this form.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    truncate_chars(name.trim(), MAX_ROOM_NAME_CHARS)
}

/// Trims `clue` and cuts it to [`MAX_CLUE_CHARS`]; a blank clue is no clue.
#[must_use]
pub fn normalize_clue(clue: &str) -> Option<String> {
    let clue = clue.trim();
    (!clue.is_empty()).then(|| truncate_chars(clue, MAX_CLUE_CHARS))
}

fn fixed_layout_builder() -> LayoutBuilder {
    let mut b = RoomGraph::builder();
    let hall = b.room("Hall de Entrada", Some("Pegadas de botas"));
    let corredor = b.room("Corredor Longo", None);
    let lab = b.room("Laboratório", Some("Frasco quebrado"));
    let biblioteca = b.room("Biblioteca", Some("Livro sobre mutacoes"));
    let quarto = b.room("Quarto Abandonado", Some("Luvas manchadas"));
    let jardim = b.room("Jardim Interno", Some("Fio de cabelo loiro"));
    let poco = b.room("Poço Antigo", Some("Carta rasgada"));
    let armario = b.room("Armário Trancado", Some("Chave enferrujada"));
    let saida = b.exit("Saída", Some("Mapa rasgado"));

    b.link(hall, Direction::Left, lab);
    b.link(hall, Direction::Right, biblioteca);
    b.link(lab, Direction::Left, quarto);
    b.link(lab, Direction::Right, corredor);
    b.link(biblioteca, Direction::Left, jardim);
    b.link(biblioteca, Direction::Right, armario);
    b.link(quarto, Direction::Left, poco);
    b.link(corredor, Direction::Right, saida);

    b.entry(hall);
    b
}

#[derive(Debug, Clone)]
pub struct RoomGraph {
    rooms: Vec<Room>,
    entry: RoomId,
}

impl RoomGraph {
    #[must_use]
    pub fn builder() -> LayoutBuilder {
        LayoutBuilder::default()
    }

    /// The reference mansion.
    ///
    /// ```text
    ///                 Hall de Entrada
    ///             /                   \
    ///      Laboratório              Biblioteca
    ///      /        \               /        \
    ///   Quarto    Corredor       Jardim    Armário
    ///   /            \
    /// Poço          Saída
    /// ```
    #[must_use]
    pub fn fixed_layout() -> Self {
        fixed_layout_builder().assume_valid()
    }

    #[must_use]
    pub fn entry(&self) -> RoomId {
        self.entry
    }

    /// # Panics
    /// If `id` does not belong to this graph.
    #[must_use]
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub fn navigate(&self, from: RoomId, direction: Direction) -> Result<RoomId, NoPath> {
        self.room(from)
            .edge(direction)
            .ok_or(NoPath { room: from, direction })
    }

    /// Exit rooms and dead ends both end an exploration.
    #[must_use]
    pub fn is_terminal(&self, id: RoomId) -> bool {
        let room = self.room(id);
        room.exit || (room.left.is_none() && room.right.is_none())
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<RoomId> {
        let name = normalize_name(name);
        self.rooms.iter().position(|r| r.name == name).map(RoomId)
    }

    /// Follows `path` from the entry, stopping at the first missing edge.
    pub fn walk(&self, path: &[Direction]) -> Result<RoomId, NoPath> {
        path.iter()
            .try_fold(self.entry, |at, &direction| self.navigate(at, direction))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// Collects rooms and edges, then validates them into a [`RoomGraph`].
///
/// Problems are recorded as they happen and reported by [`build`], so the
/// wiring code can stay linear.
///
/// [`build`]: LayoutBuilder::build
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    rooms: Vec<Room>,
    entry: Option<RoomId>,
    errors: Vec<LayoutError>,
}

impl LayoutBuilder {
    /// Adds a room. A blank clue counts as no clue.
    pub fn room(&mut self, name: &str, clue: Option<&str>) -> RoomId {
        self.push(name, clue, false)
    }

    /// Adds a room that ends the exploration when entered.
    pub fn exit(&mut self, name: &str, clue: Option<&str>) -> RoomId {
        self.push(name, clue, true)
    }

    fn push(&mut self, name: &str, clue: Option<&str>, exit: bool) -> RoomId {
        let name = normalize_name(name);
        if name.is_empty() {
            self.errors.push(LayoutError::EmptyName);
        } else if self.rooms.iter().any(|r| r.name == name) {
            self.errors.push(LayoutError::DuplicateName(name.clone()));
        }
        let clue = clue.and_then(normalize_clue);
        self.rooms.push(Room {
            name,
            clue,
            exit,
            left: None,
            right: None,
        });
        RoomId(self.rooms.len() - 1)
    }

    /// Ids that do not come from this builder are recorded as
    /// [`LayoutError::UnknownRoom`].
    pub fn link(&mut self, from: RoomId, direction: Direction, to: RoomId) -> &mut Self {
        if to.0 >= self.rooms.len() {
            self.errors.push(unknown_id(to));
            return self;
        }
        let Some(room) = self.rooms.get_mut(from.0) else {
            self.errors.push(unknown_id(from));
            return self;
        };
        let edge = match direction {
            Direction::Left => &mut room.left,
            Direction::Right => &mut room.right,
        };
        if edge.is_some() {
            self.errors.push(LayoutError::EdgeTaken {
                room: room.name.clone(),
                direction,
            });
        } else {
            *edge = Some(to);
        }
        self
    }

    pub fn entry(&mut self, id: RoomId) -> &mut Self {
        self.entry = Some(id);
        self
    }

    pub fn find(&self, name: &str) -> Option<RoomId> {
        let name = normalize_name(name);
        self.rooms.iter().position(|r| r.name == name).map(RoomId)
    }

    /// Skips validation; only for layouts wired in code and covered by tests.
    fn assume_valid(self) -> RoomGraph {
        RoomGraph {
            rooms: self.rooms,
            entry: self.entry.unwrap_or(RoomId(0)),
        }
    }

    pub fn build(self) -> Result<RoomGraph, LayoutError> {
        if let Some(e) = self.errors.into_iter().next() {
            return Err(e);
        }
        let entry = self.entry.ok_or(LayoutError::MissingEntry)?;
        if entry.0 >= self.rooms.len() {
            return Err(unknown_id(entry));
        }
        let rooms = self.rooms;

        let mut parents: HashMap<RoomId, usize> = HashMap::new();
        for room in &rooms {
            for child in [room.left, room.right].into_iter().flatten() {
                *parents.entry(child).or_default() += 1;
            }
        }
        if parents.contains_key(&entry) {
            return Err(LayoutError::EntryHasParent(rooms[entry.0].name.clone()));
        }
        for (&id, &count) in &parents {
            if count > 1 && !rooms[id.0].exit {
                return Err(LayoutError::SharedRoom(rooms[id.0].name.clone()));
            }
        }

        // Depth-first walk; a room met again while still on the current
        // path closes a cycle.
        let mut reached = HashSet::new();
        let mut on_path = HashSet::new();
        let mut stack = vec![(entry, false)];
        while let Some((id, leaving)) = stack.pop() {
            if leaving {
                on_path.remove(&id);
                continue;
            }
            if !reached.insert(id) {
                continue;
            }
            on_path.insert(id);
            stack.push((id, true));
            let room = &rooms[id.0];
            for child in [room.right, room.left].into_iter().flatten() {
                if on_path.contains(&child) {
                    return Err(LayoutError::Cycle(rooms[child.0].name.clone()));
                }
                stack.push((child, false));
            }
        }
        if let Some(lost) = rooms.iter().enumerate().find(|(i, _)| !reached.contains(&RoomId(*i))) {
            return Err(LayoutError::Unreachable(lost.1.name.clone()));
        }

        Ok(RoomGraph { rooms, entry })
    }
}

fn unknown_id(id: RoomId) -> LayoutError {
    LayoutError::UnknownRoom(format!("#{}", id.0))
}
