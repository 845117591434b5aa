//! Room graph types for the vault puzzle.
//!
//! Rooms live in a [`Labyrinth`] arena and are addressed by [`RoomId`].
//! Exits are directed: wiring `a` east to `b` says nothing about `b`'s west.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Arithmetic operator painted on a room floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
}

impl Operator {
    /// Parse an operator from its floor symbol
    pub fn from_symbol(symbol: char) -> Option<Operator> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
        }
    }

    /// Apply the operator, returning `None` on overflow
    pub fn apply(self, lhs: i64, rhs: i64) -> Option<i64> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Sub => lhs.checked_sub(rhs),
            Operator::Mul => lhs.checked_mul(rhs),
        }
    }
}

/// What is written in a room: a number or an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(i64),
    Operator(Operator),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(n) => write!(f, "{}", n),
            Label::Operator(op) => write!(f, "{}", op.symbol()),
        }
    }
}

/// Exit direction out of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    East,
    West,
    North,
    South,
}

impl Direction {
    /// All directions in expansion order
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    fn slot(self) -> usize {
        match self {
            Direction::East => 0,
            Direction::West => 1,
            Direction::North => 2,
            Direction::South => 3,
        }
    }

    /// Grid offset as (row, column); north is the row above
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::East => "east",
            Direction::West => "west",
            Direction::North => "north",
            Direction::South => "south",
        };
        f.write_str(name)
    }
}

/// Identity of a room, assigned sequentially by its labyrinth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u8);

impl RoomId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single room
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub label: Label,
    exits: [Option<RoomId>; 4],
}

impl Room {
    pub fn exit(&self, direction: Direction) -> Option<RoomId> {
        self.exits[direction.slot()]
    }
}

/// Arena owning every room of one vault build (at most 256 rooms)
#[derive(Debug, Clone, Default)]
pub struct Labyrinth {
    rooms: Vec<Room>,
}

impl Labyrinth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room with no exits and return its id
    pub fn add_room(&mut self, label: Label) -> RoomId {
        debug_assert!(self.rooms.len() <= u8::MAX as usize);
        let id = RoomId(self.rooms.len() as u8);
        self.rooms.push(Room {
            id,
            label,
            exits: [None; 4],
        });
        id
    }

    /// Wire a directed exit, replacing and returning any previous target
    pub fn connect(&mut self, from: RoomId, direction: Direction, to: RoomId) -> Option<RoomId> {
        let slot = &mut self.rooms[from.index()].exits[direction.slot()];
        slot.replace(to)
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }

    pub fn label(&self, id: RoomId) -> Label {
        self.room(id).label
    }

    pub fn exit(&self, from: RoomId, direction: Direction) -> Option<RoomId> {
        self.room(from).exit(direction)
    }

    /// Existing exits of a room in expansion order (east, west, north, south)
    pub fn exits(&self, from: RoomId) -> impl Iterator<Item = (Direction, RoomId)> + '_ {
        let room = self.room(from);
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| room.exit(dir).map(|to| (dir, to)))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_apply() {
        assert_eq!(Operator::Add.apply(22, 4), Some(26));
        assert_eq!(Operator::Sub.apply(26, 11), Some(15));
        assert_eq!(Operator::Mul.apply(15, 4), Some(60));
        assert_eq!(Operator::Mul.apply(i64::MAX, 2), None);
    }

    #[test]
    fn test_operator_symbols() {
        for op in [Operator::Add, Operator::Sub, Operator::Mul] {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol('/'), None);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::Number(22).to_string(), "22");
        assert_eq!(Label::Operator(Operator::Mul).to_string(), "*");
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut labyrinth = Labyrinth::new();
        let a = labyrinth.add_room(Label::Number(1));
        let b = labyrinth.add_room(Label::Operator(Operator::Add));

        assert_eq!(a, RoomId(0));
        assert_eq!(b, RoomId(1));
        assert_eq!(labyrinth.len(), 2);
    }

    #[test]
    fn test_connect_is_directed_and_overwrites() {
        let mut labyrinth = Labyrinth::new();
        let a = labyrinth.add_room(Label::Number(1));
        let b = labyrinth.add_room(Label::Operator(Operator::Add));
        let c = labyrinth.add_room(Label::Number(2));

        assert_eq!(labyrinth.connect(a, Direction::West, b), None);
        assert_eq!(labyrinth.connect(a, Direction::West, c), Some(b));
        assert_eq!(labyrinth.exit(a, Direction::West), Some(c));
        assert_eq!(labyrinth.exit(c, Direction::East), None);
    }

    #[test]
    fn test_exits_in_expansion_order() {
        let mut labyrinth = Labyrinth::new();
        let hub = labyrinth.add_room(Label::Number(0));
        let south = labyrinth.add_room(Label::Number(1));
        let east = labyrinth.add_room(Label::Number(2));
        let north = labyrinth.add_room(Label::Number(3));

        labyrinth.connect(hub, Direction::South, south);
        labyrinth.connect(hub, Direction::North, north);
        labyrinth.connect(hub, Direction::East, east);

        let exits: Vec<_> = labyrinth.exits(hub).collect();
        assert_eq!(
            exits,
            vec![
                (Direction::East, east),
                (Direction::North, north),
                (Direction::South, south),
            ]
        );
    }

    #[test]
    fn test_label_serializes_as_symbol_or_number() {
        let labels = vec![Label::Number(22), Label::Operator(Operator::Add)];
        assert_eq!(serde_json::to_string(&labels).unwrap(), r#"[22,"+"]"#);
    }
}
