//! The vault antechamber: sixteen rooms laid out on a 4x4 floor.
//!
//! ```text
//!   *   8   -   1      <- vault (1) in the north-east corner
//!   4   *  11   *
//!   +   4   -  18
//!  22   -   9   *      <- orb (22) in the south-west corner
//! ```
//!
//! Two wirings are available. [`VaultLayout::AsAuthored`] reproduces the
//! hand-written exit list exactly, mistakes included. [`VaultLayout::Grid`]
//! derives every exit from the floor plan above.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::room::{Direction, Label, Labyrinth, Operator, RoomId};
use Label::{Number as N, Operator as O};
use Operator::{Add, Mul, Sub};

/// Value carried by the orb when it is picked up
pub const ORB_START_VALUE: i64 = 22;

/// Value the orb must carry when it reaches the vault door
pub const VAULT_TARGET: i64 = 30;

/// Moves allowed before the orb evaporates
pub const STEP_CAP: usize = 12;

const ROWS: usize = 4;
const COLS: usize = 4;
const ORB_CELL: (usize, usize) = (3, 0);
const VAULT_CELL: (usize, usize) = (0, 3);

const FLOOR_PLAN: [[Label; COLS]; ROWS] = [
    [O(Mul), N(8), O(Sub), N(1)],
    [N(4), O(Mul), N(11), O(Mul)],
    [O(Add), N(4), O(Sub), N(18)],
    [N(22), O(Sub), N(9), O(Mul)],
];

/// Which exit wiring to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum VaultLayout {
    /// Exits exactly as hand-wired, including the overwritten and dropped ones
    #[default]
    AsAuthored,
    /// Every orthogonal neighbour on the floor plan is an exit
    Grid,
}

/// A built vault: the room graph plus the start and goal rooms
#[derive(Debug, Clone)]
pub struct VaultMap {
    pub labyrinth: Labyrinth,
    pub orb: RoomId,
    pub vault: RoomId,
}

pub fn build_vault(layout: VaultLayout) -> VaultMap {
    match layout {
        VaultLayout::AsAuthored => build_as_authored(),
        VaultLayout::Grid => build_grid(),
    }
}

fn build_as_authored() -> VaultMap {
    use Direction::{East, North, South, West};

    let mut labyrinth = Labyrinth::new();

    // bottom row
    let orb = labyrinth.add_room(N(22));
    let minus1 = labyrinth.add_room(O(Sub));
    let nine = labyrinth.add_room(N(9));
    let mul1 = labyrinth.add_room(O(Mul));

    // third row
    let plus = labyrinth.add_room(O(Add));
    let four1 = labyrinth.add_room(N(4));
    let minus2 = labyrinth.add_room(O(Sub));
    let eighteen = labyrinth.add_room(N(18));

    // second row
    let four2 = labyrinth.add_room(N(4));
    let mul2 = labyrinth.add_room(O(Mul));
    let eleven = labyrinth.add_room(N(11));
    let mul3 = labyrinth.add_room(O(Mul));

    // top row
    let mul4 = labyrinth.add_room(O(Mul));
    let eight = labyrinth.add_room(N(8));
    let minus3 = labyrinth.add_room(O(Sub));
    let vault = labyrinth.add_room(N(1));

    let wiring = [
        (vault, West, minus3),
        (vault, South, mul3),
        (minus3, East, vault),
        (minus3, West, eight),
        (minus3, South, eleven),
        (eight, East, minus3),
        (eight, West, mul4),
        (eight, South, mul2),
        // mul4 never got its south exit to four2: the assignment was misspelled
        (mul4, East, eight),
        (four2, East, mul2),
        (four2, North, mul4),
        (four2, South, plus),
        (mul2, West, four2),
        (mul2, North, eight),
        (mul2, East, eleven),
        (mul2, South, four1),
        // east and west are swapped relative to the floor plan
        (eleven, West, mul3),
        (eleven, North, minus3),
        (eleven, South, minus2),
        (eleven, East, mul2),
        (mul3, North, vault),
        (mul3, West, eleven),
        (mul3, South, eighteen),
        (eighteen, North, mul3),
        (eighteen, South, mul1),
        (eighteen, East, minus2),
        (minus2, West, four1),
        (minus2, North, eleven),
        (minus2, South, nine),
        // overwrites the west exit above; minus2 has no exit to four1 and none east
        (minus2, West, eighteen),
        (four1, West, plus),
        (four1, North, mul2),
        (four1, South, minus1),
        (four1, East, minus2),
        (plus, East, four1),
        (plus, North, four2),
        (plus, South, orb),
        (orb, North, plus),
        (orb, East, minus1),
        (minus1, West, orb),
        (minus1, North, four1),
        (minus1, East, nine),
        (nine, West, minus1),
        (nine, North, minus2),
        (nine, East, mul1),
        (mul1, West, nine),
        (mul1, North, eighteen),
    ];

    for (from, direction, to) in wiring {
        labyrinth.connect(from, direction, to);
    }

    VaultMap {
        labyrinth,
        orb,
        vault,
    }
}

fn build_grid() -> VaultMap {
    let mut labyrinth = Labyrinth::new();
    let mut cells = [[RoomId(0); COLS]; ROWS];

    for (row, labels) in FLOOR_PLAN.iter().enumerate() {
        for (col, &label) in labels.iter().enumerate() {
            cells[row][col] = labyrinth.add_room(label);
        }
    }

    for row in 0..ROWS {
        for col in 0..COLS {
            for direction in Direction::ALL {
                let (dr, dc) = direction.delta();
                let r = row as i32 + dr;
                let c = col as i32 + dc;
                if (0..ROWS as i32).contains(&r) && (0..COLS as i32).contains(&c) {
                    labyrinth.connect(cells[row][col], direction, cells[r as usize][c as usize]);
                }
            }
        }
    }

    VaultMap {
        labyrinth,
        orb: cells[ORB_CELL.0][ORB_CELL.1],
        vault: cells[VAULT_CELL.0][VAULT_CELL.1],
    }
}
