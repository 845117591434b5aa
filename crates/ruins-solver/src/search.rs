//! Bounded breadth-first search for the vault orb puzzle.
//!
//! The orb starts with a value and changes as it is carried through the
//! rooms: stepping onto an operator room arms that operator, and the next
//! number room applies it. The door only opens if the orb arrives with the
//! goal value, and the orb evaporates after a fixed number of moves.
//!
//! There is no visited set. Rooms can be re-entered as often as the step cap
//! allows, except the start room, which is never entered again.

use std::collections::VecDeque;
use std::time::Instant;

use serde::Serialize;
use smallvec::SmallVec;

use crate::error::{Result, SolverError};
use crate::layout::{VaultMap, ORB_START_VALUE, STEP_CAP, VAULT_TARGET};
use crate::room::{Direction, Label, Labyrinth, Operator, RoomId};

/// Rooms visited so far; a cap-12 path fits inline
pub type RoomPath = SmallVec<[RoomId; 16]>;

type MovePath = SmallVec<[Direction; 16]>;

/// Configuration for the vault search
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Orb value at the start room
    pub start_value: i64,
    /// Orb value required at the goal room
    pub goal_value: i64,
    /// Maximum number of moves
    pub max_steps: usize,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            start_value: ORB_START_VALUE,
            goal_value: VAULT_TARGET,
            max_steps: STEP_CAP,
        }
    }
}

/// A winning walk from the orb to the vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultPath {
    pub rooms: Vec<RoomId>,
    pub labels: Vec<Label>,
    pub moves: Vec<Direction>,
    pub value: i64,
}

impl VaultPath {
    /// Room labels joined by spaces, e.g. `22 + 4 - 11`
    pub fn label_line(&self) -> String {
        self.labels
            .iter()
            .map(|label| label.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn steps(&self) -> usize {
        self.moves.len()
    }
}

/// Result of the vault search
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// First winning path in breadth-first order
    pub path: Option<VaultPath>,
    /// Number of frames taken off the queue
    pub frames_dequeued: usize,
    /// Whether the queue ran empty
    pub search_exhausted: bool,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

/// Value and pending operator after stepping onto a room with `label`.
///
/// Returns `None` when the step cannot be taken: an operator room while
/// another operator is pending, or an overflowing operation.
fn step_value(value: i64, pending: Option<Operator>, label: Label) -> Option<(i64, Option<Operator>)> {
    match (pending, label) {
        (Some(op), Label::Number(n)) => op.apply(value, n).map(|v| (v, None)),
        (Some(_), Label::Operator(_)) => None,
        (None, Label::Operator(op)) => Some((value, Some(op))),
        // a number with nothing to apply leaves the orb unchanged
        (None, Label::Number(_)) => Some((value, None)),
    }
}

/// A frame in the search: one partial walk and the orb state at its end
#[derive(Debug, Clone)]
struct SearchFrame {
    room: RoomId,
    value: i64,
    pending: Option<Operator>,
    path: RoomPath,
    moves: MovePath,
    steps: usize,
}

impl SearchFrame {
    fn start(room: RoomId, value: i64) -> Self {
        let mut path = RoomPath::new();
        path.push(room);
        Self {
            room,
            value,
            pending: None,
            path,
            moves: MovePath::new(),
            steps: 0,
        }
    }

    fn advance(&self, direction: Direction, to: RoomId, label: Label) -> Option<Self> {
        let (value, pending) = step_value(self.value, self.pending, label)?;

        let mut path = self.path.clone();
        path.push(to);
        let mut moves = self.moves.clone();
        moves.push(direction);

        Some(Self {
            room: to,
            value,
            pending,
            path,
            moves,
            steps: self.steps + 1,
        })
    }

    fn into_vault_path(self, labyrinth: &Labyrinth) -> VaultPath {
        VaultPath {
            labels: self.path.iter().map(|&id| labyrinth.label(id)).collect(),
            rooms: self.path.into_vec(),
            moves: self.moves.into_vec(),
            value: self.value,
        }
    }
}

/// Find the first walk from the orb to the vault that opens the door.
///
/// Frames are expanded first-in first-out, exits in east, west, north,
/// south order, so among the shortest winning walks the one that branches
/// east earliest is returned. A frame is only checked when it is dequeued:
/// it is terminal at the vault or at the step cap, and a winner only if it
/// is at the vault carrying `goal_value`.
pub fn find_vault_path(map: &VaultMap, config: &VaultConfig) -> Result<SearchResult> {
    if config.max_steps == 0 {
        return Err(SolverError::ZeroStepCap);
    }

    let start_time = Instant::now();
    let labyrinth = &map.labyrinth;
    let mut frames_dequeued: usize = 0;

    tracing::debug!(
        start = config.start_value,
        goal = config.goal_value,
        max_steps = config.max_steps,
        rooms = labyrinth.len(),
        "searching vault paths"
    );

    let mut queue: VecDeque<SearchFrame> = VecDeque::new();
    queue.push_back(SearchFrame::start(map.orb, config.start_value));

    while let Some(frame) = queue.pop_front() {
        frames_dequeued += 1;

        if frame.room == map.vault || frame.steps == config.max_steps {
            if frame.room == map.vault && frame.value == config.goal_value {
                tracing::debug!(frames_dequeued, steps = frame.steps, "vault opened");
                return Ok(SearchResult {
                    path: Some(frame.into_vault_path(labyrinth)),
                    frames_dequeued,
                    search_exhausted: false,
                    time_elapsed_ms: start_time.elapsed().as_millis() as u64,
                });
            }
            continue;
        }

        for (direction, to) in labyrinth.exits(frame.room) {
            if to == map.orb {
                continue;
            }

            match frame.advance(direction, to, labyrinth.label(to)) {
                Some(next) => queue.push_back(next),
                None => tracing::trace!(
                    from = frame.room.0,
                    to = to.0,
                    value = frame.value,
                    "dropping branch"
                ),
            }
        }
    }

    tracing::debug!(frames_dequeued, "vault search exhausted");

    Ok(SearchResult {
        path: None,
        frames_dequeued,
        search_exhausted: true,
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    })
}

/// Replay the orb value along a walk that starts with `start_value`.
///
/// Returns `None` if some step along the walk cannot be taken.
pub fn replay_path(labyrinth: &Labyrinth, rooms: &[RoomId], start_value: i64) -> Option<i64> {
    let mut value = start_value;
    let mut pending = None;
    for &room in rooms.iter().skip(1) {
        (value, pending) = step_value(value, pending, labyrinth.label(room))?;
    }
    Some(value)
}

/// Check that a path is a legal winning walk for this vault and config
pub fn verify_path(map: &VaultMap, config: &VaultConfig, path: &VaultPath) -> bool {
    let labyrinth = &map.labyrinth;
    let rooms = &path.rooms;

    if rooms.first() != Some(&map.orb) || rooms.last() != Some(&map.vault) {
        return false;
    }
    if rooms.len() > config.max_steps + 1 || rooms.len() != path.moves.len() + 1 {
        return false;
    }
    if rooms[1..].contains(&map.orb) {
        return false;
    }

    let follows_exits = rooms
        .windows(2)
        .zip(&path.moves)
        .all(|(pair, &direction)| labyrinth.exit(pair[0], direction) == Some(pair[1]));
    if !follows_exits {
        return false;
    }

    replay_path(labyrinth, rooms, config.start_value) == Some(config.goal_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{build_vault, VaultLayout};
    use crate::room::Direction::{East, North, South, West};

    fn create_map(labyrinth: Labyrinth, orb: RoomId, vault: RoomId) -> VaultMap {
        VaultMap {
            labyrinth,
            orb,
            vault,
        }
    }

    fn config(start_value: i64, goal_value: i64, max_steps: usize) -> VaultConfig {
        VaultConfig {
            start_value,
            goal_value,
            max_steps,
        }
    }

    /// 1 -> + -> 2 -> * -> 3, all east; (1 + 2) * 3 = 9 in four moves
    fn create_chain() -> VaultMap {
        let mut lab = Labyrinth::new();
        let start = lab.add_room(Label::Number(1));
        let plus = lab.add_room(Label::Operator(Operator::Add));
        let two = lab.add_room(Label::Number(2));
        let mul = lab.add_room(Label::Operator(Operator::Mul));
        let goal = lab.add_room(Label::Number(3));
        lab.connect(start, East, plus);
        lab.connect(plus, East, two);
        lab.connect(two, East, mul);
        lab.connect(mul, East, goal);
        create_map(lab, start, goal)
    }

    #[test]
    fn test_step_value() {
        assert_eq!(step_value(22, None, Label::Operator(Operator::Add)), Some((22, Some(Operator::Add))));
        assert_eq!(step_value(22, Some(Operator::Add), Label::Number(4)), Some((26, None)));
        assert_eq!(step_value(22, None, Label::Number(4)), Some((22, None)));
        assert_eq!(step_value(22, Some(Operator::Sub), Label::Operator(Operator::Mul)), None);
        assert_eq!(step_value(i64::MAX, Some(Operator::Add), Label::Number(1)), None);
    }

    #[test]
    fn test_finds_authored_vault_path() {
        let map = build_vault(VaultLayout::AsAuthored);
        let config = VaultConfig::default();

        let result = find_vault_path(&map, &config).unwrap();
        let path = result.path.expect("vault should open");

        assert_eq!(path.label_line(), "22 + 4 - 11 * 4 - 18 - 11 - 1");
        assert_eq!(
            path.moves,
            vec![North, East, East, North, East, South, East, West, East, North, North, East]
        );
        assert_eq!(path.value, VAULT_TARGET);
        assert_eq!(path.steps(), STEP_CAP);
        assert_eq!(result.frames_dequeued, 231_458);
        assert!(!result.search_exhausted);
        assert!(verify_path(&map, &config, &path));
    }

    #[test]
    fn test_finds_grid_vault_path() {
        let map = build_vault(VaultLayout::Grid);
        let config = VaultConfig::default();

        let result = find_vault_path(&map, &config).unwrap();
        let path = result.path.expect("vault should open");

        assert_eq!(path.label_line(), "22 + 4 - 11 * 4 - 18 - 11 - 1");
        assert_eq!(
            path.moves,
            vec![North, East, East, North, West, South, East, East, West, North, North, East]
        );
        assert_eq!(result.frames_dequeued, 409_723);
        assert!(verify_path(&map, &config, &path));
    }

    #[test]
    fn test_vault_needs_all_twelve_steps() {
        let map = build_vault(VaultLayout::AsAuthored);
        let config = VaultConfig {
            max_steps: STEP_CAP - 1,
            ..Default::default()
        };

        let result = find_vault_path(&map, &config).unwrap();

        assert!(result.path.is_none());
        assert!(result.search_exhausted);
    }

    #[test]
    fn test_step_cap_discards_long_paths() {
        let map = create_chain();

        let result = find_vault_path(&map, &config(1, 9, 3)).unwrap();
        assert!(result.path.is_none());
        assert!(result.search_exhausted);

        let result = find_vault_path(&map, &config(1, 9, 4)).unwrap();
        let path = result.path.expect("chain fits in four moves");
        assert_eq!(path.label_line(), "1 + 2 * 3");
        assert_eq!(path.rooms.len(), 5);
    }

    #[test]
    fn test_wrong_value_at_goal_is_discarded() {
        let map = create_chain();

        let result = find_vault_path(&map, &config(1, 10, 12)).unwrap();

        assert!(result.path.is_none());
        assert!(result.search_exhausted);
    }

    #[test]
    fn test_tie_break_prefers_east() {
        let mut lab = Labyrinth::new();
        let start = lab.add_room(Label::Number(1));
        let west_plus = lab.add_room(Label::Operator(Operator::Add));
        let east_plus = lab.add_room(Label::Operator(Operator::Add));
        let goal = lab.add_room(Label::Number(2));
        lab.connect(start, West, west_plus);
        lab.connect(start, East, east_plus);
        lab.connect(west_plus, North, goal);
        lab.connect(east_plus, North, goal);
        let map = create_map(lab, start, goal);

        let result = find_vault_path(&map, &config(1, 3, 12)).unwrap();
        let path = result.path.unwrap();

        assert_eq!(path.rooms, vec![start, east_plus, goal]);
        assert_eq!(path.moves, vec![East, North]);
    }

    #[test]
    fn test_start_room_is_never_reentered() {
        // start(3) <-> plus, plus -> goal(0). Re-entering start would give 3 + 3 + 0.
        let mut lab = Labyrinth::new();
        let start = lab.add_room(Label::Number(3));
        let plus = lab.add_room(Label::Operator(Operator::Add));
        let goal = lab.add_room(Label::Number(0));
        lab.connect(start, East, plus);
        lab.connect(plus, West, start);
        lab.connect(plus, North, goal);
        let map = create_map(lab, start, goal);

        let result = find_vault_path(&map, &config(3, 6, 6)).unwrap();
        assert!(result.path.is_none());

        let result = find_vault_path(&map, &config(3, 3, 6)).unwrap();
        assert_eq!(result.path.unwrap().rooms, vec![start, plus, goal]);
    }

    #[test]
    fn test_revisits_allowed_without_pruning() {
        // 0 -> + <-> 5, + -> goal(0): 0 + 5 then loop back through + to reach 10
        let mut lab = Labyrinth::new();
        let start = lab.add_room(Label::Number(0));
        let plus = lab.add_room(Label::Operator(Operator::Add));
        let five = lab.add_room(Label::Number(5));
        let goal = lab.add_room(Label::Number(0));
        lab.connect(start, East, plus);
        lab.connect(plus, East, five);
        lab.connect(five, West, plus);
        lab.connect(plus, North, goal);
        let map = create_map(lab, start, goal);

        let result = find_vault_path(&map, &config(0, 10, 12)).unwrap();
        let path = result.path.unwrap();

        assert_eq!(path.rooms, vec![start, plus, five, plus, five, plus, goal]);
        assert!(verify_path(&map, &config(0, 10, 12), &path));
    }

    #[test]
    fn test_operator_after_operator_is_dropped() {
        let mut lab = Labyrinth::new();
        let start = lab.add_room(Label::Number(1));
        let plus = lab.add_room(Label::Operator(Operator::Add));
        let mul = lab.add_room(Label::Operator(Operator::Mul));
        let goal = lab.add_room(Label::Number(5));
        lab.connect(start, East, plus);
        lab.connect(plus, East, mul);
        lab.connect(mul, East, goal);
        let map = create_map(lab, start, goal);

        let result = find_vault_path(&map, &config(1, 5, 12)).unwrap();

        assert!(result.path.is_none());
        // start, plus; the mul branch never reaches the queue
        assert_eq!(result.frames_dequeued, 2);
    }

    #[test]
    fn test_number_without_operator_passes_through() {
        let mut lab = Labyrinth::new();
        let start = lab.add_room(Label::Number(1));
        let seven = lab.add_room(Label::Number(7));
        let plus = lab.add_room(Label::Operator(Operator::Add));
        let goal = lab.add_room(Label::Number(2));
        lab.connect(start, East, seven);
        lab.connect(seven, East, plus);
        lab.connect(plus, East, goal);
        let map = create_map(lab, start, goal);

        let result = find_vault_path(&map, &config(1, 3, 12)).unwrap();
        let path = result.path.unwrap();

        assert_eq!(path.label_line(), "1 7 + 2");
        assert_eq!(replay_path(&map.labyrinth, &path.rooms, 1), Some(3));
    }

    #[test]
    fn test_zero_step_cap_rejected() {
        let map = create_chain();

        assert!(matches!(
            find_vault_path(&map, &config(1, 9, 0)),
            Err(SolverError::ZeroStepCap)
        ));
    }

    #[test]
    fn test_verify_path_rejects_bad_paths() {
        let map = create_chain();
        let cfg = config(1, 9, 12);
        let good = find_vault_path(&map, &cfg).unwrap().path.unwrap();
        assert!(verify_path(&map, &cfg, &good));

        let mut wrong_move = good.clone();
        wrong_move.moves[0] = West;
        assert!(!verify_path(&map, &cfg, &wrong_move));

        let mut truncated = good.clone();
        truncated.rooms.pop();
        truncated.moves.pop();
        assert!(!verify_path(&map, &cfg, &truncated));

        assert!(!verify_path(&map, &config(1, 9, 3), &good));
        assert!(!verify_path(&map, &config(1, 10, 12), &good));
    }

    #[test]
    fn test_deterministic() {
        let map = create_chain();
        let cfg = config(1, 9, 12);

        let first = find_vault_path(&map, &cfg).unwrap();
        let second = find_vault_path(&map, &cfg).unwrap();

        assert_eq!(first.path, second.path);
        assert_eq!(first.frames_dequeued, second.frames_dequeued);
    }
}
