//! Brute-force solvers for two puzzles found in the ruins.
//!
//! - [`coins`]: order five coins so the monument equation balances.
//! - [`search`]: carry the orb through the vault antechamber so it arrives
//!   at the door with the right value.
//!
//! The two solvers share nothing but the error type.

pub mod coins;
pub mod error;
pub mod layout;
pub mod room;
pub mod search;

// Re-export main types
pub use coins::{coin_name, find_coin_order, monument_value, CoinConfig, CoinResult};
pub use error::{Result, SolverError};
pub use layout::{build_vault, VaultLayout, VaultMap};
pub use room::{Direction, Label, Labyrinth, Operator, Room, RoomId};
pub use search::{find_vault_path, replay_path, verify_path, SearchResult, VaultConfig, VaultPath};
