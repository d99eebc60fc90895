#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod dice;
pub mod game;
pub mod types;

pub use board::{AgentId, Board, BoardError, Building, EdgeId, MapLayout, NodeId};
pub use dice::Dice;
pub use game::{Agent, GameConfig, GameError, GamePlay, SimOutcome};
pub use types::{BuildKind, Resource};
