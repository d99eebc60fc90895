pub mod agent;
pub mod distribute;
pub mod longest_road;
pub mod play;
pub mod resources;
pub mod rules;

pub use agent::Agent;
pub use distribute::distribute;
pub use longest_road::{BONUS_THRESHOLD, BonusTransfer, LongestRoadTracker, longest_road_length};
pub use play::{
    BuildAction, GameConfig, GameError, GamePlay, HAND_LIMIT, SimOutcome, TurnOutcome,
};
pub use resources::{
    COST_CITY, COST_ROAD, COST_SETTLEMENT, ResourceBundle, ResourceError, cost_of,
};
