use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::{AgentId, Board, BoardError, EdgeId, MapLayout, NodeId};
use crate::dice::Dice;
use crate::game::agent::Agent;
use crate::game::distribute::distribute;
use crate::game::longest_road::LongestRoadTracker;
use crate::game::resources::ResourceError;
use crate::game::rules;
use crate::types::{BuildKind, Resource};

/// Hand size above which an agent must build or discard.
pub const HAND_LIMIT: u32 = 7;

const AGENT_NAMES: [&str; 4] = ["Agent_Alpha", "Agent_Beta", "Agent_Gamma", "Agent_Delta"];
const STARTING_HAND: [Resource; 4] = [
    Resource::Lumber,
    Resource::Brick,
    Resource::Wheat,
    Resource::Wool,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub num_agents: usize,
    pub max_rounds: u32,
    pub vps_to_win: u8,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_agents: 4,
            max_rounds: 8192,
            vps_to_win: 10,
            seed: 42,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Resources(#[from] ResourceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildAction {
    Settlement(NodeId),
    City(NodeId),
    Road(EdgeId),
}

/// What happened during one agent's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub agent: AgentId,
    pub roll: u8,
    pub build: Option<BuildAction>,
    pub forced_discard: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimOutcome {
    pub winner: Option<AgentId>,
    pub rounds: u32,
    pub turns: u32,
    pub final_points: Vec<u8>,
}

/// The turn/round controller. Owns the board, the agents, the dice and the
/// random source; the sole mutator of all session state.
pub struct GamePlay {
    pub id: Uuid,
    config: GameConfig,
    board: Board,
    agents: Vec<Agent>,
    dice: Dice,
    tracker: LongestRoadTracker,
    round: u32,
    turn: u32,
    rng: StdRng,
}

impl GamePlay {
    /// Sets up a fresh session: standard board, one starting settlement per
    /// agent on the layout's reserved nodes (+1 VP each) and a small starting
    /// hand. A seed fully determines the simulation trace.
    pub fn new(config: GameConfig) -> Self {
        assert!(
            (2..=4).contains(&config.num_agents),
            "between 2 and 4 agents are supported"
        );

        let layout = MapLayout::standard();
        let mut board = Board::from_layout(layout);
        let mut agents: Vec<Agent> = AGENT_NAMES
            .iter()
            .take(config.num_agents)
            .map(|name| Agent::new(*name))
            .collect();

        for (idx, agent) in agents.iter_mut().enumerate() {
            let node = layout.starting_nodes[idx];
            board
                .place_settlement(node, idx)
                .expect("starting nodes are vacant and distinct");
            agent.add_victory_points(1);
            for resource in STARTING_HAND {
                agent.add_resource(resource, 1);
            }
        }

        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            id: Uuid::new_v4(),
            config,
            board,
            agents,
            dice: Dice::two_d6(),
            tracker: LongestRoadTracker::default(),
            round: 0,
            turn: 0,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn round_number(&self) -> u32 {
        self.round
    }

    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    pub fn longest_road_holder(&self) -> Option<AgentId> {
        self.tracker.holder()
    }

    /// Runs rounds in fixed seating order until an agent reaches the
    /// victory-point target (checked after every turn, mid-round) or the
    /// round ceiling is hit. Round-limit exhaustion is a normal outcome.
    pub fn run(&mut self) -> Result<SimOutcome, GameError> {
        info!(
            "simulation {} started: {} agents, first to {} points, at most {} rounds",
            self.id, self.config.num_agents, self.config.vps_to_win, self.config.max_rounds
        );
        let mut winner = None;
        while self.round < self.config.max_rounds && winner.is_none() {
            self.round += 1;
            for agent in 0..self.agents.len() {
                self.turn += 1;
                let outcome = self.execute_turn(agent)?;
                debug!(
                    "[{} / {}] rolled {}, build {:?}, {} points",
                    self.round,
                    self.agents[agent].name(),
                    outcome.roll,
                    outcome.build,
                    self.agents[agent].victory_points()
                );
                if self.agents[agent].victory_points() >= self.config.vps_to_win {
                    winner = Some(agent);
                    break;
                }
            }
            self.log_round_summary();
        }
        if let Some(agent) = winner {
            info!("{} wins after {} turns", self.agents[agent].name(), self.turn);
        } else {
            info!("round limit reached after {} turns without a victor", self.turn);
        }
        Ok(SimOutcome {
            winner,
            rounds: self.round,
            turns: self.turn,
            final_points: self.agents.iter().map(|a| a.victory_points()).collect(),
        })
    }

    /// One agent's turn: roll, produce or run the seven-roll discard
    /// protocol, then the overflow check for the active agent only.
    fn execute_turn(&mut self, agent: AgentId) -> Result<TurnOutcome, GameError> {
        let roll = self.dice.roll(&mut self.rng);
        if roll == 7 {
            self.handle_seven_roll();
        } else {
            distribute(&self.board, &mut self.agents, roll);
        }

        let mut build = None;
        let mut forced_discard = false;
        if self.agents[agent].hand_size() > HAND_LIMIT {
            build = self.perform_random_build(agent)?;
            if build.is_none() {
                self.discard_down_to_limit(agent);
                forced_discard = true;
            }
        }
        Ok(TurnOutcome {
            agent,
            roll,
            build,
            forced_discard,
        })
    }

    /// Executes one build chosen uniformly at random from the union of all
    /// legal placements the agent can afford. `None` when nothing is legal.
    fn perform_random_build(&mut self, agent: AgentId) -> Result<Option<BuildAction>, GameError> {
        let mut options: Vec<BuildAction> = Vec::new();
        if self.agents[agent].can_afford(BuildKind::Settlement) {
            options.extend(
                rules::legal_settlements(&self.board)
                    .into_iter()
                    .map(BuildAction::Settlement),
            );
        }
        if self.agents[agent].can_afford(BuildKind::City) {
            options.extend(
                rules::legal_cities(&self.board, agent)
                    .into_iter()
                    .map(BuildAction::City),
            );
        }
        if self.agents[agent].can_afford(BuildKind::Road) {
            options.extend(
                rules::legal_roads(&self.board, agent)
                    .into_iter()
                    .map(BuildAction::Road),
            );
        }
        let Some(&choice) = options.choose(&mut self.rng) else {
            return Ok(None);
        };

        match choice {
            BuildAction::Settlement(node) => {
                self.agents[agent].deduct_cost(BuildKind::Settlement)?;
                self.board.place_settlement(node, agent)?;
                self.agents[agent].add_victory_points(1);
                info!(
                    "{} builds a settlement at node {node}",
                    self.agents[agent].name()
                );
            }
            BuildAction::City(node) => {
                self.agents[agent].deduct_cost(BuildKind::City)?;
                self.board.place_city(node, agent)?;
                // net gain over the settlement the city replaces
                self.agents[agent].add_victory_points(1);
                info!(
                    "{} upgrades node {node} to a city",
                    self.agents[agent].name()
                );
            }
            BuildAction::Road(edge) => {
                self.agents[agent].deduct_cost(BuildKind::Road)?;
                self.board.place_road(edge, agent)?;
                info!(
                    "{} builds a road {}-{}",
                    self.agents[agent].name(),
                    edge.0,
                    edge.1
                );
                self.tracker.recompute(&self.board, &mut self.agents);
            }
        }
        Ok(Some(choice))
    }

    /// Seven-roll protocol: every agent over the limit discards half their
    /// hand (rounded down), one uniformly random unit at a time.
    fn handle_seven_roll(&mut self) {
        for idx in 0..self.agents.len() {
            let hand = self.agents[idx].hand_size();
            if hand > HAND_LIMIT {
                for _ in 0..hand / 2 {
                    self.agents[idx].discard_random(&mut self.rng);
                }
            }
        }
    }

    /// Random discards until the hand is back at the limit.
    fn discard_down_to_limit(&mut self, agent: AgentId) {
        while self.agents[agent].hand_size() > HAND_LIMIT {
            if self.agents[agent].discard_random(&mut self.rng).is_none() {
                break;
            }
        }
    }

    fn log_round_summary(&self) {
        use itertools::Itertools;
        info!(
            "end of round {}: {}",
            self.round,
            self.agents
                .iter()
                .map(|agent| format!("{} {}", agent.name(), agent.victory_points()))
                .join(", ")
        );
    }
}
