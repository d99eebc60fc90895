//! Longest-road evaluation and the transferable two-point bonus.

use std::collections::{HashMap, HashSet};

use log::info;
use smallvec::SmallVec;

use crate::board::{AgentId, Board, NodeId};
use crate::game::agent::Agent;

/// Minimum road-path length (in edges) required to hold the bonus.
pub const BONUS_THRESHOLD: usize = 5;
pub const BONUS_POINTS: i8 = 2;

/// Length in edges of the agent's longest simple road path.
///
/// Builds the undirected subgraph of the agent's roads and runs a
/// backtracking depth-first search from every vertex, tracking visited nodes
/// per path. Exponential in the worst case, but road networks stay small.
pub fn longest_road_length(board: &Board, agent: AgentId) -> usize {
    let roads = board.agent_roads(agent);
    if roads.is_empty() {
        return 0;
    }
    let mut adjacency: HashMap<NodeId, SmallVec<[NodeId; 3]>> = HashMap::new();
    for (a, b) in roads {
        adjacency.entry(a).or_default().push(b);
        adjacency.entry(b).or_default().push(a);
    }
    let mut best = 0;
    let mut visited = HashSet::new();
    for &start in adjacency.keys() {
        best = best.max(longest_from(start, &adjacency, &mut visited));
        visited.clear();
    }
    best
}

fn longest_from(
    node: NodeId,
    adjacency: &HashMap<NodeId, SmallVec<[NodeId; 3]>>,
    visited: &mut HashSet<NodeId>,
) -> usize {
    visited.insert(node);
    let mut best = 0;
    if let Some(neighbors) = adjacency.get(&node) {
        for &next in neighbors {
            if !visited.contains(&next) {
                best = best.max(1 + longest_from(next, adjacency, visited));
            }
        }
    }
    visited.remove(&node);
    best
}

/// Emitted when the bonus moves; the named agents have already had their
/// victory points adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusTransfer {
    pub previous: Option<AgentId>,
    pub current: Option<AgentId>,
    pub length: usize,
}

/// Tracks which agent currently holds the longest-road bonus.
///
/// Run [`recompute`](Self::recompute) after every successful road placement.
/// A challenger must strictly exceed the holder's length; ties never
/// transfer the bonus. If nobody qualifies the bonus lapses to no one.
#[derive(Debug, Clone, Default)]
pub struct LongestRoadTracker {
    holder: Option<AgentId>,
    // per-agent (road count, longest length); roads only grow within a game,
    // so an unchanged count means an unchanged length
    cache: Vec<Option<(usize, usize)>>,
}

impl LongestRoadTracker {
    pub fn holder(&self) -> Option<AgentId> {
        self.holder
    }

    pub fn recompute(&mut self, board: &Board, agents: &mut [Agent]) -> Option<BonusTransfer> {
        if self.cache.len() != agents.len() {
            self.cache = vec![None; agents.len()];
        }
        let lengths: Vec<usize> = (0..agents.len())
            .map(|agent| {
                let roads = board.agent_roads(agent).len();
                match self.cache[agent] {
                    Some((cached_roads, length)) if cached_roads == roads => length,
                    _ => {
                        let length = longest_road_length(board, agent);
                        self.cache[agent] = Some((roads, length));
                        length
                    }
                }
            })
            .collect();

        let qualified_holder = self
            .holder
            .filter(|&holder| lengths[holder] >= BONUS_THRESHOLD);
        let mut best = qualified_holder;
        let mut best_len = qualified_holder.map_or(BONUS_THRESHOLD - 1, |holder| lengths[holder]);
        for (agent, &len) in lengths.iter().enumerate() {
            if Some(agent) != self.holder && len > best_len {
                best = Some(agent);
                best_len = len;
            }
        }

        if best == self.holder {
            return None;
        }
        let length = match best {
            Some(next) => lengths[next],
            None => lengths.iter().copied().max().unwrap_or(0),
        };
        if let Some(previous) = self.holder {
            agents[previous].add_victory_points(-BONUS_POINTS);
            info!("{} loses the longest-road bonus", agents[previous].name());
        }
        if let Some(next) = best {
            agents[next].add_victory_points(BONUS_POINTS);
            info!(
                "{} takes the longest-road bonus with {length} segments",
                agents[next].name()
            );
        }
        let transfer = BonusTransfer {
            previous: self.holder,
            current: best,
            length,
        };
        self.holder = best;
        Some(transfer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agents(n: usize) -> Vec<Agent> {
        (0..n).map(|i| Agent::new(format!("Agent_{i}"))).collect()
    }

    #[test]
    fn no_roads_means_length_zero() {
        let board = Board::standard();
        assert_eq!(longest_road_length(&board, 0), 0);
    }

    #[test]
    fn straight_path_counts_its_edges() {
        let mut board = Board::standard();
        // nodes 0..=6 form the top coast; build west to east
        for window in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)] {
            board.place_road(window, 0).unwrap();
        }
        assert_eq!(longest_road_length(&board, 0), 5);
    }

    #[test]
    fn branches_take_the_longer_arm() {
        let mut board = Board::standard();
        // fork at node 0: a two-edge arm east and a one-edge arm south
        board.place_road((0, 1), 0).unwrap();
        board.place_road((1, 2), 0).unwrap();
        board.place_road((0, 8), 0).unwrap();
        assert_eq!(longest_road_length(&board, 0), 3);
    }

    #[test]
    fn cycles_do_not_revisit_the_start() {
        let mut board = Board::standard();
        for edge in board.tile(0).unwrap().edges {
            board.place_road(edge, 0).unwrap();
        }
        // a simple path around a six-cycle stops before re-entering its start
        assert_eq!(longest_road_length(&board, 0), 5);
    }

    #[test]
    fn other_agents_roads_are_ignored() {
        let mut board = Board::standard();
        board.place_road((0, 1), 0).unwrap();
        board.place_road((1, 2), 1).unwrap();
        assert_eq!(longest_road_length(&board, 0), 1);
        assert_eq!(longest_road_length(&board, 1), 1);
    }

    #[test]
    fn bonus_awarded_only_at_threshold() {
        let mut board = Board::standard();
        let mut agents = agents(2);
        let mut tracker = LongestRoadTracker::default();

        for (i, edge) in [(0, 1), (1, 2), (2, 3), (3, 4)].into_iter().enumerate() {
            board.place_road(edge, 0).unwrap();
            assert_eq!(tracker.recompute(&board, &mut agents), None, "after {i}");
        }
        assert_eq!(tracker.holder(), None);
        assert_eq!(agents[0].victory_points(), 0);

        board.place_road((4, 5), 0).unwrap();
        let transfer = tracker.recompute(&board, &mut agents).unwrap();
        assert_eq!(transfer.previous, None);
        assert_eq!(transfer.current, Some(0));
        assert_eq!(transfer.length, 5);
        assert_eq!(tracker.holder(), Some(0));
        assert_eq!(agents[0].victory_points(), 2);
    }

    #[test]
    fn ties_never_take_the_bonus_from_the_holder() {
        let mut board = Board::standard();
        let mut agents = agents(2);
        let mut tracker = LongestRoadTracker::default();

        for edge in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)] {
            board.place_road(edge, 0).unwrap();
        }
        tracker.recompute(&board, &mut agents);
        assert_eq!(tracker.holder(), Some(0));

        // agent 1 matches the holder's five along the bottom coast
        for edge in [(47, 48), (48, 49), (49, 50), (50, 51), (51, 52)] {
            board.place_road(edge, 1).unwrap();
            assert_eq!(tracker.recompute(&board, &mut agents), None);
        }
        assert_eq!(tracker.holder(), Some(0));
        assert_eq!(agents[0].victory_points(), 2);
        assert_eq!(agents[1].victory_points(), 0);

        // a strictly longer path transfers the bonus
        board.place_road((52, 53), 1).unwrap();
        let transfer = tracker.recompute(&board, &mut agents).unwrap();
        assert_eq!(transfer.previous, Some(0));
        assert_eq!(transfer.current, Some(1));
        assert_eq!(transfer.length, 6);
        assert_eq!(agents[0].victory_points(), 0);
        assert_eq!(agents[1].victory_points(), 2);
    }

    #[test]
    fn recompute_without_new_roads_is_a_no_op() {
        let mut board = Board::standard();
        let mut agents = agents(2);
        let mut tracker = LongestRoadTracker::default();

        for edge in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)] {
            board.place_road(edge, 0).unwrap();
        }
        assert!(tracker.recompute(&board, &mut agents).is_some());
        for _ in 0..3 {
            assert_eq!(tracker.recompute(&board, &mut agents), None);
        }
        assert_eq!(tracker.holder(), Some(0));
        assert_eq!(agents[0].victory_points(), 2);
    }

    #[test]
    fn forfeiture_reports_the_remaining_best_length() {
        let mut board = Board::standard();
        let mut agents = agents(2);
        let mut tracker = LongestRoadTracker::default();

        for edge in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)] {
            board.place_road(edge, 0).unwrap();
        }
        tracker.recompute(&board, &mut agents);
        assert_eq!(tracker.holder(), Some(0));

        // on a board where nobody reaches the threshold the bonus lapses
        let mut shrunk = Board::standard();
        shrunk.place_road((0, 1), 0).unwrap();
        for edge in [(47, 48), (48, 49), (49, 50)] {
            shrunk.place_road(edge, 1).unwrap();
        }
        let transfer = tracker.recompute(&shrunk, &mut agents).unwrap();
        assert_eq!(transfer.previous, Some(0));
        assert_eq!(transfer.current, None);
        assert_eq!(transfer.length, 3);
        assert_eq!(tracker.holder(), None);
        assert_eq!(agents[0].victory_points(), 0);
        assert_eq!(agents[1].victory_points(), 0);
    }
}
