//! Placement-legality predicates, evaluated against the current board state.
//!
//! These are pure queries; they never mutate the board. The controller checks
//! them before any placement, so a board-level error after a passed check is
//! a caller bug.

use crate::board::{AgentId, Board, Building, EdgeId, NodeId, normalize_edge};

/// Distance rule: the node and all of its direct neighbors must be vacant,
/// keeping buildings at least two edge-steps apart.
pub fn can_place_settlement(board: &Board, node: NodeId) -> bool {
    if board.building_at(node).is_some() {
        return false;
    }
    let Ok(neighbors) = board.adjacent_nodes(node) else {
        return false;
    };
    neighbors
        .iter()
        .all(|neighbor| board.building_at(*neighbor).is_none())
}

/// Cities only replace a settlement the same agent already owns.
pub fn can_place_city(board: &Board, agent: AgentId, node: NodeId) -> bool {
    matches!(
        board.building_at(node),
        Some(Building::Settlement { owner }) if *owner == agent
    )
}

/// Road-connectivity rule: the edge must be vacant and one of its endpoints
/// must carry a building of the agent or touch another road of the agent.
pub fn can_place_road(board: &Board, agent: AgentId, edge: EdgeId) -> bool {
    let edge = normalize_edge(edge);
    if !board.contains_edge(edge) || board.road_at(edge).is_some() {
        return false;
    }
    [edge.0, edge.1].into_iter().any(|node| {
        if board
            .building_at(node)
            .is_some_and(|building| building.owner() == agent)
        {
            return true;
        }
        board.incident_edges(node).is_ok_and(|edges| {
            edges
                .iter()
                .any(|&other| board.road_at(other) == Some(agent))
        })
    })
}

/// All nodes where a settlement is currently legal, ascending.
pub fn legal_settlements(board: &Board) -> Vec<NodeId> {
    board
        .nodes()
        .filter(|&node| can_place_settlement(board, node))
        .collect()
}

/// All nodes the agent can upgrade to a city, ascending.
pub fn legal_cities(board: &Board, agent: AgentId) -> Vec<NodeId> {
    board
        .nodes()
        .filter(|&node| can_place_city(board, agent, node))
        .collect()
}

/// All edges where the agent can legally place a road, ascending.
pub fn legal_roads(board: &Board, agent: AgentId) -> Vec<EdgeId> {
    board
        .edges()
        .iter()
        .copied()
        .filter(|&edge| can_place_road(board, agent, edge))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_rule_blocks_node_and_neighbors() {
        let mut board = Board::standard();
        assert!(can_place_settlement(&board, 0));
        board.place_settlement(0, 0).unwrap();
        // the node itself and every neighbor are now illegal, for any agent
        assert!(!can_place_settlement(&board, 0));
        for &neighbor in board.adjacent_nodes(0).unwrap() {
            assert!(!can_place_settlement(&board, neighbor));
        }
        // two steps away is fine again
        assert!(can_place_settlement(&board, 2));
    }

    #[test]
    fn city_upgrade_requires_own_settlement() {
        let mut board = Board::standard();
        assert!(!can_place_city(&board, 0, 10));
        board.place_settlement(10, 0).unwrap();
        assert!(can_place_city(&board, 0, 10));
        assert!(!can_place_city(&board, 1, 10));
        board.place_city(10, 0).unwrap();
        // already a city
        assert!(!can_place_city(&board, 0, 10));
    }

    #[test]
    fn road_needs_a_connection() {
        let mut board = Board::standard();
        // nothing on the board: no road is legal anywhere
        assert!(legal_roads(&board, 0).is_empty());

        board.place_settlement(0, 0).unwrap();
        assert!(can_place_road(&board, 0, (0, 1)));
        assert!(!can_place_road(&board, 1, (0, 1)));
        // an edge not touching the settlement is still illegal
        assert!(!can_place_road(&board, 0, (1, 2)));

        // roads extend the network one edge at a time
        board.place_road((0, 1), 0).unwrap();
        assert!(can_place_road(&board, 0, (1, 2)));
        // an occupied edge is never legal
        assert!(!can_place_road(&board, 0, (0, 1)));
    }

    #[test]
    fn opposing_buildings_do_not_grant_connectivity() {
        let mut board = Board::standard();
        board.place_settlement(2, 1).unwrap();
        board.place_road((1, 2), 1).unwrap();
        // agent 0 has nothing at either endpoint of (0, 1)
        assert!(!can_place_road(&board, 0, (0, 1)));
        // agent 1 reaches it through their own road at node 1
        assert!(can_place_road(&board, 1, (0, 1)));
    }

    #[test]
    fn enumerations_are_sorted_ascending() {
        let mut board = Board::standard();
        board.place_settlement(20, 0).unwrap();
        board.place_road((19, 20), 0).unwrap();
        let roads = legal_roads(&board, 0);
        assert!(!roads.is_empty());
        assert!(roads.windows(2).all(|w| w[0] < w[1]));
        let settlements = legal_settlements(&board);
        assert!(settlements.windows(2).all(|w| w[0] < w[1]));
    }
}
