//! Resource production for a dice roll.

use log::debug;

use crate::board::Board;
use crate::game::agent::Agent;

/// Credits every agent with a building adjacent to a producing tile.
///
/// Tiles are visited in ascending id order and each tile's bounding nodes in
/// ascending id order, so a trace of production events is reproducible. The
/// desert never produces. A settlement earns one unit, a city two.
pub fn distribute(board: &Board, agents: &mut [Agent], roll: u8) {
    for tile in board.tiles() {
        if tile.number != Some(roll) {
            continue;
        }
        let Some(resource) = tile.resource else {
            continue;
        };
        let mut nodes = board.nodes_of_tile(tile);
        nodes.sort_unstable();
        for node in nodes {
            if let Some(building) = board.building_at(node) {
                let amount = building.multiplier();
                let owner = building.owner();
                agents[owner].add_resource(resource, amount);
                debug!(
                    "tile {} pays {}x{} to {}",
                    tile.id,
                    amount,
                    resource,
                    agents[owner].name()
                );
            }
        }
    }
}
