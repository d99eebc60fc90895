//! Static layout of the standard 19-tile map.
//!
//! The board is five rows of hexes (3-4-5-4-3) bounded by six zigzag rows of
//! intersections (7-9-11-11-9-7, 54 in total). Node ids run row-major, top to
//! bottom, left to right. Each hex lists its six corner nodes clockwise from
//! the top-left corner; edges are derived from consecutive corners.

use once_cell::sync::Lazy;

use crate::board::NodeId;
use crate::types::Resource;

pub const TILE_COUNT: usize = 19;
pub const NODE_COUNT: usize = 54;

const HEX_ROW_SIZES: [u16; 5] = [3, 4, 5, 4, 3];
const NODE_ROW_SIZES: [u16; 6] = [7, 9, 11, 11, 9, 7];

/// Fixed tables handed to [`Board::from_layout`](crate::board::Board::from_layout).
///
/// `resources[i] == None` marks the desert; its production number is `None`.
#[derive(Debug, Clone)]
pub struct MapLayout {
    pub tile_nodes: [[NodeId; 6]; TILE_COUNT],
    pub resources: [Option<Resource>; TILE_COUNT],
    pub numbers: [Option<u8>; TILE_COUNT],
    /// Pairwise non-adjacent nodes used for the agents' starting settlements.
    pub starting_nodes: [NodeId; 4],
}

impl MapLayout {
    pub fn standard() -> &'static MapLayout {
        &STANDARD_LAYOUT
    }
}

static STANDARD_LAYOUT: Lazy<MapLayout> = Lazy::new(|| {
    use Resource::*;
    MapLayout {
        tile_nodes: standard_tile_nodes(),
        resources: [
            Some(Lumber),
            Some(Wheat),
            Some(Brick),
            Some(Ore),
            Some(Wool),
            Some(Wool),
            Some(Wool),
            Some(Wheat),
            Some(Ore),
            None,
            Some(Ore),
            Some(Wheat),
            Some(Lumber),
            Some(Brick),
            Some(Brick),
            Some(Wheat),
            Some(Lumber),
            Some(Lumber),
            Some(Wool),
        ],
        numbers: [
            Some(10),
            Some(11),
            Some(8),
            Some(6),
            Some(4),
            Some(5),
            Some(12),
            Some(3),
            Some(6),
            None,
            Some(3),
            Some(9),
            Some(5),
            Some(9),
            Some(8),
            Some(4),
            Some(4),
            Some(2),
            Some(10),
        ],
        starting_nodes: [0, 16, 26, 53],
    }
});

/// Corner nodes per tile, row-major. A hex in row `r` spans node rows `r`
/// (its top three corners) and `r + 1` (its bottom three); a node row one
/// wider than twice the hex row is entered with an offset of one.
fn standard_tile_nodes() -> [[NodeId; 6]; TILE_COUNT] {
    let mut row_starts = [0u16; 6];
    for r in 1..6 {
        row_starts[r] = row_starts[r - 1] + NODE_ROW_SIZES[r - 1];
    }

    let mut tiles = [[0; 6]; TILE_COUNT];
    let mut tile = 0;
    for (r, &width) in HEX_ROW_SIZES.iter().enumerate() {
        let top_offset = (NODE_ROW_SIZES[r] - (2 * width + 1)) / 2;
        let bottom_offset = (NODE_ROW_SIZES[r + 1] - (2 * width + 1)) / 2;
        for c in 0..width {
            let top = row_starts[r] + 2 * c + top_offset;
            let bottom = row_starts[r + 1] + 2 * c + bottom_offset;
            // clockwise: top-left, top, top-right, bottom-right, bottom, bottom-left
            tiles[tile] = [top, top + 1, top + 2, bottom + 2, bottom + 1, bottom];
            tile += 1;
        }
    }
    tiles
}
