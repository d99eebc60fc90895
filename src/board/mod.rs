use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::types::Resource;

mod layout;

pub use layout::{MapLayout, NODE_COUNT, TILE_COUNT};

pub type NodeId = u16;
/// Unordered node pair; always stored with the smaller id first.
pub type EdgeId = (NodeId, NodeId);
/// Index into the controller's agent table.
pub type AgentId = usize;

pub fn normalize_edge(edge: EdgeId) -> EdgeId {
    if edge.0 <= edge.1 { edge } else { (edge.1, edge.0) }
}

pub fn edge_contains_node(edge: EdgeId, node: NodeId) -> bool {
    edge.0 == node || edge.1 == node
}

/// A hex cell. The six edges are listed in corner-traversal order and form a
/// closed cycle; the bounding nodes are derived from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: u16,
    pub resource: Option<Resource>,
    pub number: Option<u8>,
    pub edges: [EdgeId; 6],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Building {
    Settlement { owner: AgentId },
    City { owner: AgentId },
}

impl Building {
    pub fn owner(&self) -> AgentId {
        match self {
            Building::Settlement { owner } | Building::City { owner } => *owner,
        }
    }

    /// Resource units credited per distribution event.
    pub fn multiplier(&self) -> u8 {
        match self {
            Building::Settlement { .. } => 1,
            Building::City { .. } => 2,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("tile id {0} out of range")]
    TileOutOfRange(u16),
    #[error("node id {0} out of range")]
    NodeOutOfRange(NodeId),
    #[error("edge {0:?} is not on the board")]
    EdgeOutOfRange(EdgeId),
    #[error("node {0} already holds a building")]
    NodeOccupied(NodeId),
    #[error("edge {0:?} already holds a road")]
    EdgeOccupied(EdgeId),
    #[error("node {node} holds no settlement owned by agent {agent}")]
    InvalidUpgrade { node: NodeId, agent: AgentId },
}

/// Topology plus mutable occupancy. The topology is immutable once built;
/// occupancy maps hold at most one entry per node/edge.
///
/// The board enforces only its own invariants (single occupant, valid ids,
/// the city-upgrade precondition). Game legality lives in
/// [`rules`](crate::game::rules) and must be checked by callers first.
#[derive(Debug, Clone)]
pub struct Board {
    tiles: Vec<Tile>,
    num_nodes: NodeId,
    edges: Vec<EdgeId>,
    edge_set: HashSet<EdgeId>,
    node_edges: HashMap<NodeId, SmallVec<[EdgeId; 3]>>,
    node_neighbors: HashMap<NodeId, SmallVec<[NodeId; 3]>>,
    node_occupancy: HashMap<NodeId, Building>,
    road_occupancy: HashMap<EdgeId, AgentId>,
}

impl Board {
    pub fn standard() -> Self {
        Self::from_layout(MapLayout::standard())
    }

    pub fn from_layout(layout: &MapLayout) -> Self {
        let mut edge_set: HashSet<EdgeId> = HashSet::new();
        let mut tiles = Vec::with_capacity(layout.tile_nodes.len());
        for (id, ring) in layout.tile_nodes.iter().enumerate() {
            let mut edges = [(0, 0); 6];
            for (i, slot) in edges.iter_mut().enumerate() {
                let edge = normalize_edge((ring[i], ring[(i + 1) % 6]));
                edge_set.insert(edge);
                *slot = edge;
            }
            tiles.push(Tile {
                id: id as u16,
                resource: layout.resources[id],
                number: layout.numbers[id],
                edges,
            });
        }

        let edges: Vec<EdgeId> = edge_set.iter().copied().sorted().collect();
        let mut node_edges: HashMap<NodeId, SmallVec<[EdgeId; 3]>> = HashMap::new();
        let mut node_neighbors: HashMap<NodeId, SmallVec<[NodeId; 3]>> = HashMap::new();
        let mut num_nodes = 0;
        for &edge in &edges {
            let (a, b) = edge;
            node_edges.entry(a).or_default().push(edge);
            node_edges.entry(b).or_default().push(edge);
            node_neighbors.entry(a).or_default().push(b);
            node_neighbors.entry(b).or_default().push(a);
            num_nodes = num_nodes.max(b + 1);
        }

        Self {
            tiles,
            num_nodes,
            edges,
            edge_set,
            node_edges,
            node_neighbors,
            node_occupancy: HashMap::new(),
            road_occupancy: HashMap::new(),
        }
    }

    pub fn tile(&self, id: u16) -> Result<&Tile, BoardError> {
        self.tiles
            .get(id as usize)
            .ok_or(BoardError::TileOutOfRange(id))
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn node_count(&self) -> NodeId {
        self.num_nodes
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + use<> {
        0..self.num_nodes
    }

    /// All unique edges, ascending by node pair.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edge_set.contains(&normalize_edge(edge))
    }

    fn check_node(&self, node: NodeId) -> Result<(), BoardError> {
        if node < self.num_nodes {
            Ok(())
        } else {
            Err(BoardError::NodeOutOfRange(node))
        }
    }

    /// Edges incident to a node (two on the coast, three inland).
    pub fn incident_edges(&self, node: NodeId) -> Result<&[EdgeId], BoardError> {
        self.check_node(node)?;
        Ok(self
            .node_edges
            .get(&node)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[]))
    }

    /// The other endpoint of each incident edge.
    pub fn adjacent_nodes(&self, node: NodeId) -> Result<&[NodeId], BoardError> {
        self.check_node(node)?;
        Ok(self
            .node_neighbors
            .get(&node)
            .map(|nodes| nodes.as_slice())
            .unwrap_or(&[]))
    }

    /// Bounding nodes of a tile: walk the six edges in traversal order and
    /// emit each endpoint the first time it appears.
    pub fn nodes_of_tile(&self, tile: &Tile) -> [NodeId; 6] {
        let mut nodes = [0; 6];
        let mut emitted = 0;
        for edge in &tile.edges {
            for endpoint in [edge.0, edge.1] {
                if !nodes[..emitted].contains(&endpoint) {
                    nodes[emitted] = endpoint;
                    emitted += 1;
                }
            }
        }
        debug_assert_eq!(emitted, 6, "tile edges must form a closed hex cycle");
        nodes
    }

    pub fn building_at(&self, node: NodeId) -> Option<&Building> {
        self.node_occupancy.get(&node)
    }

    pub fn road_at(&self, edge: EdgeId) -> Option<AgentId> {
        self.road_occupancy.get(&normalize_edge(edge)).copied()
    }

    /// Records a settlement. Enforces the single-occupant invariant only;
    /// the distance rule is the caller's responsibility.
    pub fn place_settlement(&mut self, node: NodeId, owner: AgentId) -> Result<(), BoardError> {
        self.check_node(node)?;
        if self.node_occupancy.contains_key(&node) {
            return Err(BoardError::NodeOccupied(node));
        }
        self.node_occupancy
            .insert(node, Building::Settlement { owner });
        Ok(())
    }

    /// Replaces the owner's settlement at `node` with a city.
    pub fn place_city(&mut self, node: NodeId, owner: AgentId) -> Result<(), BoardError> {
        self.check_node(node)?;
        match self.node_occupancy.get(&node) {
            Some(Building::Settlement { owner: existing }) if *existing == owner => {
                self.node_occupancy.insert(node, Building::City { owner });
                Ok(())
            }
            _ => Err(BoardError::InvalidUpgrade { node, agent: owner }),
        }
    }

    pub fn place_road(&mut self, edge: EdgeId, owner: AgentId) -> Result<(), BoardError> {
        let edge = normalize_edge(edge);
        if !self.edge_set.contains(&edge) {
            return Err(BoardError::EdgeOutOfRange(edge));
        }
        if self.road_occupancy.contains_key(&edge) {
            return Err(BoardError::EdgeOccupied(edge));
        }
        self.road_occupancy.insert(edge, owner);
        Ok(())
    }

    /// Edges carrying a road owned by `agent`, ascending by node pair.
    pub fn agent_roads(&self, agent: AgentId) -> Vec<EdgeId> {
        self.edges
            .iter()
            .copied()
            .filter(|edge| self.road_occupancy.get(edge) == Some(&agent))
            .collect()
    }
}
