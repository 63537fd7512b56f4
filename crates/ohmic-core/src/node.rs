//! Node identifiers and the name-to-id index for circuit graphs.

use std::collections::HashMap;
use std::fmt;

/// Unique identifier for a node in the circuit.
///
/// Ids are dense: ground is always 0 and every new node takes the next
/// integer. The MNA matrix variable for a non-ground node is `id - 1`;
/// ground has no matrix variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The ground node (node 0).
    pub const GROUND: NodeId = NodeId(0);

    /// Create a new NodeId from a raw value.
    pub fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// Get the raw node ID value.
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Check if this is the ground node.
    pub fn is_ground(self) -> bool {
        self.0 == 0
    }

    /// MNA matrix index for this node (`None` for ground).
    pub fn matrix_index(self) -> Option<usize> {
        if self.is_ground() {
            None
        } else {
            Some((self.0 - 1) as usize)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Case-insensitive mapping from node names to dense ids.
///
/// SPICE node names are case-insensitive, so lookups go through an
/// uppercased key. The display name keeps the first casing observed, which
/// is what result tables and `.PRINT` output use. Ground is pre-registered
/// under both `0` and `GND` and displays as `"0"`.
#[derive(Debug, Clone)]
pub struct NodeIndex {
    /// Display names in id order; `names[0]` is ground.
    names: Vec<String>,
    /// Uppercased name -> id.
    ids: HashMap<String, NodeId>,
}

impl NodeIndex {
    /// Create an index containing only the ground node.
    pub fn new() -> Self {
        let mut ids = HashMap::new();
        ids.insert("0".to_string(), NodeId::GROUND);
        ids.insert("GND".to_string(), NodeId::GROUND);
        Self {
            names: vec!["0".to_string()],
            ids,
        }
    }

    /// Look up or create the node with the given name.
    ///
    /// Idempotent: repeated calls with any casing of the same name return
    /// the same id.
    pub fn intern(&mut self, name: &str) -> NodeId {
        let key = name.to_uppercase();
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = NodeId::new(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(key, id);
        id
    }

    /// Look up a node without creating it.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.ids.get(&name.to_uppercase()).copied()
    }

    /// Display name for a node id.
    pub fn display_name(&self, id: NodeId) -> &str {
        &self.names[id.0 as usize]
    }

    /// Total number of nodes, ground included.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of MNA voltage unknowns (non-ground nodes).
    pub fn num_unknowns(&self) -> usize {
        self.names.len() - 1
    }

    /// Iterate over non-ground nodes as (id, display name), in id order.
    pub fn non_ground(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.names
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, name)| (NodeId::new(i as u32), name.as_str()))
    }
}

impl Default for NodeIndex {
    fn default() -> Self {
        Self::new()
    }
}
