//! Depth-first spanning tree of a molecular graph.
//!
//! The tree mirrors the shape of the output string: a sequence of atoms
//! interleaved with nested branch sequences. Edges rediscovered toward an
//! already-visited atom become ring closures with sequential markers.

use petgraph::graph::NodeIndex;

use crate::error::SmilesWriteError;
use crate::mol::Molecule;

/// One position in the spanning tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(NodeIndex),
    Branch(Vec<Node>),
}

impl Node {
    /// The first atom rendered within this node. Branches always open with
    /// a leaf, so this only returns `None` for an empty branch.
    pub fn head(&self) -> Option<NodeIndex> {
        match self {
            Node::Leaf(a) => Some(*a),
            Node::Branch(seq) => seq.first().and_then(Node::head),
        }
    }
}

/// A DFS back edge paired with its ring-closure marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingClosure {
    pub a: NodeIndex,
    pub b: NodeIndex,
    pub marker: usize,
}

/// All ring closures discovered during one traversal.
#[derive(Debug, Clone, Default)]
pub struct ClosureTable {
    closures: Vec<RingClosure>,
}

impl ClosureTable {
    pub fn closures(&self) -> &[RingClosure] {
        &self.closures
    }

    /// Whether the unordered pair `(x, y)` is a recorded ring closure.
    pub fn contains_pair(&self, x: NodeIndex, y: NodeIndex) -> bool {
        self.closures
            .iter()
            .any(|c| (c.a == x && c.b == y) || (c.a == y && c.b == x))
    }

    /// Whether `atom` owns at least one ring-closure marker.
    pub fn has_any(&self, atom: NodeIndex) -> bool {
        self.closures.iter().any(|c| c.a == atom || c.b == atom)
    }

    /// Markers owned by `atom`, ascending.
    pub fn markers_for(&self, atom: NodeIndex) -> Vec<usize> {
        let mut markers: Vec<usize> = self
            .closures
            .iter()
            .filter(|c| c.a == atom || c.b == atom)
            .map(|c| c.marker)
            .collect();
        markers.sort_unstable();
        markers
    }

    pub fn count_for(&self, atom: NodeIndex) -> usize {
        self.closures
            .iter()
            .filter(|c| c.a == atom || c.b == atom)
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct SpanningTree {
    pub root: Vec<Node>,
    pub closures: ClosureTable,
}

/// Builds the spanning tree by DFS from the atom with canonical rank 1.
///
/// Neighbors are visited in ascending canonical rank. The last neighbor in
/// that order continues the current sequence; earlier unvisited neighbors
/// open nested branches. Rediscovering a visited neighbor (other than the
/// DFS parent) records a ring closure, unless the same unordered pair was
/// already recorded from the other side.
pub fn build(mol: &Molecule, ranks: &[usize]) -> Result<SpanningTree, SmilesWriteError> {
    let start = mol
        .atoms()
        .find(|a| ranks.get(a.index()).copied() == Some(1))
        .ok_or(SmilesWriteError::NoStartAtom)?;

    let mut visited = vec![false; mol.atom_count()];
    let mut closures = ClosureTable::default();
    let mut next_marker = 1usize;
    let mut root = Vec::new();
    dfs(
        mol,
        ranks,
        start,
        None,
        &mut root,
        &mut visited,
        &mut closures,
        &mut next_marker,
    );
    Ok(SpanningTree { root, closures })
}

#[allow(clippy::too_many_arguments)]
fn dfs(
    mol: &Molecule,
    ranks: &[usize],
    a: NodeIndex,
    parent: Option<NodeIndex>,
    seq: &mut Vec<Node>,
    visited: &mut [bool],
    closures: &mut ClosureTable,
    next_marker: &mut usize,
) {
    seq.push(Node::Leaf(a));
    visited[a.index()] = true;

    let mut neighbors: Vec<NodeIndex> = mol.neighbors(a).filter(|&n| Some(n) != parent).collect();
    neighbors.sort_by_key(|n| ranks.get(n.index()).copied().unwrap_or(usize::MAX));

    let count = neighbors.len();
    for (x, &next) in neighbors.iter().enumerate() {
        if !visited[next.index()] {
            if x == count - 1 {
                // last neighbor in canonical order continues this chain
                dfs(mol, ranks, next, Some(a), seq, visited, closures, next_marker);
            } else {
                let mut branch = Vec::new();
                dfs(
                    mol,
                    ranks,
                    next,
                    Some(a),
                    &mut branch,
                    visited,
                    closures,
                    next_marker,
                );
                seq.push(Node::Branch(branch));
            }
        } else if !closures.contains_pair(a, next) {
            closures.closures.push(RingClosure {
                a,
                b: next,
                marker: *next_marker,
            });
            *next_marker += 1;
        }
    }
}
