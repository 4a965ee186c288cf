use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::atom::Atom;
use crate::bond::Bond;

/// A molecular graph: atoms as vertices, bonds as undirected edges.
///
/// The graph is owned by the caller and treated as read-only by the
/// serializer. Atom identity is the `NodeIndex`; all per-call scratch state
/// is kept outside this structure.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    graph: UnGraph<Atom, Bond>,
}

impl Molecule {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    pub fn atom(&self, idx: NodeIndex) -> &Atom {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut Atom {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &Bond {
        &self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: Atom) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: Bond) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    /// Number of bonds incident to `idx` (explicit neighbors only).
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges(idx).count()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<&Bond> {
        self.graph.find_edge(a, b).map(|e| &self.graph[e])
    }

    /// Explicit degree plus implicit hydrogens: the substituent count the
    /// double-bond configuration tests operate on.
    pub fn substituent_count(&self, idx: NodeIndex) -> usize {
        self.degree(idx) + usize::from(self.atom(idx).implicit_hydrogens)
    }

    /// Neighbor shared by `a` and `b`, if any.
    pub fn common_neighbor(&self, a: NodeIndex, b: NodeIndex) -> Option<NodeIndex> {
        self.neighbors(a).find(|&n| self.bond_between(n, b).is_some())
    }
}
