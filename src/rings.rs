//! Externally supplied ring data and the aromatic-atom adapter.
//!
//! Ring perception (SSSR) and aromaticity classification both live outside
//! this crate. The types here only adapt their results into the point
//! queries the serializer needs: "which rings contain this atom" and "is
//! this atom in any aromatic ring".

use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use crate::mol::Molecule;

/// The smallest set of smallest rings of a molecule, supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct RingSet {
    rings: Vec<Vec<NodeIndex>>,
}

impl RingSet {
    pub fn new(rings: Vec<Vec<NodeIndex>>) -> Self {
        Self { rings }
    }

    /// An empty ring set, for acyclic molecules.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rings(&self) -> &[Vec<NodeIndex>] {
        &self.rings
    }

    pub fn rings_containing(&self, atom: NodeIndex) -> impl Iterator<Item = &Vec<NodeIndex>> {
        self.rings.iter().filter(move |ring| ring.contains(&atom))
    }
}

/// External oracle that decides whether one supplied ring is aromatic.
pub trait AromaticityModel {
    fn ring_is_aromatic(&self, mol: &Molecule, ring: &[NodeIndex]) -> bool;
}

impl<F> AromaticityModel for F
where
    F: Fn(&Molecule, &[NodeIndex]) -> bool,
{
    fn ring_is_aromatic(&self, mol: &Molecule, ring: &[NodeIndex]) -> bool {
        self(mol, ring)
    }
}

/// Set of atoms that belong to at least one aromatic ring.
///
/// Built once per generator from the ring set and the oracle; consulted to
/// choose lowercase symbols and to suppress bond tokens between two
/// aromatic atoms.
#[derive(Debug, Clone, Default)]
pub struct AromaticAtoms {
    atoms: HashSet<NodeIndex>,
}

impl AromaticAtoms {
    pub fn classify(mol: &Molecule, rings: &RingSet, model: &dyn AromaticityModel) -> Self {
        let mut atoms = HashSet::new();
        for ring in rings.rings() {
            if model.ring_is_aromatic(mol, ring) {
                atoms.extend(ring.iter().copied());
            }
        }
        Self { atoms }
    }

    pub fn contains(&self, atom: NodeIndex) -> bool {
        self.atoms.contains(&atom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::{Bond, BondOrder};
    use crate::element::Element;

    fn ring_of_carbons(n: usize) -> (Molecule, Vec<NodeIndex>) {
        let mut mol = Molecule::new();
        let atoms: Vec<NodeIndex> = (0..n).map(|_| mol.add_atom(Atom::new(Element::C))).collect();
        for i in 0..n {
            mol.add_bond(atoms[i], atoms[(i + 1) % n], Bond::new(BondOrder::Single));
        }
        (mol, atoms)
    }

    #[test]
    fn classify_marks_only_oracle_true_rings() {
        let (mol, atoms) = ring_of_carbons(6);
        let rings = RingSet::new(vec![atoms.clone()]);

        let all = AromaticAtoms::classify(&mol, &rings, &|_: &Molecule, _: &[NodeIndex]| true);
        assert!(atoms.iter().all(|&a| all.contains(a)));

        let none = AromaticAtoms::classify(&mol, &rings, &|_: &Molecule, _: &[NodeIndex]| false);
        assert!(atoms.iter().all(|&a| !none.contains(a)));
    }

    #[test]
    fn rings_containing_filters_by_membership() {
        let (mut mol, atoms) = ring_of_carbons(4);
        let lone = mol.add_atom(Atom::new(Element::O));
        let rings = RingSet::new(vec![atoms.clone()]);

        assert_eq!(rings.rings_containing(atoms[0]).count(), 1);
        assert_eq!(rings.rings_containing(lone).count(), 0);
    }
}
