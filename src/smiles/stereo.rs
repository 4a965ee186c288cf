//! Stereochemistry resolution over the spanning tree.
//!
//! Wedge and hatch annotations on bonds, together with depicted 2-D
//! coordinates, are turned into `@` / `@SP1` atom tags plus a reordering of
//! each stereocenter's substituents in the tree. The resolver owns its tree
//! mutably; rendering afterwards is read-only. An atom whose required order
//! cannot be reconciled with the tree degrades silently: no tag, no
//! reordering, no forced brackets.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::bond::{BondOrder, BondStereo};
use crate::element::Element;
use crate::mol::Molecule;
use crate::rings::RingSet;

use super::geometry::{give_angle, give_angle_from_middle, is_left};
use super::tree::{ClosureTable, Node};

/// Stereo suffix attached to an atom token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StereoTag {
    /// Anticlockwise tetrahedral (also used for trigonal-bipyramidal and
    /// octahedral centers).
    At,
    /// Square-planar, substituents in sweep order.
    AtSp1,
}

pub(crate) struct Resolver<'a> {
    mol: &'a Molecule,
    invariants: &'a [usize],
    rings: &'a RingSet,
    closures: &'a ClosureTable,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(
        mol: &'a Molecule,
        invariants: &'a [usize],
        rings: &'a RingSet,
        closures: &'a ClosureTable,
    ) -> Self {
        Self {
            mol,
            invariants,
            rings,
            closures,
        }
    }

    /// Walks the tree, reorders substituents of every resolvable stereocenter
    /// in place, and returns the tags to attach during rendering.
    pub(crate) fn annotate(&self, root: &mut Vec<Node>) -> HashMap<NodeIndex, StereoTag> {
        let mut tags = HashMap::new();
        self.annotate_sequence(root, None, &mut tags);
        tags
    }

    fn annotate_sequence(
        &self,
        seq: &mut Vec<Node>,
        mut parent: Option<NodeIndex>,
        tags: &mut HashMap<NodeIndex, StereoTag>,
    ) {
        let mut h = 0;
        while h < seq.len() {
            let leaf = match seq[h] {
                Node::Leaf(a) => Some(a),
                Node::Branch(_) => None,
            };
            if let Some(a) = leaf {
                if let Some(p) = parent {
                    if self.is_stereo_center(a) {
                        if let Some(tag) = self.resolve(seq, h, a, p) {
                            tags.insert(a, tag);
                        }
                    }
                }
                parent = Some(a);
            } else if let Node::Branch(inner) = &mut seq[h] {
                self.annotate_sequence(inner, parent, tags);
            }
            h += 1;
        }
    }

    fn stereo(&self, a: NodeIndex, b: NodeIndex) -> BondStereo {
        self.mol
            .bond_between(a, b)
            .map(|bond| bond.stereo)
            .unwrap_or(BondStereo::None)
    }

    fn broken(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.closures.contains_pair(a, b)
    }

    fn pos(&self, a: NodeIndex) -> Option<[f64; 2]> {
        self.mol.atom(a).position
    }

    fn left(&self, where_is: NodeIndex, from: NodeIndex, to: NodeIndex) -> Option<bool> {
        Some(is_left(
            self.pos(where_is)?,
            self.pos(from)?,
            self.pos(to)?,
        ))
    }

    fn stereo_counts(&self, a: NodeIndex) -> (usize, usize) {
        let mut up = 0;
        let mut down = 0;
        for e in self.mol.bonds_of(a) {
            match self.mol.bond(e).stereo {
                BondStereo::Up => up += 1,
                BondStereo::Down => down += 1,
                _ => {}
            }
        }
        (up, down)
    }

    /// Tetrahedral wedge pattern class, or 0 when the atom is not a
    /// recognizable tetrahedral center.
    fn tetrahedral_class(&self, a: NodeIndex) -> u8 {
        if self.mol.degree(a) != 4 {
            return 0;
        }
        let (up, down) = self.stereo_counts(a);
        if up == 1 && down == 1 {
            return 1;
        }
        if up == 2 && down == 2 {
            return if self.stereos_are_opposite(a) { 2 } else { 0 };
        }
        if up == 1 && down == 0 {
            return 3;
        }
        if down == 1 && up == 0 {
            return 4;
        }
        0
    }

    /// Two wedges and two hatches that do not alternate around the center
    /// describe a square-planar arrangement.
    fn is_square_planar(&self, a: NodeIndex) -> bool {
        if self.mol.degree(a) != 4 {
            return false;
        }
        let (up, down) = self.stereo_counts(a);
        up == 2 && down == 2 && !self.stereos_are_opposite(a)
    }

    fn is_trigonal_bipyramidal_or_octahedral(&self, a: NodeIndex) -> bool {
        let degree = self.mol.degree(a);
        if !(5..=6).contains(&degree) {
            return false;
        }
        let (up, down) = self.stereo_counts(a);
        up == 1 && down == 1
    }

    /// Whether the substituent diagonally opposite the first neighbor (by
    /// angular sweep) carries the same wedge direction as that neighbor.
    fn stereos_are_opposite(&self, a: NodeIndex) -> bool {
        let neighbors: Vec<NodeIndex> = self.mol.neighbors(a).collect();
        let first = neighbors[0];
        let (Some(pa), Some(p0)) = (self.pos(a), self.pos(first)) else {
            return false;
        };
        let mut by_angle: Vec<(f64, NodeIndex)> = Vec::new();
        for &n in &neighbors[1..] {
            let Some(pn) = self.pos(n) else {
                return false;
            };
            by_angle.push((give_angle(pa, p0, pn), n));
        }
        by_angle.sort_by(|x, y| x.0.total_cmp(&y.0));
        if by_angle.len() < 2 {
            return false;
        }
        let opposite = by_angle[1].1;
        self.stereo(a, first) == self.stereo(a, opposite)
    }

    /// Whether `a` carries stereo information worth emitting: enough
    /// substituents, at least one marked bond, and substituents that can be
    /// told apart by element or by graph invariant.
    fn is_stereo_center(&self, a: NodeIndex) -> bool {
        let neighbors: Vec<NodeIndex> = self.mol.neighbors(a).collect();
        if !(4..=6).contains(&neighbors.len()) {
            return false;
        }
        let marked = self
            .mol
            .bonds_of(a)
            .filter(|&e| self.mol.bond(e).stereo != BondStereo::None)
            .count();
        if marked == 0 {
            return false;
        }

        let mut different_atoms = 0usize;
        for (i, &ni) in neighbors.iter().enumerate() {
            let symbol = self.mol.atom(ni).element;
            if neighbors[..i]
                .iter()
                .all(|&nk| self.mol.atom(nk).element != symbol)
            {
                different_atoms += 1;
            }
        }
        if different_atoms == neighbors.len() {
            return true;
        }

        // symbol collisions; fall back to graph invariants per symbol
        let mut symbols: Vec<Element> = Vec::new();
        for &n in &neighbors {
            let e = self.mol.atom(n).element;
            if !symbols.contains(&e) {
                symbols.push(e);
            }
        }
        let mut distinct = symbols.len() as isize;
        for &symbol in &symbols {
            let mut first: Option<usize> = None;
            for &n in &neighbors {
                if self.mol.atom(n).element != symbol {
                    continue;
                }
                let inv = self.invariants.get(n.index()).copied().unwrap_or(0);
                match first {
                    None => first = Some(inv),
                    Some(f) if inv == f => distinct -= 1,
                    Some(_) => {}
                }
            }
        }
        if distinct != symbols.len() as isize {
            // cis/trans across a ring fusion still matters even when the
            // invariants collide
            if marked == 1 && neighbors.len() == 4 {
                for &n in &neighbors {
                    let shared = self
                        .rings
                        .rings_containing(a)
                        .filter(|ring| ring.contains(&n))
                        .count();
                    if shared > 1 {
                        return true;
                    }
                }
            }
            if (neighbors.len() == 5 || neighbors.len() == 6)
                && distinct + different_atoms as isize > 1
            {
                return true;
            }
            return false;
        }
        true
    }

    /// Resolves one stereocenter: computes the required substituent order,
    /// matches it against the tree positions following `pos`, rewrites those
    /// positions, and returns the tag. `None` means degrade.
    fn resolve(
        &self,
        seq: &mut Vec<Node>,
        pos: usize,
        a: NodeIndex,
        parent: NodeIndex,
    ) -> Option<StereoTag> {
        let neighbors: Vec<NodeIndex> = self.mol.neighbors(a).collect();
        let tetrahedral = self.tetrahedral_class(a);
        let square_planar = self.is_square_planar(a);
        let tbo = self.is_trigonal_bipyramidal_or_octahedral(a);

        let sorted = if tetrahedral > 0 {
            self.tetrahedral_order(tetrahedral, a, parent, &neighbors)?
        } else if square_planar {
            self.square_planar_order(a, parent, &neighbors)?
        } else if tbo {
            self.tbo_order(a, parent, &neighbors)?
        } else {
            return None;
        };

        let n_atoms = if tbo { neighbors.len() - 1 } else { 3 };
        let ring_opens = self.closures.count_for(a);

        // tree positions after the center that the required order governs;
        // ring-closure digits consume the leading required slots
        let mut slots: Vec<usize> = Vec::new();
        for k in ring_opens..n_atoms {
            let idx = pos + 1 + k - ring_opens;
            if idx < seq.len() {
                slots.push(idx);
            }
        }

        // match each required substituent to the tree position it heads
        let mut onew: Vec<Option<usize>> = vec![None; n_atoms];
        for (k, want) in sorted.iter().enumerate() {
            let Some(want) = *want else { continue };
            onew[k] = slots
                .iter()
                .copied()
                .find(|&s| seq[s].head() == Some(want));
        }

        if tetrahedral > 0 {
            // the final required position must be a plain atom, not a branch
            let mut turns = 0;
            while !onew[n_atoms - 1].is_some_and(|s| matches!(seq[s], Node::Leaf(_))) {
                onew.rotate_right(1);
                turns += 1;
                if turns > n_atoms {
                    break;
                }
            }
            if !onew[n_atoms - 1].is_some_and(|s| matches!(seq[s], Node::Leaf(_))) {
                return None;
            }
            // ring digits sit right after the center, so the slots they
            // occupy must stay unmatched at the front
            if self.closures.has_any(parent) {
                let mut turns = 0;
                while onew[0].is_some() {
                    onew.rotate_right(1);
                    turns += 1;
                    if turns > n_atoms {
                        break;
                    }
                }
            }
        }

        let picked: Vec<usize> = onew.iter().flatten().copied().collect();
        let mut check = picked.clone();
        check.sort_unstable();
        check.dedup();
        if check.len() != slots.len() || picked.len() != slots.len() {
            return None;
        }

        let reordered: Vec<Node> = picked.iter().map(|&s| seq[s].clone()).collect();
        for (i, node) in reordered.into_iter().enumerate() {
            seq[slots[i]] = node;
        }

        Some(if square_planar {
            StereoTag::AtSp1
        } else {
            StereoTag::At
        })
    }

    /// Non-parent, non-closure substituents of `a` sorted by sweep angle
    /// from the parent direction.
    fn sweep_by_angle(
        &self,
        a: NodeIndex,
        parent: NodeIndex,
        neighbors: &[NodeIndex],
    ) -> Option<Vec<NodeIndex>> {
        let pa = self.pos(a)?;
        let pp = self.pos(parent)?;
        let mut swept: Vec<(f64, NodeIndex)> = Vec::new();
        for &n in neighbors {
            if n == parent || self.broken(a, n) {
                continue;
            }
            swept.push((give_angle(pa, pp, self.pos(n)?), n));
        }
        swept.sort_by(|x, y| x.0.total_cmp(&y.0));
        Some(swept.into_iter().map(|(_, n)| n).collect())
    }

    /// Required order of the three substituents after a tetrahedral center,
    /// by wedge class and the stereo of the bond from the parent.
    fn tetrahedral_order(
        &self,
        class: u8,
        a: NodeIndex,
        parent: NodeIndex,
        neighbors: &[NodeIndex],
    ) -> Option<Vec<Option<NodeIndex>>> {
        let mut sorted: Vec<Option<NodeIndex>> = vec![None; 3];
        let parent_stereo = self.stereo(a, parent);
        match class {
            1 => match parent_stereo {
                BondStereo::Down => {
                    for &n in neighbors {
                        if n == parent {
                            continue;
                        }
                        let stereo = self.stereo(a, n);
                        let broken = self.broken(a, n);
                        if stereo == BondStereo::None && !broken {
                            if self.left(n, parent, a)? {
                                sorted[0] = Some(n);
                            } else {
                                sorted[2] = Some(n);
                            }
                        }
                        if stereo == BondStereo::Up && !broken {
                            sorted[1] = Some(n);
                        }
                    }
                }
                BondStereo::Up => {
                    for &n in neighbors {
                        if n == parent {
                            continue;
                        }
                        let stereo = self.stereo(a, n);
                        let broken = self.broken(a, n);
                        if stereo == BondStereo::None && !broken {
                            if self.left(n, parent, a)? {
                                sorted[2] = Some(n);
                            } else {
                                sorted[1] = Some(n);
                            }
                        }
                        if stereo == BondStereo::Down && !broken {
                            sorted[0] = Some(n);
                        }
                    }
                }
                BondStereo::None | BondStereo::Undefined => {
                    // side of the plain substituent decides the direction of
                    // the sweep
                    let mut plain_is_left = false;
                    for &n in neighbors {
                        if n != parent
                            && self.stereo(a, n) == BondStereo::None
                            && self.left(n, parent, a)?
                        {
                            plain_is_left = true;
                            break;
                        }
                    }
                    for &n in neighbors {
                        if n == parent {
                            continue;
                        }
                        match (plain_is_left, self.stereo(a, n)) {
                            (true, BondStereo::None) => sorted[0] = Some(n),
                            (true, BondStereo::Up) => sorted[2] = Some(n),
                            (true, BondStereo::Down) => sorted[1] = Some(n),
                            (false, BondStereo::Up) => sorted[1] = Some(n),
                            (false, BondStereo::None) => sorted[0] = Some(n),
                            (false, BondStereo::Down) => sorted[2] = Some(n),
                            _ => {}
                        }
                    }
                }
            },
            2 => match parent_stereo {
                BondStereo::Up => {
                    for &n in neighbors {
                        if n == parent {
                            continue;
                        }
                        let stereo = self.stereo(a, n);
                        let broken = self.broken(a, n);
                        if stereo == BondStereo::Down && !broken {
                            if self.left(n, parent, a)? {
                                sorted[1] = Some(n);
                            } else {
                                sorted[2] = Some(n);
                            }
                        }
                        if stereo == BondStereo::Up && !broken {
                            sorted[0] = Some(n);
                        }
                    }
                }
                BondStereo::Down => {
                    for &n in neighbors {
                        if n == parent {
                            continue;
                        }
                        let stereo = self.stereo(a, n);
                        let broken = self.broken(a, n);
                        if stereo == BondStereo::Up && !broken {
                            if self.left(n, parent, a)? {
                                sorted[0] = Some(n);
                            } else {
                                sorted[2] = Some(n);
                            }
                        }
                        if stereo == BondStereo::Down && !broken {
                            sorted[1] = Some(n);
                        }
                    }
                }
                _ => {}
            },
            3 => match parent_stereo {
                BondStereo::Up => {
                    let swept = self.sweep_by_angle(a, parent, neighbors)?;
                    for (i, n) in swept.into_iter().take(3).enumerate() {
                        sorted[i] = Some(n);
                    }
                }
                BondStereo::None => {
                    for &n in neighbors {
                        if n == parent {
                            continue;
                        }
                        let stereo = self.stereo(a, n);
                        let broken = self.broken(a, n);
                        if stereo == BondStereo::None && !broken {
                            if self.left(n, parent, a)? {
                                sorted[2] = Some(n);
                            } else {
                                sorted[1] = Some(n);
                            }
                        }
                        if stereo == BondStereo::Up && !broken {
                            sorted[0] = Some(n);
                        }
                    }
                }
                _ => {}
            },
            4 => match parent_stereo {
                BondStereo::Down => {
                    let swept = self.sweep_by_angle(a, parent, neighbors)?;
                    for (i, n) in swept.into_iter().take(3).enumerate() {
                        sorted[i] = Some(n);
                    }
                }
                BondStereo::None => {
                    for &n in neighbors {
                        if n == parent {
                            continue;
                        }
                        let stereo = self.stereo(a, n);
                        let broken = self.broken(a, n);
                        if stereo == BondStereo::None && !broken {
                            if self.left(n, parent, a)? {
                                sorted[2] = Some(n);
                            } else {
                                sorted[1] = Some(n);
                            }
                        }
                        if stereo == BondStereo::Down && !broken {
                            sorted[0] = Some(n);
                        }
                    }
                }
                _ => {}
            },
            _ => {}
        }
        Some(sorted)
    }

    /// Square-planar substituents are written in plain sweep order.
    fn square_planar_order(
        &self,
        a: NodeIndex,
        parent: NodeIndex,
        neighbors: &[NodeIndex],
    ) -> Option<Vec<Option<NodeIndex>>> {
        let mut sorted: Vec<Option<NodeIndex>> = vec![None; 3];
        let swept = self.sweep_by_angle(a, parent, neighbors)?;
        for (i, n) in swept.into_iter().take(3).enumerate() {
            sorted[i] = Some(n);
        }
        Some(sorted)
    }

    /// Trigonal-bipyramidal and octahedral centers: the wedge pair pins the
    /// axial positions, plain substituents fill the equator by angle.
    fn tbo_order(
        &self,
        a: NodeIndex,
        parent: NodeIndex,
        neighbors: &[NodeIndex],
    ) -> Option<Vec<Option<NodeIndex>>> {
        let m = neighbors.len() - 1;
        let mut sorted: Vec<Option<NodeIndex>> = vec![None; m];
        let pa = self.pos(a)?;
        let pp = self.pos(parent)?;
        let parent_stereo = self.stereo(a, parent);
        match parent_stereo {
            BondStereo::Up | BondStereo::Down => {
                let mut swept: Vec<(f64, NodeIndex)> = Vec::new();
                for &n in neighbors {
                    match self.stereo(a, n) {
                        BondStereo::None => {
                            swept.push((give_angle(pa, pp, self.pos(n)?), n));
                        }
                        BondStereo::Down if parent_stereo == BondStereo::Up => {
                            sorted[m - 1] = Some(n);
                        }
                        BondStereo::Up if parent_stereo == BondStereo::Down => {
                            sorted[m - 1] = Some(n);
                        }
                        _ => {}
                    }
                }
                swept.sort_by(|x, y| x.0.total_cmp(&y.0));
                for (i, (_, n)) in swept.into_iter().take(m - 1).enumerate() {
                    sorted[i] = Some(n);
                }
            }
            BondStereo::None => {
                let mut swept: Vec<(f64, NodeIndex)> = Vec::new();
                for &n in neighbors {
                    if n == parent {
                        continue;
                    }
                    match self.stereo(a, n) {
                        BondStereo::None => {
                            swept.push((give_angle_from_middle(pa, pp, self.pos(n)?), n));
                        }
                        BondStereo::Up => sorted[0] = Some(n),
                        BondStereo::Down => {
                            if let Some(slot) = sorted.get_mut(m - 2) {
                                *slot = Some(n);
                            }
                        }
                        BondStereo::Undefined => {}
                    }
                }
                swept.sort_by(|x, y| x.0.total_cmp(&y.0));
                let plain: Vec<NodeIndex> = swept.iter().map(|&(_, n)| n).collect();
                let last = *plain.last()?;
                sorted[m - 1] = Some(last);
                if plain.len() == 2 {
                    if let Some(slot) = sorted.get_mut(m - 3) {
                        *slot = Some(plain[0]);
                    }
                    if give_angle_from_middle(pa, pp, self.pos(plain[1])?) < 0.0 {
                        sorted.swap(m - 2, 0);
                    }
                } else if plain.len() == 3 {
                    sorted[m - 3] = sorted[m - 2];
                    sorted[m - 2] = Some(plain[1]);
                    if let Some(slot) = sorted.get_mut(m - 4) {
                        *slot = Some(plain[0]);
                    }
                }
            }
            BondStereo::Undefined => {}
        }
        Some(sorted)
    }
}

/// Whether `atom` terminates a configurable double bond coming from
/// `parent`: both ends trigonal, and the far substituents distinguishable.
pub(crate) fn is_end_of_double_bond(mol: &Molecule, atom: NodeIndex, parent: NodeIndex) -> bool {
    if mol.substituent_count(atom) != 3 || mol.substituent_count(parent) != 3 {
        return false;
    }
    match mol.bond_between(atom, parent) {
        Some(bond) if bond.order == BondOrder::Double => {}
        _ => return false,
    }
    let mut one: Option<NodeIndex> = None;
    let mut two: Option<NodeIndex> = None;
    for n in mol.neighbors(atom) {
        if n != parent {
            if one.is_none() {
                one = Some(n);
            } else {
                two = Some(n);
            }
        }
    }
    match (one, two) {
        (Some(one), Some(two)) => mol.atom(one).element != mol.atom(two).element,
        _ => true,
    }
}

/// Whether `atom` opens a configurable double bond toward one of its
/// non-parent neighbors.
pub(crate) fn is_begin_of_double_bond(
    mol: &Molecule,
    atom: NodeIndex,
    parent: Option<NodeIndex>,
) -> bool {
    if mol.substituent_count(atom) != 3 {
        return false;
    }
    let mut one: Option<NodeIndex> = None;
    let mut two: Option<NodeIndex> = None;
    let mut double_bond = false;
    for n in mol.neighbors(atom) {
        if Some(n) == parent {
            continue;
        }
        if let Some(bond) = mol.bond_between(n, atom) {
            if bond.order == BondOrder::Double && is_end_of_double_bond(mol, n, atom) {
                double_bond = true;
            }
        }
        if one.is_none() {
            one = Some(n);
        } else {
            two = Some(n);
        }
    }
    double_bond && one != two
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::Bond;

    fn center_with(
        substituents: &[(Element, f64, f64, BondStereo)],
    ) -> (Molecule, NodeIndex, Vec<NodeIndex>) {
        let mut mol = Molecule::new();
        let center = mol.add_atom(Atom::with_position(Element::C, 0.0, 0.0));
        let mut added = Vec::new();
        for &(element, x, y, stereo) in substituents {
            let n = mol.add_atom(Atom::with_position(element, x, y));
            mol.add_bond(center, n, Bond::with_stereo(BondOrder::Single, stereo));
            added.push(n);
        }
        (mol, center, added)
    }

    #[test]
    fn classifies_one_up_one_down_as_class_one() {
        let (mol, center, _) = center_with(&[
            (Element::N, 0.0, 1.0, BondStereo::Up),
            (Element::O, -1.0, 0.0, BondStereo::None),
            (Element::S, 1.0, 0.0, BondStereo::None),
            (Element::F, 0.0, -1.0, BondStereo::Down),
        ]);
        let closures = ClosureTable::default();
        let rings = RingSet::empty();
        let resolver = Resolver::new(&mol, &[], &rings, &closures);
        assert_eq!(resolver.tetrahedral_class(center), 1);
        assert!(!resolver.is_square_planar(center));
    }

    #[test]
    fn classifies_single_wedge_as_class_three_or_four() {
        let (mol, center, _) = center_with(&[
            (Element::N, 0.0, 1.0, BondStereo::Up),
            (Element::O, -1.0, 0.0, BondStereo::None),
            (Element::S, 1.0, 0.0, BondStereo::None),
            (Element::F, 0.0, -1.0, BondStereo::None),
        ]);
        let closures = ClosureTable::default();
        let rings = RingSet::empty();
        let resolver = Resolver::new(&mol, &[], &rings, &closures);
        assert_eq!(resolver.tetrahedral_class(center), 3);

        let (mol, center, _) = center_with(&[
            (Element::N, 0.0, 1.0, BondStereo::Down),
            (Element::O, -1.0, 0.0, BondStereo::None),
            (Element::S, 1.0, 0.0, BondStereo::None),
            (Element::F, 0.0, -1.0, BondStereo::None),
        ]);
        let resolver = Resolver::new(&mol, &[], &rings, &closures);
        assert_eq!(resolver.tetrahedral_class(center), 4);
    }

    #[test]
    fn adjacent_wedge_pairs_are_square_planar() {
        // up, up, down, down going around the center
        let (mol, center, _) = center_with(&[
            (Element::N, 0.0, 1.0, BondStereo::Up),
            (Element::F, 1.0, 0.0, BondStereo::Up),
            (Element::Br, 0.0, -1.0, BondStereo::Down),
            (Element::I, -1.0, 0.0, BondStereo::Down),
        ]);
        let closures = ClosureTable::default();
        let rings = RingSet::empty();
        let resolver = Resolver::new(&mol, &[], &rings, &closures);
        assert_eq!(resolver.tetrahedral_class(center), 0);
        assert!(resolver.is_square_planar(center));
    }

    #[test]
    fn five_coordinate_wedge_pair_is_tbo() {
        let (mol, center, _) = center_with(&[
            (Element::F, 0.0, 1.0, BondStereo::Up),
            (Element::O, 1.0, 0.0, BondStereo::None),
            (Element::N, -1.0, 0.0, BondStereo::None),
            (Element::S, 0.5, -0.5, BondStereo::None),
            (Element::Cl, 0.0, -1.0, BondStereo::Down),
        ]);
        let closures = ClosureTable::default();
        let rings = RingSet::empty();
        let resolver = Resolver::new(&mol, &[], &rings, &closures);
        assert!(resolver.is_trigonal_bipyramidal_or_octahedral(center));
        assert_eq!(resolver.tetrahedral_class(center), 0);
    }

    #[test]
    fn four_distinct_substituents_make_a_stereo_center() {
        let (mol, center, _) = center_with(&[
            (Element::N, 0.0, 1.0, BondStereo::Up),
            (Element::O, -1.0, 0.0, BondStereo::None),
            (Element::S, 1.0, 0.0, BondStereo::None),
            (Element::F, 0.0, -1.0, BondStereo::None),
        ]);
        let closures = ClosureTable::default();
        let rings = RingSet::empty();
        let resolver = Resolver::new(&mol, &[], &rings, &closures);
        assert!(resolver.is_stereo_center(center));
    }

    #[test]
    fn duplicate_substituents_need_distinct_invariants() {
        let (mol, center, added) = center_with(&[
            (Element::C, 0.0, 1.0, BondStereo::Up),
            (Element::C, -1.0, 0.0, BondStereo::None),
            (Element::O, 1.0, 0.0, BondStereo::None),
            (Element::F, 0.0, -1.0, BondStereo::None),
        ]);
        let closures = ClosureTable::default();
        let rings = RingSet::empty();

        // both carbons share an invariant: rejected
        let mut invariants = vec![0usize; mol.atom_count()];
        for (i, &n) in added.iter().enumerate() {
            invariants[n.index()] = i + 10;
        }
        invariants[added[1].index()] = invariants[added[0].index()];
        let resolver = Resolver::new(&mol, &invariants, &rings, &closures);
        assert!(!resolver.is_stereo_center(center));

        // distinct invariants rescue the center
        invariants[added[1].index()] = 99;
        let resolver = Resolver::new(&mol, &invariants, &rings, &closures);
        assert!(resolver.is_stereo_center(center));
    }

    #[test]
    fn ring_fusion_rescues_colliding_substituents() {
        // four identical carbons around the center, one wedge; normally
        // rejected, but a neighbor sharing two rings with the center keeps
        // the cis/trans information meaningful
        let (mol, center, added) = center_with(&[
            (Element::C, 0.0, 1.0, BondStereo::Up),
            (Element::C, -1.0, 0.0, BondStereo::None),
            (Element::C, 1.0, 0.0, BondStereo::None),
            (Element::C, 0.0, -1.0, BondStereo::None),
        ]);
        let closures = ClosureTable::default();

        let no_rings = RingSet::empty();
        let resolver = Resolver::new(&mol, &[], &no_rings, &closures);
        assert!(!resolver.is_stereo_center(center));

        let fused = RingSet::new(vec![
            vec![center, added[0], added[1]],
            vec![center, added[0], added[2]],
        ]);
        let resolver = Resolver::new(&mol, &[], &fused, &closures);
        assert!(resolver.is_stereo_center(center));
    }

    #[test]
    fn unmarked_center_is_never_stereo() {
        let (mol, center, _) = center_with(&[
            (Element::N, 0.0, 1.0, BondStereo::None),
            (Element::O, -1.0, 0.0, BondStereo::None),
            (Element::S, 1.0, 0.0, BondStereo::None),
            (Element::F, 0.0, -1.0, BondStereo::None),
        ]);
        let closures = ClosureTable::default();
        let rings = RingSet::empty();
        let resolver = Resolver::new(&mol, &[], &rings, &closures);
        assert!(!resolver.is_stereo_center(center));
    }

    #[test]
    fn trigonal_double_bond_ends_are_detected() {
        let mut mol = Molecule::new();
        let c1 = mol.add_atom(Atom::with_position(Element::C, 0.0, 0.0));
        let c2 = mol.add_atom(Atom::with_position(Element::C, 1.0, 1.0));
        let f1 = mol.add_atom(Atom::with_position(Element::F, -1.0, -0.5));
        let f2 = mol.add_atom(Atom::with_position(Element::F, 2.0, 1.5));
        mol.add_bond(c1, c2, Bond::new(BondOrder::Double));
        mol.add_bond(c1, f1, Bond::new(BondOrder::Single));
        mol.add_bond(c2, f2, Bond::new(BondOrder::Single));
        mol.atom_mut(c1).implicit_hydrogens = 1;
        mol.atom_mut(c2).implicit_hydrogens = 1;

        assert!(is_end_of_double_bond(&mol, c2, c1));
        assert!(is_begin_of_double_bond(&mol, c1, Some(f1)));
        // seen from the far side the bond opens at c2
        assert!(is_begin_of_double_bond(&mol, c2, Some(f2)));
    }

    #[test]
    fn saturated_bond_is_not_configurable() {
        let mut mol = Molecule::new();
        let c1 = mol.add_atom(Atom::with_position(Element::C, 0.0, 0.0));
        let c2 = mol.add_atom(Atom::with_position(Element::C, 1.0, 1.0));
        mol.add_bond(c1, c2, Bond::new(BondOrder::Single));
        mol.atom_mut(c1).implicit_hydrogens = 2;
        mol.atom_mut(c2).implicit_hydrogens = 2;

        assert!(!is_end_of_double_bond(&mol, c2, c1));
        assert!(!is_begin_of_double_bond(&mol, c1, None));
    }
}
