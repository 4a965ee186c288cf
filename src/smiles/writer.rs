//! Token rendering and the public serialization entry points.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::BondOrder;
use crate::error::SmilesWriteError;
use crate::mol::Molecule;
use crate::rings::{AromaticAtoms, AromaticityModel, RingSet};

use super::geometry::is_left;
use super::stereo::{is_begin_of_double_bond, is_end_of_double_bond, Resolver, StereoTag};
use super::tree::{self, ClosureTable, Node, SpanningTree};

/// Serializes one molecule to SMILES using caller-supplied canonical ranks.
///
/// Ranks are unique and 1-based; the rank-1 atom starts the traversal.
/// Invariants are non-unique connectivity numbers consulted only when
/// stereocenter substituents collide by element symbol. Rings and the
/// aromaticity oracle come from outside; the generator only adapts them.
pub struct SmilesGenerator<'a> {
    mol: &'a Molecule,
    ranks: &'a [usize],
    invariants: &'a [usize],
    rings: &'a RingSet,
    aromatic: AromaticAtoms,
}

impl<'a> SmilesGenerator<'a> {
    pub fn new(
        mol: &'a Molecule,
        ranks: &'a [usize],
        invariants: &'a [usize],
        rings: &'a RingSet,
        model: &dyn AromaticityModel,
    ) -> Self {
        let aromatic = AromaticAtoms::classify(mol, rings, model);
        Self {
            mol,
            ranks,
            invariants,
            rings,
            aromatic,
        }
    }

    /// Runs one serialization. `chiral` turns wedge annotations and 2-D
    /// coordinates into `@` tags; `double_bond_stereo` independently enables
    /// `/` and `\` cis/trans markers. Only chiral calls require coordinates
    /// up front; the marker pass skips an atom without them.
    pub fn generate(
        &self,
        chiral: bool,
        double_bond_stereo: bool,
    ) -> Result<String, SmilesWriteError> {
        if self.mol.atom_count() == 0 {
            return Ok(String::new());
        }
        if chiral {
            for idx in self.mol.atoms() {
                if self.mol.atom(idx).position.is_none() {
                    return Err(SmilesWriteError::MissingCoordinates { index: idx.index() });
                }
            }
        }

        let SpanningTree { mut root, closures } = tree::build(self.mol, self.ranks)?;
        let tags = if chiral {
            Resolver::new(self.mol, self.invariants, self.rings, &closures).annotate(&mut root)
        } else {
            HashMap::new()
        };

        let ctx = RenderCtx {
            mol: self.mol,
            aromatic: &self.aromatic,
            closures: &closures,
            tags: &tags,
            double_bond_stereo,
        };
        let mut out = String::new();
        let mut pending = Vec::new();
        ctx.render_sequence(&root, None, &mut out, &mut pending);
        Ok(out)
    }
}

/// Non-chiral SMILES for a molecule with precomputed ranks. Serialization
/// without stereo cannot fail, so an unusable rank table yields `""`.
pub fn write_smiles(
    mol: &Molecule,
    ranks: &[usize],
    rings: &RingSet,
    model: &dyn AromaticityModel,
) -> String {
    SmilesGenerator::new(mol, ranks, &[], rings, model)
        .generate(false, false)
        .unwrap_or_default()
}

/// A cis/trans marker whose emission waits until the branch holding the
/// reference substituent has closed.
struct PendingMarker {
    view_from: NodeIndex,
    position: usize,
}

struct RenderCtx<'a> {
    mol: &'a Molecule,
    aromatic: &'a AromaticAtoms,
    closures: &'a ClosureTable,
    tags: &'a HashMap<NodeIndex, StereoTag>,
    double_bond_stereo: bool,
}

impl RenderCtx<'_> {
    fn render_sequence(
        &self,
        seq: &[Node],
        mut parent: Option<NodeIndex>,
        out: &mut String,
        pending: &mut Vec<PendingMarker>,
    ) {
        for (h, node) in seq.iter().enumerate() {
            match node {
                Node::Leaf(a) => {
                    let a = *a;
                    if let Some(p) = parent {
                        self.write_bond(p, a, out);
                    }
                    self.write_atom(a, parent, out);
                    if self.double_bond_stereo {
                        if let Some(p) = parent {
                            if is_end_of_double_bond(self.mol, a, p) {
                                self.emit_end_marker(seq, h, a, p, out, pending);
                            }
                        }
                    }
                    parent = Some(a);
                }
                Node::Branch(inner) => {
                    // a ring-opening parent below tetravalence reads the same
                    // without the parentheses
                    let parens = !parent
                        .is_some_and(|p| self.closures.has_any(p) && self.mol.degree(p) < 4);
                    if parens {
                        out.push('(');
                    }
                    self.render_sequence(inner, parent, out, pending);
                    if parens {
                        out.push(')');
                    }
                    if self.double_bond_stereo {
                        if let Some(marker) = pending.pop() {
                            if marker.position == h {
                                self.emit_deferred_marker(seq, h, parent, marker.view_from, out);
                            } else {
                                pending.push(marker);
                            }
                        }
                    }
                }
            }
        }
    }

    fn write_bond(&self, from: NodeIndex, to: NodeIndex, out: &mut String) {
        if self.aromatic.contains(from) && self.aromatic.contains(to) {
            return;
        }
        let Some(bond) = self.mol.bond_between(from, to) else {
            return;
        };
        match bond.order {
            BondOrder::Single => {}
            BondOrder::Double => out.push('='),
            BondOrder::Triple => out.push('#'),
            BondOrder::Quadruple => {
                log::warn!(
                    "bond between atoms {} and {} has no SMILES token, omitting it",
                    from.index(),
                    to.index()
                );
            }
        }
    }

    fn write_atom(&self, a: NodeIndex, parent: Option<NodeIndex>, out: &mut String) {
        let atom = self.mol.atom(a);
        let tag = self.tags.get(&a).copied();

        if self.double_bond_stereo && is_begin_of_double_bond(self.mol, a, parent) {
            out.push('/');
        }

        let mass = mass_label(atom);
        let charge = charge_label(atom.formal_charge);
        let brackets =
            !atom.element.is_organic_subset() || !mass.is_empty() || !charge.is_empty() || tag.is_some();

        if brackets {
            out.push('[');
        }
        out.push_str(&mass);
        if self.aromatic.contains(a) {
            for c in atom.symbol().chars() {
                out.push(c.to_ascii_lowercase());
            }
        } else {
            out.push_str(atom.symbol());
        }
        match tag {
            Some(StereoTag::At) => out.push('@'),
            Some(StereoTag::AtSp1) => out.push_str("@SP1"),
            None => {}
        }
        out.push_str(&charge);
        if brackets {
            out.push(']');
        }

        for marker in self.closures.markers_for(a) {
            write_ring_digit(marker, out);
        }
    }

    /// Marker for a double bond that ends at `atom`. If the partner
    /// substituent opens a branch right after, the decision is parked on the
    /// stack until that branch closes.
    fn emit_end_marker(
        &self,
        seq: &[Node],
        h: usize,
        atom: NodeIndex,
        parent: NodeIndex,
        out: &mut String,
        pending: &mut Vec<PendingMarker>,
    ) {
        match seq.get(h + 1) {
            Some(Node::Branch(_)) => {
                let Some(view_from) = h
                    .checked_sub(1)
                    .and_then(|i| seq.get(i))
                    .and_then(Node::head)
                else {
                    return;
                };
                pending.push(PendingMarker {
                    view_from,
                    position: h + 1,
                });
            }
            Some(Node::Leaf(next)) => {
                let Some(view_from) = h
                    .checked_sub(2)
                    .and_then(|i| seq.get(i))
                    .and_then(Node::head)
                else {
                    return;
                };
                let (Some(pv), Some(pa), Some(pp), Some(pn)) = (
                    self.mol.atom(view_from).position,
                    self.mol.atom(atom).position,
                    self.mol.atom(parent).position,
                    self.mol.atom(*next).position,
                ) else {
                    return;
                };
                let old_side = is_left(pv, pa, pp);
                let new_side = is_left(pn, pp, pa);
                out.push(if old_side == new_side { '\\' } else { '/' });
            }
            None => {}
        }
    }

    /// Emits a parked marker once the branch at `h` has closed. The double
    /// bond in question runs from the common neighbor of `parent` and the
    /// parked reference atom to `parent` itself.
    fn emit_deferred_marker(
        &self,
        seq: &[Node],
        h: usize,
        parent: Option<NodeIndex>,
        view_from: NodeIndex,
        out: &mut String,
    ) {
        let Some(parent) = parent else { return };
        let Some(between) = self.mol.common_neighbor(parent, view_from) else {
            return;
        };
        let Some(next) = seq.get(h + 1).and_then(Node::head) else {
            return;
        };
        let (Some(pv), Some(pp), Some(pb), Some(pn)) = (
            self.mol.atom(view_from).position,
            self.mol.atom(parent).position,
            self.mol.atom(between).position,
            self.mol.atom(next).position,
        ) else {
            return;
        };
        let old_side = is_left(pv, pp, pb);
        let new_side = is_left(pn, pb, pp);
        out.push(if old_side == new_side { '/' } else { '\\' });
    }
}

fn mass_label(atom: &Atom) -> String {
    if atom.isotope != 0 && atom.isotope != atom.element.major_isotope() {
        atom.isotope.to_string()
    } else {
        String::new()
    }
}

fn charge_label(charge: i8) -> String {
    let mut label = String::new();
    if charge > 0 {
        label.push('+');
        if charge > 1 {
            label.push_str(&charge.to_string());
        }
    } else if charge == -1 {
        label.push('-');
    } else if charge < 0 {
        label.push_str(&charge.to_string());
    }
    label
}

fn write_ring_digit(marker: usize, out: &mut String) {
    assert!(marker <= 99, "ring closure markers above 99 are not writable");
    if marker > 9 {
        out.push('%');
    }
    out.push_str(&marker.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::{Bond, BondStereo};
    use crate::element::Element;

    fn never_aromatic(_: &Molecule, _: &[NodeIndex]) -> bool {
        false
    }

    fn plain(mol: &Molecule, ranks: &[usize]) -> String {
        let rings = RingSet::empty();
        write_smiles(mol, ranks, &rings, &never_aromatic)
    }

    #[test]
    fn single_organic_atom_is_bare() {
        let mut mol = Molecule::new();
        mol.add_atom(Atom::new(Element::C));
        assert_eq!(plain(&mol, &[1]), "C");
    }

    #[test]
    fn non_organic_atom_gets_brackets() {
        let mut mol = Molecule::new();
        mol.add_atom(Atom::new(Element::Fe));
        assert_eq!(plain(&mol, &[1]), "[Fe]");
    }

    #[test]
    fn bond_tokens() {
        for (order, expected) in [
            (BondOrder::Single, "CC"),
            (BondOrder::Double, "C=C"),
            (BondOrder::Triple, "C#C"),
            (BondOrder::Quadruple, "CC"),
        ] {
            let mut mol = Molecule::new();
            let a = mol.add_atom(Atom::new(Element::C));
            let b = mol.add_atom(Atom::new(Element::C));
            mol.add_bond(a, b, Bond::new(order));
            assert_eq!(plain(&mol, &[1, 2]), expected);
        }
    }

    #[test]
    fn charge_labels() {
        let cases: [(i8, &str); 5] = [
            (1, "[N+]"),
            (2, "[N+2]"),
            (-1, "[N-]"),
            (-3, "[N-3]"),
            (0, "N"),
        ];
        for (charge, expected) in cases {
            let mut mol = Molecule::new();
            let n = mol.add_atom(Atom::new(Element::N));
            mol.atom_mut(n).formal_charge = charge;
            assert_eq!(plain(&mol, &[1]), expected);
        }
    }

    #[test]
    fn isotopes_differing_from_the_major_one_are_written() {
        let mut mol = Molecule::new();
        let c = mol.add_atom(Atom::new(Element::C));
        mol.atom_mut(c).isotope = 13;
        assert_eq!(plain(&mol, &[1]), "[13C]");

        // the major isotope is the implied default
        mol.atom_mut(c).isotope = 12;
        assert_eq!(plain(&mol, &[1]), "C");
    }

    #[test]
    fn empty_molecule_serializes_to_empty_string() {
        let mol = Molecule::new();
        assert_eq!(plain(&mol, &[]), "");
    }

    #[test]
    fn ring_digit_formats() {
        let mut out = String::new();
        write_ring_digit(7, &mut out);
        write_ring_digit(12, &mut out);
        assert_eq!(out, "7%12");
    }

    #[test]
    fn aromatic_ring_lowercases_and_drops_bond_tokens() {
        let mut mol = Molecule::new();
        let atoms: Vec<NodeIndex> = (0..6).map(|_| mol.add_atom(Atom::new(Element::C))).collect();
        for i in 0..6 {
            let order = if i % 2 == 0 {
                BondOrder::Double
            } else {
                BondOrder::Single
            };
            mol.add_bond(atoms[i], atoms[(i + 1) % 6], Bond::new(order));
        }
        let rings = RingSet::new(vec![atoms]);
        let smiles = write_smiles(
            &mol,
            &[1, 2, 3, 4, 5, 6],
            &rings,
            &|_: &Molecule, _: &[NodeIndex]| true,
        );
        assert_eq!(smiles, "c1ccccc1");
    }

    #[test]
    fn plain_ring_keeps_digits_and_uppercase() {
        let mut mol = Molecule::new();
        let atoms: Vec<NodeIndex> = (0..4).map(|_| mol.add_atom(Atom::new(Element::C))).collect();
        for i in 0..4 {
            mol.add_bond(atoms[i], atoms[(i + 1) % 4], Bond::new(BondOrder::Single));
        }
        assert_eq!(plain(&mol, &[1, 2, 3, 4]), "C1CCC1");
    }

    #[test]
    fn missing_coordinates_fail_only_chiral_output() {
        let mut mol = Molecule::new();
        let c = mol.add_atom(Atom::new(Element::C));
        let o = mol.add_atom(Atom::with_position(Element::O, 1.0, 0.0));
        mol.add_bond(c, o, Bond::new(BondOrder::Single));
        let rings = RingSet::empty();
        let generator = SmilesGenerator::new(&mol, &[1, 2], &[], &rings, &never_aromatic);

        assert_eq!(generator.generate(false, false), Ok("CO".to_string()));
        assert_eq!(
            generator.generate(true, false),
            Err(SmilesWriteError::MissingCoordinates { index: 0 })
        );
    }

    #[test]
    fn wedges_are_ignored_without_chiral_output() {
        let mut mol = Molecule::new();
        let c = mol.add_atom(Atom::with_position(Element::C, 0.0, 0.0));
        let subs = [
            (Element::F, 0.0, 1.0, BondStereo::Up),
            (Element::Cl, -1.0, 0.0, BondStereo::None),
            (Element::Br, 0.0, -1.0, BondStereo::None),
            (Element::I, 1.0, 0.0, BondStereo::None),
        ];
        for (element, x, y, stereo) in subs {
            let n = mol.add_atom(Atom::with_position(element, x, y));
            mol.add_bond(c, n, Bond::with_stereo(BondOrder::Single, stereo));
        }
        assert_eq!(plain(&mol, &[2, 1, 3, 4, 5]), "FC(Cl)(Br)I");
    }
}
