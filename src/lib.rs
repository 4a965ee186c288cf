//! Canonical SMILES serialization for molecular graphs.
//!
//! The crate turns a molecular graph plus a set of externally computed
//! oracles (canonical ranks, graph-invariant numbers, SSSR rings, an
//! aromaticity classifier) into a deterministic SMILES string. It does not
//! parse SMILES, perceive rings or aromaticity, or assign canonical ranks;
//! those are inputs supplied by the caller.

pub mod atom;
pub mod bond;
pub mod element;
pub mod error;
pub mod mol;
pub mod rings;
pub mod smiles;

pub use atom::Atom;
pub use bond::{Bond, BondOrder, BondStereo};
pub use element::Element;
pub use error::SmilesWriteError;
pub use mol::Molecule;
pub use rings::{AromaticAtoms, AromaticityModel, RingSet};
pub use smiles::{write_smiles, SmilesGenerator};
