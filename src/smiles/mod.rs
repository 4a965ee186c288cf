//! SMILES serialization: spanning tree construction, stereo descriptor
//! resolution and token rendering.

mod geometry;
mod stereo;
mod tree;
mod writer;

pub use writer::{write_smiles, SmilesGenerator};
