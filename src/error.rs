use thiserror::Error;

/// Errors produced when serializing a molecule to SMILES.
///
/// Internal stereo inconsistencies are not represented here: a stereocenter
/// whose required emission order cannot be satisfied degrades to non-stereo
/// output for that atom instead of failing the whole serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmilesWriteError {
    /// Chiral output was requested but an atom has no 2-D coordinates.
    #[error("atom {index} has no 2-D coordinates; chiral SMILES requires them")]
    MissingCoordinates { index: usize },
    /// No atom carries canonical rank 1, so the traversal has no start.
    #[error("no atom with canonical rank 1")]
    NoStartAtom,
}
