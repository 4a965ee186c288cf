/// Bond multiplicity.
///
/// SMILES can only express single, double and triple bonds. `Quadruple`
/// exists so that graphs containing one can still be serialized: the writer
/// logs the anomaly and emits no bond token for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Quadruple,
}

/// Wedge direction of a bond in a 2-D depiction.
///
/// `Undefined` is a drawn-but-unspecified wedge. It counts as a plain bond
/// when tallying up/down markers around a candidate stereocenter, but it is
/// not interchangeable with `None` in the neighbor-ordering tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondStereo {
    #[default]
    None,
    Up,
    Down,
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bond {
    pub order: BondOrder,
    pub stereo: BondStereo,
}

impl Bond {
    pub fn new(order: BondOrder) -> Self {
        Self {
            order,
            stereo: BondStereo::None,
        }
    }

    pub fn with_stereo(order: BondOrder, stereo: BondStereo) -> Self {
        Self { order, stereo }
    }
}
