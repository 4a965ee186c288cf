use crate::element::Element;

/// One vertex of a molecular graph.
///
/// `Atom` carries only intrinsic, long-lived properties. Everything the
/// serializer needs per call (visited marks, stereo annotations) lives in
/// call-scoped side tables keyed by node index, never on the atom itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Mass number of the nuclide, `0` for natural isotopic abundance.
    pub isotope: u16,
    /// Suppressed hydrogens implied by valence. These are not graph nodes
    /// but they count toward the substituent totals used when classifying
    /// double-bond configurations.
    pub implicit_hydrogens: u8,
    /// 2-D depiction coordinates. Required on every atom for chiral output.
    pub position: Option<[f64; 2]>,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            formal_charge: 0,
            isotope: 0,
            implicit_hydrogens: 0,
            position: None,
        }
    }

    pub fn with_position(element: Element, x: f64, y: f64) -> Self {
        Self {
            position: Some([x, y]),
            ..Self::new(element)
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.element.symbol()
    }
}
