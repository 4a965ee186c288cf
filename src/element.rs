//! Chemical element reference data.
//!
//! The serializer needs three things from an element: its symbol, whether it
//! belongs to the organic subset that may be written without brackets, and
//! the mass number of its major isotope (to decide whether an isotope label
//! must be emitted). Exact masses are the CIAAW values for the most abundant
//! isotope of each element.

/// One of the 118 known chemical elements, discriminant = atomic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Element {
    H = 1,
    He = 2,
    Li = 3,
    Be = 4,
    B = 5,
    C = 6,
    N = 7,
    O = 8,
    F = 9,
    Ne = 10,
    Na = 11,
    Mg = 12,
    Al = 13,
    Si = 14,
    P = 15,
    S = 16,
    Cl = 17,
    Ar = 18,
    K = 19,
    Ca = 20,
    Sc = 21,
    Ti = 22,
    V = 23,
    Cr = 24,
    Mn = 25,
    Fe = 26,
    Co = 27,
    Ni = 28,
    Cu = 29,
    Zn = 30,
    Ga = 31,
    Ge = 32,
    As = 33,
    Se = 34,
    Br = 35,
    Kr = 36,
    Rb = 37,
    Sr = 38,
    Y = 39,
    Zr = 40,
    Nb = 41,
    Mo = 42,
    Tc = 43,
    Ru = 44,
    Rh = 45,
    Pd = 46,
    Ag = 47,
    Cd = 48,
    In = 49,
    Sn = 50,
    Sb = 51,
    Te = 52,
    I = 53,
    Xe = 54,
    Cs = 55,
    Ba = 56,
    La = 57,
    Ce = 58,
    Pr = 59,
    Nd = 60,
    Pm = 61,
    Sm = 62,
    Eu = 63,
    Gd = 64,
    Tb = 65,
    Dy = 66,
    Ho = 67,
    Er = 68,
    Tm = 69,
    Yb = 70,
    Lu = 71,
    Hf = 72,
    Ta = 73,
    W = 74,
    Re = 75,
    Os = 76,
    Ir = 77,
    Pt = 78,
    Au = 79,
    Hg = 80,
    Tl = 81,
    Pb = 82,
    Bi = 83,
    Po = 84,
    At = 85,
    Rn = 86,
    Fr = 87,
    Ra = 88,
    Ac = 89,
    Th = 90,
    Pa = 91,
    U = 92,
    Np = 93,
    Pu = 94,
    Am = 95,
    Cm = 96,
    Bk = 97,
    Cf = 98,
    Es = 99,
    Fm = 100,
    Md = 101,
    No = 102,
    Lr = 103,
    Rf = 104,
    Db = 105,
    Sg = 106,
    Bh = 107,
    Hs = 108,
    Mt = 109,
    Ds = 110,
    Rg = 111,
    Cn = 112,
    Nh = 113,
    Fl = 114,
    Mc = 115,
    Lv = 116,
    Ts = 117,
    Og = 118,
}

impl Element {
    pub fn from_atomic_num(n: u8) -> Option<Element> {
        if (1..=118).contains(&n) {
            // SAFETY: Element is repr(u8) with variants 1..=118, and we checked bounds.
            Some(unsafe { std::mem::transmute::<u8, Element>(n) })
        } else {
            None
        }
    }

    /// Case-sensitive symbol lookup, e.g. `"Cl"` but not `"CL"`.
    pub fn from_symbol(s: &str) -> Option<Element> {
        SYMBOLS
            .iter()
            .position(|&sym| sym == s)
            .and_then(|i| Element::from_atomic_num(i as u8 + 1))
    }

    pub fn atomic_num(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> &'static str {
        SYMBOLS[self as usize - 1]
    }

    /// Exact mass of the major (most abundant) isotope.
    pub fn exact_mass(self) -> f64 {
        EXACT_MASSES[self as usize - 1]
    }

    /// Mass number of the major isotope. An atom whose isotope label equals
    /// this value carries no mass information and is written without one.
    pub fn major_isotope(self) -> u16 {
        MAJOR_ISOTOPES[self as usize - 1]
    }

    /// The fixed set of elements SMILES allows outside brackets.
    pub fn is_organic_subset(self) -> bool {
        matches!(
            self,
            Element::B
                | Element::C
                | Element::N
                | Element::O
                | Element::P
                | Element::S
                | Element::F
                | Element::Cl
                | Element::Br
                | Element::I
        )
    }
}

static SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca",
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr",
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn",
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd",
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th",
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm",
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

// Exact masses of the most abundant isotopes (CIAAW).
static EXACT_MASSES: [f64; 118] = [
    1.00782503207,   // H-1
    4.00260325413,   // He-4
    7.0160034366,    // Li-7
    9.012183065,     // Be-9
    11.00930536,     // B-11
    12.0,            // C-12
    14.00307400443,  // N-14
    15.99491461957,  // O-16
    18.99840316273,  // F-19
    19.9924401762,   // Ne-20
    22.9897692820,   // Na-23
    23.985041697,    // Mg-24
    26.98153853,     // Al-27
    27.97692653465,  // Si-28
    30.97376199842,  // P-31
    31.9720711744,   // S-32
    34.96885268,     // Cl-35
    39.9623831237,   // Ar-40
    38.9637064864,   // K-39
    39.962590863,    // Ca-40
    44.95590828,     // Sc-45
    47.94794198,     // Ti-48
    50.94395704,     // V-51
    51.94050623,     // Cr-52
    54.93804391,     // Mn-55
    55.93493633,     // Fe-56
    58.93319429,     // Co-59
    57.93534241,     // Ni-58
    62.92959772,     // Cu-63
    63.92914201,     // Zn-64
    68.9255735,      // Ga-69
    73.921177761,    // Ge-74
    74.92159457,     // As-75
    79.9165218,      // Se-80
    78.9183376,      // Br-79
    83.9114977282,   // Kr-84
    84.9117897379,   // Rb-85
    87.9056125,      // Sr-88
    88.9058403,      // Y-89
    89.9046977,      // Zr-90
    92.9063730,      // Nb-93
    97.90540482,     // Mo-98
    96.9063667,      // Tc-97
    101.9043441,     // Ru-102
    102.905498,      // Rh-103
    105.903483,      // Pd-106
    106.905092,      // Ag-107
    113.903365,      // Cd-114
    114.903878776,   // In-115
    119.902202,      // Sn-120
    120.903812,      // Sb-121
    129.906222748,   // Te-130
    126.904473,      // I-127
    131.904155086,   // Xe-132
    132.905451961,   // Cs-133
    137.905247,      // Ba-138
    138.906353,      // La-139
    139.905439,      // Ce-140
    140.907657,      // Pr-141
    141.907729,      // Nd-142
    144.912756,      // Pm-145
    151.919739,      // Sm-152
    152.921238,      // Eu-153
    157.924112,      // Gd-158
    158.925354,      // Tb-159
    163.929181,      // Dy-164
    164.930328,      // Ho-165
    165.930299,      // Er-166
    168.934218,      // Tm-169
    173.938867,      // Yb-174
    174.940777,      // Lu-175
    179.946557,      // Hf-180
    180.947999,      // Ta-181
    183.950933,      // W-184
    186.955752,      // Re-187
    191.961477,      // Os-192
    192.962942,      // Ir-193
    195.965836,      // Pt-195
    196.966570,      // Au-197
    201.970644,      // Hg-202
    204.974427,      // Tl-205
    207.976653,      // Pb-208
    208.980399,      // Bi-209
    208.982430,      // Po-209
    209.987148,      // At-210
    222.017578,      // Rn-222
    223.019736,      // Fr-223
    226.025410,      // Ra-226
    227.027752,      // Ac-227
    232.038055,      // Th-232
    231.035884,      // Pa-231
    238.050788,      // U-238
    237.048174,      // Np-237
    244.064205,      // Pu-244
    243.061381,      // Am-243
    247.070354,      // Cm-247
    247.070307,      // Bk-247
    251.079587,      // Cf-251
    252.082980,      // Es-252
    257.095106,      // Fm-257
    258.098431,      // Md-258
    259.101030,      // No-259
    266.120,         // Lr-266
    267.122,         // Rf-267
    268.126,         // Db-268
    269.129,         // Sg-269
    270.133,         // Bh-270
    277.150,         // Hs-277
    278.156,         // Mt-278
    281.165,         // Ds-281
    282.169,         // Rg-282
    285.177,         // Cn-285
    286.183,         // Nh-286
    289.190,         // Fl-289
    290.196,         // Mc-290
    293.205,         // Lv-293
    294.211,         // Ts-294
    294.214,         // Og-294
];

// Mass numbers matching EXACT_MASSES entry for entry.
static MAJOR_ISOTOPES: [u16; 118] = [
    1, 4, 7, 9, 11, 12, 14, 16, 19, 20,
    23, 24, 27, 28, 31, 32, 35, 40, 39, 40,
    45, 48, 51, 52, 55, 56, 59, 58, 63, 64,
    69, 74, 75, 80, 79, 84, 85, 88, 89, 90,
    93, 98, 97, 102, 103, 106, 107, 114, 115, 120,
    121, 130, 127, 132, 133, 138, 139, 140, 141, 142,
    145, 152, 153, 158, 159, 164, 165, 166, 169, 174,
    175, 180, 181, 184, 187, 192, 193, 195, 197, 202,
    205, 208, 209, 209, 210, 222, 223, 226, 227, 232,
    231, 238, 237, 244, 243, 247, 247, 251, 252, 257,
    258, 259, 266, 267, 268, 269, 270, 277, 278, 281,
    282, 285, 286, 289, 290, 293, 294, 294,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_symbol_round_trips() {
        for n in 1..=118u8 {
            let e = Element::from_atomic_num(n).unwrap();
            assert_eq!(Element::from_symbol(e.symbol()), Some(e));
        }
        assert!(Element::from_symbol("").is_none());
        assert!(Element::from_symbol("he").is_none());
        assert!(Element::from_symbol("Xx").is_none());
    }

    #[test]
    fn from_atomic_num_bounds() {
        assert!(Element::from_atomic_num(0).is_none());
        assert!(Element::from_atomic_num(119).is_none());
        assert_eq!(Element::from_atomic_num(6), Some(Element::C));
    }

    #[test]
    fn organic_subset_membership() {
        for e in [
            Element::B,
            Element::C,
            Element::N,
            Element::O,
            Element::P,
            Element::S,
            Element::F,
            Element::Cl,
            Element::Br,
            Element::I,
        ] {
            assert!(e.is_organic_subset(), "{}", e.symbol());
        }
        assert!(!Element::H.is_organic_subset());
        assert!(!Element::Na.is_organic_subset());
        assert!(!Element::Fe.is_organic_subset());
    }

    #[test]
    fn major_isotope_spot_check() {
        assert_eq!(Element::C.major_isotope(), 12);
        assert_eq!(Element::Cl.major_isotope(), 35);
        assert_eq!(Element::Pt.major_isotope(), 195);
        assert!((Element::C.exact_mass() - 12.0).abs() < 1e-9);
        assert!((Element::O.exact_mass() - 15.99491461957).abs() < 1e-9);
    }
}
