use std::fmt;

use crate::element::Element;

/// Geometry family of an extended chirality tag (`@TH1`, `@SP2`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChiralClass {
    /// Tetrahedral.
    TH,
    /// Allenal.
    AL,
    /// Square planar.
    SP,
    /// Trigonal bipyramidal.
    TB,
    /// Octahedral.
    OH,
}

impl ChiralClass {
    /// Largest permutation number the class defines.
    pub fn max_number(self) -> u8 {
        match self {
            Self::TH | Self::AL => 2,
            Self::SP => 3,
            Self::TB => 20,
            Self::OH => 30,
        }
    }
}

/// Stereo descriptor exactly as written in a bracket atom.
///
/// The parser records the token and its position in the neighbour order
/// implied by the input, but does not resolve it into a spatial arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chirality {
    /// No stereo descriptor.
    #[default]
    None,
    /// `@`: neighbours listed anticlockwise.
    Anticlockwise,
    /// `@@`: neighbours listed clockwise.
    Clockwise,
    /// `@TH1`, `@SP3`, `@OH12`, ...
    Class { class: ChiralClass, number: u8 },
}

/// What an atom node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomSymbol {
    Element(Element),
    /// `*`: unknown or unspecified atom (a pseudo atom).
    Wildcard,
}

impl AtomSymbol {
    pub fn element(self) -> Option<Element> {
        match self {
            Self::Element(e) => Some(e),
            Self::Wildcard => None,
        }
    }

    /// Atomic number, `0` for a wildcard.
    pub fn atomic_num(self) -> u8 {
        self.element().map_or(0, Element::atomic_num)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Element(e) => e.symbol(),
            Self::Wildcard => "*",
        }
    }
}

impl fmt::Display for AtomSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An atom of a parsed molecule.
///
/// Bare organic-subset atoms (`C`, `n`, `Cl`) carry default values for
/// every optional field; only bracket atoms (`[13CH3+:2]`) set isotope,
/// charge, explicit hydrogens, chirality or an atom-map number.
///
/// # Examples
///
/// ```
/// use smilegraph::{Atom, AtomSymbol, Element};
///
/// let carbon = Atom::new(Element::C);
/// assert_eq!(carbon.symbol, AtomSymbol::Element(Element::C));
/// assert_eq!(carbon.formal_charge, 0);
/// assert!(!carbon.is_bracket);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub symbol: AtomSymbol,
    /// Mass number. `None` means natural isotopic abundance.
    pub isotope: Option<u16>,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Number of hydrogens attached to this atom that are not graph nodes.
    ///
    /// For bracket atoms this is the written `H` count (0 when absent); for
    /// bare atoms it is derived from the default valence after
    /// kekulization.
    pub hydrogen_count: u8,
    /// Written in lowercase (`c`, `[nH]`). Kept after kekulization.
    pub is_aromatic: bool,
    /// Atom-map number (`[C:3]`), used to correlate atoms in reactions.
    pub atom_map: Option<u16>,
    pub chirality: Chirality,
    /// Produced by a bracket atom rather than a bare organic-subset atom.
    pub is_bracket: bool,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            symbol: AtomSymbol::Element(element),
            ..Self::default()
        }
    }

    pub fn wildcard() -> Self {
        Self {
            symbol: AtomSymbol::Wildcard,
            ..Self::default()
        }
    }

    pub fn element(&self) -> Option<Element> {
        self.symbol.element()
    }

    pub fn is_wildcard(&self) -> bool {
        self.symbol == AtomSymbol::Wildcard
    }
}

impl Default for Atom {
    fn default() -> Self {
        Self {
            symbol: AtomSymbol::Wildcard,
            isotope: None,
            formal_charge: 0,
            hydrogen_count: 0,
            is_aromatic: false,
            atom_map: None,
            chirality: Chirality::None,
            is_bracket: false,
        }
    }
}

impl crate::traits::HasSymbol for Atom {
    fn symbol(&self) -> AtomSymbol {
        self.symbol
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasIsotope for Atom {
    fn isotope(&self) -> Option<u16> {
        self.isotope
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasAromaticity for Atom {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}

impl crate::traits::HasChirality for Atom {
    fn chirality(&self) -> Chirality {
        self.chirality
    }
}

impl crate::traits::HasAtomMap for Atom {
    fn atom_map(&self) -> Option<u16> {
        self.atom_map
    }
}
