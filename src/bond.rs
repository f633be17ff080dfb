/// Resolved bond multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Quadruple,
}

impl BondOrder {
    pub fn value(self) -> u8 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Quadruple => 4,
        }
    }

    pub fn from_value(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            4 => Some(Self::Quadruple),
            _ => None,
        }
    }
}

/// Directional single-bond marker (`/` and `\`), kept as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondStereo {
    #[default]
    None,
    /// `/`
    Up,
    /// `\`
    Down,
}

/// A bond of a fully parsed molecule.
///
/// `order` is always concrete. Bonds inside an aromatic system keep
/// `is_aromatic` alongside the Kekulé order chosen for them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bond {
    pub order: BondOrder,
    pub is_aromatic: bool,
    pub stereo: BondStereo,
}

impl crate::traits::HasBondOrder for Bond {
    fn bond_order(&self) -> BondOrder {
        self.order
    }
}

impl crate::traits::HasAromaticity for Bond {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}

/// Bond order as read from the input, before kekulization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SmilesBondOrder {
    Single,
    Double,
    Triple,
    Quadruple,
    /// Aromatic: to be resolved to single or double.
    Aromatic,
    /// No bond symbol between two atoms that are not both aromatic.
    #[default]
    Implicit,
}

impl SmilesBondOrder {
    /// Order contributed to the sigma framework before kekulization.
    pub fn sigma_value(self) -> u8 {
        match self {
            Self::Single | Self::Implicit | Self::Aromatic => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Quadruple => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SmilesBond {
    pub order: SmilesBondOrder,
    pub stereo: BondStereo,
}
