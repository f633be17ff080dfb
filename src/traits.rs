//! Read-only accessors for code that consumes parsed molecules without
//! depending on the concrete [`Atom`](crate::Atom) and [`Bond`](crate::Bond)
//! types, such as layout or isomorphism code.

use crate::atom::{AtomSymbol, Chirality};
use crate::bond::BondOrder;

pub trait HasSymbol {
    fn symbol(&self) -> AtomSymbol;
}

pub trait HasFormalCharge {
    fn formal_charge(&self) -> i8;
}

pub trait HasIsotope {
    fn isotope(&self) -> Option<u16>;
}

pub trait HasHydrogenCount {
    fn hydrogen_count(&self) -> u8;
}

pub trait HasAromaticity {
    fn is_aromatic(&self) -> bool;
}

pub trait HasChirality {
    fn chirality(&self) -> Chirality;
}

pub trait HasAtomMap {
    fn atom_map(&self) -> Option<u16>;
}

pub trait HasBondOrder {
    fn bond_order(&self) -> BondOrder;
}
