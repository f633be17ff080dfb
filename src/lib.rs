pub mod atom;
pub mod bond;
pub mod element;
pub mod kekulize;
pub mod mol;
pub mod reaction;
pub mod rings;
pub mod smiles;
pub mod traits;
pub mod valence;

pub use atom::{Atom, AtomSymbol, ChiralClass, Chirality};
pub use bond::{Bond, BondOrder, BondStereo, SmilesBond, SmilesBondOrder};
pub use element::Element;
pub use kekulize::{kekulize, KekulizeError};
pub use mol::{Mol, MoleculeSet};
pub use reaction::{parse_reaction_smiles, AtomRef, Reaction, ReactionError, Section};
pub use rings::RingInfo;
pub use smiles::{
    parse_smiles, parse_structure, ErrorCategory, ParseOptions, SmilesError, SmilesParser,
    Structure,
};
pub use traits::{
    HasAromaticity, HasAtomMap, HasBondOrder, HasChirality, HasFormalCharge, HasHydrogenCount,
    HasIsotope, HasSymbol,
};
pub use valence::ValenceError;

#[cfg(test)]
mod tests;
