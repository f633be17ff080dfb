pub mod error;
mod parser;

use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;

pub use error::{ReactionError, Section};
pub(crate) use parser::parse_reaction_with;

use crate::mol::MoleculeSet;
use crate::smiles::SmilesParser;

/// `reactants>agents>products`, each side a set of independent molecules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reaction {
    pub reactants: MoleculeSet,
    pub agents: MoleculeSet,
    pub products: MoleculeSet,
}

/// An atom located inside one side of a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomRef {
    pub molecule: usize,
    pub atom: NodeIndex,
}

impl Reaction {
    /// Pairs of reactant and product atoms that carry the same nonzero
    /// atom-map number, ordered by that number. When a number repeats on
    /// one side the first occurrence is used.
    pub fn atom_mapping(&self) -> Vec<(AtomRef, AtomRef)> {
        let reactant_maps = map_numbers(&self.reactants);
        let product_maps = map_numbers(&self.products);
        reactant_maps
            .iter()
            .filter_map(|(map, &r)| product_maps.get(map).map(|&p| (r, p)))
            .collect()
    }
}

fn map_numbers(set: &MoleculeSet) -> BTreeMap<u16, AtomRef> {
    let mut maps = BTreeMap::new();
    for (molecule, mol) in set.iter().enumerate() {
        for atom in mol.atoms() {
            match mol.atom(atom).atom_map {
                Some(0) | None => {}
                Some(map) => {
                    maps.entry(map).or_insert(AtomRef { molecule, atom });
                }
            }
        }
    }
    maps
}

/// Parses `reactants>agents>products` with default options. Any segment may
/// be empty.
pub fn parse_reaction_smiles(s: &str) -> Result<Reaction, ReactionError> {
    SmilesParser::default().parse_reaction(s)
}
